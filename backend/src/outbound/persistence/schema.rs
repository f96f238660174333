//! Diesel table definitions.
//!
//! Kept in step with the DDL in `schema_bootstrap.rs`.

diesel::table! {
    users (id) {
        id -> Int8,
        username -> Text,
        firstname -> Text,
        lastname -> Text,
        email -> Nullable<Text>,
        avatar -> Nullable<Text>,
        phone -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
        address_country -> Nullable<Text>,
        address_city -> Nullable<Text>,
        address_street_name -> Nullable<Text>,
        address_street_address -> Nullable<Text>,
    }
}
