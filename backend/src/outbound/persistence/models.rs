//! Internal Diesel row structs for the `users` table.
//!
//! These types never leave the persistence layer.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::users;
use crate::domain::{
    Address, PersonName, User, UserId, UserProfile, UserValidationError, Username,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_country: Option<String>,
    pub address_city: Option<String>,
    pub address_street_name: Option<String>,
    pub address_street_address: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let profile = UserProfile::new(
            Username::new(row.username)?,
            PersonName::first(row.firstname)?,
            PersonName::last(row.lastname)?,
        )
        .with_email(row.email)
        .with_avatar(row.avatar)
        .with_phone(row.phone)
        .with_date_of_birth(row.date_of_birth)
        .with_address(Address {
            country: row.address_country,
            city: row.address_city,
            street_name: row.address_street_name,
            street_address: row.address_street_address,
        });
        Ok(User::new(UserId::new(row.id)?, profile))
    }
}

/// Every writable column, used for both insert and full replacement.
///
/// `treat_none_as_null` makes an update clear columns the new profile leaves
/// out instead of skipping them.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChangeset<'a> {
    pub username: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub date_of_birth: Option<NaiveDate>,
    pub address_country: Option<&'a str>,
    pub address_city: Option<&'a str>,
    pub address_street_name: Option<&'a str>,
    pub address_street_address: Option<&'a str>,
}

impl<'a> From<&'a UserProfile> for UserChangeset<'a> {
    fn from(profile: &'a UserProfile) -> Self {
        let address = profile.address();
        Self {
            username: profile.username().as_str(),
            firstname: profile.first_name().as_str(),
            lastname: profile.last_name().as_str(),
            email: profile.email(),
            avatar: profile.avatar(),
            phone: profile.phone(),
            date_of_birth: profile.date_of_birth(),
            address_country: address.country.as_deref(),
            address_city: address.city.as_deref(),
            address_street_name: address.street_name.as_deref(),
            address_street_address: address.street_address.as_deref(),
        }
    }
}
