//! Macro for declaring port error enums.
//!
//! Every variant carries named fields and a display template. The macro
//! derives `thiserror::Error` and adds one snake_case constructor per variant
//! whose parameters accept anything convertible into the field types:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Query { message: String } => "query failed: {message}",
//!     }
//! }
//!
//! let error = StoreError::query("timeout");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SampleError {
            Connection { message: String } => "connection failed: {message}",
            Conflict { field: String, value: String } => "{field} {value} taken",
        }
    }

    #[test]
    fn constructors_accept_convertible_values() {
        assert_eq!(
            SampleError::connection("refused"),
            SampleError::Connection {
                message: "refused".to_owned()
            }
        );
        assert_eq!(
            SampleError::conflict("email", String::from("a@b.c")).to_string(),
            "email a@b.c taken"
        );
    }
}
