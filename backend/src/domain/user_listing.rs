//! Filter and ordering parameters for listing users.
//!
//! Sort columns and directions arrive as caller-supplied text. They are
//! parsed into closed enums here so nothing but a known column can reach the
//! query builder.

use std::fmt;
use std::str::FromStr;

use serde_json::json;

use super::user::optional_text;
use crate::domain::Error;

/// Errors raised when parsing listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserListingError {
    /// `sort_by` named a column that cannot be sorted on.
    #[error("sort_by must be one of: {allowed}")]
    UnknownSortField { value: String, allowed: String },
    /// `sort_order` was neither `asc` nor `desc`.
    #[error("sort_order must be asc or desc")]
    UnknownSortDirection { value: String },
}

impl UserListingError {
    /// Query parameter the error refers to.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::UnknownSortField { .. } => "sort_by",
            Self::UnknownSortDirection { .. } => "sort_order",
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        match self {
            Self::UnknownSortField { value, .. } | Self::UnknownSortDirection { value } => value,
        }
    }
}

impl From<UserListingError> for Error {
    fn from(value: UserListingError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.parameter(),
            "value": value.value(),
            "code": "unsupported_value",
        }))
    }
}

/// Exact-match constraints. `None` leaves a column unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Match on username.
    pub username: Option<String>,
    /// Match on email address.
    pub email: Option<String>,
    /// Match on first name.
    pub first_name: Option<String>,
    /// Match on last name.
    pub last_name: Option<String>,
    /// Match on the address country.
    pub address_country: Option<String>,
}

impl UserFilter {
    /// Drop empty values, which mean "not constrained".
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            username: optional_text(self.username),
            email: optional_text(self.email),
            first_name: optional_text(self.first_name),
            last_name: optional_text(self.last_name),
            address_country: optional_text(self.address_country),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Column a listing may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    #[default]
    /// `id`
    Id,
    /// `username`
    Username,
    /// `firstname`
    FirstName,
    /// `lastname`
    LastName,
    /// `email`
    Email,
    /// `avatar`
    Avatar,
    /// `phone`
    Phone,
    /// `date_of_birth`
    DateOfBirth,
    /// `address_country`
    AddressCountry,
    /// `address_city`
    AddressCity,
    /// `address_street_name`
    AddressStreetName,
    /// `address_street_address`
    AddressStreetAddress,
}

impl SortField {
    /// Every sortable column, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Id,
        Self::Username,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Avatar,
        Self::Phone,
        Self::DateOfBirth,
        Self::AddressCountry,
        Self::AddressCity,
        Self::AddressStreetName,
        Self::AddressStreetAddress,
    ];

    /// Column name as exposed over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Username => "username",
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::Avatar => "avatar",
            Self::Phone => "phone",
            Self::DateOfBirth => "date_of_birth",
            Self::AddressCountry => "address_country",
            Self::AddressCity => "address_city",
            Self::AddressStreetName => "address_street_name",
            Self::AddressStreetAddress => "address_street_address",
        }
    }

    fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = UserListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UserListingError::UnknownSortField {
                value: s.to_owned(),
                allowed: Self::allowed(),
            })
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Wire spelling, `asc` or `desc`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = UserListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if wanted.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(UserListingError::UnknownSortDirection {
                value: s.to_owned(),
            })
        }
    }
}

/// A complete listing request.
///
/// Results are ordered by `sort_by` in `direction`, then by id ascending.
///
/// # Examples
/// ```
/// use user_registry::domain::{SortDirection, SortField, UserListQuery};
///
/// let query = UserListQuery::parse(Default::default(), Some("username"), Some("DESC")).unwrap();
/// assert_eq!(query.sort_by, SortField::Username);
/// assert_eq!(query.direction, SortDirection::Descending);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    /// Rows to keep.
    pub filter: UserFilter,
    /// Primary sort column.
    pub sort_by: SortField,
    /// Direction applied to `sort_by`.
    pub direction: SortDirection,
}

impl UserListQuery {
    /// Build a query from raw parameters; blank sort values fall back to the
    /// defaults.
    pub fn parse(
        filter: UserFilter,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Self, UserListingError> {
        let sort_by = match sort_by.filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => SortField::default(),
        };
        let direction = match direction.filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse()?,
            None => SortDirection::default(),
        };
        Ok(Self {
            filter: filter.normalised(),
            sort_by,
            direction,
        })
    }
}
