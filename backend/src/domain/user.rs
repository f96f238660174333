//! User data model.
//!
//! A [`User`] is a store-assigned [`UserId`] plus a [`UserProfile`]. Profiles
//! are the unit of create and full-replacement update: every field is
//! resupplied and anything absent is cleared.

use std::fmt;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Validation errors raised while building user values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// First name was missing or blank.
    #[error("firstname must not be empty")]
    EmptyFirstName,
    /// Last name was missing or blank.
    #[error("lastname must not be empty")]
    EmptyLastName,
    /// Date of birth lies after today.
    #[error("date_of_birth must not be in the future")]
    DateOfBirthInFuture,
    /// Identifier was zero or negative.
    #[error("user id must be a positive integer")]
    InvalidId,
}

impl UserValidationError {
    /// Wire name of the field the error refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyFirstName => "firstname",
            Self::EmptyLastName => "lastname",
            Self::DateOfBirthInFuture => "date_of_birth",
            Self::InvalidId => "id",
        }
    }

    /// Stable reason code carried in error details.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::EmptyFirstName | Self::EmptyLastName => "required",
            Self::DateOfBirthInFuture => "future_date",
            Self::InvalidId => "invalid_id",
        }
    }
}

impl From<UserValidationError> for Error {
    fn from(value: UserValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Store-assigned user identifier.
///
/// # Examples
/// ```
/// use user_registry::domain::UserId;
///
/// assert!(UserId::new(7).is_ok());
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i64) -> Result<Self, UserValidationError> {
        if raw <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique login-style handle. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(value))
    }

    /// Borrow the handle as text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A first or last name. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a first name.
    pub fn first(value: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::non_blank(value.into(), UserValidationError::EmptyFirstName)
    }

    /// Validate a last name.
    pub fn last(value: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::non_blank(value.into(), UserValidationError::EmptyLastName)
    }

    fn non_blank(value: String, error: UserValidationError) -> Result<Self, UserValidationError> {
        if value.trim().is_empty() {
            return Err(error);
        }
        Ok(Self(value))
    }

    /// The name as supplied.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Empty strings carry no information; store them as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Country name.
    pub country: Option<String>,
    /// City or town.
    pub city: Option<String>,
    /// Street name without the house number.
    pub street_name: Option<String>,
    /// House number and street line.
    pub street_address: Option<String>,
}

impl Address {
    fn normalised(self) -> Self {
        Self {
            country: optional_text(self.country),
            city: optional_text(self.city),
            street_name: optional_text(self.street_name),
            street_address: optional_text(self.street_address),
        }
    }
}

/// Every user attribute except the identifier.
///
/// Optional text fields never hold an empty string; the builder methods fold
/// `Some("")` into `None`.
///
/// # Examples
/// ```
/// use user_registry::domain::{PersonName, UserProfile, Username};
///
/// let profile = UserProfile::new(
///     Username::new("ada").unwrap(),
///     PersonName::first("Ada").unwrap(),
///     PersonName::last("Lovelace").unwrap(),
/// )
/// .with_email(Some(String::new()));
/// assert!(profile.email().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    email: Option<String>,
    avatar: Option<String>,
    phone: Option<String>,
    date_of_birth: Option<NaiveDate>,
    address: Address,
}

impl UserProfile {
    /// Start a profile from the required fields; everything optional is unset.
    pub fn new(username: Username, first_name: PersonName, last_name: PersonName) -> Self {
        Self {
            username,
            first_name,
            last_name,
            email: None,
            avatar: None,
            phone: None,
            date_of_birth: None,
            address: Address::default(),
        }
    }

    /// Set or clear the email address.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = optional_text(email);
        self
    }

    /// Set or clear the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = optional_text(avatar);
        self
    }

    /// Set or clear the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: Option<String>) -> Self {
        self.phone = optional_text(phone);
        self
    }

    /// Set or clear the date of birth. Not checked against the clock here.
    #[must_use]
    pub fn with_date_of_birth(mut self, date_of_birth: Option<NaiveDate>) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    /// Replace the address, dropping empty parts.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address.normalised();
        self
    }

    /// Unique handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Given name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Email address, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Avatar URL, if any.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Phone number, if any.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Date of birth, if known.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    /// Postal address; all parts may be absent.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Reject a date of birth later than `today`.
    ///
    /// A birthday falling on `today` itself is accepted.
    pub fn ensure_born_by(&self, today: NaiveDate) -> Result<(), UserValidationError> {
        match self.date_of_birth {
            Some(date) if date > today => Err(UserValidationError::DateOfBirthInFuture),
            _ => Ok(()),
        }
    }
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
}

impl User {
    /// Pair a stored identifier with its profile.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Attributes other than the identifier.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Drop the identifier and keep the profile.
    pub fn into_profile(self) -> UserProfile {
        self.profile
    }
}
