//! Driving port for user mutations.
//!
//! HTTP handlers call this port to create, replace and delete users without
//! depending on the persistence adapter.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserProfile};

/// Result of a delete request.
///
/// Deleting an identifier with no row is not an error; callers that care can
/// tell the cases apart through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A row was removed.
    Deleted,
    /// No row had that identifier.
    AlreadyAbsent,
}

/// Domain use-case port for changing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when the profile fails validation.
    /// - `conflict` when the username or email is taken.
    async fn create(&self, profile: UserProfile) -> Result<User, Error>;

    /// Replace every field of an existing user.
    ///
    /// # Errors
    ///
    /// As [`UsersCommand::create`], plus `not_found` when `id` has no row.
    async fn update(&self, id: UserId, profile: UserProfile) -> Result<User, Error>;

    /// Remove a user if present.
    async fn delete(&self, id: UserId) -> Result<DeleteOutcome, Error>;
}
