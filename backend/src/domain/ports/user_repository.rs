//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserListQuery, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the supplied value.
        Conflict { field: String } => "{field} is already in use",
        /// A row-level check rejected the supplied values.
        Constraint { message: String } => "user violates a storage constraint: {message}",
    }
}

/// Storage for user records.
///
/// Identifiers are assigned by the adapter on insert and never reused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it with its assigned identifier.
    async fn insert(&self, profile: &UserProfile) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite every column of an existing record.
    ///
    /// Returns `None` when no row has the identifier.
    async fn replace(
        &self,
        id: UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a record, reporting whether a row was removed.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Return every record matching the filter in the requested order.
    async fn list(&self, query: &UserListQuery) -> Result<Vec<User>, UserPersistenceError>;
}
