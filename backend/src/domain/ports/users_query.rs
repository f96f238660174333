//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserListQuery};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user, failing with `not_found` when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// List users matching the query. An empty result is not an error.
    async fn list(&self, query: UserListQuery) -> Result<Vec<User>, Error>;
}
