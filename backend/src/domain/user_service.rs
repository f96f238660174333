//! User domain service.
//!
//! Implements the [`UsersCommand`] and [`UsersQuery`] driving ports on top of
//! a [`UserRepository`], applying the checks that need more than the value
//! types can see on their own (the date of birth needs today's date).

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    DeleteOutcome, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User, UserId, UserListQuery, UserProfile};

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn ensure_born_by_today(&self, profile: &UserProfile) -> Result<(), Error> {
        let today = self.clock.utc().date_naive();
        profile.ensure_born_by(today).map_err(Error::from)
    }

    fn not_found(id: UserId) -> Error {
        Error::not_found(format!("user {id} not found")).with_details(json!({ "id": id.get() }))
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable("user repository unavailable")
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { field } => {
            Error::conflict(format!("{field} is already in use")).with_details(json!({
                "field": field,
                "code": "duplicate",
            }))
        }
        UserPersistenceError::Constraint { message } => {
            Error::invalid_request(format!("user violates a storage constraint: {message}"))
        }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, profile: UserProfile) -> Result<User, Error> {
        self.ensure_born_by_today(&profile)?;
        let user = self
            .repository
            .insert(&profile)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update(&self, id: UserId, profile: UserProfile) -> Result<User, Error> {
        self.ensure_born_by_today(&profile)?;
        let user = self
            .repository
            .replace(id, &profile)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))?;
        info!(user_id = %id, "user replaced");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<DeleteOutcome, Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        let outcome = if removed {
            info!(user_id = %id, "user deleted");
            DeleteOutcome::Deleted
        } else {
            debug!(user_id = %id, "delete requested for absent user");
            DeleteOutcome::AlreadyAbsent
        };
        Ok(outcome)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list(&self, query: UserListQuery) -> Result<Vec<User>, Error> {
        let users = self
            .repository
            .list(&query)
            .await
            .map_err(map_persistence_error)?;
        debug!(
            count = users.len(),
            sort_by = %query.sort_by,
            direction = query.direction.as_str(),
            "listed users"
        );
        Ok(users)
    }
}
