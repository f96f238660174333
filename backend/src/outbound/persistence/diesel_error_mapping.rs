//! Translation of pool and Diesel failures into [`UserPersistenceError`].

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::UserPersistenceError;

pub(crate) const USERNAME_CONSTRAINT: &str = "users_username_key";
pub(crate) const EMAIL_CONSTRAINT: &str = "users_email_key";

pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Name the unique column behind a violated constraint.
fn conflicting_field(info: &dyn DatabaseErrorInformation) -> &'static str {
    match info.constraint_name() {
        Some(USERNAME_CONSTRAINT) => "username",
        Some(EMAIL_CONSTRAINT) => "email",
        Some(_) | None => {
            // Older servers omit the constraint name; fall back to the detail text.
            let detail = info.details().unwrap_or_default();
            if detail.contains("(email)") {
                "email"
            } else {
                "username"
            }
        }
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::conflict(conflicting_field(info.as_ref()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
            UserPersistenceError::constraint(
                info.constraint_name().unwrap_or("check constraint").to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}
