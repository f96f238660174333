//! Startup creation of the `users` table.

use diesel_async::RunQueryDsl;
use tracing::info;

use super::diesel_error_mapping::{EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
use super::pool::{DbPool, PoolConfig, PoolError};

/// Failures while preparing storage at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageInitError {
    /// The database could not be reached.
    #[error("user store unavailable: {message}")]
    Unavailable { message: String },
    /// The table could not be created or verified.
    #[error("failed to prepare users table: {message}")]
    Schema { message: String },
}

fn create_users_table_sql() -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL CONSTRAINT {USERNAME_CONSTRAINT} UNIQUE,
            firstname TEXT NOT NULL,
            lastname TEXT NOT NULL,
            email TEXT CONSTRAINT {EMAIL_CONSTRAINT} UNIQUE,
            avatar TEXT,
            phone TEXT,
            date_of_birth DATE CONSTRAINT users_date_of_birth_check
                CHECK (date_of_birth IS NULL OR date_of_birth <= CURRENT_DATE),
            address_country TEXT,
            address_city TEXT,
            address_street_name TEXT,
            address_street_address TEXT
        )"
    )
}

fn unavailable(err: PoolError) -> StorageInitError {
    StorageInitError::Unavailable {
        message: err.to_string(),
    }
}

/// Connect to the store and make sure the `users` table exists.
///
/// This is the startup entry point: it builds the pool from `config` and then
/// runs [`ensure_users_table`].
///
/// # Errors
///
/// [`StorageInitError::Unavailable`] when the pool cannot be built or no
/// connection can be checked out, [`StorageInitError::Schema`] when the DDL
/// fails.
pub async fn open_user_store(config: PoolConfig) -> Result<DbPool, StorageInitError> {
    let pool = DbPool::new(config).await.map_err(unavailable)?;
    ensure_users_table(&pool).await?;
    Ok(pool)
}

/// Create the `users` table if it does not exist yet.
///
/// Safe to call on every startup; later calls leave existing rows untouched.
///
/// # Errors
///
/// [`StorageInitError::Unavailable`] when no connection can be checked out,
/// [`StorageInitError::Schema`] when the DDL fails.
pub async fn ensure_users_table(pool: &DbPool) -> Result<(), StorageInitError> {
    let mut conn = pool.get().await.map_err(unavailable)?;

    diesel::sql_query(create_users_table_sql())
        .execute(&mut conn)
        .await
        .map_err(|err| StorageInitError::Schema {
            message: err.to_string(),
        })?;

    info!("users table ready");
    Ok(())
}
