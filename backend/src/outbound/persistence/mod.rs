//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the domain's [`UserRepository`](crate::domain::ports::UserRepository)
//! port with `diesel-async` over a `bb8` pool. Row structs and the `table!`
//! schema stay private to this module; only domain types cross the boundary.
//!
//! # Example
//!
//! ```no_run
//! use user_registry::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, ensure_users_table,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! ensure_users_table(&pool).await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_bootstrap;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use schema_bootstrap::{StorageInitError, ensure_users_table, open_user_store};
