//! User registry library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the user model and
//! ports, `inbound::http` adapts Actix requests onto the driving ports, and
//! `outbound::persistence` implements the repository port over PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
