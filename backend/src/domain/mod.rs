//! Domain primitives, services and ports.
//!
//! Purpose: hold the user model and the use cases over it, free of HTTP and
//! SQL concerns. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement [`ports::UserRepository`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier.
//! - User, UserId, UserProfile and friends: the record model.
//! - UserListQuery, UserFilter, SortField, SortDirection: listing parameters.
//! - UserService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_listing;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Address, PersonName, User, UserId, UserProfile, UserValidationError, Username};
pub use self::user_listing::{
    SortDirection, SortField, UserFilter, UserListQuery, UserListingError,
};
pub use self::user_service::UserService;
