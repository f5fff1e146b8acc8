//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed user entity, the transport-agnostic
//! error type, and the ports through which adapters reach the domain.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: error payload and stable error identifier.
//! - `User`, `NewUser`, `UserChanges`: the user entity before and after
//!   persistence, plus partial updates.
//! - `UserAccountsService`: implementation of the `UserAccounts` port.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_accounts_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NAME_MAX, NewUser, PASSWORD_MAX, Password, PersonName, User,
    UserChanges, UserField, UserId, UserValidationError,
};
pub use self::user_accounts_service::UserAccountsService;
