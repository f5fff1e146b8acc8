//! Driving port for user account management.
//!
//! HTTP handlers depend on this trait instead of the repository so that
//! store failures reach them already translated into domain [`Error`]s.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Use-case port behind the `/users` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Register a user; the email address must not be in use.
    async fn add(&self, user: NewUser) -> Result<User, Error>;

    /// Look up a single user.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// All registered users in identifier order.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// Change the supplied fields of an existing user.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    /// Remove a user.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
