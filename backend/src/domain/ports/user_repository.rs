//! Driven port for user persistence and its error type.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// No user carries the requested identifier.
        NotFound { id: UserId } => "user {id} not found",
        /// Another user already owns the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Store owning the lifecycle of every user record.
///
/// Adapters enforce email uniqueness and assign identifiers; callers only
/// ever hand over values that already passed field validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return it with its assigned identifier.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// taken.
    async fn add(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn get(&self, id: UserId) -> Result<User, UserPersistenceError>;

    /// Every stored user, each exactly once, in identifier order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Replace the supplied mutable fields of an existing user.
    ///
    /// An empty change set returns the stored record untouched.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, UserPersistenceError>;

    /// Remove a user.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
