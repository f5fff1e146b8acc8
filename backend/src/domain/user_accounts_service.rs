//! User accounts domain service.
//!
//! Implements the [`UserAccounts`] driving port on top of a
//! [`UserRepository`], translating persistence failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{UserAccounts, UserPersistenceError, UserRepository};
use crate::domain::{Error, NewUser, User, UserChanges, UserId};

/// Service backing the `/users` endpoints.
pub struct UserAccountsService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserAccountsService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserAccountsService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::NotFound { id } => {
            Error::not_found(format!("user {id} not found"))
                .with_details(json!({ "id": id.get() }))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            warn!(%email, "rejected duplicate email");
            Error::conflict("email is already registered").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
            }))
        }
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UserAccounts for UserAccountsService<R>
where
    R: UserRepository + ?Sized,
{
    async fn add(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .add(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.repository.get(id).await.map_err(map_persistence_error)
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        self.repository
            .update(id, &changes)
            .await
            .map_err(map_persistence_error)
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_accounts_service_tests.rs"]
mod tests;
