//! Process-local `UserRepository` adapter.
//!
//! Used when no database URL is configured and by the HTTP test suites.
//! Records live in a `BTreeMap` keyed by identifier so listing returns them
//! in creation order; identifiers start at 1 and are never reused.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

#[derive(Debug, Default)]
struct Records {
    last_id: i64,
    users: BTreeMap<UserId, User>,
}

impl Records {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| user.email().as_ref() == email && Some(user.id()) != except)
    }
}

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Records>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, UserPersistenceError> {
        self.records
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store is poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        if records.email_taken(user.email().as_ref(), None) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        records.last_id += 1;
        let id = UserId::new(records.last_id);
        let created = User::new(id, user.clone());
        records.users.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: UserId) -> Result<User, UserPersistenceError> {
        self.lock()?
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        let current = records
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| UserPersistenceError::not_found(id))?;
        if let Some(email) = &changes.email {
            if records.email_taken(email.as_ref(), Some(id)) {
                return Err(UserPersistenceError::duplicate_email(email.as_ref()));
            }
        }
        let updated = current.with_changes(changes.clone());
        records.users.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.lock()?
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }
}
