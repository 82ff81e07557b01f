//! In-process `UserStore` used when no database is configured.
//!
//! Data lives for the lifetime of the process. The username index and the
//! user map are guarded by one lock so create-if-absent is atomic.

use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{CreateUserOutcome, UserStore, UserStoreError};
use crate::domain::{ExerciseEntry, ExerciseUser, UserId, UserLog};

#[derive(Debug, Default)]
struct MemoryState {
    usernames: HashSet<String>,
    users: HashMap<UserId, UserLog>,
}

/// Thread-safe in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: RwLock<MemoryState>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, UserStoreError> {
        self.state
            .read()
            .map_err(|_| UserStoreError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, UserStoreError> {
        self.state
            .write()
            .map_err(|_| UserStoreError::query("in-memory store lock poisoned"))
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.read().map(|state| state.users.len()).unwrap_or(0)
    }

    /// Whether no user has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(
        &self,
        user: &ExerciseUser,
    ) -> Result<CreateUserOutcome, UserStoreError> {
        let mut state = self.write()?;
        let username = user.username().as_ref();
        if state.usernames.contains(username) {
            return Ok(CreateUserOutcome::UsernameTaken);
        }
        if state.users.contains_key(user.id()) {
            return Err(UserStoreError::query(format!(
                "duplicate user id {}",
                user.id()
            )));
        }
        state.usernames.insert(username.to_owned());
        state
            .users
            .insert(user.id().clone(), UserLog::new(user.clone(), Vec::new()));
        Ok(CreateUserOutcome::Created(user.clone()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserLog>, UserStoreError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn append_entry(
        &self,
        id: &UserId,
        entry: &ExerciseEntry,
    ) -> Result<Option<ExerciseUser>, UserStoreError> {
        let mut state = self.write()?;
        let Some(log) = state.users.get_mut(id) else {
            return Ok(None);
        };
        log.push(entry.clone());
        Ok(Some(log.user().clone()))
    }
}
