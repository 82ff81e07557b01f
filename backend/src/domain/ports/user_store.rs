//! Driven port for persisting users and their exercise logs.

use async_trait::async_trait;

use crate::domain::{ExerciseEntry, ExerciseUser, UserId, UserLog};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The store could not be reached.
        Connection { message: String } =>
            "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user store query failed: {message}",
        /// The store's own schema refused a field value.
        Validation { field: String, message: String } =>
            "user store rejected {field}: {message}",
    }
}

/// Result of an atomic create-if-username-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created(ExerciseUser),
    UsernameTaken,
}

/// Port for the persistent collection of users and their logs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert the user unless its username is already held.
    ///
    /// Adapters must make the uniqueness check and the insert a single
    /// atomic step.
    async fn create_user(&self, user: &ExerciseUser)
    -> Result<CreateUserOutcome, UserStoreError>;

    /// Load a user and their entries in insertion order.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserLog>, UserStoreError>;

    /// Append an entry to the user's log, returning the owning user, or
    /// `None` when no user has this id.
    async fn append_entry(
        &self,
        id: &UserId,
        entry: &ExerciseEntry,
    ) -> Result<Option<ExerciseUser>, UserStoreError>;
}
