//! Driving port for registering new users.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseUser, Outcome};

/// Raw registration input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
}

/// Newly registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserResponse {
    pub user: ExerciseUser,
}

/// Use-case port for creating users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Register a username. Blank and already-taken usernames are rejected.
    async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<Outcome<RegisterUserResponse>, Error>;
}
