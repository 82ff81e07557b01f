//! User registration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateUserOutcome, RegisterUserRequest, RegisterUserResponse, UserRegistration, UserStore,
};
use crate::domain::store_error_mapping::map_store_error;
use crate::domain::{Error, ExerciseUser, Outcome, Rejection, Username};

/// Registers users against a [`UserStore`].
///
/// Username uniqueness is delegated entirely to the store's atomic
/// create-if-absent; no lookup happens beforehand.
#[derive(Clone)]
pub struct UserRegistryService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> UserRegistryService<S> {
    /// Create a new registry over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UserRegistration for UserRegistryService<S>
where
    S: UserStore + ?Sized,
{
    async fn register(
        &self,
        request: RegisterUserRequest,
    ) -> Result<Outcome<RegisterUserResponse>, Error> {
        let Some(username) = request.username.and_then(|raw| Username::new(raw).ok()) else {
            return Ok(Outcome::Rejected(Rejection::UsernameRequired));
        };

        let candidate = ExerciseUser::register(username);
        match self
            .store
            .create_user(&candidate)
            .await
            .map_err(map_store_error)?
        {
            CreateUserOutcome::Created(user) => {
                info!(user_id = %user.id(), "registered user");
                Ok(Outcome::Accepted(RegisterUserResponse { user }))
            }
            CreateUserOutcome::UsernameTaken => {
                debug!(username = %candidate.username(), "username already registered");
                Ok(Outcome::Rejected(Rejection::UsernameTaken))
            }
        }
    }
}

#[cfg(test)]
#[path = "user_registry_service_tests.rs"]
mod tests;
