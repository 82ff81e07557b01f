//! User registration handler.
//!
//! ```text
//! POST /api/exercise/new-user username=ada
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ExerciseUser;
use crate::domain::ports::RegisterUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::RequestFields;
use crate::inbound::http::reply::reply;
use crate::inbound::http::state::HttpState;

/// Registration body, form-encoded or JSON.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterUserForm {
    /// Requested username. Must not be blank.
    #[schema(example = "ada")]
    pub username: Option<String>,
}

/// Registered user returned by `POST /api/exercise/new-user`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct RegisteredUserBody {
    pub username: String,
    #[serde(rename = "_id")]
    #[schema(example = "Hk3x_9Qa2b")]
    pub id: String,
}

impl From<&ExerciseUser> for RegisteredUserBody {
    fn from(user: &ExerciseUser) -> Self {
        Self {
            username: user.username().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// Register a new username.
///
/// Blank and already-taken usernames are refused with a plain-text message
/// and a 200 status.
#[utoipa::path(
    post,
    path = "/api/exercise/new-user",
    request_body(
        content = RegisterUserForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Registered user, or a plain-text refusal: `username already taken!` or ``Path `username` is required.``", body = RegisteredUserBody),
        (status = 400, description = "Malformed body", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain"),
        (status = 503, description = "Store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["exercise"],
    operation_id = "registerUser"
)]
#[post("/exercise/new-user")]
pub async fn register_user(
    state: web::Data<HttpState>,
    fields: RequestFields,
) -> ApiResult<HttpResponse> {
    let request = RegisterUserRequest {
        username: fields.get("username"),
    };
    let outcome = state.registration.register(request).await?;
    Ok(reply(outcome, |response| {
        RegisteredUserBody::from(&response.user)
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
