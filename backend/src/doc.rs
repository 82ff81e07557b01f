//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the exercise endpoints and the health probes
//! - **Schemas**: request and response bodies declared beside their handlers
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    AppendExerciseForm, ExerciseEntryBody, ExerciseLogBody, LogEntryBody,
};
use crate::inbound::http::users::{RegisterUserForm, RegisteredUserBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, log timed exercises and query filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::exercises::append_exercise,
        crate::inbound::http::exercises::get_exercise_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterUserForm,
        RegisteredUserBody,
        AppendExerciseForm,
        ExerciseEntryBody,
        LogEntryBody,
        ExerciseLogBody
    )),
    tags(
        (name = "exercise", description = "User registration and exercise logs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
