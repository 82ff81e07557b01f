//! Exercise log handlers.
//!
//! ```text
//! POST /api/exercise/add userId=Hk3x_9Qa2b&description=run&duration=30&date=2023-01-01
//! GET /api/exercise/log?userId=Hk3x_9Qa2b&from=2023-01-01&to=2023-12-31&limit=2
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    AppendExerciseRequest, AppendExerciseResponse, GetLogRequest, GetLogResponse,
};
use crate::domain::{ExerciseEntry, format_calendar_date};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::RequestFields;
use crate::inbound::http::reply::reply;
use crate::inbound::http::state::HttpState;

/// Append body, form-encoded or JSON. Numbers are accepted for text fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendExerciseForm {
    #[schema(example = "Hk3x_9Qa2b")]
    pub user_id: Option<String>,
    #[schema(example = "morning run")]
    pub description: Option<String>,
    /// Parsed as a leading integer; `5.9` is stored as `5`.
    #[schema(example = "30")]
    pub duration: Option<String>,
    /// `YYYY-MM-DD`. Anything else logs the entry for today.
    #[schema(example = "2023-01-01")]
    pub date: Option<String>,
}

/// Query parameters for `GET /api/exercise/log`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI parameter generation; handlers read fields loosely"
)]
pub struct ExerciseLogParams {
    /// Owner of the log.
    user_id: Option<String>,
    /// Earliest date to include, inclusive.
    from: Option<String>,
    /// Latest date to include, inclusive.
    to: Option<String>,
    /// Entries are kept while their count stays below this number. Absent
    /// or empty means no limit; zero, negative or non-numeric values return
    /// no entries.
    limit: Option<String>,
}

/// Stored entry echoed by `POST /api/exercise/add`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ExerciseEntryBody {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub description: String,
    pub duration: i64,
    #[schema(example = "Sun Jan 01 2023")]
    pub date: String,
}

impl From<AppendExerciseResponse> for ExerciseEntryBody {
    fn from(response: AppendExerciseResponse) -> Self {
        let AppendExerciseResponse { user, entry } = response;
        let LogEntryBody {
            description,
            duration,
            date,
        } = LogEntryBody::from(&entry);
        Self {
            username: user.username().to_string(),
            id: user.id().to_string(),
            description,
            duration,
            date,
        }
    }
}

/// One entry in a log listing.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct LogEntryBody {
    pub description: String,
    pub duration: i64,
    #[schema(example = "Sun Jan 01 2023")]
    pub date: String,
}

impl From<&ExerciseEntry> for LogEntryBody {
    fn from(entry: &ExerciseEntry) -> Self {
        Self {
            description: entry.description().to_owned(),
            duration: entry.duration().value(),
            date: format_calendar_date(entry.date()),
        }
    }
}

/// Filtered log returned by `GET /api/exercise/log`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ExerciseLogBody {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// Present when `from` was supplied; `Invalid Date` if it did not parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub count: usize,
    pub log: Vec<LogEntryBody>,
}

impl From<GetLogResponse> for ExerciseLogBody {
    fn from(response: GetLogResponse) -> Self {
        let count = response.count();
        let GetLogResponse {
            user,
            from,
            to,
            entries,
        } = response;
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            from: from.render(),
            to: to.render(),
            count,
            log: entries.iter().map(LogEntryBody::from).collect(),
        }
    }
}

/// Append an exercise to a user's log.
///
/// Missing fields are refused in order (`userId`, `description`,
/// `duration`) with a plain-text message and a 200 status.
#[utoipa::path(
    post,
    path = "/api/exercise/add",
    request_body(
        content = AppendExerciseForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Stored entry, or a plain-text refusal", body = ExerciseEntryBody),
        (status = 400, description = "Invalid calendar date or malformed body", body = String, content_type = "text/plain"),
        (status = 404, description = "No user has this id", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain"),
        (status = 503, description = "Store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["exercise"],
    operation_id = "appendExercise"
)]
#[post("/exercise/add")]
pub async fn append_exercise(
    state: web::Data<HttpState>,
    fields: RequestFields,
) -> ApiResult<HttpResponse> {
    let request = AppendExerciseRequest {
        user_id: fields.get("userId"),
        description: fields.get("description"),
        duration: fields.get("duration"),
        date: fields.get("date"),
    };
    let outcome = state.exercise_log.append_exercise(request).await?;
    Ok(reply(outcome, ExerciseEntryBody::from))
}

/// Read a user's log filtered by date range and truncated to a limit.
///
/// Without a usable `from` or `to` the log is empty unless the server was
/// started with unbounded log queries enabled.
#[utoipa::path(
    get,
    path = "/api/exercise/log",
    params(ExerciseLogParams),
    responses(
        (status = 200, description = "Filtered log, or a plain-text refusal", body = ExerciseLogBody),
        (status = 404, description = "No user has this id", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain"),
        (status = 503, description = "Store unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["exercise"],
    operation_id = "getExerciseLog"
)]
#[get("/exercise/log")]
pub async fn get_exercise_log(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let fields = RequestFields::from_query(req.query_string())?;
    let request = GetLogRequest {
        user_id: fields.get("userId"),
        from: fields.get("from"),
        to: fields.get("to"),
        limit: fields.get("limit"),
    };
    let outcome = state.exercise_log_query.get_log(request).await?;
    Ok(reply(outcome, ExerciseLogBody::from))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
