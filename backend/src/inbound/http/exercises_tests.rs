//! Tests for exercise log HTTP handlers.

use super::*;
use crate::domain::ports::{MockExerciseLogCommand, MockExerciseLogQuery, MockUserRegistration};
use crate::domain::{Error, Outcome, Rejection};
use crate::inbound::http::test_utils::{FIXTURE_TODAY, memory_state, test_app};
use crate::inbound::http::users::RegisteredUserBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/exercise/new-user")
        .set_json(json!({ "username": username }))
        .to_request();
    let body: RegisteredUserBody = actix_test::call_and_read_body_json(app, request).await;
    body.id
}

fn add_request(body: Value) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/exercise/add")
        .set_json(body)
        .to_request()
}

fn add_form(body: String) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/exercise/add")
        .insert_header(("content-type", "application/x-www-form-urlencoded"))
        .set_payload(body)
        .to_request()
}

fn log_request(query: &str) -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri(&format!("/api/exercise/log?{query}"))
        .to_request()
}

async fn plain_text(response: ServiceResponse) -> String {
    let body = actix_test::read_body(response).await;
    String::from_utf8(body.to_vec()).expect("plain-text body is UTF-8")
}

#[actix_web::test]
async fn append_echoes_entry_with_owner() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let response = actix_test::call_service(
        &app,
        add_form(format!(
            "userId={id}&description=morning+run&duration=30&date=2023-01-01"
        )),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ExerciseEntryBody = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        ExerciseEntryBody {
            username: "ada".to_owned(),
            id,
            description: "morning run".to_owned(),
            duration: 30,
            date: "Sun Jan 01 2023".to_owned(),
        }
    );
}

#[rstest]
#[case(None)]
#[case(Some("01/02/2023"))]
#[case(Some(""))]
#[actix_web::test]
async fn append_defaults_to_today(#[case] date: Option<&str>) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let mut body = json!({ "userId": id, "description": "swim", "duration": 20 });
    if let Some(date) = date {
        body["date"] = Value::String(date.to_owned());
    }
    let entry: ExerciseEntryBody =
        actix_test::call_and_read_body_json(&app, add_request(body)).await;

    assert_eq!(entry.date, FIXTURE_TODAY);
}

#[actix_web::test]
async fn append_reads_date_from_timestamp() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let entry: ExerciseEntryBody = actix_test::call_and_read_body_json(
        &app,
        add_request(json!({
            "userId": id,
            "description": "swim",
            "duration": 20,
            "date": "2023-01-01T10:00:00Z"
        })),
    )
    .await;

    assert_eq!(entry.date, "Sun Jan 01 2023");
}

#[rstest]
#[case(json!("5.9"), 5)]
#[case(json!(5.9), 5)]
#[case(json!("12abc"), 12)]
#[case(json!(" -15"), -15)]
#[case(json!("99999999999999999999"), i64::MAX)]
#[actix_web::test]
async fn append_truncates_duration_to_integer_prefix(
    #[case] duration: Value,
    #[case] expected: i64,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let entry: ExerciseEntryBody = actix_test::call_and_read_body_json(
        &app,
        add_request(json!({ "userId": id, "description": "row", "duration": duration })),
    )
    .await;

    assert_eq!(entry.duration, expected);
}

#[rstest]
#[case(json!({ "description": "run", "duration": "30" }), "unknown _id")]
#[case(json!({ "userId": "", "description": "run", "duration": "30" }), "unknown _id")]
#[case(json!({ "userId": "abc", "duration": "30" }), "Path `description` is required.")]
#[case(json!({ "userId": "abc", "description": "", "duration": "30" }), "Path `description` is required.")]
#[case(json!({ "userId": "abc", "description": "run" }), "Path `duration` is required.")]
#[case(json!({ "userId": "abc", "description": "run", "duration": "bogus" }), "Path `duration` is required.")]
#[case(json!({ "userId": "abc", "description": "run", "duration": 0 }), "Path `duration` is required.")]
#[actix_web::test]
async fn append_refusals_are_plain_text(#[case] body: Value, #[case] expected: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(&app, add_request(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(plain_text(response).await, expected);
}

#[actix_web::test]
async fn append_rejects_impossible_calendar_date() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let response = actix_test::call_service(
        &app,
        add_request(json!({
            "userId": id,
            "description": "run",
            "duration": "30",
            "date": "9999-99-99"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        plain_text(response).await,
        "Path `date` is not a valid calendar date."
    );
}

#[actix_web::test]
async fn append_to_unknown_user_is_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(
        &app,
        add_request(json!({ "userId": "nobody", "description": "run", "duration": "30" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(plain_text(response).await, "unknown _id");
}

#[actix_web::test]
async fn log_filters_range_and_keeps_earliest_matches() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;
    for (description, date) in [
        ("A", "2023-02-01"),
        ("outside", "2022-12-31"),
        ("B", "2023-03-01"),
        ("C", "2023-04-01"),
    ] {
        let response = actix_test::call_service(
            &app,
            add_request(json!({
                "userId": id,
                "description": description,
                "duration": 10,
                "date": date
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body: ExerciseLogBody = actix_test::call_and_read_body_json(
        &app,
        log_request(&format!("userId={id}&from=2023-01-01&to=2023-12-31&limit=2")),
    )
    .await;

    assert_eq!(body.id, id);
    assert_eq!(body.username, "ada");
    assert_eq!(body.from.as_deref(), Some("Sun Jan 01 2023"));
    assert_eq!(body.to.as_deref(), Some("Sun Dec 31 2023"));
    assert_eq!(body.count, 2);
    let descriptions: Vec<&str> = body
        .log
        .iter()
        .map(|entry| entry.description.as_str())
        .collect();
    assert_eq!(descriptions, ["A", "B"]);
    assert_eq!(body.log[0].date, "Wed Feb 01 2023");
}

#[actix_web::test]
async fn log_without_range_is_empty_and_omits_bounds() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;
    let appended = actix_test::call_service(
        &app,
        add_request(json!({ "userId": id, "description": "run", "duration": 5 })),
    )
    .await;
    assert_eq!(appended.status(), StatusCode::OK);

    let body: Value =
        actix_test::call_and_read_body_json(&app, log_request(&format!("userId={id}"))).await;

    assert_eq!(body["count"], 0);
    assert_eq!(body["log"], json!([]));
    assert!(body.get("from").is_none());
    assert!(body.get("to").is_none());
}

#[rstest]
#[case("0")]
#[case("-1")]
#[case("many")]
#[case("2abc")]
#[actix_web::test]
async fn unusable_limit_returns_empty_log(#[case] limit: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;
    let appended = actix_test::call_service(
        &app,
        add_request(json!({
            "userId": id,
            "description": "run",
            "duration": 5,
            "date": "2023-05-01"
        })),
    )
    .await;
    assert_eq!(appended.status(), StatusCode::OK);

    let body: ExerciseLogBody = actix_test::call_and_read_body_json(
        &app,
        log_request(&format!("userId={id}&from=2023-01-01&limit={limit}")),
    )
    .await;

    assert_eq!(body.count, 0);
    assert!(body.log.is_empty());
}

#[actix_web::test]
async fn log_echoes_invalid_bound() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let id = register(&app, "ada").await;

    let body: ExerciseLogBody = actix_test::call_and_read_body_json(
        &app,
        log_request(&format!("userId={id}&from=soon&to=2030-01-01")),
    )
    .await;

    assert_eq!(body.from.as_deref(), Some("Invalid Date"));
    assert_eq!(body.to.as_deref(), Some("Tue Jan 01 2030"));
}

#[rstest]
#[case("")]
#[case("userId=")]
#[case("from=2023-01-01")]
#[actix_web::test]
async fn log_without_user_id_is_refused(#[case] query: &str) {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(&app, log_request(query)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(plain_text(response).await, "unknown userId");
}

#[actix_web::test]
async fn log_for_unknown_user_is_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(&app, log_request("userId=nobody")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(plain_text(response).await, "unknown userId");
}

#[actix_web::test]
async fn handlers_forward_raw_fields_to_ports() {
    let mut command = MockExerciseLogCommand::new();
    command
        .expect_append_exercise()
        .withf(|request| {
            request.user_id.as_deref() == Some("abc")
                && request.duration.as_deref() == Some("7")
                && request.date.is_none()
        })
        .times(1)
        .return_once(|_| Ok(Outcome::Rejected(Rejection::UnknownId)));
    let mut query = MockExerciseLogQuery::new();
    query
        .expect_get_log()
        .withf(|request| request.limit.as_deref() == Some("3") && request.to.is_none())
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("store unavailable")));
    let state = HttpState::new(
        Arc::new(MockUserRegistration::new()),
        Arc::new(command),
        Arc::new(query),
    );
    let app = actix_test::init_service(test_app(state)).await;

    let append = actix_test::call_service(
        &app,
        add_request(json!({ "userId": "abc", "description": "run", "duration": 7 })),
    )
    .await;
    assert_eq!(plain_text(append).await, "unknown _id");

    let log = actix_test::call_service(&app, log_request("userId=abc&limit=3")).await;
    assert_eq!(log.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn unmatched_routes_are_plain_not_found() {
    let app = actix_test::init_service(test_app(memory_state())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/exercise/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(plain_text(response).await, "not found");
}
