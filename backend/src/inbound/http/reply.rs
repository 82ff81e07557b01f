//! Rendering of driving-port outcomes.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use serde::Serialize;

use crate::domain::{Outcome, Rejection};

/// Render an accepted value as JSON and a rejection as a plain-text 200.
pub fn reply<T, B, F>(outcome: Outcome<T>, to_body: F) -> HttpResponse
where
    B: Serialize,
    F: FnOnce(T) -> B,
{
    match outcome {
        Outcome::Accepted(value) => HttpResponse::Ok().json(to_body(value)),
        Outcome::Rejected(rejection) => rejection_response(rejection),
    }
}

fn rejection_response(rejection: Rejection) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(rejection.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::http::header::CONTENT_TYPE;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn body_of(response: HttpResponse) -> Vec<u8> {
        to_bytes(response.into_body())
            .await
            .expect("body is readable")
            .to_vec()
    }

    #[rstest]
    #[actix_web::test]
    async fn accepted_outcomes_are_json() {
        let response = reply(Outcome::Accepted(7), |value| json!({ "count": value }));
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_of(response).await).expect("JSON body");
        assert_eq!(body, json!({ "count": 7 }));
    }

    #[rstest]
    #[actix_web::test]
    async fn rejections_are_plain_text_successes() {
        let outcome: Outcome<u8> = Outcome::Rejected(Rejection::UsernameTaken);
        let response = reply(outcome, |value| value);
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert!(content_type.is_some_and(|value| value.starts_with("text/plain")));
        assert_eq!(body_of(response).await, b"username already taken!");
    }
}
