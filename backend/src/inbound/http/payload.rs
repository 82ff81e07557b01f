//! Loose request field extraction.
//!
//! Clients post either `application/x-www-form-urlencoded` or JSON bodies,
//! and JSON clients may send numbers or booleans where text is expected.
//! [`RequestFields`] flattens both into a map of strings so handlers can hand
//! raw values to the domain, which performs all validation.

use std::collections::HashMap;

use actix_web::dev::Payload;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;
use tracing::debug;

use crate::domain::Error;

/// Message returned when a body cannot be decoded.
pub const MALFORMED_BODY: &str = "malformed request body";

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Scalar request fields keyed by name.
///
/// # Examples
/// ```
/// use exercise_tracker::inbound::http::payload::RequestFields;
///
/// let fields = RequestFields::from_query("userId=abc&limit=2").expect("valid query");
/// assert_eq!(fields.get("userId").as_deref(), Some("abc"));
/// assert_eq!(fields.get("from"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFields {
    values: HashMap<String, String>,
}

impl RequestFields {
    /// Decode an urlencoded string. The first occurrence of a repeated key wins.
    pub fn from_urlencoded(raw: &[u8]) -> Result<Self, Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw).map_err(|err| {
            debug!(error = %err, "rejecting malformed urlencoded fields");
            Error::invalid_request(MALFORMED_BODY)
        })?;
        let mut values = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            values.entry(key).or_insert(value);
        }
        Ok(Self { values })
    }

    /// Decode a request query string.
    pub fn from_query(query: &str) -> Result<Self, Error> {
        Self::from_urlencoded(query.as_bytes())
    }

    /// Decode a JSON object body. Strings, numbers and booleans are kept as
    /// text; `null`, arrays and nested objects are treated as absent.
    pub fn from_json(raw: &[u8]) -> Result<Self, Error> {
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let document: Value = serde_json::from_slice(raw).map_err(|err| {
            debug!(error = %err, "rejecting malformed JSON body");
            Error::invalid_request(MALFORMED_BODY)
        })?;
        let Value::Object(object) = document else {
            return Err(Error::invalid_request(MALFORMED_BODY));
        };
        let values = object
            .into_iter()
            .filter_map(|(key, value)| scalar_text(value).map(|text| (key, text)))
            .collect();
        Ok(Self { values })
    }

    /// Return the named field, if present.
    pub fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_json(content_type: &str) -> bool {
    content_type == JSON_CONTENT_TYPE || content_type.ends_with("+json")
}

/// Reads the request body according to its content type. Bodies of any
/// other type are ignored and yield no fields.
impl FromRequest for RequestFields {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let content_type = req.content_type().to_ascii_lowercase();
        let body = Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body.await.map_err(|err| {
                debug!(error = %err, "failed to read request body");
                Error::invalid_request(MALFORMED_BODY)
            })?;
            if is_json(&content_type) {
                Self::from_json(&bytes)
            } else if content_type == FORM_CONTENT_TYPE {
                Self::from_urlencoded(&bytes)
            } else {
                Ok(Self::default())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"duration": 30}"#, Some("30"))]
    #[case(r#"{"duration": 5.9}"#, Some("5.9"))]
    #[case(r#"{"duration": "12abc"}"#, Some("12abc"))]
    #[case(r#"{"duration": true}"#, Some("true"))]
    #[case(r#"{"duration": null}"#, None)]
    #[case(r#"{"duration": [1, 2]}"#, None)]
    #[case(r#"{}"#, None)]
    fn json_scalars_become_text(#[case] body: &str, #[case] expected: Option<&str>) {
        let fields = RequestFields::from_json(body.as_bytes()).expect("valid JSON object");
        assert_eq!(fields.get("duration").as_deref(), expected);
    }

    #[rstest]
    #[case("not json")]
    #[case("[1, 2, 3]")]
    #[case("\"text\"")]
    fn non_object_json_is_malformed(#[case] body: &str) {
        let err = RequestFields::from_json(body.as_bytes()).expect_err("must be rejected");
        assert_eq!(err.message(), MALFORMED_BODY);
    }

    #[rstest]
    fn blank_json_body_is_empty() {
        let fields = RequestFields::from_json(b"  \n").expect("blank body is allowed");
        assert_eq!(fields, RequestFields::default());
    }

    #[rstest]
    fn urlencoded_keeps_first_duplicate_and_decodes() {
        let fields = RequestFields::from_urlencoded(b"description=morning+run&description=x&date=")
            .expect("valid form");
        assert_eq!(fields.get("description").as_deref(), Some("morning run"));
        assert_eq!(fields.get("date").as_deref(), Some(""));
    }

    #[rstest]
    #[case("application/json", r#"{"username":"ada"}"#)]
    #[case("application/x-www-form-urlencoded", "username=ada")]
    #[actix_web::test]
    async fn extractor_reads_either_encoding(#[case] content_type: &str, #[case] body: &str) {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", content_type))
            .set_payload(body.to_owned())
            .to_http_parts();

        let fields = RequestFields::from_request(&req, &mut payload)
            .await
            .expect("body decodes");
        assert_eq!(fields.get("username").as_deref(), Some("ada"));
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_ignores_unknown_content_types() {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "text/plain"))
            .set_payload("username=ada")
            .to_http_parts();

        let fields = RequestFields::from_request(&req, &mut payload)
            .await
            .expect("unknown types yield no fields");
        assert_eq!(fields.get("username"), None);
    }
}
