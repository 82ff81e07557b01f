//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses (status, plain-text body, trace header). Validation failures that
//! callers are expected to correct are not errors; see
//! [`crate::domain::Outcome`].

use std::fmt;

use serde::Serialize;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or a stored field failed validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// A backing service (the store) could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// A message attached to a single named input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Message describing why the field was refused.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Domain error payload.
///
/// When constructed inside a request scope the active [`TraceId`] is captured
/// so adapters can echo it back to the client.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("unknown _id");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "unknown _id");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<FieldError>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            field_errors: Vec::new(),
        }
    }

    /// Build an invalid-request error from a set of field errors.
    ///
    /// The top-level message is the first field's message, mirroring how
    /// clients are shown only the leading failure.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::{Error, FieldError};
    ///
    /// let err = Error::from_field_errors([
    ///     FieldError::new("date", "Path `date` is not a valid calendar date."),
    ///     FieldError::new("duration", "Path `duration` is required."),
    /// ]);
    /// assert_eq!(err.message(), "Path `date` is not a valid calendar date.");
    /// assert_eq!(err.field_errors().len(), 2);
    /// ```
    pub fn from_field_errors(errors: impl IntoIterator<Item = FieldError>) -> Self {
        let field_errors: Vec<FieldError> = errors.into_iter().collect();
        let message = field_errors
            .first()
            .map(|error| error.message().to_owned())
            .unwrap_or_else(|| "invalid request".to_owned());
        let mut error = Self::new(ErrorCode::InvalidRequest, message);
        error.field_errors = field_errors;
        error
    }

    /// Convenience constructor for a single field error.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_field_errors([FieldError::new(field, message)])
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction time, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Per-field failures, in the order they were reported.
    pub fn field_errors(&self) -> &[FieldError] {
        self.field_errors.as_slice()
    }

    /// Replace the captured trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
