//! Domain primitives, ports and services.
//!
//! Purpose: define the exercise log model and its use cases independently of
//! HTTP and storage. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement [`ports::UserStore`].
//!
//! Public surface:
//! - Error / ErrorCode / FieldError: failures returned to adapters.
//! - Outcome / Rejection: accepted results and plain-text refusals.
//! - ExerciseUser / UserId / Username: registered users.
//! - ExerciseEntry / UserLog: logged exercise and per-user history.
//! - UserRegistryService / ExerciseLogService: driving port implementations.

pub mod error;
pub mod exercise;
pub mod exercise_log_service;
pub mod log_query;
pub mod outcome;
pub mod ports;
mod store_error_mapping;
pub mod trace_id;
pub mod user;
pub mod user_registry_service;

pub use self::error::{Error, ErrorCode, FieldError};
pub use self::exercise::{
    CALENDAR_DATE_FORMAT, ExerciseDuration, ExerciseEntry, ExerciseEntryDraft,
    ExerciseValidationError, UserLog, format_calendar_date, parse_integer_prefix,
    resolve_entry_date,
};
pub use self::exercise_log_service::ExerciseLogService;
pub use self::log_query::{
    DateBound, INVALID_DATE, LogLimit, RangeFilter, UnboundedRange, select_entries,
};
pub use self::outcome::{Outcome, Rejection};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{ExerciseUser, UserId, UserValidationError, Username};
pub use self::user_registry_service::UserRegistryService;
