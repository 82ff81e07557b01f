//! Exercise log entries and the parsing rules applied to their raw inputs.

use std::fmt;
use std::num::IntErrorKind;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::user::ExerciseUser;

/// Format used when echoing dates back to clients, e.g. `Sun Jan 01 2023`.
pub const CALENDAR_DATE_FORMAT: &str = "%a %b %d %Y";

/// Validation errors raised while building an [`ExerciseEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseValidationError {
    EmptyDescription,
    ZeroDuration,
    InvalidCalendarDate { value: String },
}

impl ExerciseValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "description",
            Self::ZeroDuration => "duration",
            Self::InvalidCalendarDate { .. } => "date",
        }
    }
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Path `description` is required."),
            Self::ZeroDuration => write!(f, "Path `duration` is required."),
            Self::InvalidCalendarDate { .. } => {
                write!(f, "Path `date` is not a valid calendar date.")
            }
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

/// Non-zero whole number of time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ExerciseDuration(i64);

impl ExerciseDuration {
    /// Validate and construct a duration.
    pub fn new(value: i64) -> Result<Self, ExerciseValidationError> {
        if value == 0 {
            return Err(ExerciseValidationError::ZeroDuration);
        }
        Ok(Self(value))
    }

    /// Parse raw input using integer-prefix semantics.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDuration;
    ///
    /// assert_eq!(ExerciseDuration::parse("5.9").map(|d| d.value()), Some(5));
    /// assert!(ExerciseDuration::parse("bogus").is_none());
    /// assert!(ExerciseDuration::parse("0").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        parse_integer_prefix(raw).and_then(|value| Self::new(value).ok())
    }

    /// Raw value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<ExerciseDuration> for i64 {
    fn from(value: ExerciseDuration) -> Self {
        value.0
    }
}

impl TryFrom<i64> for ExerciseDuration {
    type Error = ExerciseValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Read a leading base-10 integer the way lenient form parsers do.
///
/// Leading whitespace is skipped and a single sign is accepted; digits are
/// consumed up to the first non-digit. Input without leading digits yields
/// `None`. Digit runs beyond the `i64` range saturate.
pub fn parse_integer_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits
    };
    match signed.parse::<i64>() {
        Ok(value) => Some(value),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

static ENTRY_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn entry_date_regex() -> &'static Regex {
    ENTRY_DATE_RE.get_or_init(|| {
        Regex::new(r"\d{4}-\d{2}-\d{2}")
            .unwrap_or_else(|error| panic!("entry date regex failed to compile: {error}"))
    })
}

/// Resolve the date of a new entry.
///
/// Input containing a `YYYY-MM-DD` run is treated as a date: an RFC 3339
/// timestamp contributes its own date, otherwise the run itself must be a
/// real calendar date. Anything else, including absent input, falls back to
/// `today`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use exercise_tracker::domain::resolve_entry_date;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
/// let new_year = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
/// assert_eq!(resolve_entry_date(Some("2023-01-01"), today), Ok(new_year));
/// assert_eq!(resolve_entry_date(Some("2023-01-01T10:00:00Z"), today), Ok(new_year));
/// assert_eq!(resolve_entry_date(Some("yesterday"), today), Ok(today));
/// assert!(resolve_entry_date(Some("9999-99-99"), today).is_err());
/// ```
pub fn resolve_entry_date(
    raw: Option<&str>,
    today: NaiveDate,
) -> Result<NaiveDate, ExerciseValidationError> {
    let Some(value) = raw else {
        return Ok(today);
    };
    let Some(shape) = entry_date_regex().find(value) else {
        return Ok(today);
    };
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value.trim()) {
        return Ok(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(shape.as_str(), "%Y-%m-%d").map_err(|_| {
        ExerciseValidationError::InvalidCalendarDate {
            value: value.to_owned(),
        }
    })
}

/// Render a date as `Www Mmm DD YYYY`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Unvalidated entry fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseEntryDraft {
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

/// One logged exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    description: String,
    duration: ExerciseDuration,
    date: NaiveDate,
}

impl ExerciseEntry {
    /// Validate a draft into an entry.
    pub fn new(draft: ExerciseEntryDraft) -> Result<Self, ExerciseValidationError> {
        let ExerciseEntryDraft {
            description,
            duration,
            date,
        } = draft;
        if description.is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self {
            description,
            duration: ExerciseDuration::new(duration)?,
            date,
        })
    }

    /// What was done.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// How long it took.
    pub fn duration(&self) -> ExerciseDuration {
        self.duration
    }

    /// Day the exercise was performed.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A user together with their entries in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLog {
    user: ExerciseUser,
    entries: Vec<ExerciseEntry>,
}

impl UserLog {
    /// Pair a user with entries already in insertion order.
    pub fn new(user: ExerciseUser, entries: Vec<ExerciseEntry>) -> Self {
        Self { user, entries }
    }

    /// Owner of the log.
    pub fn user(&self) -> &ExerciseUser {
        &self.user
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[ExerciseEntry] {
        self.entries.as_slice()
    }

    /// Append an entry after the existing ones.
    pub fn push(&mut self, entry: ExerciseEntry) {
        self.entries.push(entry);
    }

    /// Split into the owning user and the entries.
    pub fn into_parts(self) -> (ExerciseUser, Vec<ExerciseEntry>) {
        (self.user, self.entries)
    }
}
