//! Date-range filtering and count limiting applied to a user's log.

use chrono::{DateTime, NaiveDate};

use super::exercise::{ExerciseEntry, format_calendar_date};

/// Text echoed for a bound that was supplied but could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// One end of a requested date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// Not supplied.
    Absent,
    /// Supplied but not a date. Never compares against entries.
    Invalid,
    Date(NaiveDate),
}

impl DateBound {
    /// Parse a query parameter.
    ///
    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its date part is used).
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use exercise_tracker::domain::DateBound;
    ///
    /// let day = NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid date");
    /// assert_eq!(DateBound::parse(Some("2023-01-01")), DateBound::Date(day));
    /// assert_eq!(DateBound::parse(Some("soon")), DateBound::Invalid);
    /// assert_eq!(DateBound::parse(None), DateBound::Absent);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(value) = raw.filter(|value| !value.is_empty()).map(str::trim) else {
            return Self::Absent;
        };
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Self::Date(date);
        }
        match DateTime::parse_from_rfc3339(value) {
            Ok(timestamp) => Self::Date(timestamp.date_naive()),
            Err(_) => Self::Invalid,
        }
    }

    /// The parsed date, if the bound can be compared.
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Absent | Self::Invalid => None,
        }
    }

    /// Text echoed back to clients; `None` when the bound was not supplied.
    pub fn render(self) -> Option<String> {
        match self {
            Self::Absent => None,
            Self::Invalid => Some(INVALID_DATE.to_owned()),
            Self::Date(date) => Some(format_calendar_date(date)),
        }
    }
}

/// Behaviour when neither range bound is a usable date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnboundedRange {
    /// Return no entries.
    #[default]
    MatchNone,
    /// Return every entry.
    MatchAll,
}

/// Inclusive date-range predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    unbounded: UnboundedRange,
}

impl RangeFilter {
    pub fn new(from: DateBound, to: DateBound, unbounded: UnboundedRange) -> Self {
        Self {
            from: from.date(),
            to: to.date(),
            unbounded,
        }
    }

    /// Whether an entry dated `date` falls inside the range.
    pub fn matches(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= date && date <= to,
            (Some(from), None) => date >= from,
            (None, Some(to)) => date <= to,
            (None, None) => matches!(self.unbounded, UnboundedRange::MatchAll),
        }
    }
}

/// How many matching entries to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLimit {
    /// No limit was supplied.
    #[default]
    Unlimited,
    /// Keep at most this many entries.
    Max(usize),
    /// A limit was supplied that no entry count stays below.
    Nothing,
}

impl LogLimit {
    /// Parse a query parameter.
    ///
    /// Absent or empty input imposes no limit. Anything else is read as a
    /// decimal number and entries are kept while their count stays below it,
    /// so `3.7` keeps four. Zero, negative and non-numeric input keep nothing.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::LogLimit;
    ///
    /// assert_eq!(LogLimit::parse(Some("2")), LogLimit::Max(2));
    /// assert_eq!(LogLimit::parse(Some("many")), LogLimit::Nothing);
    /// assert_eq!(LogLimit::parse(None), LogLimit::Unlimited);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(value) = raw.filter(|value| !value.is_empty()) else {
            return Self::Unlimited;
        };
        match parse_threshold(value) {
            Some(threshold) if threshold.is_infinite() && threshold > 0.0 => Self::Unlimited,
            // Float-to-int casts saturate, so huge thresholds stay in range.
            Some(threshold) if threshold > 0.0 => Self::Max(threshold.ceil() as usize),
            _ => Self::Nothing,
        }
    }

    /// No limit.
    pub fn unlimited() -> Self {
        Self::Unlimited
    }
}

/// Read a numeric threshold the way loose query parsers coerce strings:
/// surrounding whitespace is ignored, blank text is zero and a signed
/// `Infinity` is accepted. Returns `None` for anything non-numeric.
fn parse_threshold(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    // Rejects the `inf`/`nan` spellings f64 parsing would otherwise accept.
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse().ok()
}

/// Keep matching entries in insertion order, stopping once the limit is
/// reached.
pub fn select_entries(
    entries: Vec<ExerciseEntry>,
    filter: &RangeFilter,
    limit: LogLimit,
) -> Vec<ExerciseEntry> {
    let matching = entries
        .into_iter()
        .filter(|entry| filter.matches(entry.date()));
    match limit {
        LogLimit::Unlimited => matching.collect(),
        LogLimit::Max(max) => matching.take(max).collect(),
        LogLimit::Nothing => Vec::new(),
    }
}
