//! Accepted-or-rejected results for driving ports.
//!
//! A rejection is a request the caller can fix by resending different input.
//! It is reported to the client as a plain message with a success status,
//! unlike [`crate::domain::Error`], which ends the request with a failure
//! status.

use std::fmt;

/// Reasons a well-formed request is refused without touching the store
/// (or after the store reports a conflict).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// `username` was absent or blank.
    UsernameRequired,
    /// Another user already holds the requested username.
    UsernameTaken,
    /// An append request carried no `userId`.
    UnknownId,
    /// An append request carried no usable description.
    DescriptionRequired,
    /// The duration was absent, unparseable or zero.
    DurationRequired,
    /// A log query carried no `userId`.
    UnknownUserId,
}

impl Rejection {
    /// Client-facing message for the rejection.
    pub fn message(self) -> &'static str {
        match self {
            Self::UsernameRequired => "Path `username` is required.",
            Self::UsernameTaken => "username already taken!",
            Self::UnknownId => "unknown _id",
            Self::DescriptionRequired => "Path `description` is required.",
            Self::DurationRequired => "Path `duration` is required.",
            Self::UnknownUserId => "unknown userId",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a driving-port operation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed with this value.
    Accepted(T),
    /// The input was refused; nothing was changed.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Map the accepted value, leaving rejections untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Accepted(value) => Outcome::Accepted(f(value)),
            Self::Rejected(rejection) => Outcome::Rejected(rejection),
        }
    }

    /// Return the accepted value, if any.
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Return the rejection, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }
}
