//! User data model.

use std::fmt;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    IdTooLong { max: usize },
    InvalidId,
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::IdTooLong { max } => write!(f, "user id must be at most {max} characters"),
            Self::InvalidId => write!(
                f,
                "user id may only contain letters, digits, underscores or hyphens",
            ),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Maximum allowed length for a user id.
pub const USER_ID_MAX: usize = 32;
/// Length of freshly generated ids.
pub const GENERATED_ID_LEN: usize = 10;

const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_regex() -> &'static Regex {
    USER_ID_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_-]+$")
            .unwrap_or_else(|error| panic!("user id regex failed to compile: {error}"))
    })
}

/// Short URL-safe user identifier.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::UserId;
///
/// let id = UserId::new("Hk3_x9-Qa").expect("valid id");
/// assert_eq!(id.as_ref(), "Hk3_x9-Qa");
/// assert!(UserId::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.chars().count() > USER_ID_MAX {
            return Err(UserValidationError::IdTooLong { max: USER_ID_MAX });
        }
        if !user_id_regex().is_match(&id) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id: String = (0..GENERATED_ID_LEN)
            .filter_map(|_| ID_ALPHABET.choose(&mut rng).map(|byte| char::from(*byte)))
            .collect();
        Self(id)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered username. Stored exactly as supplied; only blank input is
/// refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered user without their log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseUser {
    id: UserId,
    username: Username,
}

impl ExerciseUser {
    /// Build a user from validated parts.
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Build a user with a freshly generated id.
    pub fn register(username: Username) -> Self {
        Self::new(UserId::generate(), username)
    }

    /// Validate raw strings, typically read back from the store.
    pub fn try_from_strings(
        id: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, Username::new(username)?))
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Registered username.
    pub fn username(&self) -> &Username {
        &self.username
    }
}
