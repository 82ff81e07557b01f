//! Driving port for reading a filtered view of a user's exercise log.

use async_trait::async_trait;

use crate::domain::{DateBound, Error, ExerciseEntry, ExerciseUser, Outcome};

/// Raw log query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetLogRequest {
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Entries selected for a user, with the bounds that selected them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLogResponse {
    pub user: ExerciseUser,
    pub from: DateBound,
    pub to: DateBound,
    pub entries: Vec<ExerciseEntry>,
}

impl GetLogResponse {
    /// Number of entries returned.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Use-case port for log reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    async fn get_log(&self, request: GetLogRequest) -> Result<Outcome<GetLogResponse>, Error>;
}
