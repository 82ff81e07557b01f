//! Driving port for appending to a user's exercise log.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseEntry, ExerciseUser, Outcome};

/// Raw append input. Every field is optional so that missing values can be
/// reported in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendExerciseRequest {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

/// The stored entry together with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendExerciseResponse {
    pub user: ExerciseUser,
    pub entry: ExerciseEntry,
}

/// Use-case port for log mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogCommand: Send + Sync {
    async fn append_exercise(
        &self,
        request: AppendExerciseRequest,
    ) -> Result<Outcome<AppendExerciseResponse>, Error>;
}
