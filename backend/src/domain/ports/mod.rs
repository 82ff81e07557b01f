//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_log_command;
mod exercise_log_query;
mod user_registration;
mod user_store;

#[cfg(test)]
pub use exercise_log_command::MockExerciseLogCommand;
pub use exercise_log_command::{
    AppendExerciseRequest, AppendExerciseResponse, ExerciseLogCommand,
};
#[cfg(test)]
pub use exercise_log_query::MockExerciseLogQuery;
pub use exercise_log_query::{ExerciseLogQuery, GetLogRequest, GetLogResponse};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::{RegisterUserRequest, RegisterUserResponse, UserRegistration};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{CreateUserOutcome, UserStore, UserStoreError};
