//! Exercise log services.
//!
//! A single service implements both the append command and the log query,
//! sharing the store handle and clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AppendExerciseRequest, AppendExerciseResponse, ExerciseLogCommand, ExerciseLogQuery,
    GetLogRequest, GetLogResponse, UserStore,
};
use crate::domain::store_error_mapping::map_store_error;
use crate::domain::{
    DateBound, Error, ExerciseDuration, ExerciseEntry, ExerciseEntryDraft,
    ExerciseValidationError, LogLimit, Outcome, RangeFilter, Rejection, UnboundedRange, UserId,
    resolve_entry_date, select_entries,
};

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn validation_error(error: ExerciseValidationError) -> Error {
    Error::field(error.field(), error.to_string())
}

fn unknown_user(rejection: Rejection) -> Error {
    Error::not_found(rejection.message())
}

/// Appends entries and reads filtered logs through a [`UserStore`].
#[derive(Clone)]
pub struct ExerciseLogService<S: ?Sized> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    unbounded: UnboundedRange,
}

impl<S: ?Sized> ExerciseLogService<S> {
    /// Create a service. Log queries without usable bounds return no entries.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::ExerciseLogService;
    /// use exercise_tracker::outbound::memory::InMemoryUserStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = ExerciseLogService::new(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            unbounded: UnboundedRange::default(),
        }
    }

    /// Choose how queries without usable bounds behave.
    #[must_use]
    pub fn with_unbounded_range(mut self, unbounded: UnboundedRange) -> Self {
        self.unbounded = unbounded;
        self
    }
}

#[async_trait]
impl<S> ExerciseLogCommand for ExerciseLogService<S>
where
    S: UserStore + ?Sized,
{
    async fn append_exercise(
        &self,
        request: AppendExerciseRequest,
    ) -> Result<Outcome<AppendExerciseResponse>, Error> {
        let AppendExerciseRequest {
            user_id,
            description,
            duration,
            date,
        } = request;

        let Some(user_id) = present(user_id) else {
            return Ok(Outcome::Rejected(Rejection::UnknownId));
        };
        let Some(description) = present(description) else {
            return Ok(Outcome::Rejected(Rejection::DescriptionRequired));
        };
        let Some(duration) = duration.as_deref().and_then(ExerciseDuration::parse) else {
            return Ok(Outcome::Rejected(Rejection::DurationRequired));
        };

        let today = self.clock.utc().date_naive();
        let date = resolve_entry_date(date.as_deref(), today).map_err(validation_error)?;
        let entry = ExerciseEntry::new(ExerciseEntryDraft {
            description,
            duration: duration.value(),
            date,
        })
        .map_err(validation_error)?;

        // An id that fails validation cannot name a stored user.
        let id = UserId::new(user_id).map_err(|_| unknown_user(Rejection::UnknownId))?;
        let user = self
            .store
            .append_entry(&id, &entry)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| unknown_user(Rejection::UnknownId))?;

        info!(user_id = %user.id(), date = %entry.date(), "appended exercise entry");
        Ok(Outcome::Accepted(AppendExerciseResponse { user, entry }))
    }
}

#[async_trait]
impl<S> ExerciseLogQuery for ExerciseLogService<S>
where
    S: UserStore + ?Sized,
{
    async fn get_log(&self, request: GetLogRequest) -> Result<Outcome<GetLogResponse>, Error> {
        let GetLogRequest {
            user_id,
            from,
            to,
            limit,
        } = request;

        let Some(user_id) = present(user_id) else {
            return Ok(Outcome::Rejected(Rejection::UnknownUserId));
        };
        let id = UserId::new(user_id).map_err(|_| unknown_user(Rejection::UnknownUserId))?;
        let log = self
            .store
            .find_by_id(&id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| unknown_user(Rejection::UnknownUserId))?;

        let from = DateBound::parse(from.as_deref());
        let to = DateBound::parse(to.as_deref());
        let filter = RangeFilter::new(from, to, self.unbounded);
        let (user, entries) = log.into_parts();
        let entries = select_entries(entries, &filter, LogLimit::parse(limit.as_deref()));

        Ok(Outcome::Accepted(GetLogResponse {
            user,
            from,
            to,
            entries,
        }))
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
