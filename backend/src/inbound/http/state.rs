//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{ExerciseLogCommand, ExerciseLogQuery, UserRegistration, UserStore};
use crate::domain::{ExerciseLogService, UnboundedRange, UserRegistryService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub exercise_log: Arc<dyn ExerciseLogCommand>,
    pub exercise_log_query: Arc<dyn ExerciseLogQuery>,
}

impl HttpState {
    /// Construct state from individual port implementations.
    pub fn new(
        registration: Arc<dyn UserRegistration>,
        exercise_log: Arc<dyn ExerciseLogCommand>,
        exercise_log_query: Arc<dyn ExerciseLogQuery>,
    ) -> Self {
        Self {
            registration,
            exercise_log,
            exercise_log_query,
        }
    }

    /// Wire the domain services over a single store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::UnboundedRange;
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::InMemoryUserStore;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_store(
    ///     Arc::new(InMemoryUserStore::new()),
    ///     Arc::new(DefaultClock),
    ///     UnboundedRange::default(),
    /// );
    /// let _registration = state.registration.clone();
    /// ```
    pub fn from_store(
        store: Arc<dyn UserStore>,
        clock: Arc<dyn Clock>,
        unbounded: UnboundedRange,
    ) -> Self {
        let log_service = Arc::new(
            ExerciseLogService::new(store.clone(), clock).with_unbounded_range(unbounded),
        );
        Self {
            registration: Arc::new(UserRegistryService::new(store)),
            exercise_log: log_service.clone(),
            exercise_log_query: log_service,
        }
    }
}
