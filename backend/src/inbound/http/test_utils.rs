//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::UnboundedRange;
use crate::inbound::http::error::not_found;
use crate::inbound::http::exercises::{append_exercise, get_exercise_log};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::register_user;
use crate::outbound::memory::InMemoryUserStore;

/// Clock pinned to 2024-03-15 23:45 UTC.
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 23, 45, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Calendar rendering of [`FixtureClock`]'s date.
pub const FIXTURE_TODAY: &str = "Fri Mar 15 2024";

/// State backed by a fresh in-memory store and [`FixtureClock`].
pub fn memory_state() -> HttpState {
    HttpState::from_store(
        Arc::new(InMemoryUserStore::new()),
        Arc::new(FixtureClock),
        UnboundedRange::default(),
    )
}

/// Application exposing the exercise routes under `/api`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(
            web::scope("/api")
                .service(register_user)
                .service(append_exercise)
                .service(get_exercise_log),
        )
        .default_service(web::to(not_found))
}
