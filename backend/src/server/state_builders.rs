//! Builders for the user store and the HTTP state wired over it.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use exercise_tracker::domain::ports::UserStore;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::InMemoryUserStore;
use exercise_tracker::outbound::persistence::DieselUserStore;

use super::ServerConfig;

/// Use PostgreSQL when a pool is configured, otherwise keep users in memory.
pub(super) fn build_user_store(config: &ServerConfig) -> Arc<dyn UserStore> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserStore::new(pool.clone())),
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_store(
        build_user_store(config),
        Arc::new(DefaultClock),
        config.unbounded_range,
    ))
}
