//! Server entry-point: loads settings, prepares the store and serves the
//! exercise API, health probes, static assets and (in debug builds) OpenAPI
//! docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use exercise_tracker::inbound::http::health::HealthState;
use exercise_tracker::outbound::persistence::{DbPool, PoolError, run_migrations};
use exercise_tracker::settings::AppSettings;
use server::{ServerConfig, create_server};

/// Failures that stop the server before it accepts traffic.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    Database(#[from] PoolError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| StartupError::Settings(err.to_string()))?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(bind_addr, settings.static_dir().to_path_buf())
        .with_unbounded_range(settings.unbounded_range());
    if let Some(pool_config) = settings.pool_config() {
        // A configured database that cannot be migrated is fatal.
        run_migrations(pool_config.database_url()).await?;
        let pool = DbPool::new(pool_config).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "exercise tracker listening");
    server.await?;
    Ok(())
}
