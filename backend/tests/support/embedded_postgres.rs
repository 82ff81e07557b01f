//! Embedded PostgreSQL provisioning for store tests.
//!
//! A template database is migrated once per migration set, keyed by a hash
//! of `backend/migrations`, and every test clones a fresh database from it.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use exercise_tracker::domain::ports::UserStoreError;
use pg_embedded_setup_unpriv::test_support::hash_directory;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "exercise_template";
const PROVISION_RETRIES: usize = 3;
const PROVISION_RETRY_DELAY: Duration = Duration::from_millis(500);

fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations")
}

fn template_database_name() -> Result<String, UserStoreError> {
    let hash = hash_directory(migrations_dir())
        .map_err(|err| UserStoreError::query(format!("hash migrations: {err}")))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Returns the process-wide embedded cluster, retrying transient bootstrap
/// failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < PROVISION_RETRIES => {
                eprintln!("pg-embed: bootstrap attempt {attempt} failed: {error:?}");
                std::thread::sleep(PROVISION_RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Runs all pending Diesel migrations against `url`.
pub fn migrate_schema(url: &str) -> Result<(), UserStoreError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| UserStoreError::connection(format!("{err:?}")))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| UserStoreError::query(format!("migration: {err:?}")))?;
    Ok(())
}

/// Creates or reuses the migrated template database.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, UserStoreError> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| UserStoreError::query(format!("template check: {err:?}")))?;

    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| UserStoreError::query(format!("create template: {err:?}")))?;
        let url = cluster.connection().database_url(&template_name);
        migrate_schema(&url)?;
    }

    Ok(template_name)
}

/// Provisions a temporary database cloned from the migration template.
pub fn provision_template_database(
    cluster: &ClusterHandle,
) -> Result<TemporaryDatabase, UserStoreError> {
    let mut last_error = None;
    for attempt in 1..=PROVISION_RETRIES {
        let provisioned = ensure_template_database(cluster).and_then(|template_name| {
            let db_name = format!("test_{}", Uuid::new_v4());
            cluster
                .temporary_database_from_template(db_name.as_str(), template_name.as_str())
                .map_err(|err| {
                    UserStoreError::query(format!(
                        "create database from template: attempt {attempt}/{PROVISION_RETRIES}: {err:?}"
                    ))
                })
        });
        match provisioned {
            Ok(database) => return Ok(database),
            Err(error) => last_error = Some(error),
        }
        if attempt < PROVISION_RETRIES {
            std::thread::sleep(PROVISION_RETRY_DELAY);
        }
    }

    Err(last_error.unwrap_or_else(|| {
        UserStoreError::query("create database from template: exhausted retries")
    }))
}
