//! Shared helpers for integration tests that need embedded PostgreSQL.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! suites opt in with `mod support;`.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_template_database, shared_cluster};
