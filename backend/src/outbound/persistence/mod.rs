//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! The persistence layer follows these principles:
//!
//! - **Thin adapters**: the store only translates between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) are never exposed to the domain layer.
//! - **Async-safe pooling**: connections are managed via `bb8` through
//!   `diesel-async`.
//! - **Strongly typed errors**: database errors are mapped to
//!   [`crate::domain::ports::UserStoreError`].
//!
//! # Example
//!
//! ```no_run
//! use exercise_tracker::outbound::persistence::{
//!     DbPool, DieselUserStore, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), exercise_tracker::outbound::persistence::PoolError> {
//! let url = "postgres://localhost/exercise";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let store = DieselUserStore::new(pool);
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_store;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
