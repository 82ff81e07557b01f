//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use exercise_tracker::domain::UnboundedRange;
use exercise_tracker::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) static_dir: PathBuf,
    pub(crate) unbounded_range: UnboundedRange,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration without a database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, static_dir: PathBuf) -> Self {
        Self {
            bind_addr,
            static_dir,
            unbounded_range: UnboundedRange::default(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, users and entries are stored in PostgreSQL; otherwise
    /// they live in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Choose how log queries without a usable date bound behave.
    #[must_use]
    pub fn with_unbounded_range(mut self, unbounded_range: UnboundedRange) -> Self {
        self.unbounded_range = unbounded_range;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
