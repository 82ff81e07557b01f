//! Server settings loaded via OrthoConfig from CLI flags and `EXERCISE_*`
//! environment variables.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::UnboundedRange;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings for the exercise tracker server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE")]
pub struct AppSettings {
    /// PostgreSQL connection URL. Without one, users live in memory.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Directory served at `/`.
    pub static_dir: Option<PathBuf>,
    /// Return every entry when a log query has no usable date bound.
    #[ortho_config(default = false)]
    pub include_unbounded_log: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve `host:port` into the first socket address it names.
    ///
    /// # Errors
    /// Returns an I/O error when the host cannot be resolved.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::other(format!("host {} resolved to no address", self.host()))
            })
    }

    /// Return the static asset directory.
    pub fn static_dir(&self) -> &Path {
        self.static_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STATIC_DIR))
    }

    /// Policy for log queries without a usable date bound.
    pub fn unbounded_range(&self) -> UnboundedRange {
        if self.include_unbounded_log {
            UnboundedRange::MatchAll
        } else {
            UnboundedRange::MatchNone
        }
    }

    /// Pool settings when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
        })
    }
}
