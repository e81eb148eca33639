//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `INVENTORY_*` environment variables or a
//! config file, in ortho_config's usual precedence. Numeric fields carry
//! ortho_config defaults; the text fields fall back in their accessors.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DATABASE_URL: &str = "inventory.db";

/// Server and database settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVENTORY")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// SQLite database file path.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 4)]
    pub max_connections: u32,
}

/// Raised when the configured host and port do not form a socket address.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {address}: {source}")]
pub struct BindAddressError {
    address: String,
    #[source]
    source: std::net::AddrParseError,
}

impl AppSettings {
    /// Interface to bind, `127.0.0.1` unless configured.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// TCP port, 8080 unless configured.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// SQLite file path, `inventory.db` unless configured.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool size; zero is raised to one.
    pub fn max_connections(&self) -> u32 {
        self.max_connections.max(1)
    }

    /// Resolve the address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns [`BindAddressError`] when `host` is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddressError> {
        let address = format!("{}:{}", self.host(), self.port());
        address
            .parse()
            .map_err(|source| BindAddressError { address, source })
    }
}
