//! Server configuration
//!
//! Assembled from CLI flags (with env-var fallbacks, see `main.rs`) plus a
//! platform-specific default database location.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{Result, ShelfError};
use crate::storage::Database;

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// SQLite database file (created if missing)
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Build from raw CLI values
    ///
    /// A missing database path falls back to the platform's app-data
    /// directory.
    pub fn from_parts(listen: &str, database: Option<PathBuf>) -> Result<Self> {
        let bind_addr = listen.parse::<SocketAddr>().map_err(|e| {
            ShelfError::InvalidConfiguration(format!("Invalid listen address '{}': {}", listen, e))
        })?;

        Ok(Self {
            bind_addr,
            database_path: database.unwrap_or_else(Database::get_default_path),
        })
    }
}
