//! Configuration Module
//!
//! Loads engine and monitor-server settings from environment variables.

use std::env;

/// Engine and monitor configuration.
///
/// All values can be configured via environment variables with
/// sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Item-count budget for the memory tier
    pub max_entries: usize,
    /// Byte budget for the memory tier
    pub max_memory_bytes: u64,
    /// TTL in milliseconds applied when an insert specifies none
    pub default_ttl_ms: u64,
    /// Monitor HTTP server port
    pub server_port: u16,
    /// Background expiry-sweep interval in seconds
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Item-count budget (default: 1000)
    /// - `MAX_MEMORY_BYTES` - Byte budget (default: 50 MiB)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 1 hour)
    /// - `SERVER_PORT` - Monitor HTTP port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            max_memory_bytes: env::var("MAX_MEMORY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50 * 1024 * 1024),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60 * 60 * 1000),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_memory_bytes: 50 * 1024 * 1024,
            default_ttl_ms: 60 * 60 * 1000,
            server_port: 3000,
            sweep_interval: 30,
        }
    }
}
