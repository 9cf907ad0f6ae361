//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{TtlPreset, MAX_PAYLOAD_SIZE};

/// Name of the directory holding cache entries.
pub const ROOT_DIRECTORY_NAME: &str = "RootDirectory";

/// Default time-to-live for cached entries.
pub const DEFAULT_TTL: TtlPreset = TtlPreset::FiveMinutes;

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory under which entries are stored
    pub root_dir: PathBuf,
    /// Time-to-live applied to every entry
    pub ttl: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
    /// Largest accepted payload in bytes
    pub max_payload_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_ROOT_DIR` - Storage root (default: platform data dir)
    /// - `CACHE_TTL` - Preset name such as `oneHour`, or seconds (default: `fiveMinutes`)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `MAX_PAYLOAD_SIZE` - Payload limit in bytes (default: 16 MB)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            root_dir: env::var_os("CACHE_ROOT_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.root_dir),
            ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| parse_ttl(&v))
                .unwrap_or(defaults.ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval),
            max_payload_size: env::var("MAX_PAYLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_payload_size),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            ttl: DEFAULT_TTL.as_duration(),
            server_port: 3000,
            sweep_interval: 60,
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

/// Parses a preset name (`oneHour`) or a whole number of seconds.
pub fn parse_ttl(value: &str) -> Option<Duration> {
    let value = value.trim();
    value
        .parse::<TtlPreset>()
        .map(TtlPreset::as_duration)
        .ok()
        .or_else(|| value.parse::<u64>().ok().map(Duration::from_secs))
}

/// Platform local data directory, falling back to the temp directory.
pub fn default_root_dir() -> PathBuf {
    root_dir_under(dirs::data_local_dir())
}

fn root_dir_under(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(env::temp_dir)
        .join("local_cache")
        .join(ROOT_DIRECTORY_NAME)
}
