//! Configuration for WordVault
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default port used when the caller supplies an invalid one
pub const DEFAULT_PORT: u16 = 8000;

/// Default backing file, bootstrapped empty on first open
pub const DEFAULT_DICTIONARY_PATH: &str = "dictionary.json";

/// Main configuration for a WordVault server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the persisted dictionary file (JSON array of entries)
    pub dictionary_path: PathBuf,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP listen port (0 picks an ephemeral port, useful in tests)
    pub port: u16,

    /// Worker threads spawned eagerly
    pub pool_core_threads: usize,

    /// Upper bound on worker threads; the pool scales lazily up to this
    pub pool_max_threads: usize,

    /// Capacity of the pending-connection queue; a full queue rejects
    pub pool_queue_capacity: usize,

    /// Connection read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            port: DEFAULT_PORT,
            pool_core_threads: 5,
            pool_max_threads: 10,
            pool_queue_capacity: 32,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the dictionary file path
    pub fn dictionary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dictionary_path = path.into();
        self
    }

    /// Set the TCP listen port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the number of eagerly-spawned worker threads
    pub fn pool_core_threads(mut self, count: usize) -> Self {
        self.config.pool_core_threads = count;
        self
    }

    /// Set the maximum number of worker threads
    pub fn pool_max_threads(mut self, count: usize) -> Self {
        self.config.pool_max_threads = count;
        self
    }

    /// Set the pending-connection queue capacity
    pub fn pool_queue_capacity(mut self, count: usize) -> Self {
        self.config.pool_queue_capacity = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Parse a port argument, accepting only the range (1024, 65535]
///
/// Returns `None` for anything unparsable or out of range; callers fall
/// back to [`DEFAULT_PORT`] with a warning.
pub fn parse_port(arg: &str) -> Option<u16> {
    match arg.trim().parse::<u32>() {
        Ok(value) if value > 1024 && value <= 65535 => Some(value as u16),
        _ => None,
    }
}
