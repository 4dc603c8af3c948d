//! Error types for WordVault
//!
//! Provides a unified error type for all operations. Domain outcomes
//! (`WordExists`, `WordNotFound`) are expected steady-state results and are
//! kept apart from genuine faults (I/O, persistence, protocol).

use thiserror::Error;

/// Result type alias using VaultError
pub type Result<T> = std::result::Result<T, VaultError>;

/// Unified error type for WordVault operations
#[derive(Debug, Error)]
pub enum VaultError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Domain Outcomes
    // -------------------------------------------------------------------------
    #[error("Word already exists")]
    WordExists,

    #[error("Word not found")]
    WordNotFound,

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Persistence failure: {0}")]
    Persistence(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Port {0} is already in use")]
    PortInUse(u16),

    #[error("Worker pool saturated")]
    PoolSaturated,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
