//! # WordVault
//!
//! A network-accessible word/definition store with:
//! - One-shot TCP connections carrying length-prefixed JSON frames
//! - A durable, file-backed dictionary with linearized mutations
//! - A bounded worker pool (core threads + lazy scale-up to a maximum)
//! - An observer interface for lifecycle and per-request events
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Listener                              │
//! │               (accept loop, one thread)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one connection = one unit of work
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Worker Pool                             │
//! │            (bounded queue, core → max threads)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │   Handler   │
//!   │ (JSON frame)│          │ (dispatch)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Dictionary  │
//!                           │ (RwLock +   │
//!                           │  JSON file) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod store;
pub mod handler;
pub mod network;
pub mod observer;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, VaultError};
pub use config::Config;
pub use handler::RequestHandler;
pub use network::Server;
pub use observer::ServerObserver;
pub use store::Dictionary;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of WordVault
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
