//! Server observer interface
//!
//! Lifecycle and per-request events for an external surface (GUI, log
//! console, test harness). Callbacks are plain synchronous calls made from
//! server-internal threads; no thread affinity is promised, only ordering:
//! the request notification fires after the response bytes are flushed.

use std::net::SocketAddr;

/// Observes server lifecycle and completed requests
pub trait ServerObserver: Send + Sync {
    /// Fired once after a successful bind
    fn on_server_started(&self) {}

    /// Fired once after the listener is closed
    fn on_server_stopped(&self) {}

    /// Fired once per completed request, after the response has been sent
    fn on_server_request(&self, peer: SocketAddr, command: &str, message: &str) {
        let _ = (peer, command, message);
    }
}

/// Observer that logs events through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ServerObserver for TracingObserver {
    fn on_server_started(&self) {
        tracing::info!("Server started.");
    }

    fn on_server_stopped(&self) {
        tracing::info!("Server stopped.");
    }

    fn on_server_request(&self, peer: SocketAddr, command: &str, message: &str) {
        tracing::info!("{} [{}] {}", peer, command, message);
    }
}
