//! Network Module
//!
//! TCP listener and connection handling.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking accept + shutdown flag)
//! - Bounded worker pool servicing one connection per unit of work
//! - Each connection: read one request, respond once, close

mod server;
mod connection;
mod pool;

pub use server::{Server, ServerState};
pub use connection::Connection;
pub use pool::WorkerPool;
