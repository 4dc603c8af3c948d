//! TCP Listener
//!
//! Owns the bind/accept lifecycle and the start/stop state machine:
//!
//! ```text
//! Stopped -> Starting -> Started -> Stopping -> Stopped
//! ```
//!
//! The accept loop runs on its own thread with a non-blocking listener and
//! a shutdown flag, so stopping never blocks on a pending accept. Each
//! accepted connection is handed to the bounded worker pool; a saturated
//! pool closes the connection rather than queueing unboundedly.

use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, VaultError};
use crate::handler::RequestHandler;
use crate::observer::ServerObserver;
use crate::store::Dictionary;

use super::{Connection, WorkerPool};

/// Poll interval of the non-blocking accept loop
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Listener lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Starting,
    Started,
    Stopping,
}

/// Mutable listener state, guarded as one unit
struct Inner {
    state: ServerState,
    local_addr: Option<SocketAddr>,
    accept_handle: Option<JoinHandle<()>>,
    pool: Option<Arc<WorkerPool>>,
}

/// TCP server for WordVault
pub struct Server {
    config: Config,
    store: Arc<Dictionary>,
    observer: Arc<dyn ServerObserver>,
    inner: Mutex<Inner>,

    /// Set by `stop` (or by an accept-loop failure) to end the accept loop
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Create a new server over the given store
    pub fn new(config: Config, store: Arc<Dictionary>, observer: Arc<dyn ServerObserver>) -> Self {
        Self {
            config,
            store,
            observer,
            inner: Mutex::new(Inner {
                state: ServerState::Stopped,
                local_addr: None,
                accept_handle: None,
                pool: None,
            }),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Bind the port and start accepting connections
    ///
    /// No-op if already started. Port 0 binds an ephemeral port; see
    /// [`Server::local_addr`]. A bind failure leaves the server `Stopped`.
    pub fn start(&self, port: u16) -> Result<()> {
        self.reap_failed_listener();

        let mut inner = self.inner.lock();
        if inner.state != ServerState::Stopped {
            return Ok(());
        }
        inner.state = ServerState::Starting;

        match self.bind_and_spawn(port, &mut inner) {
            Ok(local_addr) => {
                inner.state = ServerState::Started;
                drop(inner);

                tracing::info!("Listening on {}", local_addr);
                self.observer.on_server_started();
                Ok(())
            }
            Err(e) => {
                inner.state = ServerState::Stopped;
                Err(e)
            }
        }
    }

    /// Bind the listener and spawn the acceptor; fills in `inner` on success
    fn bind_and_spawn(&self, port: u16, inner: &mut Inner) -> Result<SocketAddr> {
        let listener = match TcpListener::bind(("0.0.0.0", port)) {
            Ok(listener) => listener,
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                return Err(VaultError::PortInUse(port));
            }
            Err(e) => return Err(e.into()),
        };
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        let pool = Arc::new(WorkerPool::new(
            self.config.pool_core_threads,
            self.config.pool_max_threads,
            self.config.pool_queue_capacity,
        ));

        self.shutdown.store(false, Ordering::SeqCst);

        let handle = {
            let pool = Arc::clone(&pool);
            let store = Arc::clone(&self.store);
            let observer = Arc::clone(&self.observer);
            let shutdown = Arc::clone(&self.shutdown);
            let config = self.config.clone();

            std::thread::Builder::new()
                .name("wordvault-acceptor".to_string())
                .spawn(move || {
                    accept_loop(listener, pool, store, observer, shutdown, config);
                })?
        };

        inner.local_addr = Some(local_addr);
        inner.accept_handle = Some(handle);
        inner.pool = Some(pool);
        Ok(local_addr)
    }

    /// Stop accepting and shut the worker pool down
    ///
    /// No-op if not started; idempotent. Already-queued connections are
    /// drained before the workers are joined.
    pub fn stop(&self) {
        self.reap_failed_listener();

        let mut inner = self.inner.lock();
        if inner.state != ServerState::Started {
            return;
        }
        inner.state = ServerState::Stopping;

        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = inner.accept_handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Acceptor thread panicked");
            }
        }
        if let Some(pool) = inner.pool.take() {
            pool.shutdown();
        }

        inner.local_addr = None;
        inner.state = ServerState::Stopped;
        drop(inner);

        self.observer.on_server_stopped();
    }

    /// Current lifecycle state
    pub fn state(&self) -> ServerState {
        self.reap_failed_listener();
        self.inner.lock().state
    }

    /// Whether the server is accepting connections
    pub fn is_started(&self) -> bool {
        self.state() == ServerState::Started
    }

    /// The bound address, while started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.inner.lock().local_addr
    }

    /// Block until the accept loop exits
    ///
    /// Used by the server binary to keep the process alive.
    pub fn wait(&self) {
        let handle = self.inner.lock().accept_handle.take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Complete the stop after an accept-loop failure
    ///
    /// The accept loop cannot join itself, so a listener fault only raises
    /// the shutdown flag and exits. The next lifecycle call lands here,
    /// performs the real transition to `Stopped` (releasing the pool and
    /// the acceptor handle), and notifies the observer, so a later `start`
    /// binds afresh instead of no-opping on a dead server.
    fn reap_failed_listener(&self) {
        let mut inner = self.inner.lock();
        if inner.state != ServerState::Started || !self.shutdown.load(Ordering::SeqCst) {
            return;
        }
        inner.state = ServerState::Stopping;

        if let Some(handle) = inner.accept_handle.take() {
            if handle.join().is_err() {
                tracing::warn!("Acceptor thread panicked");
            }
        }
        if let Some(pool) = inner.pool.take() {
            pool.shutdown();
        }

        inner.local_addr = None;
        inner.state = ServerState::Stopped;
        drop(inner);

        self.observer.on_server_stopped();
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Accept Loop
// =============================================================================

/// Accept connections until shutdown or a listener failure
fn accept_loop(
    listener: TcpListener,
    pool: Arc<WorkerPool>,
    store: Arc<Dictionary>,
    observer: Arc<dyn ServerObserver>,
    shutdown: Arc<AtomicBool>,
    config: Config,
) {
    while !shutdown.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, peer)) => {
                tracing::trace!("Accepted connection from {}", peer);
                dispatch(stream, &pool, &store, &observer, &config);
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                std::thread::sleep(ACCEPT_POLL_INTERVAL);
            }
            Err(e) => {
                // Listener is gone; leave the loop without taking the
                // process down. The next lifecycle call observes the flag
                // and completes the transition to Stopped.
                tracing::error!("Accept failed: {}", e);
                shutdown.store(true, Ordering::SeqCst);
            }
        }
    }
}

/// Hand one accepted connection to the pool
fn dispatch(
    stream: TcpStream,
    pool: &Arc<WorkerPool>,
    store: &Arc<Dictionary>,
    observer: &Arc<dyn ServerObserver>,
    config: &Config,
) {
    // The stream inherits the listener's non-blocking mode; workers want
    // blocking reads with timeouts instead.
    if let Err(e) = stream.set_nonblocking(false) {
        tracing::warn!("Failed to configure accepted stream: {}", e);
        return;
    }

    let handler = RequestHandler::new(Arc::clone(store));
    let mut connection = match Connection::new(stream, handler, Arc::clone(observer)) {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!("Failed to set up connection: {}", e);
            return;
        }
    };
    if let Err(e) = connection.set_timeouts(config.read_timeout_ms, config.write_timeout_ms) {
        tracing::warn!("Failed to set timeouts for {}: {}", connection.peer(), e);
    }

    let peer = connection.peer();
    if let Err(e) = pool.submit(move || connection.serve()) {
        // Reject-and-close: dropping the connection closes the socket
        tracing::warn!("Rejecting connection from {}: {}", peer, e);
    }
}

// =============================================================================
// Tests
// =============================================================================
