//! Connection Handler
//!
//! One accepted connection is one unit of work: read exactly one request,
//! handle it, write exactly one response, notify the observer, close.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, VaultError};
use crate::handler::RequestHandler;
use crate::observer::ServerObserver;
use crate::protocol::{read_request, write_response, Response};

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Command dispatcher
    handler: RequestHandler,

    /// Observer notified after the response is sent
    observer: Arc<dyn ServerObserver>,

    /// Peer address for logging and observer notification
    peer: SocketAddr,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O; timeouts are configured separately.
    pub fn new(
        stream: TcpStream,
        handler: RequestHandler,
        observer: Arc<dyn ServerObserver>,
    ) -> Result<Self> {
        let peer = stream.peer_addr()?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            handler,
            observer,
            peer,
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        if read_ms > 0 {
            self.reader
                .get_ref()
                .set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            self.writer
                .get_ref()
                .set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Service the connection: one request, one response, close
    ///
    /// Every decodable-or-not request is answered with exactly one frame;
    /// only a transport failure that prevents writing the response closes
    /// the connection silently. Errors never escape into the pool.
    pub fn serve(mut self) {
        tracing::debug!("Connection established from {}", self.peer);

        let response = match read_request(&mut self.reader) {
            Ok(request) => {
                tracing::trace!("Request from {}: {:?}", self.peer, request);
                self.handler.handle(request)
            }
            Err(VaultError::Io(e)) => {
                // Client hung up or timed out before sending a full frame
                tracing::debug!("Transport error reading from {}: {}", self.peer, e);
                self.close();
                return;
            }
            Err(e) => {
                // Malformed frame or payload still gets an answer
                tracing::debug!("Invalid request from {}: {}", self.peer, e);
                Response::invalid()
            }
        };

        if let Err(e) = write_response(&mut self.writer, &response) {
            tracing::debug!("Failed to write response to {}: {}", self.peer, e);
            self.close();
            return;
        }

        self.observer
            .on_server_request(self.peer, &response.command, &response.message);

        self.close();
    }

    /// The peer address
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    fn close(&mut self) {
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }
}
