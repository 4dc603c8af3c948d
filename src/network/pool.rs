//! Worker Pool
//!
//! Bounds the number of simultaneously-serviced connections.
//!
//! ## Sizing
//! - `core` threads are spawned up front.
//! - When a submission lands behind queued work, the pool lazily spawns
//!   extra threads up to `max`.
//! - The queue itself is bounded; a full queue rejects the submission with
//!   `PoolSaturated` and the caller closes the connection. Nothing is ever
//!   silently dropped or allowed to grow unboundedly.
//!
//! ## Shutdown
//! Graceful drain: `shutdown` drops the submission side of the channel, so
//! workers finish the queued jobs, observe the disconnect, and exit; the
//! call then joins them. A panicking job takes its worker down but leaves
//! the queue and the other workers intact.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

use crossbeam::channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;

use crate::error::{Result, VaultError};

/// A unit of work: one accepted connection, drained start to finish
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Bounded pool of worker threads fed by a bounded queue
pub struct WorkerPool {
    /// Submission side; dropped on shutdown so workers drain and exit
    sender: Mutex<Option<Sender<Job>>>,

    /// Shared receive side, cloned into each worker
    receiver: Receiver<Job>,

    /// Worker join handles
    workers: Mutex<Vec<JoinHandle<()>>>,

    /// Number of threads spawned so far
    spawned: AtomicUsize,

    /// Upper bound on worker threads
    max_threads: usize,
}

impl WorkerPool {
    /// Create a pool with `core` eager threads, scaling up to `max`
    pub fn new(core: usize, max: usize, queue_capacity: usize) -> Self {
        let (sender, receiver) = bounded::<Job>(queue_capacity);

        let pool = Self {
            sender: Mutex::new(Some(sender)),
            receiver,
            workers: Mutex::new(Vec::with_capacity(max)),
            spawned: AtomicUsize::new(0),
            max_threads: max.max(core),
        };

        for _ in 0..core {
            pool.spawn_worker();
        }

        pool
    }

    /// Submit a unit of work
    ///
    /// Fails with `PoolSaturated` when the queue is full or the pool has
    /// been shut down; the caller is expected to close the connection.
    pub fn submit<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let sender = self.sender.lock();
        let sender = sender.as_ref().ok_or(VaultError::PoolSaturated)?;

        match sender.try_send(Box::new(job)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                return Err(VaultError::PoolSaturated);
            }
        }

        // Work is queueing behind busy workers: scale up toward the max
        if !self.receiver.is_empty() && self.spawned.load(Ordering::SeqCst) < self.max_threads {
            self.spawn_worker();
        }

        Ok(())
    }

    /// Shut the pool down, draining queued work and joining every worker
    ///
    /// Idempotent; later `submit` calls fail with `PoolSaturated`.
    pub fn shutdown(&self) {
        // Dropping the sender lets workers drain the queue and exit
        self.sender.lock().take();

        let handles: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                tracing::warn!("Worker thread panicked");
            }
        }
    }

    /// Number of worker threads spawned so far
    pub fn worker_count(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    /// Number of jobs waiting in the queue
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn spawn_worker(&self) {
        let id = self.spawned.fetch_add(1, Ordering::SeqCst);
        if id >= self.max_threads {
            self.spawned.fetch_sub(1, Ordering::SeqCst);
            return;
        }

        let receiver = self.receiver.clone();
        let handle = std::thread::Builder::new()
            .name(format!("wordvault-worker-{}", id))
            .spawn(move || {
                while let Ok(job) = receiver.recv() {
                    job();
                }
            })
            .expect("failed to spawn worker thread");

        self.workers.lock().push(handle);
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
