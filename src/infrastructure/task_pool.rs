//! Bounded worker pool for reachability probes and delayed notifications.
//!
//! A fixed set of worker tasks drains one bounded queue. Overflow is
//! rejected, never buffered: callers get [`TaskRejected`] and decide what to
//! surface.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, warn};

type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The pool's queue is full (or the pool is shut down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("task pool is saturated")]
pub struct TaskRejected;

/// Worker count and backlog size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPoolConfig {
    pub workers: usize,
    pub queue_capacity: usize,
}

impl Default for TaskPoolConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            queue_capacity: 25,
        }
    }
}

/// Handle to the pool. Cheap to clone; all clones share the same workers.
#[derive(Clone)]
pub struct TaskPool {
    sender: mpsc::Sender<Job>,
    active: Arc<AtomicUsize>,
    config: TaskPoolConfig,
}

impl TaskPool {
    /// Spawns the workers on the current Tokio runtime.
    pub fn new(config: TaskPoolConfig) -> Self {
        let config = TaskPoolConfig {
            workers: config.workers.max(1),
            queue_capacity: config.queue_capacity.max(1),
        };

        let (sender, receiver) = mpsc::channel::<Job>(config.queue_capacity);
        let receiver = Arc::new(Mutex::new(receiver));
        let active = Arc::new(AtomicUsize::new(0));

        for worker_id in 0..config.workers {
            let receiver = receiver.clone();
            let active = active.clone();
            tokio::spawn(async move {
                loop {
                    // Hold the lock only while waiting for the next job.
                    let job = receiver.lock().await.recv().await;
                    let Some(job) = job else {
                        break;
                    };
                    active.fetch_add(1, Ordering::Relaxed);
                    job.await;
                    active.fetch_sub(1, Ordering::Relaxed);
                }
                debug!(worker_id, "task pool worker stopped");
            });
        }

        Self {
            sender,
            active,
            config,
        }
    }

    /// Queues a fire-and-forget job.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRejected`] when the queue is full.
    pub fn execute<F>(&self, job: F) -> Result<(), TaskRejected>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.sender.try_send(Box::pin(job)).map_err(|e| {
            warn!(
                queued = self.queued(),
                "task pool rejected job: {}",
                match e {
                    mpsc::error::TrySendError::Full(_) => "queue full",
                    mpsc::error::TrySendError::Closed(_) => "pool closed",
                }
            );
            TaskRejected
        })
    }

    /// Queues a job and waits for its output.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRejected`] when the queue is full or the job was dropped
    /// before completing.
    pub async fn submit<F, T>(&self, job: F) -> Result<T, TaskRejected>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.execute(async move {
            let _ = tx.send(job.await);
        })?;
        rx.await.map_err(|_| TaskRejected)
    }

    /// Jobs currently running.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }

    /// Jobs waiting in the queue.
    pub fn queued(&self) -> usize {
        self.config.queue_capacity - self.sender.capacity()
    }

    pub fn config(&self) -> TaskPoolConfig {
        self.config
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
