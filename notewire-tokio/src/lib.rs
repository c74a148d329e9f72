//! notewire-tokio: run observer deliveries on a tokio task.
//!
//! A [`TokioQueue`] owns one worker task that executes jobs one at a time in
//! the order they were dispatched. Pass it to `add_observer` to move a
//! callback off the posting thread.

use std::fmt;
use std::sync::Mutex;

use notewire_core::{DeliveryQueue, Job};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Serial delivery queue backed by an unbounded channel and a spawned task.
pub struct TokioQueue {
    label: String,
    sender: Mutex<Option<UnboundedSender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TokioQueue {
    /// Spawn the worker on the current runtime.
    ///
    /// Panics when called outside a tokio runtime, like `tokio::spawn`.
    pub fn spawn(label: impl Into<String>) -> Self {
        let label = label.into();
        let (tx, rx) = unbounded_channel();
        let worker = tokio::spawn(run_jobs(label.clone(), rx));
        Self {
            label,
            sender: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Stop accepting jobs. Jobs already queued still run.
    pub fn close(&self) {
        let closed = self
            .sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some();
        if closed {
            tracing::debug!(target: "notewire::tokio", queue = %self.label, "closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map_or(true, UnboundedSender::is_closed)
    }

    /// Close the queue and wait until every queued job has run.
    pub async fn shutdown(&self) {
        self.close();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(worker) = worker {
            let _ = worker.await;
        }
    }
}

impl DeliveryQueue for TokioQueue {
    fn dispatch(&self, job: Job) {
        let sender = self.sender.lock().unwrap_or_else(|e| e.into_inner());
        let sent = match sender.as_ref() {
            Some(tx) => tx.send(job).is_ok(),
            None => false,
        };
        if !sent {
            tracing::debug!(target: "notewire::tokio", queue = %self.label, "dropping job on closed queue");
        }
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for TokioQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioQueue")
            .field("label", &self.label)
            .field("closed", &self.is_closed())
            .finish()
    }
}

async fn run_jobs(label: String, mut rx: UnboundedReceiver<Job>) {
    while let Some(job) = rx.recv().await {
        if let Err(panic) = std::panic::catch_unwind(std::panic::AssertUnwindSafe(job)) {
            let info = if let Some(msg) = panic.downcast_ref::<&'static str>() {
                (*msg).to_string()
            } else if let Some(msg) = panic.downcast_ref::<String>() {
                msg.clone()
            } else {
                "unknown panic".to_string()
            };
            tracing::error!(target: "notewire::tokio", queue = %label, panic = %info, "observer panicked");
        }
    }
    tracing::trace!(target: "notewire::tokio", queue = %label, "worker finished");
}
