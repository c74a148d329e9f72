use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use crate::sync::lock;

/// One pending delivery.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where an observer wants its deliveries to run.
///
/// Observers registered without a queue are called on the posting thread.
pub trait DeliveryQueue: Send + Sync {
    /// Enqueue a delivery. Must not run `job` re-entrantly on a lock the
    /// caller might hold, and must not block.
    fn dispatch(&self, job: Job);

    /// Name used in logs.
    fn label(&self) -> &str {
        "queue"
    }
}

/// Queue that holds jobs until [`run_pending`](ManualQueue::run_pending) is called.
pub struct ManualQueue {
    label: String,
    pending: Mutex<VecDeque<Job>>,
}

impl ManualQueue {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn pending_len(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Run every job queued so far, in FIFO order. Jobs enqueued while this
    /// runs wait for the next call. Returns how many jobs ran.
    pub fn run_pending(&self) -> usize {
        let jobs = std::mem::take(&mut *lock(&self.pending));
        let count = jobs.len();
        for job in jobs {
            job();
        }
        tracing::trace!(target: "notewire::queue", queue = %self.label, count, "ran pending jobs");
        count
    }
}

impl DeliveryQueue for ManualQueue {
    fn dispatch(&self, job: Job) {
        lock(&self.pending).push_back(job);
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ManualQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualQueue")
            .field("label", &self.label)
            .field("pending", &self.pending_len())
            .finish()
    }
}
