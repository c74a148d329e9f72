use std::fmt;
use std::sync::Mutex;

use crate::handle::ObservationHandle;
use crate::sync::lock;

/// Owns a group of [`ObservationHandle`]s and releases them together.
///
/// `add` and `clear` may race from different threads. The lock is held only
/// to push or to swap the list out; handles are released after it is
/// dropped, so a release action may touch the same bag again.
#[derive(Default)]
pub struct ObservationBag {
    handles: Mutex<Vec<ObservationHandle>>,
}

impl ObservationBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, handle: ObservationHandle) {
        lock(&self.handles).push(handle);
    }

    /// Release every handle currently held, in insertion order.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *lock(&self.handles));
        if drained.is_empty() {
            return;
        }
        tracing::trace!(target: "notewire::bag", count = drained.len(), "releasing observations");
        drop(drained);
    }

    pub fn len(&self) -> usize {
        lock(&self.handles).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<ObservationHandle> for ObservationBag {
    fn extend<I: IntoIterator<Item = ObservationHandle>>(&mut self, iter: I) {
        lock(&self.handles).extend(iter);
    }
}

impl FromIterator<ObservationHandle> for ObservationBag {
    fn from_iter<I: IntoIterator<Item = ObservationHandle>>(iter: I) -> Self {
        Self {
            handles: Mutex::new(iter.into_iter().collect()),
        }
    }
}

impl Drop for ObservationBag {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for ObservationBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationBag")
            .field("len", &self.len())
            .finish()
    }
}
