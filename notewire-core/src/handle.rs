use std::fmt;

use crate::bag::ObservationBag;

type ReleaseFn = Box<dyn FnOnce() + Send + 'static>;

/// One live subscription. Dropping the handle removes the observer.
///
/// The release action runs at most once, whether triggered by
/// [`release`](ObservationHandle::release) or by drop.
#[must_use = "dropping an ObservationHandle immediately removes the observer"]
pub struct ObservationHandle {
    release: Option<ReleaseFn>,
}

impl ObservationHandle {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Run the release action now. Later calls, and the eventual drop, do nothing.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Hand the handle to `bag`; it is released when the bag is cleared or dropped.
    pub fn store_in(self, bag: &ObservationBag) {
        bag.add(self);
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ObservationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationHandle")
            .field("released", &self.is_released())
            .finish()
    }
}
