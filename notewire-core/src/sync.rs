use std::sync::{Mutex, MutexGuard, PoisonError};

// Critical sections here only push, snapshot or swap, so a panic elsewhere
// cannot leave the protected data half-written.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
