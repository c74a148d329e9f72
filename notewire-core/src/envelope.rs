use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::descriptor::{Notification, ObjectId, Sender};
use crate::error::EnvelopeError;

/// Untyped, name-tagged carrier handed to a [`Broadcaster`](crate::Broadcaster).
///
/// The payload keeps the original notification behind an `Arc`, so every
/// observer sees the very value that was posted.
#[derive(Clone)]
pub struct Envelope {
    name: Arc<str>,
    sender: Option<ObjectId>,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Envelope {
    pub fn new(
        name: impl Into<Arc<str>>,
        sender: Option<ObjectId>,
        payload: Arc<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            name: name.into(),
            sender,
            payload,
        }
    }

    /// Erase a typed notification, keyed by its name and sender.
    pub fn wrap<N: Notification>(notification: N) -> Self {
        let sender = notification.object().object_id();
        Self::new(N::name(), sender, Arc::new(notification))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sender(&self) -> Option<&ObjectId> {
        self.sender.as_ref()
    }

    pub fn payload(&self) -> &(dyn Any + Send + Sync) {
        &*self.payload
    }

    /// Recover the typed notification.
    pub fn downcast_ref<N: Notification>(&self) -> Result<&N, EnvelopeError> {
        (*self.payload)
            .downcast_ref::<N>()
            .ok_or_else(|| EnvelopeError::PayloadMismatch {
                name: self.name.to_string(),
                expected: type_name::<N>(),
            })
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("name", &self.name)
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tick {
        source: Arc<&'static str>,
        n: u32,
    }

    impl Notification for Tick {
        type Object = Arc<&'static str>;

        fn object(&self) -> &Self::Object {
            &self.source
        }
    }

    struct Tock;

    impl Notification for Tock {
        type Object = ();

        fn object(&self) -> &() {
            &()
        }
    }

    #[test]
    fn wrap_keys_by_name_and_sender() {
        let source = Arc::new("clock");
        let env = Envelope::wrap(Tick {
            source: Arc::clone(&source),
            n: 4,
        });
        assert_eq!(env.name(), Tick::name());
        assert_eq!(env.sender(), Some(&ObjectId::of(&source)));

        let tick = env.downcast_ref::<Tick>().expect("tick payload");
        assert_eq!(tick.n, 4);
        assert!(Arc::ptr_eq(&tick.source, &source));
    }

    #[test]
    fn clones_share_the_posted_value() {
        let env = Envelope::wrap(Tock);
        let copy = env.clone();
        let a = env.downcast_ref::<Tock>().expect("tock") as *const Tock;
        let b = copy.downcast_ref::<Tock>().expect("tock") as *const Tock;
        assert_eq!(a, b);
        assert_eq!(copy.sender(), None);
    }

    #[test]
    fn wrong_type_reports_mismatch() {
        let env = Envelope::new(Tick::name(), None, Arc::new(7u64));
        let err = env.downcast_ref::<Tick>().err().expect("mismatch");
        assert_eq!(
            err,
            EnvelopeError::PayloadMismatch {
                name: Tick::name(),
                expected: type_name::<Tick>(),
            }
        );
        assert!(err.to_string().contains(&Tick::name()));
    }
}
