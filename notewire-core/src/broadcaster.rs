use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::descriptor::ObjectId;
use crate::envelope::Envelope;
use crate::queue::DeliveryQueue;
use crate::sync::lock;

/// Callback registered with a broadcaster.
pub type EnvelopeHandler = Arc<dyn Fn(&Envelope) + Send + Sync>;

/// Opaque registration token returned by [`Broadcaster::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    pub fn from_raw(raw: u64) -> Self {
        SubscriptionToken(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

/// The untyped, name-keyed publish/subscribe facility a center adapts.
///
/// Matching is by exact name plus, when a filter is given, sender identity.
/// Deliveries for subscribers with a queue are dispatched onto it; the rest
/// run on the posting thread before `post_envelope` returns.
pub trait Broadcaster: Send + Sync {
    fn post_envelope(&self, envelope: Envelope);

    fn subscribe(
        &self,
        name: &str,
        sender: Option<ObjectId>,
        queue: Option<Arc<dyn DeliveryQueue>>,
        handler: EnvelopeHandler,
    ) -> SubscriptionToken;

    /// Unknown or already removed tokens are ignored.
    fn unsubscribe(&self, token: SubscriptionToken);
}

struct Registration {
    token: SubscriptionToken,
    name: Arc<str>,
    sender: Option<ObjectId>,
    queue: Option<Arc<dyn DeliveryQueue>>,
    handler: EnvelopeHandler,
}

impl Registration {
    // A filter whose sender has been dropped matches nothing.
    fn matches(&self, envelope: &Envelope) -> bool {
        *self.name == *envelope.name()
            && self.sender.as_ref().map_or(true, |wanted| {
                wanted.is_live() && envelope.sender() == Some(wanted)
            })
    }
}

/// In-process broadcaster. Delivery follows registration order.
///
/// Matching registrations are snapshotted under the lock and invoked after it
/// is dropped, so handlers may subscribe or unsubscribe while being called.
pub struct LocalBroadcaster {
    next_token: AtomicU64,
    registrations: Mutex<Vec<Registration>>,
}

impl LocalBroadcaster {
    pub fn new() -> Self {
        Self {
            next_token: AtomicU64::new(1),
            registrations: Mutex::new(Vec::new()),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.registrations).len()
    }
}

impl Default for LocalBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for LocalBroadcaster {
    fn post_envelope(&self, envelope: Envelope) {
        let targets: Vec<(Option<Arc<dyn DeliveryQueue>>, EnvelopeHandler)> =
            lock(&self.registrations)
                .iter()
                .filter(|r| r.matches(&envelope))
                .map(|r| (r.queue.clone(), Arc::clone(&r.handler)))
                .collect();

        tracing::trace!(
            target: "notewire::broadcaster",
            name = envelope.name(),
            observers = targets.len(),
            "post"
        );

        for (queue, handler) in targets {
            match queue {
                Some(queue) => {
                    let envelope = envelope.clone();
                    queue.dispatch(Box::new(move || handler(&envelope)));
                }
                None => handler(&envelope),
            }
        }
    }

    fn subscribe(
        &self,
        name: &str,
        sender: Option<ObjectId>,
        queue: Option<Arc<dyn DeliveryQueue>>,
        handler: EnvelopeHandler,
    ) -> SubscriptionToken {
        let token = SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(
            target: "notewire::broadcaster",
            token = token.0,
            name,
            ?sender,
            queue = ?queue.as_ref().map(|q| q.label()),
            "subscribe"
        );
        lock(&self.registrations).push(Registration {
            token,
            name: name.into(),
            sender,
            queue,
            handler,
        });
        token
    }

    fn unsubscribe(&self, token: SubscriptionToken) {
        let removed = {
            let mut registrations = lock(&self.registrations);
            registrations
                .iter()
                .position(|r| r.token == token)
                .map(|idx| registrations.remove(idx))
        };
        match removed {
            Some(_) => {
                tracing::debug!(target: "notewire::broadcaster", token = token.0, "unsubscribe");
            }
            None => {
                tracing::debug!(target: "notewire::broadcaster", token = token.0, "unsubscribe: unknown token");
            }
        }
    }
}

impl fmt::Debug for LocalBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBroadcaster")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
