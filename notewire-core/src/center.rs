use std::fmt;
use std::sync::Arc;

use crate::broadcaster::{Broadcaster, EnvelopeHandler, LocalBroadcaster};
use crate::config::CenterConfig;
use crate::descriptor::{Notification, ObjectId};
use crate::envelope::Envelope;
use crate::handle::ObservationHandle;
use crate::observer::ObserverFn;
use crate::queue::DeliveryQueue;

/// Typed posting and observing.
///
/// There is no `remove_observer`: a subscription ends when the returned
/// [`ObservationHandle`] is released or dropped.
pub trait TypedCenter {
    /// Deliver `notification` to every matching observer.
    fn post<N: Notification>(&self, notification: N);

    /// Observe notifications of type `N`.
    ///
    /// `object` restricts delivery to one sender (`None` accepts any sender).
    /// `queue` moves delivery onto a [`DeliveryQueue`]; without one the
    /// callback runs on the posting thread.
    fn add_observer<N, F>(
        &self,
        object: Option<ObjectId>,
        queue: Option<Arc<dyn DeliveryQueue>>,
        callback: F,
    ) -> ObservationHandle
    where
        N: Notification,
        F: Fn(&N) + Send + Sync + 'static;

    /// Any sender, delivered on the posting thread.
    fn observe<N, F>(&self, callback: F) -> ObservationHandle
    where
        N: Notification,
        F: Fn(&N) + Send + Sync + 'static,
    {
        self.add_observer::<N, F>(None, None, callback)
    }

    /// [`add_observer`](TypedCenter::add_observer) for a prebuilt [`ObserverFn`].
    fn add_observer_fn<N: Notification>(
        &self,
        object: Option<ObjectId>,
        queue: Option<Arc<dyn DeliveryQueue>>,
        observer: ObserverFn<N>,
    ) -> ObservationHandle {
        self.add_observer::<N, _>(object, queue, move |notification: &N| observer(notification))
    }
}

/// [`TypedCenter`] over an injected [`Broadcaster`].
///
/// Clones share the broadcaster, so observers added through one clone see
/// posts made through another.
#[derive(Clone)]
pub struct NotificationCenter {
    broadcaster: Arc<dyn Broadcaster>,
    config: Arc<CenterConfig>,
}

impl NotificationCenter {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self::with_config(broadcaster, CenterConfig::default())
    }

    pub fn with_config(broadcaster: Arc<dyn Broadcaster>, config: CenterConfig) -> Self {
        Self {
            broadcaster,
            config: Arc::new(config),
        }
    }

    pub fn broadcaster(&self) -> &Arc<dyn Broadcaster> {
        &self.broadcaster
    }

    pub fn config(&self) -> &CenterConfig {
        &self.config
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Arc::new(LocalBroadcaster::new()))
    }
}

impl TypedCenter for NotificationCenter {
    fn post<N: Notification>(&self, notification: N) {
        let envelope = Envelope::wrap(notification);
        tracing::trace!(
            target: "notewire::center",
            center = %self.config.label,
            name = envelope.name(),
            sender = ?envelope.sender(),
            "post"
        );
        self.broadcaster.post_envelope(envelope);
    }

    fn add_observer<N, F>(
        &self,
        object: Option<ObjectId>,
        queue: Option<Arc<dyn DeliveryQueue>>,
        callback: F,
    ) -> ObservationHandle
    where
        N: Notification,
        F: Fn(&N) + Send + Sync + 'static,
    {
        let name = N::name();
        let config = Arc::clone(&self.config);
        let handler: EnvelopeHandler = Arc::new(move |envelope: &Envelope| {
            match envelope.downcast_ref::<N>() {
                Ok(notification) => callback(notification),
                Err(err) => {
                    if config.log_mismatches {
                        tracing::warn!(
                            target: "notewire::center",
                            center = %config.label,
                            name = envelope.name(),
                            error = %err,
                            "dropping delivery"
                        );
                    }
                }
            }
        });

        let token = self.broadcaster.subscribe(&name, object, queue, handler);
        tracing::debug!(
            target: "notewire::center",
            center = %self.config.label,
            name = %name,
            token = token.as_raw(),
            "observer added"
        );

        let broadcaster = Arc::clone(&self.broadcaster);
        ObservationHandle::new(move || broadcaster.unsubscribe(token))
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
