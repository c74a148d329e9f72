//! notewire-core: typed notifications over an untyped, name-keyed broadcaster.
//!
//! A [`Notification`] knows its dispatch name and its sender. A
//! [`NotificationCenter`] erases it into an [`Envelope`] on `post` and
//! recovers it for each observer. Observers live exactly as long as the
//! [`ObservationHandle`] returned from `add_observer`, or the
//! [`ObservationBag`] the handle was stored in.

mod bag;
mod broadcaster;
mod center;
mod config;
mod descriptor;
mod envelope;
mod error;
mod handle;
mod observer;
mod queue;
mod sync;

pub use bag::ObservationBag;
pub use broadcaster::{Broadcaster, EnvelopeHandler, LocalBroadcaster, SubscriptionToken};
pub use center::{NotificationCenter, TypedCenter};
pub use config::CenterConfig;
pub use descriptor::{default_name, Notification, ObjectId, Sender};
pub use envelope::Envelope;
pub use error::EnvelopeError;
pub use handle::ObservationHandle;
pub use observer::{filter_observer, no_op_observer, tee_observer, tracing_observer, ObserverFn};
pub use queue::{DeliveryQueue, Job, ManualQueue};
