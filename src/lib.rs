//! Notewire: typed notifications, observation handles and bags.
//!
//! ```
//! use std::sync::Arc;
//! use notewire::{Notification, NotificationCenter, ObservationBag, Sender, TypedCenter};
//!
//! struct Widget;
//!
//! #[derive(Notification)]
//! struct Ping {
//!     object: Arc<Widget>,
//!     count: i64,
//! }
//!
//! let center = NotificationCenter::default();
//! let widget = Arc::new(Widget);
//! let bag = ObservationBag::new();
//! center
//!     .add_observer(widget.object_id(), None, |ping: &Ping| println!("count = {}", ping.count))
//!     .store_in(&bag);
//!
//! center.post(Ping { object: widget, count: 3 });
//! ```

pub use notewire_core::*;
pub use notewire_core_macros::Notification;

#[cfg(feature = "tokio")]
pub use notewire_tokio::TokioQueue;
