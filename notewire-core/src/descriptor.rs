use std::any::{type_name, Any};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

trait Anchor: Send + Sync {
    fn is_live(&self) -> bool;
}

impl<T: ?Sized + Send + Sync> Anchor for Weak<T> {
    fn is_live(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Opaque identity of a notification sender.
///
/// Two ids are equal when they were taken from the same allocation. An id
/// taken from an `Arc` holds a `Weak` to it, so the address cannot be handed
/// to another sender while the id (or an observer filtering on it) exists.
#[derive(Clone)]
pub struct ObjectId {
    addr: usize,
    anchor: Option<Arc<dyn Anchor>>,
}

impl ObjectId {
    /// Identity of the value behind an `Arc`.
    pub fn of<T: ?Sized + Send + Sync + 'static>(object: &Arc<T>) -> Self {
        let anchor: Arc<dyn Anchor> = Arc::new(Arc::downgrade(object));
        ObjectId {
            addr: Arc::as_ptr(object) as *const () as usize,
            anchor: Some(anchor),
        }
    }

    /// Build an id from a caller-managed integer (handles, slot indices, ...).
    /// Such ids never expire.
    pub fn from_raw(raw: usize) -> Self {
        ObjectId {
            addr: raw,
            anchor: None,
        }
    }

    pub fn as_raw(&self) -> usize {
        self.addr
    }

    /// False once the sender this id was taken from has been dropped.
    pub fn is_live(&self) -> bool {
        self.anchor.as_ref().map_or(true, |anchor| anchor.is_live())
    }
}

impl PartialEq for ObjectId {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
    }
}

impl Eq for ObjectId {}

impl Hash for ObjectId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr.hash(state);
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({:#x})", self.addr)
    }
}

/// Anything that can sit in a notification's sender slot.
pub trait Sender {
    /// Identity used for filtering; `None` means "posted without a sender".
    fn object_id(&self) -> Option<ObjectId>;
}

impl<T: ?Sized + Send + Sync + 'static> Sender for Arc<T> {
    fn object_id(&self) -> Option<ObjectId> {
        Some(ObjectId::of(self))
    }
}

impl<S: Sender> Sender for Option<S> {
    fn object_id(&self) -> Option<ObjectId> {
        self.as_ref().and_then(Sender::object_id)
    }
}

impl Sender for ObjectId {
    fn object_id(&self) -> Option<ObjectId> {
        Some(self.clone())
    }
}

impl Sender for () {
    fn object_id(&self) -> Option<ObjectId> {
        None
    }
}

/// A value type that can travel through a notification center.
///
/// Implementors supply the sender field; the name defaults to
/// [`default_name`] and may be overridden per type. Most types get this
/// through `#[derive(Notification)]`.
pub trait Notification: Any + Send + Sync + Sized {
    type Object: Sender;

    /// The typed sender/object carried by this notification.
    fn object(&self) -> &Self::Object;

    /// Optional namespace prefixed to the derived name.
    fn namespace() -> Option<&'static str> {
        None
    }

    /// Dispatch key. Must not change for a given type while the process runs.
    fn name() -> String {
        default_name::<Self>()
    }
}

/// Name derived from the type's identity.
///
/// Without a namespace this is the full type path; with one it is
/// `"{namespace}.{Type}"`, where `Type` keeps its generic arguments.
pub fn default_name<N: Notification>() -> String {
    let full = type_name::<N>();
    match N::namespace() {
        Some(namespace) => format!("{namespace}.{}", short_type_name(full)),
        None => full.to_string(),
    }
}

fn short_type_name(full: &str) -> &str {
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map(|i| i + 2).unwrap_or(0);
    &full[start..]
}
