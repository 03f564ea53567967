//! Message types flowing through the component tree (TEA pattern)

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::component::Component;
use crate::hash::ContentHash;
use crate::input_key::InputKey;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a node that schedules work addressed back to itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh id, unique for the lifetime of the process
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag identifying one loader request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    /// Monotonic per-loader request counter
    pub request_id: u64,
    /// Digest of the binding snapshot the request was built from
    pub hash: ContentHash,
}

/// A spinner animation frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerTick {
    pub id: NodeId,
    /// Generation of the tick chain; ticks from an older chain are ignored
    pub tag: u64,
}

/// Completion of a loader's deferred child construction
pub struct Loaded {
    pub loader: NodeId,
    pub tag: RequestTag,
    pub child: Box<dyn Component>,
}

impl fmt::Debug for Loaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loaded")
            .field("loader", &self.loader)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// All messages a component can receive
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// The receiving node gained (`true`) or lost (`false`) focus
    Focus(bool),

    /// The receiving node became (`true`) or stopped being (`false`) the
    /// highlighted entry of its parent, independent of focus
    Active(bool),

    /// Periodic tick from the runner
    Tick,

    /// Animation frame addressed to one spinner
    SpinnerTick(SpinnerTick),

    /// Deferred child construction finished, addressed to one loader
    Loaded(Loaded),

    /// Application-defined payload
    Custom(Box<dyn Any + Send>),
}

impl Message {
    pub fn custom<T: Any + Send>(payload: T) -> Self {
        Message::Custom(Box::new(payload))
    }

    /// Borrow an application payload of type `T`, if this is one
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Message::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&InputKey> {
        match self {
            Message::Key(key) => Some(key),
            _ => None,
        }
    }

    /// The node this message is addressed to, if any.
    ///
    /// Containers route addressed messages to whichever child contains the
    /// target rather than to the selected child, so replies reach their
    /// requester wherever it sits.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Message::SpinnerTick(tick) => Some(tick.id),
            Message::Loaded(loaded) => Some(loaded.loader),
            _ => None,
        }
    }

    pub fn is_addressed(&self) -> bool {
        self.target().is_some()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Message::Focus(focus) => f.debug_tuple("Focus").field(focus).finish(),
            Message::Active(active) => f.debug_tuple("Active").field(active).finish(),
            Message::Tick => write!(f, "Tick"),
            Message::SpinnerTick(tick) => f.debug_tuple("SpinnerTick").field(tick).finish(),
            Message::Loaded(loaded) => f.debug_tuple("Loaded").field(loaded).finish(),
            Message::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::next();
        let b = NodeId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }

    #[test]
    fn test_spinner_tick_is_addressed() {
        let id = NodeId::next();
        let msg = Message::SpinnerTick(SpinnerTick { id, tag: 0 });
        assert_eq!(msg.target(), Some(id));
        assert!(msg.is_addressed());
    }

    #[test]
    fn test_plain_messages_are_not_addressed() {
        assert!(!Message::Key(InputKey::Enter).is_addressed());
        assert!(!Message::Focus(true).is_addressed());
        assert!(!Message::Tick.is_addressed());
    }

    #[test]
    fn test_custom_payload_downcast() {
        #[derive(Debug, PartialEq)]
        struct Connected(u16);

        let msg = Message::custom(Connected(22));
        assert_eq!(msg.downcast_ref::<Connected>(), Some(&Connected(22)));
        assert!(msg.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_debug_hides_payloads() {
        assert_eq!(format!("{:?}", Message::custom(1u8)), "Custom(..)");
        assert_eq!(format!("{:?}", Message::Focus(true)), "Focus(true)");
    }
}
