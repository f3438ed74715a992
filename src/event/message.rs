//! Message trait, envelope, and the split pane's notifications.
//!
//! The [`Message`] trait is object-safe and supports downcasting via `Any`.
//! [`Envelope`] wraps a boxed message with the element that sent it. The split
//! pane emits exactly one message type, [`CollapsedPaneChanged`].

use std::any::Any;

use crate::observe::ElementId;
use crate::split::Side;

// ---------------------------------------------------------------------------
// Message trait
// ---------------------------------------------------------------------------

/// Object-safe message trait.
pub trait Message: Send + 'static {
    /// Upcast to `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Human-readable name for this message type.
    fn message_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Wraps a boxed message with routing metadata.
pub struct Envelope {
    /// The message payload.
    pub message: Box<dyn Message>,
    /// The container element of the component that sent this message.
    /// `None` when the component was never mounted.
    pub sender: Option<ElementId>,
}

impl Envelope {
    /// Create a new envelope.
    pub fn new(message: impl Message, sender: Option<ElementId>) -> Self {
        Self {
            message: Box::new(message),
            sender,
        }
    }

    /// Attempt to downcast the message to a concrete type.
    pub fn downcast_ref<T: Message + 'static>(&self) -> Option<&T> {
        self.message.as_any().downcast_ref::<T>()
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("message_name", &self.message.message_name())
            .field("sender", &self.sender)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// CollapsedPaneChanged
// ---------------------------------------------------------------------------

/// The collapsed pane settled on a new value.
///
/// `Some(side)` is sent as soon as a pane collapses. `None` is sent once the
/// expand transition of a previously collapsed pane has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsedPaneChanged(pub Option<Side>);

impl Message for CollapsedPaneChanged {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn message_name(&self) -> &str {
        "CollapsedPaneChanged"
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[derive(Debug)]
    struct Ping;

    impl Message for Ping {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn message_name(&self) -> &str {
            "Ping"
        }
    }

    #[test]
    fn collapsed_pane_changed_name() {
        assert_eq!(
            CollapsedPaneChanged(Some(Side::Left)).message_name(),
            "CollapsedPaneChanged"
        );
    }

    #[test]
    fn envelope_downcast_success() {
        let env = Envelope::new(CollapsedPaneChanged(Some(Side::Right)), None);
        let msg = env.downcast_ref::<CollapsedPaneChanged>();
        assert_eq!(msg, Some(&CollapsedPaneChanged(Some(Side::Right))));
    }

    #[test]
    fn envelope_downcast_wrong_type() {
        let env = Envelope::new(Ping, None);
        assert!(env.downcast_ref::<CollapsedPaneChanged>().is_none());
        assert!(env.downcast_ref::<Ping>().is_some());
    }

    #[test]
    fn envelope_keeps_sender() {
        let mut sm: SlotMap<ElementId, ()> = SlotMap::with_key();
        let id = sm.insert(());
        let env = Envelope::new(CollapsedPaneChanged(None), Some(id));
        assert_eq!(env.sender, Some(id));
    }

    #[test]
    fn envelope_debug_format() {
        let env = Envelope::new(CollapsedPaneChanged(None), None);
        let dbg = format!("{:?}", env);
        assert!(dbg.contains("Envelope"));
        assert!(dbg.contains("CollapsedPaneChanged"));
    }
}
