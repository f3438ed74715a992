//! Global pointer listener bookkeeping.
//!
//! While a drag is in progress the split pane needs move/up notifications from
//! anywhere on screen, not just from the separator. [`ListenerSet`] records
//! which global listeners the component currently holds and accumulates
//! attach/detach changes that the host mirrors onto its real event sources.
//! Every listener attached for a drag must be detached when the drag ends or
//! the component is torn down.

use std::collections::HashSet;

use super::input::PointerKind;

// ---------------------------------------------------------------------------
// GlobalListener
// ---------------------------------------------------------------------------

/// A host-level event listener the component can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalListener {
    PointerMove,
    PointerUp,
    TouchMove,
    TouchEnd,
}

impl GlobalListener {
    /// The move/up listener pair needed to track a drag from `kind`.
    pub fn drag_pair(kind: PointerKind) -> [GlobalListener; 2] {
        match kind {
            PointerKind::Mouse => [GlobalListener::PointerMove, GlobalListener::PointerUp],
            PointerKind::Touch => [GlobalListener::TouchMove, GlobalListener::TouchEnd],
        }
    }
}

/// A change the host must apply to its listener registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attached(GlobalListener),
    Detached(GlobalListener),
}

// ---------------------------------------------------------------------------
// ListenerSet
// ---------------------------------------------------------------------------

/// Tracks which global listeners are attached and queues the changes.
#[derive(Debug, Default)]
pub struct ListenerSet {
    attached: HashSet<GlobalListener>,
    pending: Vec<ListenerChange>,
}

impl ListenerSet {
    /// Create a new, empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. Attaching twice is a no-op (no duplicate change).
    pub fn attach(&mut self, listener: GlobalListener) {
        if self.attached.insert(listener) {
            self.pending.push(ListenerChange::Attached(listener));
        }
    }

    /// Detach a listener. Detaching an unattached listener is a no-op.
    pub fn detach(&mut self, listener: GlobalListener) {
        if self.attached.remove(&listener) {
            self.pending.push(ListenerChange::Detached(listener));
        }
    }

    /// Attach the move/up pair for a drag started by `kind`.
    pub fn attach_drag(&mut self, kind: PointerKind) {
        for listener in GlobalListener::drag_pair(kind) {
            self.attach(listener);
        }
    }

    /// Detach every attached listener.
    ///
    /// Changes are queued in a stable order so hosts see deterministic output.
    pub fn detach_all(&mut self) {
        let order = [
            GlobalListener::PointerMove,
            GlobalListener::PointerUp,
            GlobalListener::TouchMove,
            GlobalListener::TouchEnd,
        ];
        for listener in order {
            self.detach(listener);
        }
    }

    /// Whether `listener` is currently attached.
    pub fn is_attached(&self, listener: GlobalListener) -> bool {
        self.attached.contains(&listener)
    }

    /// The number of attached listeners.
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Drain and return all pending changes, oldest first.
    pub fn drain_changes(&mut self) -> Vec<ListenerChange> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending changes.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
