//! Drag controller: separator drag sessions.
//!
//! A session starts on pointer-down over the separator and ends on
//! pointer-up (commit) or cancellation (discard). While it runs, every move
//! recomputes `delta = x - origin_x` and clamps it so neither pane shrinks
//! below its minimum. The clamped delta only affects the *live* widths; the
//! committed widths change when the session is finished.

use crate::event::input::PointerKind;

use super::layout::PaneSet;

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

/// An in-flight drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Pointer x at drag start.
    pub origin_x: i32,
    /// Clamped offset from `origin_x` applied to the live widths.
    pub delta_x: i32,
    /// Device that started the drag; only its events continue it.
    pub pointer: PointerKind,
}

/// Clamp a raw separator offset against the pane minimums.
///
/// The result keeps `base.left + delta >= left_min` and
/// `base.right - delta >= right_min`. When no offset can satisfy both (the
/// base widths already violate a minimum) the result is zero.
pub fn clamp_delta(raw: i32, base: PaneSet, left_min: i32, right_min: i32) -> i32 {
    let lowest = left_min - base.left;
    let highest = base.right - right_min;
    if lowest > highest {
        return 0;
    }
    raw.clamp(lowest, highest)
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Idle/Dragging state holder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if dragging.
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Start a drag at pointer x `x`. Returns `false` if one is already running.
    pub fn begin(&mut self, x: i32, pointer: PointerKind) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(DragSession {
            origin_x: x,
            delta_x: 0,
            pointer,
        });
        true
    }

    /// Feed a pointer move. Returns the new clamped delta, or `None` when
    /// idle or when the move came from a different device.
    pub fn update(
        &mut self,
        x: i32,
        pointer: PointerKind,
        base: PaneSet,
        left_min: i32,
        right_min: i32,
    ) -> Option<i32> {
        let session = self.session.as_mut().filter(|s| s.pointer == pointer)?;
        session.delta_x = clamp_delta(x - session.origin_x, base, left_min, right_min);
        Some(session.delta_x)
    }

    /// Re-clamp the running delta after the base widths changed underneath
    /// the drag (container resized mid-drag).
    pub fn reclamp(&mut self, base: PaneSet, left_min: i32, right_min: i32) {
        if let Some(session) = self.session.as_mut() {
            session.delta_x = clamp_delta(session.delta_x, base, left_min, right_min);
        }
    }

    /// The widths to render: `base` shifted by the running delta.
    pub fn live_widths(&self, base: PaneSet) -> PaneSet {
        match self.session {
            Some(s) => PaneSet::new(base.left + s.delta_x, base.right - s.delta_x),
            None => base,
        }
    }

    /// End the drag, returning the finished session for the caller to commit.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    /// Abort the drag, returning the discarded session.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
