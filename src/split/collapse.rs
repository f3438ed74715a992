//! Collapse/expand state machine.
//!
//! ```text
//!            toggle                 toggle                transition end
//! Expanded ─────────▶ Collapsed(s) ───────▶ Expanding(s) ───────────────▶ Expanded
//!                     (emit Some(s))                       (emit None)
//! ```
//!
//! `Expanding` lays out like `Expanded`, but the "changed" notification is held
//! back until the width transition finishes, and dragging stays disabled.
//!
//! The collapsed pane can also be driven from outside. In
//! [`CollapseMode::Controlled`] every prop update wins over internal state;
//! toggles still update internal state and notify, and the caller is expected
//! to echo the new value back through the prop.

use std::time::{Duration, Instant};

use super::Side;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Internal collapse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseState {
    Expanded,
    Collapsed(Side),
    Expanding(Side),
}

/// Who owns the collapsed pane value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseMode {
    /// The component owns the value.
    Uncontrolled,
    /// The caller owns the value; holds the last prop seen.
    Controlled(Option<Side>),
}

/// What a transition did, for the component to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CollapseOutcome {
    /// Nothing changed.
    Unchanged,
    /// A toggle collapsed `side`. Notify with `Some(side)`.
    Collapsed(Side),
    /// A prop update collapsed `side`. No notification: the caller set it.
    Pinned(Side),
    /// `side` started expanding. Notification waits for the transition.
    ExpandStarted(Side),
    /// The expand transition finished. Notify with `None`.
    Expanded,
}

impl CollapseOutcome {
    /// The "collapsed pane changed" payload this outcome emits, if any.
    pub fn notification(self) -> Option<Option<Side>> {
        match self {
            CollapseOutcome::Collapsed(side) => Some(Some(side)),
            CollapseOutcome::Expanded => Some(None),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CollapseMachine
// ---------------------------------------------------------------------------

/// Owns the collapse state and the expand transition timer.
#[derive(Debug, Clone)]
pub struct CollapseMachine {
    state: CollapseState,
    mode: CollapseMode,
    transition: Duration,
    expanding_since: Option<Instant>,
}

impl CollapseMachine {
    /// Create a machine. A controlled mode starts in the state its prop names.
    pub fn new(mode: CollapseMode, transition: Duration) -> Self {
        let state = match mode {
            CollapseMode::Controlled(Some(side)) => CollapseState::Collapsed(side),
            _ => CollapseState::Expanded,
        };
        Self {
            state,
            mode,
            transition,
            expanding_since: None,
        }
    }

    pub fn state(&self) -> CollapseState {
        self.state
    }

    pub fn mode(&self) -> CollapseMode {
        self.mode
    }

    /// The collapsed pane, if one is collapsed (not while expanding).
    pub fn collapsed_pane(&self) -> Option<Side> {
        match self.state {
            CollapseState::Collapsed(side) => Some(side),
            _ => None,
        }
    }

    /// The pane currently expanding, if any.
    pub fn expanding_pane(&self) -> Option<Side> {
        match self.state {
            CollapseState::Expanding(side) => Some(side),
            _ => None,
        }
    }

    /// Whether an expand transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CollapseState::Expanding(_))
    }

    /// When the in-flight expand transition is due to end.
    pub fn deadline(&self) -> Option<Instant> {
        self.expanding_since.map(|start| start + self.transition)
    }

    /// Handle a click on the collapse affordance for `side`.
    ///
    /// Collapses `side` when expanded, starts expanding whichever pane is
    /// collapsed, and ignores clicks while a transition is running.
    pub fn toggle(&mut self, side: Side, now: Instant) -> CollapseOutcome {
        match self.state {
            CollapseState::Expanded => {
                self.state = CollapseState::Collapsed(side);
                tracing::debug!(%side, "pane collapsed");
                CollapseOutcome::Collapsed(side)
            }
            CollapseState::Collapsed(collapsed) => self.start_expanding(collapsed, now),
            CollapseState::Expanding(_) => CollapseOutcome::Unchanged,
        }
    }

    /// Apply a new value of the controlled `collapsed_pane` prop.
    ///
    /// Switches the machine into controlled mode if it was not already.
    pub fn set_prop(&mut self, prop: Option<Side>, now: Instant) -> CollapseOutcome {
        self.mode = CollapseMode::Controlled(prop);
        match (self.state, prop) {
            (CollapseState::Collapsed(current), Some(side)) if current == side => {
                CollapseOutcome::Unchanged
            }
            (_, Some(side)) => {
                self.state = CollapseState::Collapsed(side);
                self.expanding_since = None;
                tracing::debug!(%side, "pane collapsed by prop");
                CollapseOutcome::Pinned(side)
            }
            (CollapseState::Collapsed(current), None) => self.start_expanding(current, now),
            (_, None) => CollapseOutcome::Unchanged,
        }
    }

    /// Give ownership of the value back to the component.
    pub fn release_control(&mut self) {
        self.mode = CollapseMode::Uncontrolled;
    }

    /// The width transition finished.
    pub fn transition_end(&mut self) -> CollapseOutcome {
        match self.state {
            CollapseState::Expanding(side) => {
                self.state = CollapseState::Expanded;
                self.expanding_since = None;
                tracing::debug!(%side, "pane expanded");
                CollapseOutcome::Expanded
            }
            _ => CollapseOutcome::Unchanged,
        }
    }

    /// Finish the transition if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> CollapseOutcome {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.transition_end(),
            _ => CollapseOutcome::Unchanged,
        }
    }

    fn start_expanding(&mut self, side: Side, now: Instant) -> CollapseOutcome {
        self.state = CollapseState::Expanding(side);
        self.expanding_since = Some(now);
        tracing::debug!(%side, "pane expanding");
        CollapseOutcome::ExpandStarted(side)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_millis(200);

    fn uncontrolled() -> CollapseMachine {
        CollapseMachine::new(CollapseMode::Uncontrolled, T)
    }

    #[test]
    fn starts_expanded_when_uncontrolled() {
        let m = uncontrolled();
        assert_eq!(m.state(), CollapseState::Expanded);
        assert_eq!(m.collapsed_pane(), None);
        assert!(!m.is_transitioning());
    }

    #[test]
    fn starts_collapsed_when_controlled_with_side() {
        let m = CollapseMachine::new(CollapseMode::Controlled(Some(Side::Right)), T);
        assert_eq!(m.collapsed_pane(), Some(Side::Right));
    }

    #[test]
    fn full_cycle_emits_side_then_none() {
        let mut m = uncontrolled();
        let now = Instant::now();

        let collapse = m.toggle(Side::Left, now);
        assert_eq!(collapse, CollapseOutcome::Collapsed(Side::Left));
        assert_eq!(collapse.notification(), Some(Some(Side::Left)));

        let expand = m.toggle(Side::Left, now);
        assert_eq!(expand, CollapseOutcome::ExpandStarted(Side::Left));
        assert_eq!(expand.notification(), None);
        assert_eq!(m.expanding_pane(), Some(Side::Left));
        assert_eq!(m.collapsed_pane(), None);

        let done = m.transition_end();
        assert_eq!(done.notification(), Some(None));
        assert_eq!(m.state(), CollapseState::Expanded);

        // A stray transition end emits nothing.
        assert_eq!(m.transition_end(), CollapseOutcome::Unchanged);
    }

    #[test]
    fn toggle_while_expanding_is_ignored() {
        let mut m = uncontrolled();
        let now = Instant::now();
        let _ = m.toggle(Side::Right, now);
        let _ = m.toggle(Side::Right, now);
        assert_eq!(m.toggle(Side::Right, now), CollapseOutcome::Unchanged);
        assert!(m.is_transitioning());
    }

    #[test]
    fn tick_finishes_after_deadline() {
        let mut m = uncontrolled();
        let start = Instant::now();
        let _ = m.toggle(Side::Left, start);
        let _ = m.toggle(Side::Left, start);
        assert_eq!(m.deadline(), Some(start + T));

        assert_eq!(m.tick(start + T / 2), CollapseOutcome::Unchanged);
        assert_eq!(m.tick(start + T), CollapseOutcome::Expanded);
        assert_eq!(m.deadline(), None);
    }

    #[test]
    fn prop_collapse_does_not_notify() {
        let mut m = uncontrolled();
        let outcome = m.set_prop(Some(Side::Left), Instant::now());
        assert_eq!(outcome, CollapseOutcome::Pinned(Side::Left));
        assert_eq!(outcome.notification(), None);
        assert_eq!(m.mode(), CollapseMode::Controlled(Some(Side::Left)));
    }

    #[test]
    fn prop_same_value_is_unchanged() {
        let mut m = CollapseMachine::new(CollapseMode::Controlled(Some(Side::Left)), T);
        assert_eq!(
            m.set_prop(Some(Side::Left), Instant::now()),
            CollapseOutcome::Unchanged
        );
    }

    #[test]
    fn prop_to_none_starts_expanding() {
        let mut m = CollapseMachine::new(CollapseMode::Controlled(Some(Side::Right)), T);
        let outcome = m.set_prop(None, Instant::now());
        assert_eq!(outcome, CollapseOutcome::ExpandStarted(Side::Right));
        assert_eq!(m.transition_end(), CollapseOutcome::Expanded);
    }

    #[test]
    fn prop_none_while_expanded_is_unchanged() {
        let mut m = CollapseMachine::new(CollapseMode::Controlled(None), T);
        assert_eq!(m.set_prop(None, Instant::now()), CollapseOutcome::Unchanged);
    }

    #[test]
    fn prop_collapse_interrupts_expanding() {
        let mut m = uncontrolled();
        let now = Instant::now();
        let _ = m.toggle(Side::Left, now);
        let _ = m.toggle(Side::Left, now);
        assert_eq!(m.set_prop(Some(Side::Left), now), CollapseOutcome::Pinned(Side::Left));
        assert_eq!(m.deadline(), None);
        assert_eq!(m.transition_end(), CollapseOutcome::Unchanged);
    }

    #[test]
    fn controlled_toggle_updates_internal_state() {
        let mut m = CollapseMachine::new(CollapseMode::Controlled(None), T);
        assert_eq!(
            m.toggle(Side::Left, Instant::now()),
            CollapseOutcome::Collapsed(Side::Left)
        );
        // The prop has not been echoed back yet.
        assert_eq!(m.mode(), CollapseMode::Controlled(None));
        assert_eq!(m.collapsed_pane(), Some(Side::Left));
    }

    #[test]
    fn release_control_returns_to_uncontrolled() {
        let mut m = CollapseMachine::new(CollapseMode::Controlled(None), T);
        m.release_control();
        assert_eq!(m.mode(), CollapseMode::Uncontrolled);
    }
}
