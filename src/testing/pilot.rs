//! Pilot: programmatic interaction with a headless split pane.
//!
//! The `Pilot` mounts a [`SplitPane`] in its own [`ObserverRegistry`] with an
//! in-memory ratio store and a manual clock, then provides methods to
//! simulate pointer, touch and keyboard input, container resizes and
//! transition completion, and to render the pane to text.

use std::time::{Duration, Instant};

use crate::event::input::{
    InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent, TouchEvent,
    TouchPhase,
};
use crate::geometry::Region;
use crate::observe::{ElementId, ObserveError, ObserverRegistry};
use crate::render::strip::{CellStyle, Strip};
use crate::split::{PaneSet, PropsError, Side, SplitPane, SplitPaneProps};
use crate::storage::MemoryStore;
use crate::widget::Widget;
use crate::widgets::Static;

use super::snapshot::strips_to_string;

/// Failure to set up a [`Pilot`].
#[derive(Debug, thiserror::Error)]
pub enum PilotError {
    #[error(transparent)]
    Props(#[from] PropsError),
    #[error(transparent)]
    Observe(#[from] ObserveError),
}

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless split pane driver for testing.
///
/// # Examples
///
/// ```ignore
/// use gilt_split::split::SplitPaneProps;
/// use gilt_split::testing::Pilot;
///
/// let mut pilot = Pilot::new(100, 10, SplitPaneProps::new(30, 30, "main"))?;
/// pilot.drag(50, 20);
/// assert_eq!(pilot.widths().left, 30);
/// ```
pub struct Pilot {
    pane: SplitPane<MemoryStore>,
    registry: ObserverRegistry,
    store: MemoryStore,
    container: ElementId,
    opposite: ElementId,
    now: Instant,
    pointer_y: i32,
}

impl Pilot {
    /// Mount a pane with `"left"`/`"right"` placeholder content in a
    /// `width` x `height` container, backed by a fresh store.
    pub fn new(width: i32, height: i32, props: SplitPaneProps) -> Result<Self, PilotError> {
        Self::with_store(width, height, props, MemoryStore::new())
    }

    /// Like [`new`](Self::new) but reading from and persisting to `store`.
    pub fn with_store(
        width: i32,
        height: i32,
        props: SplitPaneProps,
        store: MemoryStore,
    ) -> Result<Self, PilotError> {
        let pane = SplitPane::new(props, store.clone())?
            .with_left(Static::new("left"))
            .with_right(Static::new("right"));
        Self::from_pane(pane, store, width, height)
    }

    /// Mount an already-built pane. `store` should be the pane's store (or a
    /// clone sharing it) so persisted ratios can be inspected.
    pub fn from_pane(
        mut pane: SplitPane<MemoryStore>,
        store: MemoryStore,
        width: i32,
        height: i32,
    ) -> Result<Self, PilotError> {
        let mut registry = ObserverRegistry::new();
        let container = registry.add_element("split");
        let opposite = registry.add_element(pane.props().observed_pane().to_string());
        pane.mount(&mut registry, container, opposite)?;

        let mut pilot = Self {
            pane,
            registry,
            store,
            container,
            opposite,
            now: Instant::now(),
            pointer_y: 0,
        };
        pilot.resize(width, height)?;
        Ok(pilot)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Send an arbitrary input event at the pilot's clock.
    pub fn input(&mut self, event: InputEvent) -> bool {
        self.pane.handle_input_at(event, self.now)
    }

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) -> bool {
        self.press_key_with(key, Modifiers::NONE)
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> bool {
        self.input(InputEvent::Key(KeyEvent::new(key, modifiers)))
    }

    /// Left mouse button down at (x, y).
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        self.pointer_y = y;
        self.input(InputEvent::Mouse(MouseEvent::left(
            MouseAction::Down(MouseBtn::Left),
            x,
            y,
        )))
    }

    /// Move the held mouse to column `x`, on the row it was pressed.
    pub fn move_to(&mut self, x: i32) -> bool {
        self.input(InputEvent::Mouse(MouseEvent::left(
            MouseAction::Drag(MouseBtn::Left),
            x,
            self.pointer_y,
        )))
    }

    /// Release the left mouse button at column `x`.
    pub fn release(&mut self, x: i32) -> bool {
        self.input(InputEvent::Mouse(MouseEvent::left(
            MouseAction::Up(MouseBtn::Left),
            x,
            self.pointer_y,
        )))
    }

    /// Press at `from` on the middle row, move to `to`, release.
    pub fn drag(&mut self, from: i32, to: i32) -> bool {
        let row = self.pane.bounds().y + self.pane.bounds().height / 2;
        let started = self.press(from, row);
        self.move_to(to);
        self.release(to);
        started
    }

    /// Send a touch event.
    pub fn touch(&mut self, phase: TouchPhase, x: i32, y: i32) -> bool {
        self.input(InputEvent::Touch(TouchEvent { phase, x, y }))
    }

    /// Click the collapse affordance.
    pub fn click_affordance(&mut self) -> bool {
        let x = self.pane.separator_x();
        let y = self.pane.bounds().y;
        let toggled = self.press(x, y);
        self.release(x);
        toggled
    }

    /// Focus leaves the host window.
    pub fn blur(&mut self) -> bool {
        self.input(InputEvent::FocusLost)
    }

    // ── Host simulation ──────────────────────────────────────────────

    /// Resize the container, then report the observed pane's new bounds.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), ObserveError> {
        let bounds = Region::new(0, 0, width, height);
        for delivery in self.registry.report(self.container, bounds)? {
            self.pane.handle_resize(&delivery);
        }
        self.report_opposite()
    }

    fn report_opposite(&mut self) -> Result<(), ObserveError> {
        let bounds = self.pane.bounds();
        let widths = self.pane.widths();
        let (left, right) = bounds.split_vertical(widths.left);
        let region = match self.pane.props().observed_pane() {
            Side::Left => left,
            Side::Right => right,
        };
        for delivery in self.registry.report(self.opposite, region)? {
            self.pane.handle_resize(&delivery);
        }
        Ok(())
    }

    /// Advance the clock and let the pane resolve a timed-out transition.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        self.pane.tick(self.now)
    }

    /// The host reports the end of the width transition.
    pub fn transition_end(&mut self) -> bool {
        self.pane.on_transition_end()
    }

    /// Toggle the collapsible pane at the pilot's clock.
    pub fn toggle_collapse(&mut self) -> bool {
        self.pane.toggle_collapse_at(self.now)
    }

    /// Update the controlled `collapsed_pane` prop at the pilot's clock.
    pub fn set_collapsed_pane(&mut self, prop: Option<Side>) -> bool {
        self.pane.set_collapsed_pane_at(prop, self.now)
    }

    /// Unmount the pane.
    pub fn teardown(&mut self) {
        self.pane.teardown(&mut self.registry);
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Live pane widths.
    pub fn widths(&self) -> PaneSet {
        self.pane.widths()
    }

    /// Drain collapsed-pane notifications.
    pub fn notifications(&mut self) -> Vec<Option<Side>> {
        self.pane.take_notifications()
    }

    pub fn pane(&self) -> &SplitPane<MemoryStore> {
        &self.pane
    }

    pub fn pane_mut(&mut self) -> &mut SplitPane<MemoryStore> {
        &mut self.pane
    }

    pub fn registry(&self) -> &ObserverRegistry {
        &self.registry
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// The pilot's clock.
    pub fn now(&self) -> Instant {
        self.now
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Render the pane into strips over its container bounds.
    pub fn render(&self) -> Vec<Strip> {
        self.pane.render(self.pane.bounds(), &CellStyle::new())
    }

    /// Render the pane to plain text, one line per row, trailing spaces
    /// trimmed.
    pub fn render_to_string(&self) -> String {
        let bounds = self.pane.bounds();
        strips_to_string(&self.render(), bounds.right(), bounds.bottom())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
