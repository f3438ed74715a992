//! SplitPane: the resizable, collapsible two-pane component.
//!
//! The component owns its props, ratio store, layout engine, drag controller,
//! collapse machine, global listener set and outgoing message queue. Hosts
//! feed it three kinds of input:
//!
//! - resize deliveries from an [`ObserverRegistry`] (after [`mount`](SplitPane::mount)),
//! - [`InputEvent`]s (pointer, touch, keys, focus),
//! - transition completion ([`on_transition_end`](SplitPane::on_transition_end)
//!   or [`tick`](SplitPane::tick) with a clock).
//!
//! and read back widths, listener changes and [`CollapsedPaneChanged`]
//! messages. Every handler runs to completion synchronously.

use std::any::Any;
use std::time::Instant;

use crate::event::binding::{KeyBindingRegistry, SplitAction};
use crate::event::handler::EventDispatcher;
use crate::event::input::{InputEvent, KeyEvent, PointerEvent, PointerKind, PointerPhase};
use crate::event::listeners::{GlobalListener, ListenerChange, ListenerSet};
use crate::event::message::{CollapsedPaneChanged, Envelope};
use crate::geometry::Region;
use crate::observe::{
    ElementId, ObserveError, ObservedDimension, ObserverId, ObserverRegistry, ResizeDelivery,
};
use crate::render::strip::{CellStyle, Strip};
use crate::storage::RatioStore;
use crate::widget::traits::Widget;

use super::collapse::{CollapseMachine, CollapseMode, CollapseOutcome, CollapseState};
use super::drag::{clamp_delta, DragController, DragSession};
use super::layout::{LayoutEngine, PaneSet};
use super::props::{PropsError, SplitPaneProps};
use super::Side;

const SEPARATOR: char = '│';
const GRIP: char = '┃';
const POINT_LEFT: char = '◀';
const POINT_RIGHT: char = '▶';

/// Observations held while mounted.
#[derive(Debug, Clone, Copy)]
struct Mounted {
    container: ElementId,
    container_observer: ObserverId,
    opposite_observer: ObserverId,
}

// ---------------------------------------------------------------------------
// SplitPane
// ---------------------------------------------------------------------------

/// A horizontal split with a draggable separator and an optional collapsible
/// pane.
///
/// # Examples
///
/// ```ignore
/// let props = SplitPaneProps::new(20, 20, "main")
///     .with_collapsible_pane(Some(Side::Left));
/// let mut pane = SplitPane::new(props, MemoryStore::new())?
///     .with_left(Static::new("Files"))
///     .with_right(Static::new("Editor"));
///
/// let mut registry = ObserverRegistry::new();
/// let container = registry.add_element("split");
/// let sidebar = registry.add_element("editor");
/// pane.mount(&mut registry, container, sidebar)?;
/// for delivery in registry.report(container, Region::new(0, 0, 120, 40))? {
///     pane.handle_resize(&delivery);
/// }
/// ```
pub struct SplitPane<S: RatioStore> {
    props: SplitPaneProps,
    store: S,
    layout: LayoutEngine,
    drag: DragController,
    collapse: CollapseMachine,
    listeners: ListenerSet,
    dispatcher: EventDispatcher,
    bindings: KeyBindingRegistry,
    mounted: Option<Mounted>,
    bounds: Region,
    min_height: i32,
    left: Option<Box<dyn Widget>>,
    right: Option<Box<dyn Widget>>,
}

impl<S: RatioStore> SplitPane<S> {
    /// Create a split pane, reading the persisted ratio from `store`.
    ///
    /// Fails only on props no layout could honour. A missing, malformed or
    /// unreadable persisted ratio falls back to a 1:1 split.
    pub fn new(props: SplitPaneProps, store: S) -> Result<Self, PropsError> {
        props.validate()?;

        let ratio = match store.load_ratio(&props.storage_key) {
            Ok(ratio) => ratio,
            Err(err) => {
                tracing::warn!(key = %props.storage_key, error = %err, "could not read split ratio");
                None
            }
        };
        let mode = match props.collapsed_pane {
            Some(prop) => CollapseMode::Controlled(prop),
            None => CollapseMode::Uncontrolled,
        };
        tracing::debug!(key = %props.storage_key, ?ratio, ?mode, "split pane created");

        Ok(Self {
            layout: LayoutEngine::new(props.left_min, props.right_min, ratio),
            collapse: CollapseMachine::new(mode, props.transition_duration),
            drag: DragController::new(),
            listeners: ListenerSet::new(),
            dispatcher: EventDispatcher::new(),
            bindings: KeyBindingRegistry::with_defaults(),
            mounted: None,
            bounds: Region::EMPTY,
            min_height: 0,
            left: None,
            right: None,
            props,
            store,
        })
    }

    /// Set the left pane content (builder).
    pub fn with_left(mut self, widget: impl Widget + 'static) -> Self {
        self.left = Some(Box::new(widget));
        self
    }

    /// Set the right pane content (builder).
    pub fn with_right(mut self, widget: impl Widget + 'static) -> Self {
        self.right = Some(Box::new(widget));
        self
    }

    /// Replace the key bindings (builder).
    pub fn with_bindings(mut self, bindings: KeyBindingRegistry) -> Self {
        self.bindings = bindings;
        self
    }

    // ── Mounting ─────────────────────────────────────────────────────

    /// Start observing the container's bounds and the opposite pane's height.
    ///
    /// `opposite` is the element of [`SplitPaneProps::observed_pane`]. If the
    /// registry already knows either element's bounds they are applied
    /// immediately. Mounting again first tears down the previous mount.
    pub fn mount(
        &mut self,
        registry: &mut ObserverRegistry,
        container: ElementId,
        opposite: ElementId,
    ) -> Result<(), ObserveError> {
        if self.mounted.is_some() {
            self.teardown(registry);
        }
        let container_observer = registry.observe(container, ObservedDimension::Bounds)?;
        let opposite_observer = match registry.observe(opposite, ObservedDimension::Height) {
            Ok(id) => id,
            Err(err) => {
                registry.unobserve(container_observer)?;
                return Err(err);
            }
        };
        self.mounted = Some(Mounted {
            container,
            container_observer,
            opposite_observer,
        });
        tracing::debug!(key = %self.props.storage_key, "split pane mounted");

        for observer in [container_observer, opposite_observer] {
            if let Some(delivery) = registry.initial_delivery(observer) {
                self.handle_resize(&delivery);
            }
        }
        Ok(())
    }

    /// Release everything the component holds outside itself: the running
    /// drag (discarded), global listeners and both observations.
    pub fn teardown(&mut self, registry: &mut ObserverRegistry) {
        self.cancel_drag();
        self.listeners.detach_all();
        if let Some(mounted) = self.mounted.take() {
            for observer in [mounted.container_observer, mounted.opposite_observer] {
                if let Err(err) = registry.unobserve(observer) {
                    tracing::debug!(error = %err, "observer already disconnected");
                }
            }
            tracing::debug!(key = %self.props.storage_key, "split pane torn down");
        }
    }

    /// Whether the component is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// The container element, while mounted.
    pub fn container(&self) -> Option<ElementId> {
        self.mounted.map(|m| m.container)
    }

    // ── Resize observation ───────────────────────────────────────────

    /// Route a resize delivery. Returns `false` for deliveries that belong
    /// to someone else.
    pub fn handle_resize(&mut self, delivery: &ResizeDelivery) -> bool {
        let Some(mounted) = self.mounted else {
            return false;
        };
        if delivery.observer == mounted.container_observer {
            self.on_container_resize(delivery.bounds);
            true
        } else if delivery.observer == mounted.opposite_observer {
            self.on_opposite_pane_resize(delivery.bounds.height);
            true
        } else {
            false
        }
    }

    /// Apply new container bounds and recompute the layout.
    pub fn on_container_resize(&mut self, bounds: Region) {
        let width_changed = bounds.width != self.layout.container_width();
        self.bounds = bounds;
        if width_changed {
            self.relayout();
        }
    }

    /// Track the opposite pane's height as the component's minimum height,
    /// so the layout keeps its height while a pane animates.
    pub fn on_opposite_pane_resize(&mut self, height: i32) {
        self.min_height = height.max(0);
    }

    fn collapsed_pin(&self) -> Option<(Side, i32)> {
        self.collapse
            .collapsed_pane()
            .map(|side| (side, self.props.collapsed_width))
    }

    fn relayout(&mut self) {
        let widths = self.layout.recompute(self.bounds.width, self.collapsed_pin());
        if self.drag.is_dragging() {
            if self.layout.minimums_fit() {
                self.drag
                    .reclamp(widths, self.props.left_min, self.props.right_min);
            } else {
                tracing::debug!("container too narrow, dropping drag");
                self.cancel_drag();
            }
        }
        tracing::trace!(
            width = self.bounds.width,
            left = widths.left,
            right = widths.right,
            "split relayout"
        );
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Handle an input event. Returns whether the component consumed it.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.handle_input_at(event, Instant::now())
    }

    /// [`handle_input`](Self::handle_input) with an explicit clock.
    pub fn handle_input_at(&mut self, event: InputEvent, now: Instant) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key_at(key, now),
            InputEvent::FocusLost => self.cancel_drag(),
            InputEvent::FocusGained => false,
            InputEvent::Mouse(_) | InputEvent::Touch(_) => match event.as_pointer() {
                Some(pointer) => self.handle_pointer_at(pointer, now),
                None => false,
            },
        }
    }

    /// Handle a normalised pointer event.
    pub fn handle_pointer_at(&mut self, event: PointerEvent, now: Instant) -> bool {
        match event.phase {
            PointerPhase::Down => {
                if self.affordance_hit(event.x, event.y) {
                    self.toggle_collapse_at(now)
                } else if self.separator_hit(event.x, event.y) {
                    self.begin_drag(event.x, event.kind)
                } else {
                    false
                }
            }
            PointerPhase::Move => self.drag_to(event.x, event.kind),
            PointerPhase::Up => self.end_drag(event.kind),
            PointerPhase::Cancel => self.owns_drag(event.kind) && self.cancel_drag(),
        }
    }

    /// Resolve a key through the bindings and run its action.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        match self.bindings.resolve(&key) {
            Some(SplitAction::CancelDrag) => self.cancel_drag(),
            Some(SplitAction::NudgeLeft) => self.nudge(-self.props.keyboard_step),
            Some(SplitAction::NudgeRight) => self.nudge(self.props.keyboard_step),
            Some(SplitAction::ToggleCollapse) => self.toggle_collapse_at(now),
            None => false,
        }
    }

    fn owns_drag(&self, kind: PointerKind) -> bool {
        self.drag.session().is_some_and(|s| s.pointer == kind)
    }

    fn move_listener_attached(&self, kind: PointerKind) -> bool {
        let [move_listener, _] = GlobalListener::drag_pair(kind);
        self.listeners.is_attached(move_listener)
    }

    // ── Drag ─────────────────────────────────────────────────────────

    /// Whether dragging is currently impossible: the minimums do not fit,
    /// a pane is collapsed, or an expand transition is running.
    pub fn is_drag_disabled(&self) -> bool {
        !self.layout.minimums_fit()
            || self.collapse.collapsed_pane().is_some()
            || self.collapse.is_transitioning()
    }

    /// Start a drag at pointer x `x`. Returns `false` (and changes nothing)
    /// when dragging is disabled or a drag is already running.
    pub fn begin_drag(&mut self, x: i32, kind: PointerKind) -> bool {
        if self.is_drag_disabled() {
            tracing::trace!(x, "drag ignored, dragging disabled");
            return false;
        }
        if !self.drag.begin(x, kind) {
            return false;
        }
        self.listeners.attach_drag(kind);
        tracing::debug!(x, ?kind, "drag started");
        true
    }

    /// Move the running drag to pointer x `x`.
    pub fn drag_to(&mut self, x: i32, kind: PointerKind) -> bool {
        if !self.move_listener_attached(kind) {
            return false;
        }
        let base = self.layout.widths();
        match self
            .drag
            .update(x, kind, base, self.props.left_min, self.props.right_min)
        {
            Some(delta) => {
                tracing::trace!(x, delta, "drag moved");
                true
            }
            None => false,
        }
    }

    /// Finish the running drag: commit its delta and persist the ratio.
    pub fn end_drag(&mut self, kind: PointerKind) -> bool {
        if !self.owns_drag(kind) {
            return false;
        }
        let Some(DragSession { delta_x, .. }) = self.drag.finish() else {
            return false;
        };
        self.listeners.detach_all();
        let widths = self.layout.commit(delta_x);
        tracing::debug!(
            delta = delta_x,
            left = widths.left,
            right = widths.right,
            "drag committed"
        );
        self.persist_ratio();
        true
    }

    /// Abort the running drag, discarding its delta. Nothing is persisted.
    pub fn cancel_drag(&mut self) -> bool {
        match self.drag.cancel() {
            Some(session) => {
                self.listeners.detach_all();
                tracing::debug!(delta = session.delta_x, "drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Move the committed separator by `delta`, clamped like a drag, and
    /// persist the ratio. Ignored while dragging or when dragging is disabled.
    pub fn nudge(&mut self, delta: i32) -> bool {
        if self.drag.is_dragging() || self.is_drag_disabled() {
            return false;
        }
        let base = self.layout.widths();
        let clamped = clamp_delta(delta, base, self.props.left_min, self.props.right_min);
        if clamped == 0 {
            return false;
        }
        self.layout.commit(clamped);
        tracing::debug!(delta = clamped, "separator nudged");
        self.persist_ratio();
        true
    }

    fn persist_ratio(&mut self) {
        let key = &self.props.storage_key;
        match self.layout.widths().ratio() {
            Some(ratio) => {
                if let Err(err) = self.store.save_ratio(key, ratio) {
                    tracing::warn!(key = %key, error = %err, "could not persist split ratio");
                }
            }
            None => tracing::debug!(key = %key, "split ratio not representable, not persisted"),
        }
    }

    // ── Collapse ─────────────────────────────────────────────────────

    /// Click the collapse affordance.
    pub fn toggle_collapse(&mut self) -> bool {
        self.toggle_collapse_at(Instant::now())
    }

    /// [`toggle_collapse`](Self::toggle_collapse) with an explicit clock.
    ///
    /// Acts on the collapsible pane, or on whichever pane a controlling prop
    /// collapsed. Ignored while dragging.
    pub fn toggle_collapse_at(&mut self, now: Instant) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(side) = self
            .props
            .collapsible_pane
            .or_else(|| self.collapse.collapsed_pane())
        else {
            return false;
        };
        let outcome = self.collapse.toggle(side, now);
        self.apply_collapse(outcome)
    }

    /// Update the controlled `collapsed_pane` prop.
    pub fn set_collapsed_pane(&mut self, prop: Option<Side>) -> bool {
        self.set_collapsed_pane_at(prop, Instant::now())
    }

    /// [`set_collapsed_pane`](Self::set_collapsed_pane) with an explicit clock.
    ///
    /// A prop that collapses a pane also drops any drag in progress.
    pub fn set_collapsed_pane_at(&mut self, prop: Option<Side>, now: Instant) -> bool {
        let outcome = self.collapse.set_prop(prop, now);
        if matches!(outcome, CollapseOutcome::Pinned(_)) {
            self.cancel_drag();
        }
        self.apply_collapse(outcome)
    }

    /// The width transition finished (host-signalled).
    pub fn on_transition_end(&mut self) -> bool {
        let outcome = self.collapse.transition_end();
        self.apply_collapse(outcome)
    }

    /// Finish the expand transition if its timer has run out.
    pub fn tick(&mut self, now: Instant) -> bool {
        let outcome = self.collapse.tick(now);
        self.apply_collapse(outcome)
    }

    /// When the running expand transition is due to end, if one is running.
    pub fn transition_deadline(&self) -> Option<Instant> {
        self.collapse.deadline()
    }

    fn apply_collapse(&mut self, outcome: CollapseOutcome) -> bool {
        if outcome == CollapseOutcome::Unchanged {
            return false;
        }
        self.relayout();
        if let Some(payload) = outcome.notification() {
            let sender = self.container();
            self.dispatcher
                .push(Envelope::new(CollapsedPaneChanged(payload), sender));
        }
        true
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn props(&self) -> &SplitPaneProps {
        &self.props
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The widths as rendered: committed widths plus any running drag delta.
    pub fn widths(&self) -> PaneSet {
        self.drag.live_widths(self.layout.widths())
    }

    /// The committed widths, ignoring any running drag.
    pub fn committed_widths(&self) -> PaneSet {
        self.layout.widths()
    }

    /// The last known split ratio.
    pub fn ratio(&self) -> Option<f64> {
        self.layout.ratio()
    }

    /// The last container bounds.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Minimum height, following the observed opposite pane.
    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    pub fn collapse_state(&self) -> CollapseState {
        self.collapse.state()
    }

    pub fn collapse_mode(&self) -> CollapseMode {
        self.collapse.mode()
    }

    pub fn collapsed_pane(&self) -> Option<Side> {
        self.collapse.collapsed_pane()
    }

    pub fn expanding_pane(&self) -> Option<Side> {
        self.collapse.expanding_pane()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.session()
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// Drain listener attach/detach changes for the host to mirror.
    pub fn drain_listener_changes(&mut self) -> Vec<ListenerChange> {
        self.listeners.drain_changes()
    }

    /// Drain all outgoing messages.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.dispatcher.drain()
    }

    /// Drain outgoing messages, keeping only collapsed-pane payloads.
    pub fn take_notifications(&mut self) -> Vec<Option<Side>> {
        self.dispatcher
            .drain()
            .iter()
            .filter_map(|env| env.downcast_ref::<CollapsedPaneChanged>())
            .map(|msg| msg.0)
            .collect()
    }

    // ── Hit testing ──────────────────────────────────────────────────

    /// Absolute column of the separator, kept inside the container so it
    /// stays reachable when one pane covers the whole width.
    pub fn separator_x(&self) -> i32 {
        let x = self.bounds.x + self.widths().left;
        if self.bounds.is_empty() {
            return x;
        }
        x.clamp(self.bounds.x, self.bounds.right() - 1)
    }

    /// Whether (x, y) grabs the separator: its own column or the one just
    /// left of it, within the container.
    pub fn separator_hit(&self, x: i32, y: i32) -> bool {
        let sep = self.separator_x();
        (x == sep || x == sep - 1) && self.bounds.contains(x, y)
    }

    /// Whether (x, y) is the collapse affordance (separator column, top row).
    pub fn affordance_hit(&self, x: i32, y: i32) -> bool {
        self.props.collapsible_pane.is_some()
            && self.bounds.contains(x, y)
            && x == self.separator_x()
            && y == self.bounds.y
    }

    fn affordance_glyph(&self) -> Option<char> {
        let side = self.props.collapsible_pane?;
        let collapsed = self.collapse.collapsed_pane() == Some(side);
        let glyph = match (side, collapsed) {
            (Side::Left, false) | (Side::Right, true) => POINT_LEFT,
            (Side::Left, true) | (Side::Right, false) => POINT_RIGHT,
        };
        Some(glyph)
    }
}

// ---------------------------------------------------------------------------
// Widget impl
// ---------------------------------------------------------------------------

impl<S: RatioStore + 'static> Widget for SplitPane<S> {
    fn widget_type(&self) -> &str {
        "SplitPane"
    }

    fn can_focus(&self) -> bool {
        true
    }

    /// Left content fills `left` columns; the separator takes the first
    /// column of the right pane and right content fills the rest.
    fn render(&self, region: Region, style: &CellStyle) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let widths = self.widths();
        let (left_region, right_region) = region.split_vertical(widths.left);
        let mut strips = Vec::new();

        if let Some(left) = &self.left {
            strips.extend(left.render(left_region, style));
        }
        // With no room for the right pane the separator overlays the last
        // left column.
        let sep_x = if right_region.width <= 0 {
            region.right() - 1
        } else {
            if let Some(right) = &self.right {
                strips.extend(right.render(right_region.trim_left(1), style));
            }
            right_region.x
        };

        let sep_style = if self.drag.is_dragging() {
            style.clone().bold()
        } else {
            style.clone()
        };
        let grip_row = region.height / 2;
        let show_grip = self.props.show_resize_indicator && !self.is_drag_disabled();
        let affordance = self.affordance_glyph();

        for row in 0..region.height {
            let ch = match (row, affordance) {
                (0, Some(glyph)) => glyph,
                _ if show_grip && row == grip_row => GRIP,
                _ => SEPARATOR,
            };
            strips.push(Strip::single(
                region.y + row,
                sep_x,
                ch,
                sep_style.clone(),
            ));
        }
        strips
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
