//! Integration tests for gilt-split.
//!
//! These tests exercise the public API from outside the crate, verifying that
//! the pilot, the split pane, the stores and the renderer work together.

use std::time::Duration;

use gilt_split::event::input::{Key, TouchPhase};
use gilt_split::event::listeners::{GlobalListener, ListenerChange};
use gilt_split::geometry::Region;
use gilt_split::observe::ObserverRegistry;
use gilt_split::split::{PaneSet, Side, SplitPane, SplitPaneProps};
use gilt_split::storage::{FileStore, MemoryStore, RatioStore};
use gilt_split::testing::{render_to_string, Pilot};
use gilt_split::widgets::Static;
use pretty_assertions::assert_eq;

fn props() -> SplitPaneProps {
    SplitPaneProps::new(300, 300, "workspace.split")
}

fn code_pilot(props: SplitPaneProps, width: i32) -> Pilot {
    let store = MemoryStore::new();
    let pane = SplitPane::new(props, store.clone())
        .unwrap()
        .with_left(Static::new("files\nsrc\nlib"))
        .with_right(Static::new("main.rs\nfn main\n}"));
    Pilot::from_pane(pane, store, width, 3).unwrap()
}

// ---------------------------------------------------------------------------
// Layout and drag
// ---------------------------------------------------------------------------

#[test]
fn test_initial_split_is_even() {
    let pilot = Pilot::new(1000, 10, props()).unwrap();
    assert_eq!(pilot.widths(), PaneSet::new(500, 500));
}

#[test]
fn test_drag_clamps_to_minimum_and_persists() {
    let mut pilot = Pilot::new(1000, 10, props()).unwrap();
    assert!(pilot.press(500, 4));
    assert!(pilot.move_to(200));
    assert_eq!(pilot.pane().drag_session().unwrap().delta_x, -200);
    assert!(pilot.release(200));

    assert_eq!(pilot.widths(), PaneSet::new(300, 700));
    let ratio = pilot.store().load_ratio("workspace.split").unwrap().unwrap();
    assert!((ratio - 300.0 / 700.0).abs() < 1e-12);
}

#[test]
fn test_remount_reproduces_committed_widths() {
    let store = MemoryStore::new();
    let mut first = Pilot::with_store(1000, 10, props(), store.clone()).unwrap();
    first.drag(500, 640);
    let committed = first.widths();
    first.teardown();

    let second = Pilot::with_store(1000, 10, props(), store).unwrap();
    assert_eq!(second.widths(), committed);
    assert_eq!(committed, PaneSet::new(640, 360));
}

#[test]
fn test_ratio_survives_container_resize() {
    let mut pilot = Pilot::new(1000, 10, SplitPaneProps::new(0, 0, "k")).unwrap();
    pilot.drag(500, 250);
    assert_eq!(pilot.widths(), PaneSet::new(250, 750));
    pilot.resize(400, 10).unwrap();
    assert_eq!(pilot.widths(), PaneSet::new(100, 300));
}

#[test]
fn test_oversized_minimums_disable_drag() {
    let mut pilot = Pilot::new(1000, 10, SplitPaneProps::new(600, 600, "k")).unwrap();
    let before = pilot.widths();
    assert!(!pilot.drag(500, 100));
    assert!(!pilot.press_key(Key::Left));
    assert_eq!(pilot.widths(), before);
    assert!(pilot.store().is_empty());
    assert!(pilot.notifications().is_empty());
}

#[test]
fn test_touch_drag_uses_touch_listeners() {
    let mut pilot = Pilot::new(100, 4, SplitPaneProps::new(10, 10, "k")).unwrap();
    assert!(pilot.touch(TouchPhase::Start, 50, 2));
    assert!(pilot.touch(TouchPhase::Move, 95, 2));
    assert!(pilot.touch(TouchPhase::End, 95, 2));
    assert_eq!(pilot.widths(), PaneSet::new(90, 10));
    assert_eq!(
        pilot.pane_mut().drain_listener_changes(),
        vec![
            ListenerChange::Attached(GlobalListener::TouchMove),
            ListenerChange::Attached(GlobalListener::TouchEnd),
            ListenerChange::Detached(GlobalListener::TouchMove),
            ListenerChange::Detached(GlobalListener::TouchEnd),
        ]
    );
}

#[test]
fn test_blur_discards_drag() {
    let mut pilot = Pilot::new(100, 4, SplitPaneProps::new(0, 0, "k")).unwrap();
    pilot.press(50, 1);
    pilot.move_to(70);
    assert_eq!(pilot.widths(), PaneSet::new(70, 30));
    assert!(pilot.blur());
    assert_eq!(pilot.widths(), PaneSet::new(50, 50));
    assert!(pilot.store().is_empty());
}

#[test]
fn test_keyboard_nudges() {
    let props = SplitPaneProps::new(0, 0, "k").with_keyboard_step(5);
    let mut pilot = Pilot::new(100, 4, props).unwrap();
    pilot.press_key(Key::Right);
    pilot.press_key(Key::Right);
    assert_eq!(pilot.widths(), PaneSet::new(60, 40));
    assert_eq!(pilot.store().load_ratio("k").unwrap(), Some(1.5));
}

// ---------------------------------------------------------------------------
// Collapse / expand
// ---------------------------------------------------------------------------

#[test]
fn test_collapse_left_then_expand() {
    let props = props().with_collapsible_pane(Some(Side::Left));
    let mut pilot = Pilot::new(1000, 10, props).unwrap();

    assert!(pilot.click_affordance());
    assert_eq!(pilot.widths(), PaneSet::new(24, 976));
    assert_eq!(pilot.notifications(), vec![Some(Side::Left)]);

    assert!(pilot.click_affordance());
    assert_eq!(pilot.widths(), PaneSet::new(500, 500));
    assert!(pilot.notifications().is_empty());
    // Toggling mid-transition does nothing.
    assert!(!pilot.toggle_collapse());

    assert!(pilot.transition_end());
    assert_eq!(pilot.notifications(), vec![None]);
    assert!(!pilot.transition_end());
    assert!(pilot.notifications().is_empty());
}

#[test]
fn test_transition_resolved_by_clock() {
    let props = SplitPaneProps::new(0, 0, "k")
        .with_collapsible_pane(Some(Side::Right))
        .with_transition_duration(Duration::from_millis(300));
    let mut pilot = Pilot::new(100, 4, props).unwrap();
    pilot.toggle_collapse();
    pilot.toggle_collapse();
    assert!(!pilot.advance(Duration::from_millis(299)));
    assert!(pilot.advance(Duration::from_millis(1)));
    assert_eq!(pilot.notifications(), vec![Some(Side::Right), None]);
}

#[test]
fn test_controlled_prop_round_trip() {
    let props = SplitPaneProps::new(0, 0, "k")
        .with_collapsible_pane(Some(Side::Left))
        .with_collapsed_pane(None);
    let mut pilot = Pilot::new(100, 4, props).unwrap();

    // User clicks; the caller echoes the value back.
    pilot.click_affordance();
    let changed = pilot.notifications();
    assert_eq!(changed, vec![Some(Side::Left)]);
    assert!(!pilot.set_collapsed_pane(changed[0]));
    assert_eq!(pilot.widths(), PaneSet::new(24, 76));

    // The caller expands it.
    assert!(pilot.set_collapsed_pane(None));
    assert!(pilot.notifications().is_empty());
    pilot.transition_end();
    assert_eq!(pilot.notifications(), vec![None]);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn test_render_expanded_with_affordance() {
    let pilot = code_pilot(SplitPaneProps::new(0, 0, "k").with_collapsible_pane(Some(Side::Left)), 20);
    insta::assert_snapshot!(pilot.render_to_string(), @r"
    files     ◀main.rs
    src       ┃fn main
    lib       │}
    ");
}

#[test]
fn test_render_collapsed_left() {
    let props = SplitPaneProps::new(0, 0, "k")
        .with_collapsible_pane(Some(Side::Left))
        .with_collapsed_width(4);
    let mut pilot = code_pilot(props, 20);
    pilot.toggle_collapse();
    insta::assert_snapshot!(pilot.render_to_string(), @r"
    file▶main.rs
    src │fn main
    lib │}
    ");
}

#[test]
fn test_render_without_indicator() {
    let props = SplitPaneProps::new(0, 0, "k").with_resize_indicator(false);
    let pilot = code_pilot(props, 20);
    assert_eq!(
        pilot.render_to_string(),
        "files     │main.rs\nsrc       │fn main\nlib       │}"
    );
}

#[test]
fn test_static_renders_standalone() {
    assert_eq!(render_to_string(&Static::new("Hello, World!"), 20, 1), "Hello, World!");
}

// ---------------------------------------------------------------------------
// File-backed persistence
// ---------------------------------------------------------------------------

fn mount_file_pane(store: FileStore) -> SplitPane<FileStore> {
    let mut registry = ObserverRegistry::new();
    let container = registry.add_element("split");
    let opposite = registry.add_element("right");
    let mut pane = SplitPane::new(SplitPaneProps::new(0, 0, "editor"), store).unwrap();
    pane.mount(&mut registry, container, opposite).unwrap();
    for delivery in registry.report(container, Region::new(0, 0, 120, 30)).unwrap() {
        pane.handle_resize(&delivery);
    }
    pane
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("layout").join("ratios.json");

    let mut first = mount_file_pane(FileStore::new(&path));
    assert!(first.nudge(-30));
    assert_eq!(first.widths(), PaneSet::new(30, 90));
    assert!(path.exists());

    let second = mount_file_pane(FileStore::new(&path));
    assert_eq!(second.widths(), PaneSet::new(30, 90));
}

#[test]
fn test_corrupt_ratio_file_is_replaced_on_first_commit() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ratios.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut first = mount_file_pane(FileStore::new(&path));
    assert_eq!(first.widths(), PaneSet::new(60, 60));
    assert!(first.nudge(-30));
    assert_eq!(first.widths(), PaneSet::new(30, 90));

    let second = mount_file_pane(FileStore::new(&path));
    assert_eq!(second.widths(), PaneSet::new(30, 90));
}

#[test]
fn test_unwritable_ratio_file_keeps_widths_in_memory() {
    let dir = tempfile::TempDir::new().unwrap();
    // A directory where the file should be: every read and write fails.
    let store = FileStore::new(dir.path());

    let mut pane = mount_file_pane(store.clone());
    assert_eq!(pane.widths(), PaneSet::new(60, 60));
    assert!(pane.nudge(-30));
    assert_eq!(pane.widths(), PaneSet::new(30, 90));
    assert!(store.load_ratio("editor").is_err());
}
