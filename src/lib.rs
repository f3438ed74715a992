//! # gilt-split
//!
//! A resizable, collapsible two-pane split layout for terminal UIs.
//!
//! The [`SplitPane`](split::SplitPane) places two slot widgets side by side
//! with a draggable separator. Pane widths follow the container width at a
//! persisted `left / right` ratio, each pane keeps a minimum width, and one
//! pane can collapse to a narrow strip and expand back with a transition.
//!
//! ## Core Systems
//!
//! - **[`split`]**: Layout engine, drag controller, collapse state machine and the component
//! - **[`observe`]**: Slotmap-backed resize observer registry
//! - **[`storage`]**: Ratio persistence: in-memory and JSON-file stores
//! - **[`event`]**: Input events, pointer normalisation, messages, key bindings, global listeners
//! - **[`widget`]**: Widget trait
//! - **[`widgets`]**: Built-in slot content: Static
//! - **[`render`]**: Strip-based cell output
//! - **[`driver`]**: Async tokio host loop
//! - **[`testing`]**: Headless Pilot and snapshot helpers
//! - **[`geometry`]**: Region primitive

// Foundation
pub mod geometry;

// Widget system
pub mod render;
pub mod widget;
pub mod widgets;

// Events and observation
pub mod event;
pub mod observe;

// The split layout
pub mod split;
pub mod storage;

// Hosting
pub mod driver;
pub mod testing;
