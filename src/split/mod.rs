//! The resizable two-pane split layout.
//!
//! - [`layout`]: pane widths from container width, ratio and collapse state
//! - [`drag`]: separator drag sessions with minimum-width clamping
//! - [`collapse`]: collapse/expand state machine, controlled or uncontrolled
//! - [`props`]: component configuration and validation
//! - [`pane`]: the [`SplitPane`] component tying them together

pub mod collapse;
pub mod drag;
pub mod layout;
pub mod pane;
pub mod props;

pub use collapse::{CollapseMachine, CollapseMode, CollapseOutcome, CollapseState};
pub use drag::{DragController, DragSession};
pub use layout::{LayoutEngine, PaneSet};
pub use pane::SplitPane;
pub use props::{PropsError, SplitPaneProps};

/// One of the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The other pane.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}
