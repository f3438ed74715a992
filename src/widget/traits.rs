//! Widget trait: type name, render, focus.
//!
//! Every element that can fill a split-pane slot implements [`Widget`]. A
//! widget knows how to render itself into strips within a region; the split
//! pane is itself a widget that delegates to its two slot widgets.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widget is object-safe: slots hold `Box<dyn Widget>` and the split pane
/// never needs to know the concrete content type.
pub trait Widget {
    /// The type name for this widget (e.g. "Static", "SplitPane").
    fn widget_type(&self) -> &str;

    /// Render this widget's content into strips within the given region.
    ///
    /// Strips must stay inside `region`; the caller relies on that to lay
    /// sibling widgets side by side.
    fn render(&self, region: Region, style: &CellStyle) -> Vec<Strip>;

    /// Whether this widget can receive keyboard focus.
    fn can_focus(&self) -> bool {
        false
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ===========================================================================
// Tests
// ===========================================================================
