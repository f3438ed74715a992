//! Static widget: displays fixed text content inside a pane.
//!
//! The simplest slot content. It renders lines of immutable text within the
//! given region, truncating to the pane width so a narrow (or collapsed) pane
//! never spills into its neighbour.

use std::any::Any;

use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Static
// ---------------------------------------------------------------------------

/// A widget that displays fixed, non-interactive text content.
///
/// Lines are split on `'\n'`. Each line is rendered as one [`Strip`], truncated
/// to the region width and limited to the region height. Rows past the last
/// line are filled with blanks so the pane background is painted.
///
/// # Examples
///
/// ```ignore
/// let sidebar = Static::new("Files\nSearch");
/// ```
pub struct Static {
    content: String,
}

impl Static {
    /// Create a new `Static` widget with the given text content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Return the text content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Widget for Static {
    fn widget_type(&self) -> &str {
        "Static"
    }

    fn render(&self, region: Region, style: &CellStyle) -> Vec<Strip> {
        if region.is_empty() {
            return Vec::new();
        }

        let max_width = region.width as usize;
        let mut lines = self.content.split('\n');

        (0..region.height)
            .map(|row| {
                let mut strip = Strip::new(region.y + row, region.x);
                if let Some(line) = lines.next() {
                    let truncated: String = line.chars().take(max_width).collect();
                    strip.push_str(&truncated, style.clone());
                }
                strip.fill(region.width, style.clone());
                strip
            })
            .collect()
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
