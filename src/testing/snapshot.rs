//! Snapshot rendering helpers.
//!
//! Functions for converting rendered widget output into plain-text strings
//! suitable for snapshot testing and assertions.

use crate::geometry::Region;
use crate::render::strip::{CellStyle, Strip};
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a widget to a plain text string using the default cell style.
///
/// The widget is rendered into a region of `width` x `height` cells starting at
/// the origin. Each row becomes one line in the output string, with trailing
/// spaces trimmed. Lines are separated by `'\n'`. The final line does not have
/// a trailing newline.
///
/// # Examples
///
/// ```ignore
/// use gilt_split::testing::render_to_string;
/// use gilt_split::widgets::Static;
///
/// let output = render_to_string(&Static::new("Hello"), 20, 1);
/// assert_eq!(output, "Hello");
/// ```
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    render_to_styled_string(widget, width, height, &CellStyle::new())
}

/// Render a widget to a plain text string with a base cell style.
pub fn render_to_styled_string(
    widget: &dyn Widget,
    width: i32,
    height: i32,
    style: &CellStyle,
) -> String {
    let region = Region::new(0, 0, width, height);
    let strips = widget.render(region, style);
    strips_to_string(&strips, width, height)
}

/// Convert raw strips to a plain text string.
///
/// Builds a `width` x `height` grid of spaces, then overlays each strip's cells
/// at the appropriate (x, y) positions. Later strips win where they overlap.
/// Each row is right-trimmed of spaces, and rows are joined with `'\n'`.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }

    let mut grid: Vec<Vec<char>> = vec![vec![' '; width as usize]; height as usize];

    for strip in strips {
        if strip.y < 0 || strip.y >= height {
            continue;
        }
        let row = &mut grid[strip.y as usize];
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                row[x as usize] = cell.ch;
            }
        }
    }

    grid.into_iter()
        .map(|row| {
            let s: String = row.into_iter().collect();
            s.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the style of the cell at (x, y), if any strip covers it.
///
/// Later strips win, matching [`strips_to_string`].
pub fn style_at(strips: &[Strip], x: i32, y: i32) -> Option<&CellStyle> {
    strips
        .iter()
        .rev()
        .filter(|s| s.y == y && x >= s.x_offset && x < s.right())
        .find_map(|s| s.cells.get((x - s.x_offset) as usize))
        .map(|cell| &cell.style)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Static;

    #[test]
    fn static_renders_text() {
        assert_eq!(render_to_string(&Static::new("Hello"), 20, 1), "Hello");
    }

    #[test]
    fn multi_line_static() {
        let out = render_to_string(&Static::new("one\ntwo"), 10, 3);
        assert_eq!(out, "one\ntwo\n");
    }

    #[test]
    fn empty_grid_is_empty_string() {
        assert_eq!(strips_to_string(&[], 0, 5), "");
        assert_eq!(strips_to_string(&[], 5, 0), "");
    }

    #[test]
    fn blank_grid_keeps_rows() {
        assert_eq!(strips_to_string(&[], 3, 2), "\n");
    }

    #[test]
    fn out_of_bounds_cells_are_clipped() {
        let mut strip = Strip::new(0, -2);
        strip.push_str("abcdef", CellStyle::new());
        let off_screen = Strip::single(7, 0, 'z', CellStyle::new());
        assert_eq!(strips_to_string(&[strip, off_screen], 3, 1), "cde");
    }

    #[test]
    fn later_strips_overlay_earlier() {
        let mut base = Strip::new(0, 0);
        base.push_str("-----", CellStyle::new());
        let top = Strip::single(0, 2, '|', CellStyle::new().bold());
        let strips = [base, top];
        assert_eq!(strips_to_string(&strips, 5, 1), "--|--");
        assert!(style_at(&strips, 2, 0).unwrap().bold);
        assert!(!style_at(&strips, 1, 0).unwrap().bold);
        assert!(style_at(&strips, 9, 0).is_none());
    }
}
