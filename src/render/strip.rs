//! Strip: a horizontal run of styled terminal cells.
//!
//! Widgets produce `Vec<Strip>` from their `render()` method. The split pane
//! renders each slot into its own column range and adds one single-cell strip
//! per row for the separator, so strips from different sources never overlap.

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are stored as optional strings (named colors or `#rrggbb`), left
/// for the host renderer to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bold: bool,
}

impl CellStyle {
    /// Create a new `CellStyle` with all attributes unset/false.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color (builder).
    pub fn with_fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    /// Set the bold flag (builder).
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    /// Create a new styled cell.
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell with the given style.
    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank_styled(CellStyle::default())
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled terminal cells.
///
/// Each Strip represents one row (at absolute row `y`) starting at `x_offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// The absolute row this strip occupies.
    pub y: i32,
    /// Starting x position for this strip's cells.
    pub x_offset: i32,
    /// The cells in left-to-right order.
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// A strip holding exactly one cell.
    pub fn single(y: i32, x: i32, ch: char, style: CellStyle) -> Self {
        Self {
            y,
            x_offset: x,
            cells: vec![StyledCell::new(ch, style)],
        }
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        for ch in text.chars() {
            self.cells.push(StyledCell::new(ch, style.clone()));
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Pad the strip to exactly `width` cells using spaces with the given style.
    ///
    /// If the strip is already wider than `width`, it is truncated.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::blank_styled(style));
        } else {
            self.cells.truncate(w);
        }
    }

    /// The rightmost x position (exclusive) of this strip.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// The characters of this strip as a `String`.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn red_style() -> CellStyle {
        CellStyle::new().with_fg("red")
    }

    #[test]
    fn cell_style_default_is_empty() {
        let s = CellStyle::default();
        assert!(s.fg.is_none());
        assert!(!s.bold);
    }

    #[test]
    fn cell_style_builders() {
        let s = CellStyle::new().with_fg("cyan").bold();
        assert_eq!(s.fg.as_deref(), Some("cyan"));
        assert!(s.bold);
    }

    #[test]
    fn styled_cell_default_is_blank() {
        let cell = StyledCell::default();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style, CellStyle::default());
    }

    #[test]
    fn strip_single() {
        let s = Strip::single(3, 7, '│', red_style());
        assert_eq!(s.y, 3);
        assert_eq!(s.x_offset, 7);
        assert_eq!(s.width(), 1);
        assert_eq!(s.right(), 8);
        assert_eq!(s.cells[0].style, red_style());
    }

    #[test]
    fn strip_push_str_and_text() {
        let mut s = Strip::new(0, 2);
        s.push_str("Hello", red_style());
        s.push('!', CellStyle::default());
        assert_eq!(s.width(), 6);
        assert_eq!(s.text(), "Hello!");
        assert_eq!(s.right(), 8);
    }

    #[test]
    fn strip_fill_pads_and_truncates() {
        let mut s = Strip::new(0, 0);
        s.push_str("Hi", red_style());
        s.fill(4, CellStyle::default());
        assert_eq!(s.text(), "Hi  ");

        s.fill(1, CellStyle::default());
        assert_eq!(s.text(), "H");
    }

    #[test]
    fn strip_fill_negative_width_empties() {
        let mut s = Strip::new(0, 0);
        s.push_str("abc", red_style());
        s.fill(-2, CellStyle::default());
        assert_eq!(s.width(), 0);
    }
}
