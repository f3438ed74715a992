//! Layout engine: pane widths from container width, split ratio and collapse.
//!
//! At rest the two widths always add up to the container width. The engine
//! remembers the last known `left / right` ratio and re-applies it on every
//! container resize; with no ratio yet the panes split 1:1.

use super::Side;

// ---------------------------------------------------------------------------
// PaneSet
// ---------------------------------------------------------------------------

/// Widths of the left and right panes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PaneSet {
    pub left: i32,
    pub right: i32,
}

impl PaneSet {
    /// Create a new pane set.
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Combined width.
    pub const fn total(self) -> i32 {
        self.left + self.right
    }

    /// Width of one side.
    pub const fn width_of(self, side: Side) -> i32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The `left / right` ratio, or `None` when it is not representable
    /// (right pane of zero width, or a negative width).
    pub fn ratio(self) -> Option<f64> {
        (self.right > 0 && self.left >= 0).then(|| f64::from(self.left) / f64::from(self.right))
    }
}

// ---------------------------------------------------------------------------
// LayoutEngine
// ---------------------------------------------------------------------------

/// Computes and holds the committed pane widths.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    left_min: i32,
    right_min: i32,
    container_width: i32,
    ratio: Option<f64>,
    widths: PaneSet,
}

impl LayoutEngine {
    /// Create an engine with the given minimums and an optional known ratio.
    ///
    /// Widths stay zero until the first [`recompute`](Self::recompute).
    pub fn new(left_min: i32, right_min: i32, ratio: Option<f64>) -> Self {
        Self {
            left_min,
            right_min,
            container_width: 0,
            ratio,
            widths: PaneSet::default(),
        }
    }

    /// The committed widths.
    pub fn widths(&self) -> PaneSet {
        self.widths
    }

    /// The last container width passed to `recompute`.
    pub fn container_width(&self) -> i32 {
        self.container_width
    }

    /// The last known split ratio, if one has been established.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// Replace the known ratio. Takes effect on the next recompute.
    pub fn set_ratio(&mut self, ratio: Option<f64>) {
        self.ratio = ratio;
    }

    pub fn left_min(&self) -> i32 {
        self.left_min
    }

    pub fn right_min(&self) -> i32 {
        self.right_min
    }

    /// Whether both minimums fit in the current container.
    pub fn minimums_fit(&self) -> bool {
        self.left_min.saturating_add(self.right_min) <= self.container_width
    }

    /// Split `width` by the known ratio (1:1 when unknown).
    ///
    /// When both minimums fit in `width` the left width is clamped so each
    /// pane keeps its minimum; otherwise the split is best-effort.
    pub fn split_by_ratio(&self, width: i32) -> PaneSet {
        let width = width.max(0);
        let ratio = self.ratio.unwrap_or(1.0);
        let exact = f64::from(width) * ratio / (1.0 + ratio);
        let mut left = (exact.round() as i32).clamp(0, width);
        if self.left_min.saturating_add(self.right_min) <= width {
            left = left.clamp(self.left_min, width - self.right_min);
        }
        PaneSet::new(left, width - left)
    }

    /// Recompute the committed widths for a container of `container_width`.
    ///
    /// `collapsed` pins one side to the given width (capped at the
    /// container width) and gives the rest to the other side.
    pub fn recompute(&mut self, container_width: i32, collapsed: Option<(Side, i32)>) -> PaneSet {
        self.container_width = container_width.max(0);
        self.widths = match collapsed {
            Some((side, collapsed_width)) => {
                let pinned = collapsed_width.clamp(0, self.container_width);
                let rest = self.container_width - pinned;
                match side {
                    Side::Left => PaneSet::new(pinned, rest),
                    Side::Right => PaneSet::new(rest, pinned),
                }
            }
            None => self.split_by_ratio(self.container_width),
        };
        self.widths
    }

    /// Move `delta` cells from the right pane to the left one and remember
    /// the resulting ratio.
    ///
    /// The caller is responsible for clamping `delta`.
    pub fn commit(&mut self, delta: i32) -> PaneSet {
        self.widths = PaneSet::new(self.widths.left + delta, self.widths.right - delta);
        if let Some(ratio) = self.widths.ratio() {
            self.ratio = Some(ratio);
        }
        self.widths
    }
}

// ===========================================================================
// Tests
// ===========================================================================
