//! Core geometry type: Region.
//!
//! All measurements are in terminal cells. The split layout treats one cell as
//! one "pixel" of width, so pane widths, minimums and pointer positions share
//! the same `i32` unit.

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Whether the region has no area.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Split vertically at `offset` cells from the left edge.
    ///
    /// Returns `(left, right)`. The offset is clamped to `[0, width]`.
    #[inline]
    pub const fn split_vertical(self, offset: i32) -> (Region, Region) {
        let clamped = if offset < 0 {
            0
        } else if offset > self.width {
            self.width
        } else {
            offset
        };
        let left = Region { x: self.x, y: self.y, width: clamped, height: self.height };
        let right = Region {
            x: self.x + clamped,
            y: self.y,
            width: self.width - clamped,
            height: self.height,
        };
        (left, right)
    }

    /// Drop `cells` columns from the left edge, keeping the right edge fixed.
    ///
    /// The width never goes below zero.
    #[inline]
    pub const fn trim_left(self, cells: i32) -> Region {
        let cells = if cells > self.width { self.width } else { cells };
        Region {
            x: self.x + cells,
            y: self.y,
            width: self.width - cells,
            height: self.height,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
