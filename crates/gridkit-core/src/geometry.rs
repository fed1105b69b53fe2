#![forbid(unsafe_code)]

//! Geometric primitives.

/// An axis-aligned rectangle in grid-cell coordinates.
///
/// Coordinates are 0-indexed with the origin at the top-left. Widths and
/// heights are in whole cells. Coordinates are signed so that loosely
/// validated external input can be represented before it is normalized;
/// the engine clamps into the non-negative range on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    /// Left edge (inclusive), in columns.
    pub x: i32,
    /// Top edge (inclusive), in rows.
    pub y: i32,
    /// Width in columns.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
}

impl CellRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap test on both axes.
    ///
    /// Rectangles that merely touch along an edge do not overlap: the right
    /// and bottom edges are exclusive. The test is symmetric.
    #[inline]
    pub const fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A horizontal/vertical pixel spacing pair, used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    /// Spacing along the x axis, in pixels.
    pub horizontal: f64,
    /// Spacing along the y axis, in pixels.
    pub vertical: f64,
}

impl Spacing {
    /// Create a spacing pair.
    #[inline]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Equal spacing on both axes.
    #[inline]
    pub const fn all(val: f64) -> Self {
        Self::new(val, val)
    }
}
