#![forbid(unsafe_code)]

//! Pixel to grid-cell conversion and back.
//!
//! [`PositionParams`] bundles the externally supplied geometry (column
//! count, row height, margins, padding, container width). Columns have a
//! derived pixel width; rows have a fixed one.
//! [`cell_at`](PositionParams::cell_at) rounds to the nearest cell rather
//! than flooring so a dragged item snaps to the cell centered under the
//! pointer, and [`item_position`](PositionParams::item_position) is its
//! algebraic inverse up to rounding.

use gridkit_core::geometry::Spacing;
use serde::{Deserialize, Serialize};

use crate::item::GridItem;

/// Geometry of the rendered grid, in pixels and cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionParams {
    /// Number of columns.
    pub cols: i32,
    /// Height of one row, in pixels.
    pub row_height: f64,
    /// Gap between adjacent cells.
    pub margin: Spacing,
    /// Padding between the container edge and the outermost cells.
    /// `None` falls back to the margin.
    pub container_padding: Option<Spacing>,
    /// Inner width of the container, in pixels.
    pub container_width: f64,
    /// Optional row ceiling.
    pub max_rows: Option<i32>,
}

impl PositionParams {
    /// Params with the conventional 10px margins and padding following the
    /// margin.
    #[must_use]
    pub fn new(cols: i32, container_width: f64, row_height: f64) -> Self {
        Self {
            cols: cols.max(1),
            row_height,
            margin: Spacing::all(10.0),
            container_padding: None,
            container_width,
            max_rows: None,
        }
    }

    /// Set the cell margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    /// Set an explicit container padding.
    #[must_use]
    pub fn with_container_padding(mut self, padding: Spacing) -> Self {
        self.container_padding = Some(padding);
        self
    }

    /// Set a maximum-row ceiling.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: i32) -> Self {
        self.max_rows = Some(max_rows.max(1));
        self
    }

    /// Effective container padding.
    #[must_use]
    pub fn padding(&self) -> Spacing {
        self.container_padding.unwrap_or(self.margin)
    }

    /// Pixel width of one column.
    #[must_use]
    pub fn col_width(&self) -> f64 {
        let padding = self.padding();
        (self.container_width
            - self.margin.horizontal * (self.cols - 1) as f64
            - padding.horizontal * 2.0)
            / self.cols as f64
    }

    /// Grid cell nearest to a pixel offset, for an item of `w`x`h` cells.
    ///
    /// Clamped to `x` in `[0, cols - w]` and, when a row ceiling is set,
    /// `y` in `[0, max_rows - h]`; otherwise `y >= 0`.
    #[must_use]
    pub fn cell_at(&self, top: f64, left: f64, w: i32, h: i32) -> GridCell {
        let col_width = self.col_width();
        let x = ((left - self.margin.horizontal) / (col_width + self.margin.horizontal)).round()
            as i32;
        let y = ((top - self.margin.vertical) / (self.row_height + self.margin.vertical)).round()
            as i32;
        let x = x.clamp(0, (self.cols - w).max(0));
        let y = match self.max_rows {
            Some(rows) => y.clamp(0, (rows - h).max(0)),
            None => y.max(0),
        };
        GridCell { x, y }
    }

    /// Pixel box of a cell rectangle. Exact inverse of [`cell_at`] up to
    /// rounding: `cell_at(item_position(item)) == (item.x, item.y)` for
    /// any item already on a valid cell.
    #[must_use]
    pub fn item_position(&self, x: i32, y: i32, w: i32, h: i32) -> PixelRect {
        let col_width = self.col_width();
        let padding = self.padding();
        PixelRect {
            left: ((col_width + self.margin.horizontal) * x as f64 + padding.horizontal).round()
                as i32,
            top: ((self.row_height + self.margin.vertical) * y as f64 + padding.vertical).round()
                as i32,
            width: (col_width * w as f64 + (w - 1).max(0) as f64 * self.margin.horizontal).round()
                as i32,
            height: (self.row_height * h as f64 + (h - 1).max(0) as f64 * self.margin.vertical)
                .round() as i32,
        }
    }

    /// Cell size nearest to a pixel size, for an item anchored at
    /// `(x, y)`. Clamped so the item stays within the grid.
    #[must_use]
    pub fn size_in_cells(&self, width: f64, height: f64, x: i32, y: i32) -> (i32, i32) {
        let col_width = self.col_width();
        let w = ((width + self.margin.horizontal) / (col_width + self.margin.horizontal)).round()
            as i32;
        let h = ((height + self.margin.vertical) / (self.row_height + self.margin.vertical))
            .round() as i32;
        let w = w.clamp(0, (self.cols - x).max(0));
        let h = match self.max_rows {
            Some(rows) => h.clamp(0, (rows - y).max(0)),
            None => h.max(0),
        };
        (w, h)
    }

    /// Pixel height of the packed grid: rows, inter-row margins, and
    /// vertical padding.
    #[must_use]
    pub fn container_height(&self, layout: &[GridItem]) -> f64 {
        let padding = self.padding();
        let rows = crate::bottom(layout);
        if rows == 0 {
            return padding.vertical * 2.0;
        }
        rows as f64 * self.row_height
            + (rows - 1) as f64 * self.margin.vertical
            + padding.vertical * 2.0
    }

    /// Default-place a dropped item under the pointer.
    ///
    /// Used by native drag-over: the pixel point becomes the item's cell,
    /// and the item is created movable regardless of the ambient policy so
    /// the drop interaction can keep driving it.
    #[must_use]
    pub fn drop_placement(
        &self,
        top: f64,
        left: f64,
        id: impl Into<String>,
        w: i32,
        h: i32,
    ) -> GridItem {
        let cell = self.cell_at(top, left, w, h);
        GridItem::new(id, cell.x, cell.y, w, h).with_draggable(true)
    }
}

/// A grid cell index pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

/// A pixel-space box for rendering one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Offset from the container's left edge.
    pub left: i32,
    /// Offset from the container's top edge.
    pub top: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}
