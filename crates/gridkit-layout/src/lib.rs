#![forbid(unsafe_code)]

//! Grid packing and collision resolution for dashboard-style layouts.
//!
//! This crate is the computational core behind an interactive grid of
//! draggable, resizable items on a fixed number of columns:
//!
//! - [`GridItem`] / [`Placeholder`] - the layout data model
//! - [`collisions`] - collision index over a layout
//! - [`compact`] - gap elimination along a [`CompactAxis`]
//! - [`resolve`] - interactive move/resize resolution and the deferred
//!   corrective pass
//! - [`coords`] - pixel to grid-cell conversion and back
//! - [`sync`] - reconciling a layout against a managed id set
//!
//! All operations are pure: they take a layout slice and return a fresh
//! layout, never mutating their input. The caller owns the current-layout
//! state and is responsible for serializing calls per logical layout.
//!
//! ```
//! use gridkit_layout::{CompactAxis, GridBounds, GridItem, compact};
//!
//! let layout = vec![
//!     GridItem::new("a", 0, 5, 1, 1),
//!     GridItem::new("b", 0, 0, 1, 1).with_static(true),
//! ];
//! let packed = compact(&layout, CompactAxis::Vertical, GridBounds::new(12));
//! // "a" packs up to the first free row below the static "b".
//! assert_eq!(packed[0].y, 1);
//! assert_eq!(packed[1].y, 0);
//! ```

pub mod coords;
pub mod item;
pub mod resolve;
pub mod sync;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

pub use coords::{GridCell, PixelRect, PositionParams};
pub use gridkit_core::geometry::{CellRect, Spacing};
pub use item::{GridItem, LayoutError, Placeholder};
pub use resolve::{
    DeferredPass, MoveRequest, MoveStatus, RejectReason, ResizeRequest, ResolveOptions, Resolution,
    resolve_move, resolve_resize,
};
pub use sync::{ManagedItem, synchronize};

/// The axis along which [`compact`] packs movable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactAxis {
    /// Pack items toward row 0.
    #[default]
    Vertical,
    /// Pack items toward column 0.
    Horizontal,
    /// Free-form placement; compaction leaves the layout untouched.
    None,
}

/// Grid extent shared by the compactor, resolver, and synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    /// Number of columns in the grid.
    pub cols: i32,
    /// Optional row ceiling; items cannot extend below it.
    pub max_rows: Option<i32>,
}

impl GridBounds {
    /// Bounds with the given column count and unbounded rows.
    #[must_use]
    pub fn new(cols: i32) -> Self {
        Self {
            cols: cols.max(1),
            max_rows: None,
        }
    }

    /// Set a maximum-row ceiling.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: i32) -> Self {
        self.max_rows = Some(max_rows.max(1));
        self
    }
}

/// One past the lowest occupied row, or 0 for an empty layout.
pub fn bottom(layout: &[GridItem]) -> i32 {
    layout
        .iter()
        .map(|item| item.y + item.h)
        .max()
        .unwrap_or(0)
}

/// Every item in `layout` (other than `candidate` itself, by id) whose
/// rectangle strictly overlaps `candidate`'s rectangle.
pub fn collisions<'a>(layout: &'a [GridItem], candidate: &GridItem) -> Vec<&'a GridItem> {
    let rect = candidate.rect();
    layout
        .iter()
        .filter(|other| other.id != candidate.id && other.rect().overlaps(&rect))
        .collect()
}

/// First colliding item in layout order, if any.
pub fn first_collision<'a>(layout: &'a [GridItem], candidate: &GridItem) -> Option<&'a GridItem> {
    let rect = candidate.rect();
    layout
        .iter()
        .find(|other| other.id != candidate.id && other.rect().overlaps(&rect))
}

/// Clamp every item into legal geometry: `w` in `[1, cols]`, `h >= 1`,
/// `x` in `[0, cols - w]`, `y >= 0` and within the row ceiling.
///
/// Layouts can arrive from loosely validated external sources; invalid
/// geometry is normalized rather than rejected.
pub fn normalize(layout: &mut [GridItem], bounds: GridBounds) {
    for item in layout.iter_mut() {
        item.w = item.w.clamp(1, bounds.cols);
        item.h = item.h.max(1);
        item.x = item.x.clamp(0, bounds.cols - item.w);
        item.y = item.y.max(0);
        if let Some(max_rows) = bounds.max_rows {
            item.y = item.y.min((max_rows - item.h).max(0));
        }
    }
}

/// Reject layouts with duplicate ids.
///
/// Duplicate ids are a caller error; they are detected here rather than
/// silently producing undefined packing behavior.
pub fn validate(layout: &[GridItem]) -> Result<(), LayoutError> {
    let mut seen = FxHashSet::default();
    for item in layout {
        if !seen.insert(item.id.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: item.id.clone(),
            });
        }
    }
    Ok(())
}

/// Structural equality: same id set with identical `x, y, w, h, static`.
///
/// Used by orchestrators to decide whether a resolved layout actually
/// changed before notifying listeners. Ignores order and resize bounds.
pub fn layouts_equal(a: &[GridItem], b: &[GridItem]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let index: FxHashMap<&str, (i32, i32, i32, i32, bool)> = a
        .iter()
        .map(|item| {
            (
                item.id.as_str(),
                (item.x, item.y, item.w, item.h, item.is_static),
            )
        })
        .collect();
    b.iter().all(|item| {
        index.get(item.id.as_str())
            == Some(&(item.x, item.y, item.w, item.h, item.is_static))
    })
}

/// Processing order for one compaction sweep: ascending `(y, x)` for
/// vertical packing, `(x, y)` for horizontal. The sort is stable so ties
/// keep their input order and successive packs do not jitter.
fn sweep_order(layout: &[GridItem], axis: CompactAxis) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    match axis {
        CompactAxis::Horizontal => order.sort_by_key(|&i| (layout[i].x, layout[i].y)),
        _ => order.sort_by_key(|&i| (layout[i].y, layout[i].x)),
    }
    order
}

/// Pack movable items toward one edge of the grid, eliminating gaps.
///
/// Items are processed in sweep order; each walks toward the packed edge
/// one cell at a time until blocked by an already-placed item or a static
/// item, then is pushed past any obstacle it still overlaps (this is how a
/// cascade of displacements settles). Static items never move but are
/// obstacles from the start. Input order is preserved in the output.
///
/// Compaction is idempotent: packing an already-packed layout is a no-op.
pub fn compact(layout: &[GridItem], axis: CompactAxis, bounds: GridBounds) -> Vec<GridItem> {
    if axis == CompactAxis::None {
        return layout.to_vec();
    }
    let mut out = layout.to_vec();
    let mut placed: Vec<GridItem> = layout
        .iter()
        .filter(|item| item.is_static)
        .cloned()
        .collect();
    for idx in sweep_order(layout, axis) {
        if out[idx].is_static {
            continue;
        }
        let mut item = out[idx].clone();
        compact_item(&placed, &mut item, axis, bounds);
        placed.push(item.clone());
        out[idx] = item;
    }
    out
}

/// Settle one item against the set of already-placed obstacles.
fn compact_item(placed: &[GridItem], item: &mut GridItem, axis: CompactAxis, bounds: GridBounds) {
    match axis {
        CompactAxis::Horizontal => {
            while item.x > 0 && first_collision(placed, item).is_none() {
                item.x -= 1;
            }
        }
        _ => {
            // Nothing can sit below the current stack, so start there.
            item.y = item.y.min(bottom(placed));
            while item.y > 0 && first_collision(placed, item).is_none() {
                item.y -= 1;
            }
        }
    }

    // Push past whatever the walk stopped on (or whatever the item already
    // overlapped when the sweep reached it). Each push strictly advances
    // the item along the axis, so this terminates; the cap guards
    // pathological inputs such as overlapping static items. Horizontal
    // packing may wrap through several rows, so the cap is quadratic.
    let mut guard = 4 * placed.len() * placed.len() + 64;
    while let Some(hit) = first_collision(placed, item) {
        if guard == 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = %item.id, "compaction displacement cap reached");
            break;
        }
        guard -= 1;
        match axis {
            CompactAxis::Horizontal => {
                item.x = hit.rect().right();
                if item.x + item.w > bounds.cols {
                    // Out of columns: wrap to the next row and re-walk left.
                    item.x = (bounds.cols - item.w).max(0);
                    item.y += 1;
                    while item.x > 0 && first_collision(placed, item).is_none() {
                        item.x -= 1;
                    }
                }
            }
            _ => {
                item.y = hit.rect().bottom();
                if let Some(max_rows) = bounds.max_rows
                    && item.y + item.h > max_rows
                {
                    // The ceiling wins; stay at the last legal row.
                    item.y = (max_rows - item.h).max(0);
                    break;
                }
            }
        }
    }
    item.x = item.x.max(0);
    item.y = item.y.max(0);
}
