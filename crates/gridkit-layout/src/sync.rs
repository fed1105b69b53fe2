#![forbid(unsafe_code)]

//! Reconciling a stored layout against the set of items that actually
//! exist.
//!
//! The caller owns the item set; the layout is derived state. Items that
//! disappeared are dropped, items with no saved position are appended at
//! the bottom, and survivors keep their stored geometry and flags. The
//! result is normalized and compacted so it is immediately renderable.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::item::{GridItem, LayoutError};
use crate::{CompactAxis, GridBounds};

/// An item the caller wants laid out, with its preferred initial size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedItem {
    /// Stable identifier, matched against [`GridItem::id`].
    pub id: String,
    /// Initial width in cells, used only when the layout has no entry.
    pub w: i32,
    /// Initial height in cells, used only when the layout has no entry.
    pub h: i32,
}

impl ManagedItem {
    /// A managed item with the default 1x1 initial size.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), w: 1, h: 1 }
    }

    /// Set the initial size used when no stored entry exists.
    #[must_use]
    pub fn with_size(mut self, w: i32, h: i32) -> Self {
        self.w = w.max(1);
        self.h = h.max(1);
        self
    }
}

/// Reconcile `layout` against `managed`, in `managed` order.
///
/// Entries in `layout` whose id is not managed are discarded. Managed ids
/// without a stored entry are placed at `x = 0` below everything already
/// present. Duplicate ids on either side are an error.
pub fn synchronize(
    layout: &[GridItem],
    managed: &[ManagedItem],
    axis: CompactAxis,
    bounds: GridBounds,
) -> Result<Vec<GridItem>, LayoutError> {
    crate::validate(layout)?;
    let mut seen = FxHashSet::default();
    for item in managed {
        if !seen.insert(item.id.as_str()) {
            return Err(LayoutError::DuplicateId { id: item.id.clone() });
        }
    }

    let stored: FxHashMap<&str, &GridItem> =
        layout.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut next = Vec::with_capacity(managed.len());
    for entry in managed {
        match stored.get(entry.id.as_str()) {
            Some(item) => next.push((*item).clone()),
            None => {
                let y = crate::bottom(&next);
                next.push(GridItem::new(entry.id.clone(), 0, y, entry.w, entry.h));
            }
        }
    }

    crate::normalize(&mut next, bounds);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        stored = layout.len(),
        managed = managed.len(),
        "synchronized layout with managed items"
    );

    Ok(crate::compact(&next, axis, bounds))
}
