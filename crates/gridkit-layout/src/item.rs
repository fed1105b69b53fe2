#![forbid(unsafe_code)]

//! Layout item data model.

use std::fmt;

use gridkit_core::geometry::CellRect;
use serde::{Deserialize, Serialize};

/// One grid-resident rectangle in a layout.
///
/// Positions are in grid cells, 0-indexed from the top-left. The serialized
/// shape matches the conventional dashboard-layout JSON: the id field is
/// `i`, the pin flag is `static`, and optional bounds are camelCase
/// (`minW`, `maxH`, ...).
///
/// A "static" item is never relocated by compaction or collision-driven
/// displacement, but other items still treat it as an obstacle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    /// Unique id within a layout.
    #[serde(rename = "i")]
    pub id: String,
    /// Column of the top-left corner.
    pub x: i32,
    /// Row of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
    /// Lower bound on interactive width resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i32>,
    /// Upper bound on interactive width resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i32>,
    /// Lower bound on interactive height resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i32>,
    /// Upper bound on interactive height resize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i32>,
    /// Pinned in place; excluded from automatic repositioning.
    #[serde(rename = "static", default, skip_serializing_if = "is_false")]
    pub is_static: bool,
    /// Per-item override of the ambient drag policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    /// Per-item override of the ambient resize policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
}

fn is_false(val: &bool) -> bool {
    !*val
}

impl GridItem {
    /// Create an item at the given cell position and size.
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            max_w: None,
            min_h: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
        }
    }

    /// Pin or unpin the item.
    #[must_use]
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Set lower resize bounds.
    #[must_use]
    pub fn with_min_size(mut self, min_w: i32, min_h: i32) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    /// Set upper resize bounds.
    #[must_use]
    pub fn with_max_size(mut self, max_w: i32, max_h: i32) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Override the ambient drag policy for this item.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    /// Override the ambient resize policy for this item.
    #[must_use]
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = Some(resizable);
        self
    }

    /// The item's rectangle in cell coordinates.
    #[inline]
    pub const fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.w, self.h)
    }

    /// Resolve whether the item may be dragged.
    ///
    /// Three-way resolution: an item-level override wins, otherwise the
    /// ambient policy applies, and a static item defaults to immovable.
    #[must_use]
    pub fn can_drag(&self, ambient: bool) -> bool {
        self.is_draggable.unwrap_or(!self.is_static && ambient)
    }

    /// Resolve whether the item may be resized. Same resolution order as
    /// [`can_drag`](Self::can_drag).
    #[must_use]
    pub fn can_resize(&self, ambient: bool) -> bool {
        self.is_resizable.unwrap_or(!self.is_static && ambient)
    }
}

/// Transient rectangle marking the in-progress target of a drag or resize.
///
/// Returned by the move resolver for display only; never part of the
/// persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// Id of the item being dragged or resized.
    #[serde(rename = "i")]
    pub id: String,
    /// Target column.
    pub x: i32,
    /// Target row.
    pub y: i32,
    /// Target width in columns.
    pub w: i32,
    /// Target height in rows.
    pub h: i32,
}

impl Placeholder {
    /// Snapshot an item's current rectangle as a placeholder.
    #[must_use]
    pub fn for_item(item: &GridItem) -> Self {
        Self {
            id: item.id.clone(),
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
        }
    }
}

/// Invariant violations detected at the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two layout entries (or two managed ids) share the same id.
    DuplicateId {
        /// The offending id.
        id: String,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "duplicate layout item id {id:?}"),
        }
    }
}

impl std::error::Error for LayoutError {}
