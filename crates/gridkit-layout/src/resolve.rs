#![forbid(unsafe_code)]

//! Interactive move/resize resolution.
//!
//! The resolver turns one discrete drag or resize tick into a new layout:
//! clamp the target into the grid, apply it (or reject it when collision
//! prevention is on), then re-pack so displaced items cascade along the
//! compaction axis. Every function here is pure; the caller holds the
//! current layout and replaces it with the returned one.
//!
//! [`DeferredPass`] models the optional two-phase feedback: an immediate
//! optimistic placement followed, after a fixed delay, by one authoritative
//! re-resolution of the same request. It is a single-shot, tick-driven
//! scheduler owned by the orchestrating layer; scheduling a new pass
//! cancels any still-pending one.

use std::time::Duration;

use crate::item::{GridItem, Placeholder};
use crate::{CompactAxis, GridBounds, collisions, compact, first_collision};

/// A request to move one item toward a target cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Id of the item to move.
    pub item_id: String,
    /// Target column.
    pub x: i32,
    /// Target row.
    pub y: i32,
    /// Whether this placement comes directly from the user (as opposed to
    /// a packer-driven reposition). Forwarded untouched to the outcome.
    pub user_action: bool,
}

impl MoveRequest {
    /// A user-driven move request.
    pub fn new(item_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            item_id: item_id.into(),
            x,
            y,
            user_action: true,
        }
    }

    /// Mark the request as packer-driven rather than user-driven.
    #[must_use]
    pub fn with_user_action(mut self, user_action: bool) -> Self {
        self.user_action = user_action;
        self
    }
}

/// A request to resize one item toward a target size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeRequest {
    /// Id of the item to resize.
    pub item_id: String,
    /// Target width in columns.
    pub w: i32,
    /// Target height in rows.
    pub h: i32,
}

impl ResizeRequest {
    /// Create a resize request.
    pub fn new(item_id: impl Into<String>, w: i32, h: i32) -> Self {
        Self {
            item_id: item_id.into(),
            w,
            h,
        }
    }
}

/// Ambient policy for one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Compaction axis applied after the mutation.
    pub axis: CompactAxis,
    /// Grid extent.
    pub bounds: GridBounds,
    /// Reject (rather than cascade) any mutation that would collide.
    pub prevent_collision: bool,
}

impl ResolveOptions {
    /// Options with collision cascading enabled (the default behavior).
    #[must_use]
    pub fn new(axis: CompactAxis, bounds: GridBounds) -> Self {
        Self {
            axis,
            bounds,
            prevent_collision: false,
        }
    }

    /// Toggle hard rejection of colliding mutations.
    #[must_use]
    pub fn with_prevent_collision(mut self, prevent: bool) -> Self {
        self.prevent_collision = prevent;
        self
    }
}

/// Why a move or resize was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The item is static and carries no explicit draggable/resizable
    /// override.
    StaticItem,
    /// Collision prevention is on and the target rectangle collides.
    Collision,
}

/// Outcome classification of one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The mutation was applied and the layout re-packed.
    Applied,
    /// The mutation was disallowed; the layout is unchanged.
    Rejected(RejectReason),
    /// No item with the requested id exists; the layout is unchanged.
    ///
    /// Not an error: drag events can race with item removal.
    ItemNotFound,
}

impl MoveStatus {
    /// Whether the mutation took effect.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of [`resolve_move`] or [`resolve_resize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The new layout (identical to the input when nothing was applied).
    pub layout: Vec<GridItem>,
    /// Where the interacting item settled, for transient display. `None`
    /// when the requested item does not exist.
    pub placeholder: Option<Placeholder>,
    /// What happened.
    pub status: MoveStatus,
    /// Echo of the request's user-action flag, for notification hooks.
    pub user_action: bool,
}

impl Resolution {
    fn unchanged(
        layout: &[GridItem],
        placeholder: Option<Placeholder>,
        status: MoveStatus,
        user_action: bool,
    ) -> Self {
        Self {
            layout: layout.to_vec(),
            placeholder,
            status,
            user_action,
        }
    }
}

/// Resolve one drag tick: clamp the target cell, place the item, and
/// re-pack so any overlapped items cascade along the compaction axis.
///
/// With `prevent_collision` set, a colliding target abandons the whole
/// move instead; the item keeps its prior position.
pub fn resolve_move(
    layout: &[GridItem],
    request: &MoveRequest,
    options: &ResolveOptions,
) -> Resolution {
    let Some(pos) = layout.iter().position(|item| item.id == request.item_id) else {
        return Resolution::unchanged(layout, None, MoveStatus::ItemNotFound, request.user_action);
    };
    let item = &layout[pos];

    if item.is_static && item.is_draggable != Some(true) {
        return Resolution::unchanged(
            layout,
            Some(Placeholder::for_item(item)),
            MoveStatus::Rejected(RejectReason::StaticItem),
            request.user_action,
        );
    }

    let bounds = options.bounds;
    let x = request.x.clamp(0, (bounds.cols - item.w).max(0));
    let mut y = request.y.max(0);
    if let Some(max_rows) = bounds.max_rows {
        y = y.min((max_rows - item.h).max(0));
    }

    let mut moved = item.clone();
    moved.x = x;
    moved.y = y;

    if options.prevent_collision && first_collision(layout, &moved).is_some() {
        #[cfg(feature = "tracing")]
        tracing::debug!(id = %request.item_id, x, y, "move rejected: target collides");
        return Resolution::unchanged(
            layout,
            Some(Placeholder::for_item(item)),
            MoveStatus::Rejected(RejectReason::Collision),
            request.user_action,
        );
    }

    let mut next = layout.to_vec();
    next[pos] = moved;
    let packed = compact(&next, options.axis, bounds);
    let placeholder = packed
        .iter()
        .find(|it| it.id == request.item_id)
        .map(Placeholder::for_item);
    #[cfg(feature = "tracing")]
    tracing::trace!(id = %request.item_id, x, y, user = request.user_action, "move applied");
    Resolution {
        layout: packed,
        placeholder,
        status: MoveStatus::Applied,
        user_action: request.user_action,
    }
}

/// Resolve one resize tick.
///
/// The target size is clamped to the item's min/max bounds and to the grid
/// extent. With `prevent_collision` set and a colliding target, the size is
/// clamped on each axis to the nearest colliding neighbor's near edge; if
/// even the clamped rectangle collides (or violates the item's minimum
/// size), the resize is rejected outright.
pub fn resolve_resize(
    layout: &[GridItem],
    request: &ResizeRequest,
    options: &ResolveOptions,
) -> Resolution {
    let Some(pos) = layout.iter().position(|item| item.id == request.item_id) else {
        return Resolution::unchanged(layout, None, MoveStatus::ItemNotFound, true);
    };
    let item = &layout[pos];

    if item.is_static && item.is_resizable != Some(true) {
        return Resolution::unchanged(
            layout,
            Some(Placeholder::for_item(item)),
            MoveStatus::Rejected(RejectReason::StaticItem),
            true,
        );
    }

    let bounds = options.bounds;
    let min_w = item.min_w.unwrap_or(1).max(1);
    let max_w = item.max_w.unwrap_or(i32::MAX);
    let min_h = item.min_h.unwrap_or(1).max(1);
    let max_h = item.max_h.unwrap_or(i32::MAX);

    let mut w = request.w.clamp(min_w, max_w);
    w = w.min((bounds.cols - item.x).max(1));
    let mut h = request.h.clamp(min_h, max_h).max(1);
    if let Some(max_rows) = bounds.max_rows {
        h = h.min((max_rows - item.y).max(1));
    }

    let mut resized = item.clone();
    resized.w = w;
    resized.h = h;

    if options.prevent_collision {
        let hits = collisions(layout, &resized);
        if !hits.is_empty() {
            // Clamp each axis to the nearest colliding neighbor's near edge.
            for hit in &hits {
                if hit.x > item.x {
                    resized.w = resized.w.min(hit.x - item.x);
                }
                if hit.y > item.y {
                    resized.h = resized.h.min(hit.y - item.y);
                }
            }
            if resized.w < min_w
                || resized.h < min_h
                || first_collision(layout, &resized).is_some()
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(id = %request.item_id, "resize rejected: no collision-free size");
                return Resolution::unchanged(
                    layout,
                    Some(Placeholder::for_item(item)),
                    MoveStatus::Rejected(RejectReason::Collision),
                    true,
                );
            }
        }
    }

    let mut next = layout.to_vec();
    next[pos] = resized;
    let packed = compact(&next, options.axis, bounds);
    let placeholder = packed
        .iter()
        .find(|it| it.id == request.item_id)
        .map(Placeholder::for_item);
    Resolution {
        layout: packed,
        placeholder,
        status: MoveStatus::Applied,
        user_action: true,
    }
}

/// Single-shot scheduler for the deferred corrective pass.
///
/// When a collision delay is configured, each interactive tick applies an
/// immediate optimistic resolution and schedules one corrective pass to
/// re-run the same request after the delay. Only the most recently
/// scheduled pass may fire; scheduling replaces any pending one, and the
/// caller cancels on interaction end.
///
/// The scheduler is tick-driven and owns no timer thread: the orchestrator
/// advances it with [`tick`](Self::tick) and re-resolves the returned
/// request through [`resolve_move`].
#[derive(Debug, Clone)]
pub struct DeferredPass {
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    remaining: Duration,
    request: MoveRequest,
}

impl DeferredPass {
    /// Create a scheduler with the given collision delay. A zero delay
    /// disables deferral entirely.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a corrective pass is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule a corrective pass for `request`, cancelling any pending
    /// one. Returns `false` (and schedules nothing) when the delay is zero.
    pub fn schedule(&mut self, request: MoveRequest) -> bool {
        if self.delay.is_zero() {
            self.pending = None;
            return false;
        }
        self.pending = Some(Pending {
            remaining: self.delay,
            request,
        });
        true
    }

    /// Drop any pending pass (interaction ended or was cancelled).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Advance time. Returns the stored request exactly once, when the
    /// delay has fully elapsed.
    pub fn tick(&mut self, delta: Duration) -> Option<MoveRequest> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(delta);
        if pending.remaining.is_zero() {
            self.pending.take().map(|p| p.request)
        } else {
            None
        }
    }
}
