#![forbid(unsafe_code)]

//! Vertical gap removal.
//!
//! The compactor repacks a layout top-down: items are taken in `(y, x)`
//! order and each is dropped to the smallest row where it fits against the
//! items already placed, keeping its column. The pass is greedy,
//! deterministic, and idempotent — compacting an already-compacted layout
//! changes nothing.
//!
//! Static items never move. They are seeded into the occupancy at their
//! original positions before the greedy pass, so non-static items flow
//! around them.

use gridflow_core::{GridItem, Layout};

use crate::position::is_position_available;

/// Remove vertical gaps by lifting items to the earliest non-colliding row.
///
/// No-op (identity clone) when `enabled` is false or the layout is empty.
/// `x` coordinates are never changed.
#[must_use]
pub fn compact(layout: &Layout, cols: i32, enabled: bool) -> Layout {
    if !enabled || layout.is_empty() {
        return layout.clone();
    }

    let mut placed = Layout::new();
    for item in layout.items().filter(|item| item.is_static) {
        placed.push(item.clone());
    }

    let mut movable: Vec<&GridItem> = layout.items().filter(|item| !item.is_static).collect();
    movable.sort_by_key(|item| (item.y, item.x));

    for item in movable {
        let mut lifted = item.clone();
        lifted.y = settle_row(&placed, &lifted, cols);
        placed.push(lifted);
    }
    placed
}

/// Smallest `y >= 0` where `item` fits at its own column against the items
/// placed so far.
///
/// The row at the placed set's bounding height is below every placed item
/// and therefore always collision-free; scanning up to it keeps the search
/// bounded even for inputs that arrive overlapping.
fn settle_row(placed: &Layout, item: &GridItem, cols: i32) -> i32 {
    let ceiling = placed.bounding_height();
    let mut y = 0;
    while y < ceiling {
        if is_position_available(placed, item.x, y, item.w, item.h, cols, None) {
            return y;
        }
        y += 1;
    }
    ceiling
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
