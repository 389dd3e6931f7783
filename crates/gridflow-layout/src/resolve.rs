#![forbid(unsafe_code)]

//! Transactional collision resolution for moves and resizes.
//!
//! One mutation runs through a fixed pipeline:
//!
//! ```text
//! Normalize -> Apply -> Propagate -> Compact (optional) -> Commit | Abort
//! ```
//!
//! - **Normalize** clones the snapshot and coerces malformed coordinates
//!   (negative placeholders from the interaction layer) to zero.
//! - **Apply** writes the requested geometry onto the target item, clamped
//!   into grid bounds. A request naming an absent item commits as a no-op.
//! - **Propagate** pushes displaced items downward breadth-first. Colliding
//!   with a static item aborts the whole mutation; so does exceeding the
//!   `n²` dequeue cap that guards against cyclic pushes.
//! - **Abort** hands back the caller's snapshot untouched — callers never
//!   observe a partially resolved layout.
//!
//! # Invariants
//!
//! 1. A committed layout has no overlapping non-static pairs.
//! 2. An aborted resolution returns the input layout bit-for-bit.
//! 3. Static items are never displaced by propagation or compaction.
//! 4. Propagation performs at most `len²` dequeues.

use std::collections::VecDeque;

use gridflow_core::{AbortReason, GridConfig, ItemId, Layout};

use crate::compact::compact;

/// How a resolution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The mutation was applied; `iterations` counts propagation dequeues.
    Committed { iterations: u64 },
    /// The request named an item the layout does not contain; the input was
    /// returned unchanged.
    NoOp,
    /// The mutation was rejected wholesale; the input was returned unchanged.
    Aborted(AbortReason),
}

/// Result of [`move_item`] or [`resize_item`]: the next snapshot plus how it
/// was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub layout: Layout,
    pub outcome: ResolveOutcome,
}

impl Resolution {
    fn unchanged(layout: &Layout, outcome: ResolveOutcome) -> Self {
        Self {
            layout: layout.clone(),
            outcome,
        }
    }

    /// Whether the mutation was applied (committed, not aborted or no-op).
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self.outcome, ResolveOutcome::Committed { .. })
    }
}

/// Move an item to `(new_x, new_y)`, pushing displaced items downward.
///
/// The requested position is clamped into `[0, cols - w]` x `[0, ..)`, so a
/// drag past the right edge lands flush against it instead of failing
/// validation.
#[must_use]
pub fn move_item(
    layout: &Layout,
    id: &ItemId,
    new_x: i32,
    new_y: i32,
    cols: i32,
    config: &GridConfig,
) -> Resolution {
    let Some(target) = layout.get(id) else {
        return Resolution::unchanged(layout, ResolveOutcome::NoOp);
    };
    let x = new_x.clamp(0, (cols - target.w).max(0));
    let y = new_y.max(0);
    resolve(layout, id, cols, config, |item| {
        item.x = x;
        item.y = y;
    })
}

/// Resize an item to `w x h`, pushing displaced items downward.
///
/// The requested size is clamped against the item's own min/max constraints
/// and then into the grid's width; it never drops below one cell.
#[must_use]
pub fn resize_item(
    layout: &Layout,
    id: &ItemId,
    new_w: i32,
    new_h: i32,
    cols: i32,
    config: &GridConfig,
) -> Resolution {
    let Some(target) = layout.get(id) else {
        return Resolution::unchanged(layout, ResolveOutcome::NoOp);
    };
    let (w, h) = target.constraints.clamp(new_w.max(1), new_h.max(1));
    let room = (cols - target.x.clamp(0, (cols - 1).max(0))).max(1);
    let w = w.clamp(1, cols.max(1)).min(room);
    let h = h.max(1);
    resolve(layout, id, cols, config, |item| {
        item.w = w;
        item.h = h;
    })
}

/// Shared pipeline for moves and resizes. `mutate` is the Apply step.
fn resolve(
    layout: &Layout,
    id: &ItemId,
    cols: i32,
    config: &GridConfig,
    mutate: impl FnOnce(&mut gridflow_core::GridItem),
) -> Resolution {
    // Normalize: clone and coerce malformed interaction-layer coordinates.
    let mut working = layout.clone();
    for item in working.items_mut() {
        if item.x < 0 {
            item.x = 0;
        }
        if item.y < 0 {
            item.y = 0;
        }
    }

    // Apply.
    match working.get_mut(id) {
        Some(item) => mutate(item),
        None => return Resolution::unchanged(layout, ResolveOutcome::NoOp),
    }

    // Propagate.
    let iterations = match propagate(&mut working, id) {
        Ok(iterations) => iterations,
        Err(reason) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(item = %id, %reason, "resolution aborted");
            return Resolution::unchanged(layout, ResolveOutcome::Aborted(reason));
        }
    };

    // Compact.
    let resolved = compact(&working, cols, config.compact);

    #[cfg(feature = "tracing")]
    tracing::trace!(item = %id, iterations, "resolution committed");

    Resolution {
        layout: resolved,
        outcome: ResolveOutcome::Committed { iterations },
    }
}

/// Breadth-first push-down of every item displaced by the seed item.
///
/// Items already waiting in the queue are not enqueued twice, but an item
/// that gets pushed again after being processed re-enters the queue —
/// without that, a later push could leave an unresolved overlap behind.
/// Returns the dequeue count on success.
fn propagate(working: &mut Layout, seed: &ItemId) -> Result<u64, AbortReason> {
    let len = working.len() as u64;
    let limit = len.saturating_mul(len).max(1);

    let mut queue: VecDeque<ItemId> = VecDeque::new();
    queue.push_back(seed.clone());
    let mut iterations: u64 = 0;

    while let Some(current_id) = queue.pop_front() {
        if iterations >= limit {
            return Err(AbortReason::IterationLimit { limit });
        }
        iterations += 1;

        let Some(current) = working.get(&current_id).cloned() else {
            continue;
        };

        // Collect collisions first; pushing mutates the layout.
        let colliding: Vec<ItemId> = working
            .items()
            .filter(|other| other.id != current_id && current.overlaps(other))
            .map(|other| other.id.clone())
            .collect();

        for other_id in colliding {
            let Some(other) = working.get(&other_id) else {
                continue;
            };
            if other.is_static {
                return Err(AbortReason::StaticCollision {
                    moving: current_id.clone(),
                    blocked_by: other_id.clone(),
                });
            }
            let push_to_y = current.bottom();
            if other.y < push_to_y {
                if let Some(other) = working.get_mut(&other_id) {
                    other.y = push_to_y;
                }
                if !queue.contains(&other_id) {
                    queue.push_back(other_id);
                }
            }
        }
    }

    Ok(iterations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate_layout, validate_no_overlaps};
    use gridflow_core::GridItem;

    fn item(id: &str, x: i32, y: i32, w: i32, h: i32) -> GridItem {
        GridItem::new(id, x, y, w, h)
    }

    fn pos_of(layout: &Layout, id: &str) -> (i32, i32) {
        let item = layout.get(&ItemId::new(id)).expect("item present");
        (item.x, item.y)
    }

    fn no_compact() -> GridConfig {
        GridConfig::with_cols(4).without_compaction()
    }

    fn compacting() -> GridConfig {
        GridConfig::with_cols(4)
    }

    #[test]
    fn move_without_collision_commits() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let res = move_item(&layout, &"a".into(), 2, 0, 4, &no_compact());
        assert!(res.is_committed());
        assert_eq!(pos_of(&res.layout, "a"), (2, 0));
    }

    #[test]
    fn move_of_unknown_item_is_noop() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let res = move_item(&layout, &"ghost".into(), 2, 0, 4, &no_compact());
        assert_eq!(res.outcome, ResolveOutcome::NoOp);
        assert_eq!(res.layout, layout);
    }

    #[test]
    fn out_of_bounds_move_is_clamped() {
        // Scenario A: moving a 2-wide item to x = 3 on a 4-column grid
        // lands at x = 2, never x = 3.
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let res = move_item(&layout, &"a".into(), 3, 0, 4, &no_compact());
        assert!(res.is_committed());
        assert_eq!(pos_of(&res.layout, "a"), (2, 0));
        assert!(validate_layout(&res.layout, 4).is_ok());
    }

    #[test]
    fn negative_move_is_clamped_to_origin() {
        let layout = Layout::from_items([item("a", 2, 2, 2, 2)]);
        let res = move_item(&layout, &"a".into(), -3, -1, 4, &no_compact());
        assert_eq!(pos_of(&res.layout, "a"), (0, 0));
    }

    #[test]
    fn collision_pushes_item_down_and_compacts() {
        // Scenario B: a moves onto b's column span; b is pushed below a,
        // then compaction settles it at (2, 2).
        let layout = Layout::from_items([item("a", 0, 0, 2, 2), item("b", 2, 0, 2, 2)]);
        let res = move_item(&layout, &"a".into(), 1, 0, 4, &compacting());
        assert!(res.is_committed());
        assert_eq!(pos_of(&res.layout, "a"), (1, 0));
        assert_eq!(pos_of(&res.layout, "b"), (2, 2));
        assert!(validate_no_overlaps(&res.layout).is_ok());
    }

    #[test]
    fn chain_reaction_pushes_transitively() {
        let layout = Layout::from_items([
            item("a", 0, 0, 2, 2),
            item("b", 0, 2, 2, 2),
            item("c", 0, 4, 2, 2),
        ]);
        // Grow a over b; b is pushed onto c, which is pushed further.
        let res = resize_item(&layout, &"a".into(), 2, 4, 4, &no_compact());
        assert!(res.is_committed());
        assert_eq!(pos_of(&res.layout, "b"), (0, 4));
        assert_eq!(pos_of(&res.layout, "c"), (0, 6));
        assert!(validate_no_overlaps(&res.layout).is_ok());
    }

    #[test]
    fn static_collision_aborts_with_original_layout() {
        let layout = Layout::from_items([
            item("a", 0, 0, 2, 2),
            item("pin", 0, 3, 2, 2).pinned(),
        ]);
        let before_hash = layout.state_hash();
        let res = move_item(&layout, &"a".into(), 0, 2, 4, &compacting());
        let ResolveOutcome::Aborted(AbortReason::StaticCollision { moving, blocked_by }) =
            &res.outcome
        else {
            panic!("expected static-collision abort, got {:?}", res.outcome);
        };
        assert_eq!(moving.as_str(), "a");
        assert_eq!(blocked_by.as_str(), "pin");
        assert_eq!(res.layout, layout);
        assert_eq!(res.layout.state_hash(), before_hash);
    }

    #[test]
    fn transitive_static_collision_also_aborts() {
        let layout = Layout::from_items([
            item("a", 0, 0, 2, 2),
            item("b", 0, 2, 2, 2),
            item("pin", 0, 5, 2, 2).pinned(),
        ]);
        // a grows onto b; b would be pushed into the static item.
        let res = resize_item(&layout, &"a".into(), 2, 4, 4, &no_compact());
        assert!(matches!(
            res.outcome,
            ResolveOutcome::Aborted(AbortReason::StaticCollision { .. })
        ));
        assert_eq!(res.layout, layout);
    }

    #[test]
    fn normalize_coerces_negative_coordinates() {
        let mut malformed = Layout::from_items([item("a", 0, 0, 1, 1)]);
        malformed.push(GridItem::new("b", -2, -7, 1, 1));
        let res = move_item(&malformed, &"a".into(), 2, 0, 4, &no_compact());
        assert!(res.is_committed());
        assert_eq!(pos_of(&res.layout, "b"), (0, 0));
    }

    #[test]
    fn resize_respects_size_constraints() {
        let constrained = item("a", 0, 0, 2, 2).with_constraints(gridflow_core::SizeConstraints {
            max_w: Some(3),
            max_h: Some(3),
            ..gridflow_core::SizeConstraints::NONE
        });
        let layout = Layout::from_items([constrained]);
        let res = resize_item(&layout, &"a".into(), 10, 10, 12, &no_compact());
        let a = res.layout.get(&"a".into()).unwrap();
        assert_eq!((a.w, a.h), (3, 3));
    }

    #[test]
    fn resize_clamps_to_grid_width() {
        let layout = Layout::from_items([item("a", 2, 0, 1, 1)]);
        let res = resize_item(&layout, &"a".into(), 10, 1, 4, &no_compact());
        let a = res.layout.get(&"a".into()).unwrap();
        assert_eq!(a.w, 2, "width stops at the right edge");
        assert!(validate_layout(&res.layout, 4).is_ok());
    }

    #[test]
    fn committed_layouts_never_overlap() {
        let layout = Layout::from_items([
            item("a", 0, 0, 2, 2),
            item("b", 2, 0, 2, 2),
            item("c", 0, 2, 4, 1),
            item("d", 0, 3, 1, 3),
        ]);
        for (x, y) in [(0, 0), (1, 0), (2, 1), (0, 3), (3, 5)] {
            let res = move_item(&layout, &"a".into(), x, y, 4, &compacting());
            if res.is_committed() {
                assert!(
                    validate_no_overlaps(&res.layout).is_ok(),
                    "overlap after move to ({x}, {y})"
                );
            } else {
                assert_eq!(res.layout, layout);
            }
        }
    }

    #[test]
    fn iteration_cap_scales_with_item_count() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2), item("b", 2, 0, 2, 2)]);
        let res = move_item(&layout, &"a".into(), 1, 0, 4, &no_compact());
        let ResolveOutcome::Committed { iterations } = res.outcome else {
            panic!("expected commit");
        };
        assert!(iterations <= 4, "2 items allow at most 4 dequeues");
    }
}
