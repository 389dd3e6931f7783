#![forbid(unsafe_code)]

//! Free-slot search for new and displaced items.
//!
//! Two search modes:
//!
//! - [`find_available_position`]: first-fit row-major scan. Cheap and
//!   deterministic; used by the engine when inserting items whose requested
//!   position is occupied.
//! - [`find_optimal_position`]: scores every free candidate in a bounded
//!   window and returns the best one. Scoring prefers high, left-leaning
//!   slots that touch existing items, so new widgets cluster instead of
//!   scattering. The weights are heuristics, not contracts; they may be
//!   retuned without breaking layout correctness.
//!
//! Both searches treat static and non-static items identically: any
//! occupied cell is occupied.

use gridflow_core::{ItemId, Layout};

/// How many rows past `start_y` the first-fit scan examines before giving
/// up and appending below the layout.
const SCAN_WINDOW_ROWS: i32 = 100;

/// How many rows past the current bounding height the scoring scan
/// considers.
const SCORE_WINDOW_ROWS: i32 = 5;

/// Base score for any free candidate.
const SCORE_BASE: i64 = 1000;
/// Penalty per row away from the top.
const SCORE_PER_ROW: i64 = 10;
/// Penalty per column away from the left edge.
const SCORE_PER_COL: i64 = 2;
/// Bonus for touching the left grid edge.
const SCORE_LEFT_EDGE: i64 = 5;
/// Bonus for touching the right grid edge.
const SCORE_RIGHT_EDGE: i64 = 3;
/// Bonus per vertically adjacent existing item.
const SCORE_VERTICAL_NEIGHBOR: i64 = 20;
/// Bonus per horizontally adjacent existing item.
const SCORE_HORIZONTAL_NEIGHBOR: i64 = 15;
/// Sentinel score for a free caller-preferred position; dominates any
/// computed score so the preference always wins unless occupied.
const SCORE_PREFERRED: i64 = i64::MAX;

/// A grid cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    /// Create a cell position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A scored candidate position from [`find_optimal_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredPos {
    pub pos: CellPos,
    pub score: i64,
}

/// Whether a `w x h` rectangle can sit at `(x, y)` without leaving the grid
/// or colliding with any item other than `exclude`.
#[must_use]
pub fn is_position_available(
    layout: &Layout,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    cols: i32,
    exclude: Option<&ItemId>,
) -> bool {
    if x < 0 || y < 0 || w <= 0 || h <= 0 || x + w > cols {
        return false;
    }
    !layout.items().any(|item| {
        exclude != Some(&item.id)
            && x + w > item.x
            && item.right() > x
            && y + h > item.y
            && item.bottom() > y
    })
}

/// First free `(x, y)` for a `w x h` rectangle, scanning rows from
/// `start_y` downward and columns left to right within each row.
///
/// If nothing fits within [`SCAN_WINDOW_ROWS`] rows past `start_y`, or the
/// item is wider than the grid, the item is appended below everything at
/// `x = 0`.
#[must_use]
pub fn find_available_position(
    layout: &Layout,
    w: i32,
    h: i32,
    cols: i32,
    start_y: i32,
) -> CellPos {
    let start_y = start_y.max(0);
    if w <= cols {
        for y in start_y..start_y + SCAN_WINDOW_ROWS {
            for x in 0..=cols - w {
                if is_position_available(layout, x, y, w, h, cols, None) {
                    return CellPos::new(x, y);
                }
            }
        }
    }
    CellPos::new(0, layout.bounding_height())
}

/// Best-scoring free position within the current bounding height plus a
/// small overflow window.
///
/// A free `preferred` position short-circuits the scan with a dominating
/// score. Ties between computed candidates are broken by first-found
/// (row-major) order. Returns the append-below fallback position with a
/// zero score when no candidate in the window is free.
#[must_use]
pub fn find_optimal_position(
    layout: &Layout,
    w: i32,
    h: i32,
    cols: i32,
    preferred: Option<CellPos>,
) -> ScoredPos {
    if let Some(pos) = preferred
        && is_position_available(layout, pos.x, pos.y, w, h, cols, None)
    {
        return ScoredPos {
            pos,
            score: SCORE_PREFERRED,
        };
    }

    let mut best: Option<ScoredPos> = None;
    if w <= cols {
        let max_y = layout.bounding_height() + SCORE_WINDOW_ROWS;
        for y in 0..max_y {
            for x in 0..=cols - w {
                if !is_position_available(layout, x, y, w, h, cols, None) {
                    continue;
                }
                let score = score_candidate(layout, x, y, w, h, cols);
                if best.is_none_or(|b| score > b.score) {
                    best = Some(ScoredPos {
                        pos: CellPos::new(x, y),
                        score,
                    });
                }
            }
        }
    }
    best.unwrap_or(ScoredPos {
        pos: CellPos::new(0, layout.bounding_height()),
        score: 0,
    })
}

fn score_candidate(layout: &Layout, x: i32, y: i32, w: i32, h: i32, cols: i32) -> i64 {
    let mut score = SCORE_BASE - SCORE_PER_ROW * i64::from(y) - SCORE_PER_COL * i64::from(x);
    if x == 0 {
        score += SCORE_LEFT_EDGE;
    }
    if x + w == cols {
        score += SCORE_RIGHT_EDGE;
    }
    for item in layout.items() {
        let x_ranges_touch_or_overlap = x < item.right() && item.x < x + w;
        let y_ranges_touch_or_overlap = y < item.bottom() && item.y < y + h;
        // Vertically adjacent: stacked directly above or below with some
        // column in common.
        if x_ranges_touch_or_overlap && (item.bottom() == y || y + h == item.y) {
            score += SCORE_VERTICAL_NEIGHBOR;
        }
        // Horizontally adjacent: side by side with some row in common.
        if y_ranges_touch_or_overlap && (item.right() == x || x + w == item.x) {
            score += SCORE_HORIZONTAL_NEIGHBOR;
        }
    }
    score
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gridflow_core::GridItem;

    fn item(id: &str, x: i32, y: i32, w: i32, h: i32) -> GridItem {
        GridItem::new(id, x, y, w, h)
    }

    #[test]
    fn availability_checks_bounds_and_collisions() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        assert!(is_position_available(&layout, 2, 0, 2, 2, 4, None));
        assert!(!is_position_available(&layout, 1, 0, 2, 2, 4, None));
        assert!(!is_position_available(&layout, 3, 0, 2, 2, 4, None)); // x + w > cols
        assert!(!is_position_available(&layout, -1, 0, 2, 2, 4, None));
        assert!(!is_position_available(&layout, 0, -1, 2, 2, 4, None));
    }

    #[test]
    fn availability_exclude_skips_self() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let a = ItemId::new("a");
        assert!(is_position_available(&layout, 0, 0, 2, 2, 4, Some(&a)));
        assert!(is_position_available(&layout, 1, 0, 2, 2, 4, Some(&a)));
    }

    #[test]
    fn first_fit_scans_row_major() {
        // Row 0 full, row 1 has a hole at x = 2.
        let layout = Layout::from_items([
            item("a", 0, 0, 4, 1),
            item("b", 0, 1, 2, 1),
        ]);
        assert_eq!(find_available_position(&layout, 2, 1, 4, 0), CellPos::new(2, 1));
    }

    #[test]
    fn first_fit_respects_start_y() {
        let layout = Layout::new();
        assert_eq!(find_available_position(&layout, 2, 1, 4, 3), CellPos::new(0, 3));
    }

    #[test]
    fn first_fit_empty_layout_places_at_origin() {
        assert_eq!(
            find_available_position(&Layout::new(), 2, 2, 12, 0),
            CellPos::new(0, 0)
        );
    }

    #[test]
    fn oversized_item_appends_below() {
        let layout = Layout::from_items([item("a", 0, 0, 4, 3)]);
        // w > cols can never fit; fallback is x = 0 below everything.
        assert_eq!(
            find_available_position(&layout, 6, 1, 4, 0),
            CellPos::new(0, 3)
        );
    }

    #[test]
    fn optimal_prefers_top_left() {
        let best = find_optimal_position(&Layout::new(), 2, 2, 12, None);
        assert_eq!(best.pos, CellPos::new(0, 0));
    }

    #[test]
    fn optimal_preferred_position_wins_when_free() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let best = find_optimal_position(&layout, 2, 2, 12, Some(CellPos::new(6, 4)));
        assert_eq!(best.pos, CellPos::new(6, 4));
        assert_eq!(best.score, SCORE_PREFERRED);
    }

    #[test]
    fn optimal_occupied_preferred_position_falls_back_to_scan() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2)]);
        let best = find_optimal_position(&layout, 2, 2, 12, Some(CellPos::new(1, 1)));
        assert_ne!(best.pos, CellPos::new(1, 1));
        assert!(best.score < SCORE_PREFERRED);
    }

    #[test]
    fn horizontal_neighbor_bonus_applies() {
        // Candidate (8, 0) ends exactly where the item at x = 10 begins.
        let layout = Layout::from_items([item("a", 10, 0, 2, 2)]);
        let beside = score_candidate(&layout, 8, 0, 2, 2, 12);
        assert_eq!(
            beside,
            SCORE_BASE - SCORE_PER_COL * 8 + SCORE_HORIZONTAL_NEIGHBOR
        );
    }

    #[test]
    fn vertical_neighbor_bonus_counts_per_item() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2), item("b", 2, 0, 2, 2)]);
        // Candidate spanning below both items touches each vertically.
        let score = score_candidate(&layout, 0, 2, 4, 1, 12);
        let expected = SCORE_BASE - SCORE_PER_ROW * 2 + SCORE_LEFT_EDGE
            + 2 * SCORE_VERTICAL_NEIGHBOR;
        assert_eq!(score, expected);
    }

    #[test]
    fn right_edge_bonus_applies() {
        let score = score_candidate(&Layout::new(), 10, 0, 2, 2, 12);
        assert_eq!(score, SCORE_BASE - SCORE_PER_COL * 10 + SCORE_RIGHT_EDGE);
    }
}
