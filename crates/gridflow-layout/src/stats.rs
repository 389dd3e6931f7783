#![forbid(unsafe_code)]

//! Read-only layout diagnostics.
//!
//! Four percentages describing how a layout uses its grid, consumed by the
//! dashboard's diagnostics panel and telemetry. None of them feed back into
//! layout decisions.
//!
//! Occupancy is rasterized into a cell set so overlapping rectangles (legal
//! between static items) never double-count a cell.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use gridflow_core::Layout;

/// Utilization, fragmentation, compactness, and balance of a layout.
///
/// All metrics are percentages. Utilization, fragmentation, and balance
/// stay within `[0, 100]`; compactness sums raw item area and so exceeds
/// 100 when rectangles overlap. An empty layout reports zero across the
/// board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    /// Share of cells occupied within `cols x bounding_height`.
    pub utilization: f64,
    /// Share of cells left free within the bounding box.
    pub fragmentation: f64,
    /// Summed item area over the bounding box area. Exceeds utilization,
    /// and can exceed 100, when rectangles overlap.
    pub compactness: f64,
    /// How close the area-weighted centroid sits to the grid's center:
    /// 100 is perfectly centered, 0 is fully displaced on both axes.
    pub balance: f64,
    /// Rows spanned by the layout, `max(y + h)`.
    pub bounding_height: i32,
    /// Distinct occupied cells.
    pub occupied_cells: u32,
}

/// Compute diagnostics for a layout on a `cols`-wide grid.
#[must_use]
pub fn layout_stats(layout: &Layout, cols: i32) -> LayoutStats {
    let bounding_height = layout.bounding_height();
    if layout.is_empty() || cols <= 0 || bounding_height == 0 {
        return LayoutStats::default();
    }

    let mut occupied: FxHashSet<(i32, i32)> = FxHashSet::default();
    for item in layout.items() {
        for y in item.y..item.bottom() {
            for x in item.x..item.right() {
                occupied.insert((x, y));
            }
        }
    }

    let total_cells = f64::from(cols) * f64::from(bounding_height);
    let occupied_cells = occupied.len() as u32;
    let utilization = f64::from(occupied_cells) / total_cells * 100.0;
    let fragmentation = 100.0 - utilization;
    let compactness = layout.total_item_area() as f64 / total_cells * 100.0;

    LayoutStats {
        utilization,
        fragmentation,
        compactness,
        balance: balance(layout, cols, bounding_height),
        bounding_height,
        occupied_cells,
    }
}

/// Area-weighted centroid deviation from the grid center, averaged over
/// both axes and inverted into a percentage.
fn balance(layout: &Layout, cols: i32, bounding_height: i32) -> f64 {
    let total_area: f64 = layout.total_item_area() as f64;
    if total_area <= 0.0 {
        return 0.0;
    }

    let mut weighted_x = 0.0;
    let mut weighted_y = 0.0;
    for item in layout.items() {
        let area = item.area() as f64;
        weighted_x += area * (f64::from(item.x) + f64::from(item.w) / 2.0);
        weighted_y += area * (f64::from(item.y) + f64::from(item.h) / 2.0);
    }
    let centroid_x = weighted_x / total_area;
    let centroid_y = weighted_y / total_area;

    let center_x = f64::from(cols) / 2.0;
    let center_y = f64::from(bounding_height) / 2.0;
    let deviation_x = if center_x > 0.0 {
        ((centroid_x - center_x).abs() / center_x).min(1.0)
    } else {
        0.0
    };
    let deviation_y = if center_y > 0.0 {
        ((centroid_y - center_y).abs() / center_y).min(1.0)
    } else {
        0.0
    };

    100.0 * (1.0 - (deviation_x + deviation_y) / 2.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
