#![forbid(unsafe_code)]

//! Layout recomputation for column-count changes.
//!
//! Which strategy is "right" depends on the dashboard: proportional widths
//! (`Scale`), fixed grid units (`Move`), or hands-off (`None`). The engine
//! takes the strategy as an explicit caller choice and implements all three;
//! there is no implicit default in this module.
//!
//! Every strategy is idempotent once source and target column counts agree:
//! remapping a second time with `source == target` changes nothing.

use gridflow_core::{ConfigurationError, Layout, RemapStrategy};

/// Recompute item geometry for a new column count.
///
/// `Scale` resizes and repositions proportionally, `Move` only shifts items
/// back into bounds, `None` leaves geometry untouched (callers should
/// validate afterwards — items wider than the new grid stay wider).
pub fn remap_columns(
    layout: &Layout,
    source_cols: i32,
    target_cols: i32,
    strategy: RemapStrategy,
) -> Result<Layout, ConfigurationError> {
    if source_cols <= 0 {
        return Err(ConfigurationError::InvalidCols { cols: source_cols });
    }
    if target_cols <= 0 {
        return Err(ConfigurationError::InvalidCols { cols: target_cols });
    }

    let mut remapped = layout.clone();
    match strategy {
        RemapStrategy::Scale => {
            let ratio = f64::from(target_cols) / f64::from(source_cols);
            for item in remapped.items_mut() {
                item.x = scale_floor(item.x, ratio);
                item.w = scale_floor(item.w, ratio).max(1);
                item.x = item.x.min(target_cols - item.w).max(0);
            }
        }
        RemapStrategy::Move => {
            for item in remapped.items_mut() {
                item.x = item.x.min(target_cols - item.w).max(0);
            }
        }
        RemapStrategy::None => {}
    }
    Ok(remapped)
}

fn scale_floor(value: i32, ratio: f64) -> i32 {
    (f64::from(value) * ratio).floor() as i32
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
