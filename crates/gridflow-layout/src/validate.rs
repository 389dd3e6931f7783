#![forbid(unsafe_code)]

//! Layout validation: bounds, size constraints, id uniqueness, overlap.
//!
//! Validation is a read-only report, never a repair. The resolver and
//! compactor are responsible for producing layouts that pass; this module
//! only says whether one does.
//!
//! # Invariants checked
//!
//! 1. Every item: `x >= 0`, `y >= 0`, `w >= 1`, `h >= 1`, `x + w <= cols`.
//! 2. Every item satisfies its own min/max size constraints.
//! 3. All ids are unique and non-empty.
//! 4. No two *non-static* items overlap. Overlap against a static item is
//!    prevented transactionally by the resolver's abort path and is not a
//!    validation concern.
//!
//! # Determinism
//!
//! Reports are deterministic over the layout's iteration order: duplicate
//! ids are listed in first-seen order, per-item failures carry the item's
//! index, and the overlap check reports the first offending pair in
//! lexicographic pair order.

use gridflow_core::{GridItem, Layout, ValidationError};

/// Validate a single item against grid bounds and its own constraints.
///
/// Bounds failures win over constraint failures when both apply.
pub fn validate_item(item: &GridItem, cols: i32) -> Result<(), ValidationError> {
    if item.x < 0 || item.y < 0 || item.w <= 0 || item.h <= 0 || item.right() > cols {
        return Err(ValidationError::OutOfBounds {
            id: item.id.clone(),
            x: item.x,
            y: item.y,
            w: item.w,
            h: item.h,
            cols,
        });
    }
    if !item.constraints.admits(item.w, item.h) {
        return Err(ValidationError::ConstraintViolation {
            id: item.id.clone(),
            w: item.w,
            h: item.h,
            constraints: item.constraints,
        });
    }
    Ok(())
}

/// Whether two items' rectangles intersect (strict inequalities; shared
/// edges do not count).
#[must_use]
pub fn rects_overlap(a: &GridItem, b: &GridItem) -> bool {
    a.overlaps(b)
}

/// Validate a whole layout: id uniqueness, then per-item checks, then
/// overlap.
///
/// Duplicate ids are collected exhaustively into one report; the per-item
/// pass short-circuits on the first failure, wrapped with the item's index.
/// An empty layout is valid.
pub fn validate_layout(layout: &Layout, cols: i32) -> Result<(), ValidationError> {
    let mut duplicates: Vec<gridflow_core::ItemId> = Vec::new();
    let items = layout.as_slice();
    for (index, item) in items.iter().enumerate() {
        let repeated = items[..index].iter().any(|prev| prev.id == item.id);
        if repeated && !duplicates.contains(&item.id) {
            duplicates.push(item.id.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(ValidationError::DuplicateId { ids: duplicates });
    }

    for (index, item) in items.iter().enumerate() {
        validate_item(item, cols).map_err(|source| ValidationError::ItemInvalid {
            index,
            source: Box::new(source),
        })?;
    }

    validate_no_overlaps(layout)
}

/// Pairwise overlap check over non-static item pairs.
///
/// O(n²) over the layout's iteration order; the first offending pair is
/// reported. Pairs where either item is static are skipped (see module
/// docs).
pub fn validate_no_overlaps(layout: &Layout) -> Result<(), ValidationError> {
    let items = layout.as_slice();
    for (index, a) in items.iter().enumerate() {
        if a.is_static {
            continue;
        }
        for b in &items[index + 1..] {
            if b.is_static {
                continue;
            }
            if rects_overlap(a, b) {
                return Err(ValidationError::OverlapDetected {
                    first: a.id.clone(),
                    second: b.id.clone(),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
