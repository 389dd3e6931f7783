#![forbid(unsafe_code)]

//! Grid item schema: identifiers, geometry, and size constraints.
//!
//! Coordinates are signed cell counts. The engine only ever *produces*
//! non-negative geometry, but the interaction layer may hand in anything
//! (placeholder positions, half-finished drags), so the model must be able
//! to represent out-of-range values for the validator to reject and the
//! resolver to normalize.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for grid items, unique within a [`Layout`].
///
/// Wraps the host's widget id string as handed over by the dashboard
/// configuration layer.
///
/// [`Layout`]: crate::layout::Layout
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an item id from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Optional min/max bounds on an item's width and height, in cells.
///
/// `None` means unconstrained on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeConstraints {
    pub min_w: Option<i32>,
    pub min_h: Option<i32>,
    pub max_w: Option<i32>,
    pub max_h: Option<i32>,
}

impl SizeConstraints {
    /// Unconstrained on all four sides.
    pub const NONE: Self = Self {
        min_w: None,
        min_h: None,
        max_w: None,
        max_h: None,
    };

    /// Whether a `(w, h)` footprint satisfies these bounds.
    #[must_use]
    pub fn admits(&self, w: i32, h: i32) -> bool {
        self.min_w.is_none_or(|min| w >= min)
            && self.min_h.is_none_or(|min| h >= min)
            && self.max_w.is_none_or(|max| w <= max)
            && self.max_h.is_none_or(|max| h <= max)
    }

    /// Clamp a `(w, h)` footprint into these bounds.
    ///
    /// Applies minimums after maximums so a contradictory constraint pair
    /// (min above max) resolves in favor of the minimum.
    #[must_use]
    pub fn clamp(&self, w: i32, h: i32) -> (i32, i32) {
        let mut w = w;
        let mut h = h;
        if let Some(max) = self.max_w {
            w = w.min(max);
        }
        if let Some(max) = self.max_h {
            h = h.min(max);
        }
        if let Some(min) = self.min_w {
            w = w.max(min);
        }
        if let Some(min) = self.min_h {
            h = h.max(min);
        }
        (w, h)
    }

    /// Whether any bound is set.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self != &Self::NONE
    }
}

/// A placed widget on the dashboard grid.
///
/// Geometry is in grid cells (column/row counts, never pixels). A valid item
/// has `x >= 0`, `y >= 0`, `w >= 1`, `h >= 1`, and `x + w <= cols` for the
/// active column count; validity is checked by the engine, not enforced by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItem {
    pub id: ItemId,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Min/max size bounds. Skipped in serialized form when unconstrained.
    #[serde(default, skip_serializing_if = "is_unconstrained")]
    pub constraints: SizeConstraints,
    /// Static items block others but are never repositioned by the engine.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Interaction-layer hint; the engine honors programmatic moves regardless.
    #[serde(default = "default_true")]
    pub draggable: bool,
    /// Interaction-layer hint; the engine honors programmatic resizes regardless.
    #[serde(default = "default_true")]
    pub resizable: bool,
}

fn default_true() -> bool {
    true
}

fn is_unconstrained(c: &SizeConstraints) -> bool {
    !c.is_constrained()
}

impl GridItem {
    /// Create an item with the given id and geometry, no constraints.
    pub fn new(id: impl Into<ItemId>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            constraints: SizeConstraints::NONE,
            is_static: false,
            draggable: true,
            resizable: true,
        }
    }

    /// Mark the item static (builder pattern).
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Attach size constraints (builder pattern).
    #[must_use]
    pub fn with_constraints(mut self, constraints: SizeConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Exclusive right edge, `x + w`.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge, `y + h`.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// Area in cells. Zero for degenerate geometry.
    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.w.max(0)) * i64::from(self.h.max(0))
    }

    /// Whether this item's rectangle overlaps another's.
    ///
    /// Strict inequalities: rectangles that only share an edge do not
    /// overlap.
    #[must_use]
    pub fn overlaps(&self, other: &GridItem) -> bool {
        self.right() > other.x
            && other.right() > self.x
            && self.bottom() > other.y
            && other.bottom() > self.y
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
