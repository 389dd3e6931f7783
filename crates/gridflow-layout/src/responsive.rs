#![forbid(unsafe_code)]

//! Per-breakpoint layout derivation.
//!
//! One base layout (the widest breakpoint's) is the source of truth; every
//! narrower breakpoint's layout is derived from it, widest-first. Derivation
//! scales `x` and `w` by the column ratio and raises a minimum height on the
//! narrow tiers so single-column widgets stay legible on phones. `y` is
//! never touched here — vertical ordering re-settles through the compactor
//! at render time when enabled.
//!
//! # Invariants
//!
//! 1. `transform_for_breakpoint` with equal column counts is the identity.
//! 2. Derived items always satisfy `0 <= x` and `x + w <= target_cols`.
//! 3. Derivation is a pure function of the base layout; deriving twice
//!    yields identical sets.

use gridflow_core::{ConfigurationError, GridConfig, Layout, RemapStrategy, ResponsiveLayoutSet};

use crate::remap::remap_columns;

/// Legibility class of a breakpoint, by rank from the narrow end of the
/// ordered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointTier {
    /// No height floor.
    Regular,
    /// Second-narrowest breakpoint: items get `h >= 2`.
    Narrow,
    /// Narrowest breakpoint: items get `h >= 3`.
    Narrowest,
}

impl BreakpointTier {
    /// Tier for the breakpoint at `index` in a widest-first table of
    /// `count` breakpoints.
    #[must_use]
    pub fn from_rank(index: usize, count: usize) -> Self {
        if count >= 2 && index == count - 1 {
            Self::Narrowest
        } else if count >= 3 && index == count - 2 {
            Self::Narrow
        } else {
            Self::Regular
        }
    }

    fn min_height(self) -> i32 {
        match self {
            Self::Regular => 1,
            Self::Narrow => 2,
            Self::Narrowest => 3,
        }
    }
}

/// Derive one layout per configured breakpoint from the base layout.
///
/// The base layout is assumed to live at the widest breakpoint's column
/// count. Breakpoints are processed widest-first; the widest entry is the
/// identity transform of the base.
pub fn derive_all(
    base: &Layout,
    config: &GridConfig,
) -> Result<ResponsiveLayoutSet, ConfigurationError> {
    let ordered = config.ordered_breakpoints();
    if ordered.is_empty() {
        return Err(ConfigurationError::NoBreakpoints);
    }
    let source_cols = ordered[0].cols;
    let count = ordered.len();

    #[cfg(feature = "tracing")]
    tracing::trace!(breakpoints = count, source_cols, "deriving responsive set");

    let mut set = ResponsiveLayoutSet::new();
    for (index, bp) in ordered.iter().enumerate() {
        let tier = BreakpointTier::from_rank(index, count);
        let derived = transform_for_breakpoint(base, source_cols, bp.cols, tier)?;
        set.insert(bp.name.clone(), derived);
    }
    Ok(set)
}

/// Derive a single breakpoint's layout from a source layout.
///
/// Identity copy when the column counts match; otherwise a `Scale` remap
/// followed by the tier's minimum-height floor. `y` is never altered.
pub fn transform_for_breakpoint(
    source: &Layout,
    source_cols: i32,
    target_cols: i32,
    tier: BreakpointTier,
) -> Result<Layout, ConfigurationError> {
    if source_cols == target_cols {
        return Ok(source.clone());
    }
    let mut derived = remap_columns(source, source_cols, target_cols, RemapStrategy::Scale)?;
    let min_h = tier.min_height();
    if min_h > 1 {
        for item in derived.items_mut() {
            item.h = item.h.max(min_h);
        }
    }
    Ok(derived)
}

/// Name of the breakpoint active at `width`: the widest whose `min_width`
/// is at most `width`, defaulting to the narrowest when none match.
pub fn active_breakpoint(width: i32, config: &GridConfig) -> Result<&str, ConfigurationError> {
    let ordered = config.ordered_breakpoints();
    let narrowest = ordered.last().ok_or(ConfigurationError::NoBreakpoints)?;
    Ok(ordered
        .iter()
        .find(|bp| bp.min_width <= width)
        .unwrap_or(narrowest)
        .name
        .as_str())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
