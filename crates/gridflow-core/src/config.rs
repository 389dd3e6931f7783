#![forbid(unsafe_code)]

//! Grid configuration: column count, gaps, and responsive breakpoint table.
//!
//! Breakpoints live in a single table (`name`, `min_width`, `cols`) rather
//! than two parallel maps, so a breakpoint with no column count is
//! unrepresentable. [`GridConfig::validate`] rejects the remaining
//! inconsistencies (duplicate names, non-positive column counts) up front,
//! before any layout math runs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A named viewport-width threshold with its column count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointSpec {
    pub name: String,
    /// Minimum viewport width in pixels for this breakpoint to activate.
    pub min_width: i32,
    /// Column count the grid uses while this breakpoint is active.
    pub cols: i32,
}

impl BreakpointSpec {
    /// Create a breakpoint spec.
    pub fn new(name: impl Into<String>, min_width: i32, cols: i32) -> Self {
        Self {
            name: name.into(),
            min_width,
            cols,
        }
    }
}

/// Strategy for recomputing item geometry when the column count changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemapStrategy {
    /// Rescale `x` and `w` proportionally to the column ratio.
    #[default]
    Scale,
    /// Keep sizes in grid units; shift items left only as far as needed to
    /// stay in bounds.
    Move,
    /// Leave items untouched; only the column count changes. May leave items
    /// out of bounds — callers should validate afterwards.
    None,
}

/// Grid geometry and behavior configuration.
///
/// `row_height` and the gaps are pixel concerns of the rendering adapter and
/// never influence the layout algorithm; they ride along so one config object
/// describes the whole grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Number of columns in the base (widest) layout.
    pub cols: i32,
    /// Row height in pixels (rendering concern only).
    pub row_height: f32,
    /// Horizontal gap between cells in pixels (rendering concern only).
    pub gap_h: i32,
    /// Vertical gap between cells in pixels (rendering concern only).
    pub gap_v: i32,
    /// Whether gap-filling compaction runs after mutations.
    pub compact: bool,
    /// Responsive breakpoint table. May be empty for fixed-width dashboards.
    pub breakpoints: Vec<BreakpointSpec>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: 80.0,
            gap_h: 10,
            gap_v: 10,
            compact: true,
            breakpoints: Vec::new(),
        }
    }
}

impl GridConfig {
    /// A config with the given column count and defaults elsewhere.
    #[must_use]
    pub fn with_cols(cols: i32) -> Self {
        Self {
            cols,
            ..Self::default()
        }
    }

    /// Replace the breakpoint table (builder pattern).
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Vec<BreakpointSpec>) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Disable post-mutation compaction (builder pattern).
    #[must_use]
    pub fn without_compaction(mut self) -> Self {
        self.compact = false;
        self
    }

    /// Breakpoints sorted widest-first (descending `min_width`).
    ///
    /// Ties keep table order so resolution stays deterministic.
    #[must_use]
    pub fn ordered_breakpoints(&self) -> Vec<&BreakpointSpec> {
        let mut ordered: Vec<&BreakpointSpec> = self.breakpoints.iter().collect();
        ordered.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        ordered
    }

    /// Look up a breakpoint by name.
    pub fn breakpoint(&self, name: &str) -> Result<&BreakpointSpec, ConfigurationError> {
        self.breakpoints
            .iter()
            .find(|bp| bp.name == name)
            .ok_or_else(|| ConfigurationError::MissingBreakpoint {
                name: name.to_string(),
            })
    }

    /// Check structural consistency of the configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.cols <= 0 {
            return Err(ConfigurationError::InvalidCols { cols: self.cols });
        }
        for (index, bp) in self.breakpoints.iter().enumerate() {
            if bp.cols <= 0 {
                return Err(ConfigurationError::InvalidBreakpointCols {
                    name: bp.name.clone(),
                    cols: bp.cols,
                });
            }
            if self.breakpoints[..index].iter().any(|prev| prev.name == bp.name) {
                return Err(ConfigurationError::DuplicateBreakpoint {
                    name: bp.name.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
