#![forbid(unsafe_code)]

//! Request facade: one entry point for the interaction layer.
//!
//! The engine owns a validated [`GridConfig`] and nothing else. Every call
//! takes the current layout snapshot and one [`LayoutRequest`], and returns
//! a fresh snapshot plus the resolution outcome; the caller owns
//! persistence and rendering of the result.

use serde::{Deserialize, Serialize};

use gridflow_core::{
    ConfigurationError, EngineError, GridConfig, GridItem, ItemId, Layout, RemapStrategy,
    ValidationError,
};

use crate::compact::compact;
use crate::position::{CellPos, find_available_position, is_position_available};
use crate::remap::remap_columns;
use crate::resolve::{ResolveOutcome, move_item, resize_item};
use crate::responsive::active_breakpoint;
use crate::validate::validate_item;

/// One mutation requested by the interaction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum LayoutRequest {
    /// Move an item to a new cell position.
    Move { id: ItemId, x: i32, y: i32 },
    /// Resize an item to a new footprint.
    Resize { id: ItemId, w: i32, h: i32 },
    /// Insert a new item, at its requested position when free.
    Add { item: GridItem },
    /// Remove an item. Unknown ids are a no-op.
    Remove { id: ItemId },
    /// Change the column count, remapping the layout with the strategy.
    SetColumns { cols: i32, strategy: RemapStrategy },
    /// Switch to a configured breakpoint, rescaling to its column count.
    SetBreakpoint { name: String },
}

/// Result of [`GridEngine::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub layout: Layout,
    pub outcome: ResolveOutcome,
}

/// The grid layout engine: configuration plus pure layout transforms.
#[derive(Debug, Clone)]
pub struct GridEngine {
    config: GridConfig,
}

impl GridEngine {
    /// Create an engine over a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Column count currently in effect.
    #[must_use]
    pub fn cols(&self) -> i32 {
        self.config.cols
    }

    /// Name of the breakpoint active at a viewport width.
    pub fn active_breakpoint(&self, width: i32) -> Result<&str, ConfigurationError> {
        active_breakpoint(width, &self.config)
    }

    /// Apply one request to a layout snapshot.
    ///
    /// Requests that change the column count (`SetColumns`, `SetBreakpoint`)
    /// also update the engine's configuration, which is why this takes
    /// `&mut self`; the layout itself is never mutated in place.
    pub fn apply(&mut self, layout: &Layout, request: LayoutRequest) -> Result<Applied, EngineError> {
        match request {
            LayoutRequest::Move { id, x, y } => {
                let res = move_item(layout, &id, x, y, self.config.cols, &self.config);
                Ok(Applied {
                    layout: res.layout,
                    outcome: res.outcome,
                })
            }
            LayoutRequest::Resize { id, w, h } => {
                let res = resize_item(layout, &id, w, h, self.config.cols, &self.config);
                Ok(Applied {
                    layout: res.layout,
                    outcome: res.outcome,
                })
            }
            LayoutRequest::Add { item } => self.add_item(layout, item),
            LayoutRequest::Remove { id } => Ok(self.remove_item(layout, &id)),
            LayoutRequest::SetColumns { cols, strategy } => {
                self.set_columns(layout, cols, strategy)
            }
            LayoutRequest::SetBreakpoint { name } => self.set_breakpoint(layout, &name),
        }
    }

    /// Insert a new item, falling back to the first free slot when its
    /// requested position is occupied or out of bounds.
    fn add_item(&self, layout: &Layout, mut item: GridItem) -> Result<Applied, EngineError> {
        if layout.contains(&item.id) {
            return Err(ValidationError::DuplicateId {
                ids: vec![item.id],
            }
            .into());
        }
        let cols = self.config.cols;
        item.w = item.w.clamp(1, cols);
        item.h = item.h.max(1);
        (item.w, item.h) = item.constraints.clamp(item.w, item.h);
        item.w = item.w.min(cols);

        if !is_position_available(layout, item.x, item.y, item.w, item.h, cols, None) {
            let CellPos { x, y } = find_available_position(layout, item.w, item.h, cols, 0);
            item.x = x;
            item.y = y;
        }
        validate_item(&item, cols)?;

        let mut next = layout.clone();
        next.push(item);
        Ok(Applied {
            layout: compact(&next, cols, self.config.compact),
            outcome: ResolveOutcome::Committed { iterations: 0 },
        })
    }

    /// Remove an item; unknown ids return the input unchanged.
    fn remove_item(&self, layout: &Layout, id: &ItemId) -> Applied {
        let mut next = layout.clone();
        if next.remove(id).is_none() {
            return Applied {
                layout: layout.clone(),
                outcome: ResolveOutcome::NoOp,
            };
        }
        Applied {
            layout: compact(&next, self.config.cols, self.config.compact),
            outcome: ResolveOutcome::Committed { iterations: 0 },
        }
    }

    fn set_columns(
        &mut self,
        layout: &Layout,
        cols: i32,
        strategy: RemapStrategy,
    ) -> Result<Applied, EngineError> {
        let remapped = remap_columns(layout, self.config.cols, cols, strategy)?;
        self.config.cols = cols;
        let compacted = match strategy {
            // `None` promises items are left as-is.
            RemapStrategy::None => remapped,
            _ => compact(&remapped, cols, self.config.compact),
        };
        Ok(Applied {
            layout: compacted,
            outcome: ResolveOutcome::Committed { iterations: 0 },
        })
    }

    fn set_breakpoint(&mut self, layout: &Layout, name: &str) -> Result<Applied, EngineError> {
        let target = self.config.breakpoint(name)?.cols;
        self.set_columns(layout, target, RemapStrategy::Scale)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
