#![forbid(unsafe_code)]

//! Grid placement, collision resolution, and responsive derivation for
//! Gridflow dashboards.
//!
//! This crate is the algorithmic core behind the dashboard editor: a pure
//! function library over in-memory [`Layout`] snapshots. It assigns,
//! validates, and repairs item positions on a fixed-column grid; resolves
//! drag collisions with a transactional push-down; removes vertical gaps;
//! and re-derives layouts across responsive breakpoints.
//!
//! It never renders, never persists, and never blocks: every operation is a
//! synchronous `(layout, params) -> layout` transform that either commits a
//! new snapshot or hands the input back unchanged. Pointer capture, DOM
//! updates, data binding, and storage are the embedding application's
//! concern.
//!
//! # Entry points
//!
//! - [`GridEngine`] + [`LayoutRequest`]: the facade the interaction layer
//!   talks to.
//! - [`resolve::move_item`] / [`resolve::resize_item`]: direct access to
//!   the collision resolver.
//! - [`compact::compact`], [`validate::validate_layout`],
//!   [`position::find_available_position`]: the individual solvers.
//! - [`responsive::derive_all`]: one layout per breakpoint.
//! - [`stats::layout_stats`]: read-only diagnostics.

pub mod cache;
pub mod compact;
pub mod engine;
pub mod position;
pub mod remap;
pub mod resolve;
pub mod responsive;
pub mod stats;
pub mod validate;

pub use cache::{ValidationCache, ValidationCacheStats};
pub use engine::{Applied, GridEngine, LayoutRequest};
pub use gridflow_core::{
    AbortReason, BreakpointSpec, ConfigurationError, EngineError, GridConfig, GridItem, ItemId,
    Layout, RemapStrategy, ResponsiveLayoutSet, SizeConstraints, ValidationError,
};
pub use position::{CellPos, ScoredPos};
pub use resolve::{Resolution, ResolveOutcome};
pub use responsive::BreakpointTier;
pub use stats::LayoutStats;
