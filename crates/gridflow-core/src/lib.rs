#![forbid(unsafe_code)]

//! Data model for the Gridflow dashboard layout engine.
//!
//! This crate defines the host-agnostic grid schema shared by the layout
//! engine and its embedding UI: items, layouts, grid configuration with
//! responsive breakpoints, and the structured error taxonomy. It carries no
//! algorithmic code; solvers live in `gridflow-layout`.
//!
//! All types derive serde so the persistence collaborator can round-trip
//! dashboards, but no on-disk format is owned here.

pub mod config;
pub mod error;
pub mod item;
pub mod layout;

pub use config::{BreakpointSpec, GridConfig, RemapStrategy};
pub use error::{AbortReason, ConfigurationError, EngineError, ValidationError};
pub use item::{GridItem, ItemId, SizeConstraints};
pub use layout::{Layout, ResponsiveLayoutSet};
