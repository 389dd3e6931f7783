#![forbid(unsafe_code)]

//! Structured error taxonomy for the grid engine.
//!
//! Everything here is a recoverable, in-domain signal the UI may surface to
//! the user ("can't place the widget there"). Nothing outside the grid
//! domain — persistence, rendering, network — appears in this taxonomy.
//!
//! [`AbortReason`] is deliberately *not* an error in the `Result` sense: a
//! collision abort is a safe no-op outcome the resolver reports alongside
//! the untouched input layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::{ItemId, SizeConstraints};

/// Why an item or layout failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Item geometry escapes the grid: negative position, non-positive size,
    /// or right edge past the column count.
    OutOfBounds {
        id: ItemId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        cols: i32,
    },
    /// Item size falls outside its own min/max constraints.
    ConstraintViolation {
        id: ItemId,
        w: i32,
        h: i32,
        constraints: SizeConstraints,
    },
    /// One or more ids appear on multiple items. Lists every repeated id.
    DuplicateId { ids: Vec<ItemId> },
    /// Two non-static items' rectangles intersect.
    OverlapDetected { first: ItemId, second: ItemId },
    /// A specific item failed validation; carries its position in the layout.
    ItemInvalid {
        index: usize,
        source: Box<ValidationError>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { id, x, y, w, h, cols } => write!(
                f,
                "item {id} at ({x}, {y}) size {w}x{h} escapes a {cols}-column grid"
            ),
            Self::ConstraintViolation {
                id,
                w,
                h,
                constraints,
            } => write!(
                f,
                "item {id} size {w}x{h} violates its constraints {constraints:?}"
            ),
            Self::DuplicateId { ids } => {
                write!(f, "duplicate item ids:")?;
                for id in ids {
                    write!(f, " {id}")?;
                }
                Ok(())
            }
            Self::OverlapDetected { first, second } => {
                write!(f, "items {first} and {second} overlap")
            }
            Self::ItemInvalid { index, source } => {
                write!(f, "item at index {index} is invalid: {source}")
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ItemInvalid { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Why a collision resolution was rejected wholesale.
///
/// Carried inside a successful resolver return, next to the untouched input
/// layout. Serialized for UI telemetry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum AbortReason {
    /// The move would displace a static item.
    StaticCollision { moving: ItemId, blocked_by: ItemId },
    /// Chain-reaction propagation exceeded its iteration bound (cyclic push).
    IterationLimit { limit: u64 },
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticCollision { moving, blocked_by } => {
                write!(f, "item {moving} would displace static item {blocked_by}")
            }
            Self::IterationLimit { limit } => {
                write!(f, "collision propagation exceeded {limit} iterations")
            }
        }
    }
}

/// Inconsistent grid or breakpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The breakpoint table is empty but a breakpoint operation was requested.
    NoBreakpoints,
    /// A named breakpoint is absent from the table.
    MissingBreakpoint { name: String },
    /// Non-positive base column count.
    InvalidCols { cols: i32 },
    /// The same breakpoint name appears twice.
    DuplicateBreakpoint { name: String },
    /// A breakpoint carries a non-positive column count.
    InvalidBreakpointCols { name: String, cols: i32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBreakpoints => write!(f, "no breakpoints configured"),
            Self::MissingBreakpoint { name } => {
                write!(f, "breakpoint {name} is not configured")
            }
            Self::InvalidCols { cols } => {
                write!(f, "column count must be positive, got {cols}")
            }
            Self::DuplicateBreakpoint { name } => {
                write!(f, "breakpoint {name} is configured twice")
            }
            Self::InvalidBreakpointCols { name, cols } => {
                write!(
                    f,
                    "breakpoint {name} column count must be positive, got {cols}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Top-level error for the request facade.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Validation(ValidationError),
    Configuration(ConfigurationError),
    /// A request named an item the layout does not contain and the operation
    /// cannot degrade to a no-op.
    UnknownItem { id: ItemId },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::UnknownItem { id } => write!(f, "no item with id {id}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Configuration(err) => Some(err),
            Self::UnknownItem { .. } => None,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
