//! Error types for the diagram core
//!
//! Construction errors fail fast; placement errors are returned as values so
//! the host can swap in an error placeholder instead of crashing the page.

use thiserror::Error;

/// Top-level error type for cursor, trace and layout operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    /// A step cursor needs at least one stage to point at
    #[error("invalid stage count: {total} (a diagram needs at least one stage)")]
    InvalidStageCount { total: usize },

    /// A digit placement would land outside the dividend's columns
    #[error(
        "column {column} out of range for value {value} anchored at column {anchor} (dividend has {dividend_len} digits)"
    )]
    ColumnOutOfRange {
        column: i64,
        anchor: i32,
        value: u32,
        dividend_len: usize,
    },

    /// The cursor reached the final stage but the trace never finishes
    #[error("trace has no `complete` or `remainder` step")]
    IncompleteTrace,

    /// Division by zero is not a problem we can draw
    #[error("divisor must be positive")]
    InvalidDivisor,

    /// Stale or unknown diagram handle passed across the WASM boundary
    #[error("no diagram registered with id {0}")]
    UnknownDiagram(u32),

    /// Problem generation could not obtain randomness or got bad bounds
    #[error("problem generation failed: {0}")]
    Generation(String),

    /// Failure converting to or from JS / JSON values
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DiagramError {
    fn from(e: serde_json::Error) -> Self {
        DiagramError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
