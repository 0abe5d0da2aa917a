//! Error type shared by every model and reduction routine.

use thiserror::Error;

/// Errors raised when a caller violates a shape or size contract.
#[derive(Debug, Error)]
pub enum Error {
    /// Two vectors or matrices disagree in length.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Too few examples (or dimensions) for a statistical operation.
    #[error("insufficient data: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A mean was requested over zero points.
    #[error("cannot compute the centroid of an empty set of points")]
    EmptySet,

    /// Boundaries can only be drawn in 2 or 3 dimensions.
    #[error("cannot derive a boundary in {0} dimensions")]
    UnsupportedDimensions(usize),

    /// The hyperplane cannot be solved for its last coordinate.
    #[error("degenerate boundary: last weight is zero")]
    DegenerateBoundary,

    #[error("malformed example data: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fail with `DimensionMismatch` unless `actual == expected`.
pub(crate) fn ensure_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}
