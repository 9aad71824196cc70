use thiserror::Error;

/// Errors reported by boundary construction, calibration and partitioning.
///
/// All variants are recoverable: the caller keeps its previous state.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParcelError {
    #[error("boundary needs at least 3 vertices, got {got}")]
    InsufficientVertices { got: usize },

    #[error("boundary encloses zero area")]
    DegenerateArea,

    #[error("reference length must be a positive finite number")]
    InvalidReference,

    #[error("cut {index} cannot be placed at x = {proposed}")]
    UnresolvableCutPosition { index: usize, proposed: f64 },

    #[error("partition count must be at least 1")]
    InvalidPartitionCount,

    #[error("cut index {index} out of range for {len} cuts")]
    CutIndexOutOfRange { index: usize, len: usize },

    #[error("no finalized boundary")]
    NoBoundary,

    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

pub type Result<T, E = ParcelError> = std::result::Result<T, E>;
