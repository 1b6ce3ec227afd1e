//! Transcription component errors

use colloc_core::GridError;
use thiserror::Error;

/// Errors raised while configuring or running transcription components
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranscriptionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Invalid {what} dimension: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),
    #[error("Variable '{name}' aliases a source of per-node size {expected}, got {got}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("Grids do not share segment boundaries")]
    MisalignedGrids,
    #[error("Phase duration must be positive, got {0}")]
    InvalidDuration(f64),
}
