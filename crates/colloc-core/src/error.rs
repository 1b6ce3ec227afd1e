//! Grid construction errors
//!
//! Every failure here is a local validation failure raised while a grid or a
//! segment classification is being built. None of them are retryable.

use thiserror::Error;

/// Errors raised while generating nodes or assembling a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Invalid node count {n} for {family}")]
    InvalidNodeCount { family: &'static str, n: usize },
    #[error("Invalid segment bounds: {0}")]
    InvalidSegmentBounds(String),
    #[error("Invalid transcription order length: expected {expected}, got {got}")]
    InvalidOrderLength { expected: usize, got: usize },
    #[error("Invalid transcription order: {0}")]
    InvalidOrder(String),
    #[error("Unknown transcription: {0}")]
    UnknownTranscription(String),
    #[error("Invalid grid type '{0}', expected one of lgl, lgr, cgl")]
    InvalidGridType(String),
    #[error("Unknown node subset: {0}")]
    UnknownSubset(String),
}
