//! # Colloc Core
//!
//! Node generation and grid bookkeeping for pseudospectral and collocation
//! transcriptions of optimal control problems.
//!
//! A phase is split into segments. Each segment carries a set of nodes on
//! the reference interval [-1, 1] drawn from one node family, and each node
//! is tagged with the roles (subsets) it plays in the transcription.
//!
//! ## Modules
//!
//! - [`math`]: node families, Lagrange and Hermite matrices, block assembly
//! - [`grid`]: subset classification and whole-phase grid assembly
//! - [`error`]: construction errors

pub mod error;
pub mod math;
pub mod grid;

pub use error::GridError;
pub use grid::{GridBuilder, GridData, PerSegment, Subset, Transcription};
pub use math::nodes::{NodeFamily, NodeSet};

