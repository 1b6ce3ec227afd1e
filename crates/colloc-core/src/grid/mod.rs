//! Collocation grids
//!
//! - [`subset`]: node subsets and the index maps between them
//! - [`transcription`]: per-segment classifiers for each transcription family
//! - [`data`]: whole-phase assembly, index bookkeeping and interpolation operators
//! - [`variants`]: named constructors per family

pub mod subset;
pub mod transcription;
pub mod data;
pub mod variants;

pub use subset::{make_subset_map, Subset};
pub use transcription::{SegmentNodes, SubsetMap, Transcription};
pub use data::{
    GridBuilder, GridData, InputMaps, LagrangeMatrices, PerSegment, SparseHermiteMatrices,
    SparseLagrangeMatrices, SubsetIndices, DEFAULT_ALIGNMENT_TOL,
};
