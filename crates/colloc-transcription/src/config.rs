//! Transcription configuration
//!
//! Serializable description of a phase grid. Orders are given in nodes per
//! segment, the same count the named grid constructors take.

use colloc_core::{GridBuilder, GridData, GridError, NodeFamily, PerSegment, Transcription};
use serde::{Deserialize, Serialize};

/// Per-segment order as written in configuration
///
/// A string must hold a node count; it is broadcast to every segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderSpec {
    Scalar(usize),
    Each(Vec<usize>),
    Named(String),
}

impl OrderSpec {
    pub fn to_per_segment(&self) -> Result<PerSegment, GridError> {
        match self {
            OrderSpec::Scalar(n) => Ok(PerSegment::Scalar(*n)),
            OrderSpec::Each(values) => Ok(PerSegment::Each(values.clone())),
            OrderSpec::Named(s) => s
                .trim()
                .parse::<usize>()
                .map(PerSegment::Scalar)
                .map_err(|_| GridError::InvalidOrder(s.clone())),
        }
    }
}

impl Default for OrderSpec {
    fn default() -> Self {
        OrderSpec::Scalar(3)
    }
}

/// Grid configuration for one phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Transcription tag, e.g. "gauss-lobatto", "radau-ps", "cgl", "birkhoff"
    pub transcription: String,
    pub num_segments: usize,
    /// Nodes per segment
    pub order: OrderSpec,
    /// Raw segment boundaries; equally spaced when absent
    pub segment_ends: Option<Vec<f64>>,
    pub compressed: bool,
    /// Node family for Birkhoff grids
    pub grid_type: NodeFamily,
    pub num_steps_per_segment: PerSegment,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            transcription: "gauss-lobatto".to_string(),
            num_segments: 10,
            order: OrderSpec::default(),   // 3 nodes per segment
            segment_ends: None,            // equally spaced
            compressed: false,
            grid_type: NodeFamily::Cgl,
            num_steps_per_segment: PerSegment::Scalar(1),
        }
    }
}

impl TranscriptionConfig {
    /// Resolve the transcription tag, attaching `grid_type` for Birkhoff
    pub fn transcription(&self) -> Result<Transcription, GridError> {
        match self.transcription.parse::<Transcription>()? {
            Transcription::Birkhoff(_) => Ok(Transcription::Birkhoff(self.grid_type)),
            other => Ok(other),
        }
    }

    /// Validate and build the grid
    pub fn build_grid(&self) -> Result<GridData, GridError> {
        let transcription = self.transcription()?;
        let order = self
            .order
            .to_per_segment()?
            .map(|n| transcription.order_for_nodes(n));

        let mut builder = GridBuilder::new(self.num_segments, transcription, order)
            .with_compressed(self.compressed)
            .with_num_steps_per_segment(self.num_steps_per_segment.clone());
        if let Some(ends) = &self.segment_ends {
            builder = builder.with_segment_ends(ends.clone());
        }
        builder.build()
    }
}
