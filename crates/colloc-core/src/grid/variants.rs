//! Named constructors for each transcription family
//!
//! These take nodes per segment, the count a user thinks in, and translate
//! it into the classifier's node parameter.

use crate::error::GridError;
use crate::math::nodes::NodeFamily;

use super::data::{GridBuilder, GridData, PerSegment};
use super::transcription::Transcription;

fn build(
    num_segments: usize,
    transcription: Transcription,
    order: PerSegment,
    segment_ends: Option<&[f64]>,
    compressed: bool,
) -> Result<GridData, GridError> {
    let mut builder = GridBuilder::new(num_segments, transcription, order).with_compressed(compressed);
    if let Some(ends) = segment_ends {
        builder = builder.with_segment_ends(ends.to_vec());
    }
    builder.build()
}

impl GridData {
    /// Gauss-Lobatto grid with `nodes_per_seg` LGL nodes per segment (odd)
    pub fn gauss_lobatto(
        num_segments: usize,
        nodes_per_seg: impl Into<PerSegment>,
        segment_ends: Option<&[f64]>,
        compressed: bool,
    ) -> Result<Self, GridError> {
        build(
            num_segments,
            Transcription::GaussLobatto,
            nodes_per_seg.into(),
            segment_ends,
            compressed,
        )
    }

    /// Chebyshev-Gauss-Lobatto grid with `nodes_per_seg` CGL nodes per segment
    pub fn chebyshev_gauss_lobatto(
        num_segments: usize,
        nodes_per_seg: impl Into<PerSegment>,
        segment_ends: Option<&[f64]>,
        compressed: bool,
    ) -> Result<Self, GridError> {
        build(
            num_segments,
            Transcription::ChebyshevGaussLobatto,
            nodes_per_seg.into(),
            segment_ends,
            compressed,
        )
    }

    /// Radau grid with `nodes_per_seg` total nodes per segment
    ///
    /// The last node of each segment is the non-collocated right endpoint,
    /// so each segment has `nodes_per_seg - 1` collocation nodes.
    pub fn radau(
        num_segments: usize,
        nodes_per_seg: impl Into<PerSegment>,
        segment_ends: Option<&[f64]>,
        compressed: bool,
    ) -> Result<Self, GridError> {
        build(
            num_segments,
            Transcription::Radau,
            nodes_per_seg.into().map(|n| Transcription::Radau.order_for_nodes(n)),
            segment_ends,
            compressed,
        )
    }

    /// Single-segment Birkhoff grid of `num_nodes` nodes from `grid_type`
    pub fn birkhoff(num_nodes: usize, grid_type: NodeFamily) -> Result<Self, GridError> {
        build(1, Transcription::Birkhoff(grid_type), PerSegment::Scalar(num_nodes), None, false)
    }

    /// Uniform grid with `nodes_per_seg` equally spaced nodes per segment
    pub fn uniform(
        num_segments: usize,
        nodes_per_seg: impl Into<PerSegment>,
        segment_ends: Option<&[f64]>,
        compressed: bool,
    ) -> Result<Self, GridError> {
        build(
            num_segments,
            Transcription::Uniform,
            nodes_per_seg.into().map(|n| Transcription::Uniform.order_for_nodes(n)),
            segment_ends,
            compressed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::subset::Subset;
    use approx::assert_relative_eq;

    #[test]
    fn test_radau_counts_total_nodes() {
        let grid = GridData::radau(3, 4, None, false).unwrap();
        assert_eq!(grid.num_nodes(), 12);
        assert_eq!(grid.subset_num_nodes(Subset::Col), 9);
        assert_eq!(grid.transcription_order(), &[3, 3, 3]);
    }

    #[test]
    fn test_radau_compressed_state_input() {
        let grid = GridData::radau(2, 4, None, true).unwrap();
        assert_eq!(grid.subset_num_nodes(Subset::StateDisc), 8);
        assert_eq!(grid.subset_num_nodes(Subset::StateInput), 7);
        assert_eq!(grid.subset_num_nodes(Subset::ControlInput), 6);
    }

    #[test]
    fn test_birkhoff_single_segment() {
        let grid = GridData::birkhoff(8, NodeFamily::Lgl).unwrap();
        assert_eq!(grid.num_segments(), 1);
        assert_eq!(grid.num_nodes(), 8);
        assert_eq!(grid.subset_node_indices(Subset::SegmentEnds), &[0, 7]);
        assert_relative_eq!(grid.node_weight().sum(), 2.0, epsilon = 1e-13);
    }

    #[test]
    fn test_uniform_counts_total_nodes() {
        let grid = GridData::uniform(2, 5, Some(&[0.0, 1.0, 3.0]), false).unwrap();
        assert_eq!(grid.num_nodes(), 10);
        assert_eq!(grid.subset_node_indices(Subset::SegmentEnds), &[0, 4, 5, 9]);
        assert_relative_eq!(grid.segment_ends()[1], -1.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_cgl_weights_per_segment() {
        let grid = GridData::chebyshev_gauss_lobatto(3, 6, None, false).unwrap();
        assert_eq!(grid.num_nodes(), 18);
        // Weights are in segment tau, so each segment contributes 2
        assert_relative_eq!(grid.node_weight().sum(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gauss_lobatto_matches_builder() {
        let ends = [0.0, 2.0, 3.0];
        let a = GridData::gauss_lobatto(2, 3, Some(&ends), true).unwrap();
        let b = GridBuilder::new(2, Transcription::GaussLobatto, 3)
            .with_segment_ends(ends.to_vec())
            .with_compressed(true)
            .build()
            .unwrap();
        assert_eq!(a, b);
    }
}
