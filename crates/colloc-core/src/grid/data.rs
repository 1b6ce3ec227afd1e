//! Whole-phase collocation grid
//!
//! [`GridData`] concatenates the per-segment classifications of a
//! [`Transcription`] into global node arrays and per-subset index maps:
//!
//! ```text
//! node_stau        segment-local location on [-1, 1]
//! node_ptau        phase location: stau mapped into [segment_ends[i], segment_ends[i+1]]
//! node_dptau_dstau 0.5 * (segment_ends[i+1] - segment_ends[i])
//! ```
//!
//! Concatenation is segment-major, then subset-local order. A grid is never
//! mutated after construction; a different shape means a new grid.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use sprs::CsMat;

use crate::error::GridError;
use crate::math::blocks::{block_diag, to_csr};
use crate::math::hermite::{hermite_matrices, HermiteMatrices};
use crate::math::lagrange::lagrange_matrices;
use crate::math::nodes::NodeFamily;

use super::subset::{make_subset_map, Subset};
use super::transcription::Transcription;

/// Default tolerance for [`GridData::is_aligned_with`]
pub const DEFAULT_ALIGNMENT_TOL: f64 = 1.0e-12;

/// A per-segment integer parameter: one value broadcast to every segment, or one per segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerSegment {
    Scalar(usize),
    Each(Vec<usize>),
}

impl PerSegment {
    /// Expand to exactly `num_segments` values
    ///
    /// A single-element list broadcasts like a scalar.
    pub fn expand(&self, num_segments: usize) -> Result<Vec<usize>, GridError> {
        match self {
            PerSegment::Scalar(v) => Ok(vec![*v; num_segments]),
            PerSegment::Each(values) if values.len() == 1 => Ok(vec![values[0]; num_segments]),
            PerSegment::Each(values) if values.len() == num_segments => Ok(values.clone()),
            PerSegment::Each(values) => Err(GridError::InvalidOrderLength {
                expected: num_segments,
                got: values.len(),
            }),
        }
    }

    /// Apply `f` to every value
    pub fn map(&self, f: impl Fn(usize) -> usize) -> Self {
        match self {
            PerSegment::Scalar(v) => PerSegment::Scalar(f(*v)),
            PerSegment::Each(values) => PerSegment::Each(values.iter().map(|&v| f(v)).collect()),
        }
    }
}

impl From<usize> for PerSegment {
    fn from(v: usize) -> Self {
        PerSegment::Scalar(v)
    }
}

impl From<Vec<usize>> for PerSegment {
    fn from(values: Vec<usize>) -> Self {
        PerSegment::Each(values)
    }
}

impl From<&[usize]> for PerSegment {
    fn from(values: &[usize]) -> Self {
        PerSegment::Each(values.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for PerSegment {
    fn from(values: [usize; N]) -> Self {
        PerSegment::Each(values.to_vec())
    }
}

/// Global bookkeeping for one subset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubsetIndices {
    /// Global node indices of the subset, segment-major
    pub node_indices: Vec<usize>,
    /// Per segment, the range into `node_indices` belonging to that segment
    pub segment_indices: Vec<Range<usize>>,
    /// Per segment, the number of subset nodes
    pub num_nodes_per_segment: Vec<usize>,
}

impl SubsetIndices {
    pub fn num_nodes(&self) -> usize {
        self.node_indices.len()
    }

    /// Global node indices of the subset within segment `iseg`
    pub fn segment_nodes(&self, iseg: usize) -> &[usize] {
        &self.node_indices[self.segment_indices[iseg].clone()]
    }
}

/// Index maps from input-node values to discretization-node values
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputMaps {
    pub state_input_to_disc: Vec<usize>,
    pub dynamic_control_input_to_disc: Vec<usize>,
}

/// Lagrange value and derivative operators over the whole phase
#[derive(Debug, Clone, PartialEq)]
pub struct LagrangeMatrices {
    /// Values at given nodes -> values at eval nodes
    pub l: DMatrix<f64>,
    /// Values at given nodes -> d/dstau at eval nodes
    pub d: DMatrix<f64>,
}

/// Sparse counterpart of [`LagrangeMatrices`]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseLagrangeMatrices {
    pub l: CsMat<f64>,
    pub d: CsMat<f64>,
}

/// Sparse counterpart of [`HermiteMatrices`]
#[derive(Debug, Clone, PartialEq)]
pub struct SparseHermiteMatrices {
    pub ai: CsMat<f64>,
    pub bi: CsMat<f64>,
    pub ad: CsMat<f64>,
    pub bd: CsMat<f64>,
}

/// Builder for [`GridData`]
#[derive(Debug, Clone)]
pub struct GridBuilder {
    num_segments: usize,
    transcription: Transcription,
    order: PerSegment,
    segment_ends: Option<Vec<f64>>,
    compressed: bool,
    num_steps_per_segment: PerSegment,
}

impl GridBuilder {
    /// Start a grid with `num_segments` segments of the given order
    ///
    /// `order` is the classifier's node parameter: nodes per segment for
    /// Gauss-Lobatto, CGL and Birkhoff, collocation points for Radau, and
    /// intervals for uniform.
    pub fn new(num_segments: usize, transcription: Transcription, order: impl Into<PerSegment>) -> Self {
        Self {
            num_segments,
            transcription,
            order: order.into(),
            segment_ends: None,
            compressed: false,
            num_steps_per_segment: PerSegment::Scalar(1),
        }
    }

    /// Segment boundaries on any increasing scale; normalized to [-1, 1]
    pub fn with_segment_ends(mut self, segment_ends: impl Into<Vec<f64>>) -> Self {
        self.segment_ends = Some(segment_ends.into());
        self
    }

    pub fn with_compressed(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    /// Step counts for explicitly integrated phases; carried but unused by collocation
    pub fn with_num_steps_per_segment(mut self, steps: impl Into<PerSegment>) -> Self {
        self.num_steps_per_segment = steps.into();
        self
    }

    pub fn build(self) -> Result<GridData, GridError> {
        GridData::assemble(self)
    }
}

/// Node, subset and index data for one phase
#[derive(Debug, Clone)]
pub struct GridData {
    transcription: Transcription,
    num_segments: usize,
    transcription_order: Vec<usize>,
    num_steps_per_segment: Vec<usize>,
    segment_ends: DVector<f64>,
    compressed: bool,
    num_nodes: usize,
    node_weight: DVector<f64>,
    node_stau: DVector<f64>,
    node_ptau: DVector<f64>,
    node_dptau_dstau: DVector<f64>,
    segment_indices: Vec<Range<usize>>,
    subsets: BTreeMap<Subset, SubsetIndices>,
    input_maps: InputMaps,
}

fn normalized_segment_ends(num_segments: usize, raw: Option<Vec<f64>>) -> Result<Vec<f64>, GridError> {
    let raw = match raw {
        None => {
            let ns = num_segments as f64;
            return Ok((0..=num_segments)
                .map(|i| if i == num_segments { 1.0 } else { -1.0 + 2.0 * i as f64 / ns })
                .collect());
        }
        Some(raw) => raw,
    };

    if raw.len() != num_segments + 1 {
        return Err(GridError::InvalidSegmentBounds(format!(
            "expected {} segment ends, got {}",
            num_segments + 1,
            raw.len()
        )));
    }
    if raw.iter().any(|v| !v.is_finite()) {
        return Err(GridError::InvalidSegmentBounds(
            "segment ends must be finite".to_string(),
        ));
    }
    if raw.windows(2).any(|w| w[0] >= w[1]) {
        return Err(GridError::InvalidSegmentBounds(
            "segment ends must be strictly increasing".to_string(),
        ));
    }

    let v0 = raw[0];
    let v1 = raw[num_segments];
    let last = raw.len() - 1;
    Ok(raw
        .iter()
        .enumerate()
        .map(|(i, &v)| match i {
            0 => -1.0,
            i if i == last => 1.0,
            _ => -1.0 + 2.0 * (v - v0) / (v1 - v0),
        })
        .collect())
}

impl GridData {
    /// Shorthand for [`GridBuilder::new`]
    pub fn builder(num_segments: usize, transcription: Transcription, order: impl Into<PerSegment>) -> GridBuilder {
        GridBuilder::new(num_segments, transcription, order)
    }

    fn assemble(builder: GridBuilder) -> Result<Self, GridError> {
        let GridBuilder {
            num_segments,
            transcription,
            order,
            segment_ends,
            compressed,
            num_steps_per_segment,
        } = builder;

        if num_segments == 0 {
            return Err(GridError::InvalidSegmentBounds(
                "a grid needs at least one segment".to_string(),
            ));
        }
        if matches!(transcription, Transcription::Birkhoff(_)) && num_segments != 1 {
            return Err(GridError::InvalidSegmentBounds(format!(
                "birkhoff grids have exactly one segment, got {num_segments}"
            )));
        }

        let segment_ends = normalized_segment_ends(num_segments, segment_ends)?;
        let transcription_order = order.expand(num_segments)?;
        let num_steps_per_segment = num_steps_per_segment.expand(num_segments)?;

        let mut num_nodes = 0;
        let mut node_weight = Vec::new();
        let mut node_stau = Vec::new();
        let mut node_ptau = Vec::new();
        let mut node_dptau_dstau = Vec::new();
        let mut segment_indices = Vec::with_capacity(num_segments);
        let mut subsets: BTreeMap<Subset, SubsetIndices> = Subset::ALL
            .iter()
            .map(|&s| (s, SubsetIndices::default()))
            .collect();

        for (iseg, &n) in transcription_order.iter().enumerate() {
            let seg = transcription.classify(n, iseg, compressed)?;
            let num_nodes_i = seg.num_nodes();
            let v0 = segment_ends[iseg];
            let v1 = segment_ends[iseg + 1];

            tracing::trace!(segment = iseg, order = n, nodes = num_nodes_i, "classified segment");

            node_stau.extend_from_slice(&seg.nodes.nodes);
            node_weight.extend_from_slice(&seg.nodes.weights);
            // Convex combination keeps the segment ends exact
            node_ptau.extend(
                seg.nodes
                    .nodes
                    .iter()
                    .map(|&s| 0.5 * (1.0 - s) * v0 + 0.5 * (1.0 + s) * v1),
            );
            node_dptau_dstau.extend(std::iter::repeat(0.5 * (v1 - v0)).take(num_nodes_i));

            segment_indices.push(num_nodes..num_nodes + num_nodes_i);

            for (subset, entry) in subsets.iter_mut() {
                let local = seg.indices(*subset);
                let start = entry.node_indices.len();
                entry
                    .node_indices
                    .extend(local.iter().map(|&i| i + num_nodes));
                entry.segment_indices.push(start..start + local.len());
                entry.num_nodes_per_segment.push(local.len());
            }

            num_nodes += num_nodes_i;
        }

        let input_maps = InputMaps {
            state_input_to_disc: make_subset_map(
                &subsets[&Subset::StateInput].node_indices,
                &subsets[&Subset::StateDisc].node_indices,
            ),
            dynamic_control_input_to_disc: make_subset_map(
                &subsets[&Subset::ControlInput].node_indices,
                &subsets[&Subset::ControlDisc].node_indices,
            ),
        };

        tracing::debug!(
            transcription = %transcription,
            num_segments,
            num_nodes,
            compressed,
            "assembled collocation grid"
        );

        Ok(Self {
            transcription,
            num_segments,
            transcription_order,
            num_steps_per_segment,
            segment_ends: DVector::from_vec(segment_ends),
            compressed,
            num_nodes,
            node_weight: DVector::from_vec(node_weight),
            node_stau: DVector::from_vec(node_stau),
            node_ptau: DVector::from_vec(node_ptau),
            node_dptau_dstau: DVector::from_vec(node_dptau_dstau),
            segment_indices,
            subsets,
            input_maps,
        })
    }

    pub fn transcription(&self) -> Transcription {
        self.transcription
    }

    pub fn grid_type(&self) -> NodeFamily {
        self.transcription.grid_type()
    }

    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    pub fn transcription_order(&self) -> &[usize] {
        &self.transcription_order
    }

    pub fn num_steps_per_segment(&self) -> &[usize] {
        &self.num_steps_per_segment
    }

    /// Segment boundaries in phase tau, first -1 and last 1
    pub fn segment_ends(&self) -> &DVector<f64> {
        &self.segment_ends
    }

    pub fn compressed(&self) -> bool {
        self.compressed
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn node_weight(&self) -> &DVector<f64> {
        &self.node_weight
    }

    pub fn node_stau(&self) -> &DVector<f64> {
        &self.node_stau
    }

    pub fn node_ptau(&self) -> &DVector<f64> {
        &self.node_ptau
    }

    pub fn node_dptau_dstau(&self) -> &DVector<f64> {
        &self.node_dptau_dstau
    }

    /// Per segment, the range of global node indices it owns
    pub fn segment_indices(&self) -> &[Range<usize>] {
        &self.segment_indices
    }

    pub fn subset(&self, subset: Subset) -> &SubsetIndices {
        // Every subset is inserted at construction
        &self.subsets[&subset]
    }

    pub fn subset_node_indices(&self, subset: Subset) -> &[usize] {
        &self.subset(subset).node_indices
    }

    pub fn subset_num_nodes(&self, subset: Subset) -> usize {
        self.subset(subset).num_nodes()
    }

    pub fn subset_num_nodes_per_segment(&self, subset: Subset) -> &[usize] {
        &self.subset(subset).num_nodes_per_segment
    }

    pub fn subset_segment_indices(&self, subset: Subset) -> &[Range<usize>] {
        &self.subset(subset).segment_indices
    }

    pub fn input_maps(&self) -> &InputMaps {
        &self.input_maps
    }

    /// Segment-tau locations of a subset's nodes within segment `iseg`
    pub fn subset_node_stau(&self, subset: Subset, iseg: usize) -> Vec<f64> {
        self.subset(subset)
            .segment_nodes(iseg)
            .iter()
            .map(|&i| self.node_stau[i])
            .collect()
    }

    /// Same segment count and segment ends within `tol` of each other
    pub fn is_aligned_with(&self, other: &GridData, tol: f64) -> bool {
        self.num_segments == other.num_segments
            && self
                .segment_ends
                .iter()
                .zip(other.segment_ends.iter())
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    /// Block-diagonal Lagrange matrices mapping `given` values to `eval` values and d/dstau
    ///
    /// ```text
    /// x_eval    = L x_given
    /// dx_eval/dt = D x_given * dstau/dt
    /// ```
    pub fn phase_lagrange_matrices(&self, given: Subset, eval: Subset) -> LagrangeMatrices {
        let mut l_blocks = Vec::with_capacity(self.num_segments);
        let mut d_blocks = Vec::with_capacity(self.num_segments);

        for iseg in 0..self.num_segments {
            let x_given = self.subset_node_stau(given, iseg);
            let x_eval = self.subset_node_stau(eval, iseg);
            let (l, d) = lagrange_matrices(&x_given, &x_eval);
            l_blocks.push(l);
            d_blocks.push(d);
        }

        LagrangeMatrices {
            l: block_diag(&l_blocks),
            d: block_diag(&d_blocks),
        }
    }

    pub fn phase_lagrange_matrices_sparse(&self, given: Subset, eval: Subset) -> SparseLagrangeMatrices {
        let dense = self.phase_lagrange_matrices(given, eval);
        SparseLagrangeMatrices {
            l: to_csr(&dense.l),
            d: to_csr(&dense.d),
        }
    }

    /// Block-diagonal Hermite matrices
    ///
    /// ```text
    /// x_eval    = Ai x_given + dt/dstau Bi xdot_given
    /// xdot_eval = dstau/dt Ad x_given + Bd xdot_given
    /// ```
    pub fn phase_hermite_matrices(&self, given: Subset, eval: Subset) -> HermiteMatrices {
        let mut ai = Vec::with_capacity(self.num_segments);
        let mut bi = Vec::with_capacity(self.num_segments);
        let mut ad = Vec::with_capacity(self.num_segments);
        let mut bd = Vec::with_capacity(self.num_segments);

        for iseg in 0..self.num_segments {
            let x_given = self.subset_node_stau(given, iseg);
            let x_eval = self.subset_node_stau(eval, iseg);
            let h = hermite_matrices(&x_given, &x_eval);
            ai.push(h.ai);
            bi.push(h.bi);
            ad.push(h.ad);
            bd.push(h.bd);
        }

        HermiteMatrices {
            ai: block_diag(&ai),
            bi: block_diag(&bi),
            ad: block_diag(&ad),
            bd: block_diag(&bd),
        }
    }

    pub fn phase_hermite_matrices_sparse(&self, given: Subset, eval: Subset) -> SparseHermiteMatrices {
        let dense = self.phase_hermite_matrices(given, eval);
        SparseHermiteMatrices {
            ai: to_csr(&dense.ai),
            bi: to_csr(&dense.bi),
            ad: to_csr(&dense.ad),
            bd: to_csr(&dense.bd),
        }
    }
}

impl PartialEq for GridData {
    /// Structural equality: same transcription, segment count, exact segment
    /// ends, compression, orders and step counts
    fn eq(&self, other: &Self) -> bool {
        self.transcription == other.transcription
            && self.num_segments == other.num_segments
            && self.segment_ends == other.segment_ends
            && self.compressed == other.compressed
            && self.transcription_order == other.transcription_order
            && self.num_steps_per_segment == other.num_steps_per_segment
    }
}

impl fmt::Display for GridData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GridData(num_seg={}, order={:?})",
            self.num_segments, self.transcription_order
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gl_two_segments(compressed: bool) -> GridData {
        GridData::builder(2, Transcription::GaussLobatto, 5)
            .with_segment_ends(vec![0.0, 3.0, 10.0])
            .with_compressed(compressed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_gauss_lobatto_layout() {
        let grid = gl_two_segments(false);
        assert_eq!(grid.num_nodes(), 10);
        assert_eq!(grid.subset_node_indices(Subset::StateDisc), &[0, 2, 4, 5, 7, 9]);
        assert_eq!(grid.subset_node_indices(Subset::Col), &[1, 3, 6, 8]);
        assert_eq!(grid.segment_indices(), &[0..5, 5..10]);
        assert_eq!(grid.subset_segment_indices(Subset::StateDisc), &[0..3, 3..6]);
        assert_eq!(grid.subset_num_nodes_per_segment(Subset::Col), &[2, 2]);
        assert_eq!(grid.node_ptau()[0], -1.0);
        assert_eq!(grid.node_ptau()[9], 1.0);
    }

    #[test]
    fn test_segment_ends_normalized() {
        let grid = gl_two_segments(false);
        let ends = grid.segment_ends();
        assert_eq!(ends[0], -1.0);
        assert_relative_eq!(ends[1], -0.4, epsilon = 1e-15);
        assert_eq!(ends[2], 1.0);

        // Boundary nodes of adjacent segments coincide in phase tau
        assert_relative_eq!(grid.node_ptau()[4], grid.node_ptau()[5], epsilon = 1e-15);
        assert_relative_eq!(grid.node_dptau_dstau()[0], 0.3, epsilon = 1e-15);
        assert_relative_eq!(grid.node_dptau_dstau()[9], 0.7, epsilon = 1e-15);
    }

    #[test]
    fn test_default_segment_ends() {
        let grid = GridData::builder(4, Transcription::Radau, 3).build().unwrap();
        let ends: Vec<f64> = grid.segment_ends().iter().copied().collect();
        assert_eq!(ends, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_compressed_input_maps() {
        let grid = gl_two_segments(true);
        assert_eq!(grid.subset_node_indices(Subset::StateInput), &[0, 2, 4, 7, 9]);
        assert_eq!(grid.input_maps().state_input_to_disc, vec![0, 1, 2, 2, 3, 4]);
        assert_eq!(grid.subset_num_nodes(Subset::ControlInput), 9);
        assert_eq!(
            grid.input_maps().dynamic_control_input_to_disc,
            vec![0, 1, 2, 3, 4, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_invalid_segment_ends() {
        let err = GridData::builder(2, Transcription::GaussLobatto, 3)
            .with_segment_ends(vec![0.0, 1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidSegmentBounds(_)));

        let err = GridData::builder(2, Transcription::GaussLobatto, 3)
            .with_segment_ends(vec![0.0, 2.0, 1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidSegmentBounds(_)));

        let err = GridData::builder(2, Transcription::GaussLobatto, 3)
            .with_segment_ends(vec![0.0, 0.0, 1.0])
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidSegmentBounds(_)));
    }

    #[test]
    fn test_non_finite_segment_ends() {
        for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let err = GridData::builder(2, Transcription::GaussLobatto, 3)
                .with_segment_ends(vec![0.0, 1.0, bad])
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                GridError::InvalidSegmentBounds("segment ends must be finite".to_string())
            );
        }
    }

    #[test]
    fn test_birkhoff_needs_one_segment() {
        let err = GridData::builder(3, Transcription::Birkhoff(NodeFamily::Lgl), 5)
            .build()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidSegmentBounds(_)));

        let grid = GridData::builder(1, Transcription::Birkhoff(NodeFamily::Cgl), 5)
            .build()
            .unwrap();
        assert_eq!(grid.num_nodes(), 5);
    }

    #[test]
    fn test_zero_segments_rejected() {
        assert!(GridData::builder(0, Transcription::Radau, 3).build().is_err());
    }

    #[test]
    fn test_order_vector_length_checked() {
        let err = GridData::builder(3, Transcription::Radau, vec![3, 4])
            .build()
            .unwrap_err();
        assert_eq!(err, GridError::InvalidOrderLength { expected: 3, got: 2 });

        let grid = GridData::builder(3, Transcription::Radau, vec![4]).build().unwrap();
        assert_eq!(grid.transcription_order(), &[4, 4, 4]);
    }

    #[test]
    fn test_variable_order() {
        let grid = GridData::builder(3, Transcription::GaussLobatto, [3, 5, 7])
            .build()
            .unwrap();
        assert_eq!(grid.num_nodes(), 15);
        assert_eq!(grid.segment_indices(), &[0..3, 3..8, 8..15]);
        assert_eq!(grid.subset_num_nodes_per_segment(Subset::StateDisc), &[2, 3, 4]);
    }

    #[test]
    fn test_equality_and_alignment() {
        let a = gl_two_segments(false);
        let b = gl_two_segments(false);
        let c = gl_two_segments(true);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is_aligned_with(&c, DEFAULT_ALIGNMENT_TOL));

        let radau = GridData::builder(2, Transcription::Radau, 3)
            .with_segment_ends(vec![0.0, 3.0, 10.0])
            .build()
            .unwrap();
        assert_ne!(a, radau);
        assert!(a.is_aligned_with(&radau, DEFAULT_ALIGNMENT_TOL));

        let shifted = GridData::builder(2, Transcription::GaussLobatto, 5)
            .with_segment_ends(vec![0.0, 4.0, 10.0])
            .build()
            .unwrap();
        assert!(!a.is_aligned_with(&shifted, DEFAULT_ALIGNMENT_TOL));
        assert!(a.is_aligned_with(&shifted, 0.5));
    }

    #[test]
    fn test_display() {
        let grid = gl_two_segments(false);
        assert_eq!(grid.to_string(), "GridData(num_seg=2, order=[5, 5])");
    }

    #[test]
    fn test_lagrange_block_structure() {
        let grid = gl_two_segments(false);
        let m = grid.phase_lagrange_matrices(Subset::StateDisc, Subset::Col);
        assert_eq!(m.l.shape(), (4, 6));
        // No coupling across the segment boundary
        for i in 0..2 {
            for j in 3..6 {
                assert_eq!(m.l[(i, j)], 0.0);
                assert_eq!(m.d[(i, j)], 0.0);
            }
        }
        for i in 0..4 {
            assert_relative_eq!(m.l.row(i).sum(), 1.0, epsilon = 1e-13);
        }

        let sparse = grid.phase_lagrange_matrices_sparse(Subset::StateDisc, Subset::Col);
        assert_eq!(sparse.l.shape(), (4, 6));
        assert_eq!(sparse.l.nnz(), 12);
    }

    #[test]
    fn test_hermite_segment_ends_to_all() {
        let grid = gl_two_segments(false);
        let h = grid.phase_hermite_matrices(Subset::SegmentEnds, Subset::All);
        assert_eq!(h.ai.shape(), (10, 4));
        // Hermite interpolation reproduces given values at the given nodes
        assert_relative_eq!(h.ai[(0, 0)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(h.ai[(9, 3)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(h.bd[(5, 2)], 1.0, epsilon = 1e-14);

        let sparse = grid.phase_hermite_matrices_sparse(Subset::SegmentEnds, Subset::All);
        assert_eq!(sparse.bd.shape(), (10, 4));
    }

    #[test]
    fn test_uniform_subsets_degenerate_matrices() {
        let grid = GridData::builder(2, Transcription::Uniform, 4).build().unwrap();
        assert_eq!(grid.num_nodes(), 10);
        assert_eq!(grid.subset_num_nodes(Subset::Col), 0);
        let m = grid.phase_lagrange_matrices(Subset::StateDisc, Subset::Col);
        assert_eq!(m.l.shape(), (0, 0));
        let m = grid.phase_lagrange_matrices(Subset::StateDisc, Subset::All);
        assert_eq!(m.l.shape(), (10, 0));
    }
}
