//! Transcription families and their per-segment subset classifiers
//!
//! Each classifier takes the segment's node parameter `n`, the segment index
//! and the compression flag, and returns the local indices of every
//! [`Subset`] together with the segment's nodes and weights on [-1, 1].
//!
//! | family                   | nodes     | state_disc      | col             |
//! |--------------------------|-----------|-----------------|-----------------|
//! | Gauss-Lobatto (n odd)    | n (LGL)   | 0, 2, ..., n-1  | 1, 3, ..., n-2  |
//! | Radau                    | n+1 (LGR) | 0..=n           | 0..n            |
//! | Chebyshev-Gauss-Lobatto  | n (CGL)   | 0..n            | 0..n            |
//! | Birkhoff                 | n         | 0..n            | 0..n            |
//! | Uniform                  | n+1       | (none)          | (none)          |

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::math::nodes::{cgl, lgl, lgr, uniform, NodeFamily, NodeSet};

use super::subset::Subset;

/// Local subset indices for one segment
pub type SubsetMap = BTreeMap<Subset, Vec<usize>>;

/// Classification of one segment's nodes
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentNodes {
    pub subsets: SubsetMap,
    pub nodes: NodeSet,
}

impl SegmentNodes {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn indices(&self, subset: Subset) -> &[usize] {
        self.subsets.get(&subset).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Transcription family
///
/// Birkhoff carries the node family that supplies its locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transcription {
    GaussLobatto,
    Radau,
    ChebyshevGaussLobatto,
    Birkhoff(NodeFamily),
    Uniform,
}

impl Transcription {
    pub fn tag(&self) -> &'static str {
        match self {
            Transcription::GaussLobatto => "gauss-lobatto",
            Transcription::Radau => "radau-ps",
            Transcription::ChebyshevGaussLobatto => "chebyshev-gauss-lobatto",
            Transcription::Birkhoff(_) => "birkhoff",
            Transcription::Uniform => "uniform",
        }
    }

    /// Node family backing this transcription
    pub fn grid_type(&self) -> NodeFamily {
        match self {
            Transcription::GaussLobatto => NodeFamily::Lgl,
            Transcription::Radau => NodeFamily::Lgr,
            Transcription::ChebyshevGaussLobatto => NodeFamily::Cgl,
            Transcription::Birkhoff(grid) => *grid,
            Transcription::Uniform => NodeFamily::Uniform,
        }
    }

    /// Translate a nodes-per-segment count into the classifier's node parameter
    ///
    /// Radau appends the right endpoint and uniform counts intervals, so both
    /// take one less than the number of nodes they produce.
    pub fn order_for_nodes(&self, nodes_per_seg: usize) -> usize {
        match self {
            Transcription::Radau | Transcription::Uniform => nodes_per_seg.saturating_sub(1),
            _ => nodes_per_seg,
        }
    }

    /// Classify the nodes of segment `seg_idx`
    pub fn classify(&self, n: usize, seg_idx: usize, compressed: bool) -> Result<SegmentNodes, GridError> {
        match self {
            Transcription::GaussLobatto => gauss_lobatto_subsets(n, seg_idx, compressed),
            Transcription::Radau => radau_subsets(n, seg_idx, compressed),
            Transcription::ChebyshevGaussLobatto => {
                chebyshev_gauss_lobatto_subsets(n, seg_idx, compressed)
            }
            Transcription::Birkhoff(grid) => birkhoff_subsets(n, *grid, seg_idx, compressed),
            Transcription::Uniform => uniform_subsets(n, seg_idx, compressed),
        }
    }
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transcription::Birkhoff(grid) => write!(f, "birkhoff({})", grid),
            other => f.write_str(other.tag()),
        }
    }
}

impl FromStr for Transcription {
    type Err = GridError;

    /// Parse a case-insensitive tag; `birkhoff` defaults to CGL nodes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radau" | "radau-ps" | "lgr" => Ok(Transcription::Radau),
            "gausslobatto" | "gauss-lobatto" | "lgl" => Ok(Transcription::GaussLobatto),
            "chebyshev-gauss-lobatto" | "cgl" => Ok(Transcription::ChebyshevGaussLobatto),
            "birkhoff" => Ok(Transcription::Birkhoff(NodeFamily::Cgl)),
            "uniform" => Ok(Transcription::Uniform),
            _ => Err(GridError::UnknownTranscription(s.to_string())),
        }
    }
}

fn check_min_nodes(family: &'static str, n: usize) -> Result<(), GridError> {
    if n < 2 {
        return Err(GridError::InvalidNodeCount { family, n });
    }
    Ok(())
}

fn range(start: usize, end: usize) -> Vec<usize> {
    (start..end).collect()
}

fn stride2(start: usize, end: usize) -> Vec<usize> {
    (start..end).step_by(2).collect()
}

fn subset_map(entries: [(Subset, Vec<usize>); 8]) -> SubsetMap {
    entries.into_iter().collect()
}

/// Gauss-Lobatto: `n` LGL nodes, `n` odd
///
/// State discretization nodes are the even local indices and collocation
/// nodes the odd ones. When compressed, segments after the first drop local
/// index 0 from `state_input` and `control_input`.
pub fn gauss_lobatto_subsets(n: usize, seg_idx: usize, compressed: bool) -> Result<SegmentNodes, GridError> {
    check_min_nodes("gauss-lobatto", n)?;
    if n % 2 == 0 {
        return Err(GridError::InvalidNodeCount { family: "gauss-lobatto", n });
    }
    let first = !compressed || seg_idx == 0;

    let subsets = subset_map([
        (Subset::StateDisc, stride2(0, n)),
        (Subset::StateInput, if first { stride2(0, n) } else { stride2(2, n) }),
        (Subset::ControlDisc, range(0, n)),
        (Subset::ControlInput, if first { range(0, n) } else { range(1, n) }),
        (Subset::SegmentEnds, vec![0, n - 1]),
        (Subset::Col, stride2(1, n)),
        (Subset::All, range(0, n)),
        (Subset::Solution, range(0, n)),
    ]);

    Ok(SegmentNodes { subsets, nodes: lgl(n)? })
}

/// Radau: `n` LGR collocation nodes plus the appended right endpoint
///
/// Controls live only at the `n` collocation nodes, so compression never
/// affects `control_input`.
pub fn radau_subsets(n: usize, seg_idx: usize, compressed: bool) -> Result<SegmentNodes, GridError> {
    check_min_nodes("radau-ps", n)?;
    let first = !compressed || seg_idx == 0;

    let subsets = subset_map([
        (Subset::StateDisc, range(0, n + 1)),
        (Subset::StateInput, if first { range(0, n + 1) } else { range(1, n + 1) }),
        (Subset::ControlDisc, range(0, n)),
        (Subset::ControlInput, range(0, n)),
        (Subset::SegmentEnds, vec![0, n]),
        (Subset::Col, range(0, n)),
        (Subset::All, range(0, n + 1)),
        (Subset::Solution, range(0, n + 1)),
    ]);

    Ok(SegmentNodes { subsets, nodes: lgr(n, true)? })
}

/// Chebyshev-Gauss-Lobatto: `n` CGL nodes, every node is a state node
///
/// When compressed, later segments drop only local node 0 from
/// `state_input` and `control_input`. That node duplicates the previous
/// segment's last node; dropping every other node instead would leave disc
/// nodes with no input node at the same location.
pub fn chebyshev_gauss_lobatto_subsets(
    n: usize,
    seg_idx: usize,
    compressed: bool,
) -> Result<SegmentNodes, GridError> {
    check_min_nodes("chebyshev-gauss-lobatto", n)?;
    let first = !compressed || seg_idx == 0;

    let subsets = subset_map([
        (Subset::StateDisc, range(0, n)),
        (Subset::StateInput, if first { range(0, n) } else { range(1, n) }),
        (Subset::ControlDisc, range(0, n)),
        (Subset::ControlInput, if first { range(0, n) } else { range(1, n) }),
        (Subset::SegmentEnds, vec![0, n - 1]),
        (Subset::Col, range(0, n)),
        (Subset::All, range(0, n)),
        (Subset::Solution, range(0, n)),
    ]);

    Ok(SegmentNodes { subsets, nodes: cgl(n)? })
}

/// Birkhoff: a single segment in which every subset is every node
///
/// `seg_idx` and `compressed` are accepted for a uniform classifier
/// signature and ignored.
pub fn birkhoff_subsets(
    n: usize,
    grid: NodeFamily,
    _seg_idx: usize,
    _compressed: bool,
) -> Result<SegmentNodes, GridError> {
    check_min_nodes("birkhoff", n)?;

    let nodes = match grid {
        NodeFamily::Lgl => lgl(n)?,
        NodeFamily::Lgr => lgr(n, false)?,
        NodeFamily::Cgl => cgl(n)?,
        NodeFamily::Uniform => return Err(GridError::InvalidGridType(grid.tag().to_string())),
    };

    let subsets = subset_map([
        (Subset::StateDisc, range(0, n)),
        (Subset::StateInput, range(0, n)),
        (Subset::ControlDisc, range(0, n)),
        (Subset::ControlInput, range(0, n)),
        (Subset::SegmentEnds, vec![0, n - 1]),
        (Subset::Col, range(0, n)),
        (Subset::All, range(0, n)),
        (Subset::Solution, range(0, n)),
    ]);

    Ok(SegmentNodes { subsets, nodes })
}

/// Uniform: `n + 1` equally spaced nodes
///
/// Only `segment_ends`, `all` and `solution` are populated; equally spaced
/// nodes are not used to define interpolating polynomials.
pub fn uniform_subsets(n: usize, _seg_idx: usize, _compressed: bool) -> Result<SegmentNodes, GridError> {
    check_min_nodes("uniform", n)?;

    let subsets = subset_map([
        (Subset::StateDisc, Vec::new()),
        (Subset::StateInput, Vec::new()),
        (Subset::ControlDisc, Vec::new()),
        (Subset::ControlInput, Vec::new()),
        (Subset::SegmentEnds, vec![0, n]),
        (Subset::Col, Vec::new()),
        (Subset::All, range(0, n + 1)),
        (Subset::Solution, range(0, n + 1)),
    ]);

    Ok(SegmentNodes { subsets, nodes: uniform(n + 1)? })
}
