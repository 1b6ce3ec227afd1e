//! Named node subsets and index maps between them

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Role a node plays within a segment
///
/// Subsets overlap: `all` contains every node, `state_disc` and `col`
/// alternate for Gauss-Lobatto, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    /// State discretization nodes
    StateDisc,
    /// State nodes that carry free variables (shared boundary nodes dropped when compressed)
    StateInput,
    /// Control discretization nodes
    ControlDisc,
    /// Control nodes that carry free variables
    ControlInput,
    /// First and last node of each segment
    SegmentEnds,
    /// Collocation nodes
    Col,
    /// Every node
    All,
    /// Nodes at which a solution is reported
    Solution,
}

impl Subset {
    /// All subsets in canonical order
    pub const ALL: [Subset; 8] = [
        Subset::StateDisc,
        Subset::StateInput,
        Subset::ControlDisc,
        Subset::ControlInput,
        Subset::SegmentEnds,
        Subset::Col,
        Subset::All,
        Subset::Solution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Subset::StateDisc => "state_disc",
            Subset::StateInput => "state_input",
            Subset::ControlDisc => "control_disc",
            Subset::ControlInput => "control_input",
            Subset::SegmentEnds => "segment_ends",
            Subset::Col => "col",
            Subset::All => "all",
            Subset::Solution => "solution",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subset {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subset::ALL
            .iter()
            .copied()
            .find(|subset| subset.name() == s)
            .ok_or_else(|| GridError::UnknownSubset(s.to_string()))
    }
}

/// Map values stored at the `from` subset onto the `to` subset
///
/// Both arguments are global node indices. Entry `i` of the result is
/// `i - k`, where `k` counts the `to` entries up to and including `i` that
/// are absent from `from`. A node dropped by compression therefore reads the
/// value of the input node just before it, which is the shared boundary node.
/// The result is non-decreasing; a leading absent entry clamps to 0.
pub fn make_subset_map(from: &[usize], to: &[usize]) -> Vec<usize> {
    let present: HashSet<usize> = from.iter().copied().collect();
    let mut offset = 0;
    to.iter()
        .enumerate()
        .map(|(i, idx)| {
            if !present.contains(idx) {
                offset += 1;
            }
            i.saturating_sub(offset)
        })
        .collect()
}
