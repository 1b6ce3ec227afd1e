//! Node families on the reference interval [-1, 1]
//!
//! Each family returns strictly increasing node locations together with
//! matching quadrature weights:
//!
//! - Legendre-Gauss-Lobatto (LGL): roots of (1-x²)P'_{n-1}(x), both endpoints included
//! - Legendre-Gauss-Radau (LGR): roots of P_{n-1}(x) + P_n(x), left endpoint included
//! - Chebyshev-Gauss-Lobatto (CGL): Chebyshev extrema -cos(πk/N), Clenshaw-Curtis weights
//! - Uniform: equally spaced, trapezoidal weights (1, 2, ..., 2, 1)

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Newton iteration cap for the Legendre root finders
const MAX_NEWTON_ITERATIONS: usize = 100;

/// Convergence threshold on the largest node update
const NEWTON_TOLERANCE: f64 = 1e-15;

/// Node locations and quadrature weights for one node set
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet {
    pub nodes: Vec<f64>,
    pub weights: Vec<f64>,
}

impl NodeSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Polynomial node family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeFamily {
    Lgl,
    Lgr,
    Cgl,
    Uniform,
}

impl NodeFamily {
    /// Short tag used in configuration and error messages
    pub fn tag(&self) -> &'static str {
        match self {
            NodeFamily::Lgl => "lgl",
            NodeFamily::Lgr => "lgr",
            NodeFamily::Cgl => "cgl",
            NodeFamily::Uniform => "uniform",
        }
    }

    /// Generate `n` nodes and weights of this family
    ///
    /// LGR nodes are generated without the appended right endpoint; use
    /// [`lgr`] directly for the continuity variant.
    pub fn generate(&self, n: usize) -> Result<NodeSet, GridError> {
        match self {
            NodeFamily::Lgl => lgl(n),
            NodeFamily::Lgr => lgr(n, false),
            NodeFamily::Cgl => cgl(n),
            NodeFamily::Uniform => uniform(n),
        }
    }
}

impl fmt::Display for NodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeFamily {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lgl" => Ok(NodeFamily::Lgl),
            "lgr" => Ok(NodeFamily::Lgr),
            "cgl" => Ok(NodeFamily::Cgl),
            "uniform" => Ok(NodeFamily::Uniform),
            _ => Err(GridError::InvalidGridType(s.to_string())),
        }
    }
}

fn check_count(family: &'static str, n: usize) -> Result<(), GridError> {
    if n < 2 {
        return Err(GridError::InvalidNodeCount { family, n });
    }
    Ok(())
}

/// Evaluate the Legendre polynomials P_{k-1}(x) and P_k(x) by the three-term recurrence
fn legendre_pair(k: usize, x: f64) -> (f64, f64) {
    if k == 0 {
        return (0.0, 1.0);
    }
    let mut p_prev = 1.0;
    let mut p = x;
    for j in 2..=k {
        let jf = j as f64;
        let p_next = ((2.0 * jf - 1.0) * x * p - (jf - 1.0) * p_prev) / jf;
        p_prev = p;
        p = p_next;
    }
    (p_prev, p)
}

/// Legendre-Gauss-Lobatto nodes and weights
///
/// Newton iteration on (1-x²)P'_N(x) starting from the Chebyshev-Lobatto
/// points, with N = n - 1. Weights are w_j = 2 / (N(N+1) P_N(x_j)²).
///
/// # Arguments
/// * `n` - Number of nodes, at least 2
///
/// # Returns
/// Nodes in ascending order from -1 to 1 with weights summing to 2
pub fn lgl(n: usize) -> Result<NodeSet, GridError> {
    check_count("lgl", n)?;
    let order = n - 1;
    let nf = order as f64;

    let mut nodes: Vec<f64> = (0..n).map(|j| -(PI * j as f64 / nf).cos()).collect();
    nodes[0] = -1.0;
    nodes[order] = 1.0;

    for x in nodes.iter_mut().take(order).skip(1) {
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (p_nm1, p_n) = legendre_pair(order, *x);
            // x_new = x - (x P_N - P_{N-1}) / ((N+1) P_N)
            let update = (*x * p_n - p_nm1) / ((nf + 1.0) * p_n);
            *x -= update;
            if update.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
    }
    symmetrize(&mut nodes);

    let weights = nodes
        .iter()
        .map(|&x| {
            let (_, p_n) = legendre_pair(order, x);
            2.0 / (nf * (nf + 1.0) * p_n * p_n)
        })
        .collect();

    Ok(NodeSet { nodes, weights })
}

/// Legendre-Gauss-Radau nodes and weights
///
/// The `n` LGR nodes include x = -1 and exclude x = 1. With
/// `include_endpoint`, x = 1 is appended with zero quadrature weight so the
/// returned set has `n + 1` entries.
///
/// # Arguments
/// * `n` - Number of LGR nodes, at least 2
/// * `include_endpoint` - Append the non-collocated right endpoint
///
/// # Returns
/// Nodes in ascending order with their quadrature weights
pub fn lgr(n: usize, include_endpoint: bool) -> Result<NodeSet, GridError> {
    check_count("lgr", n)?;
    let nf = n as f64;

    let mut nodes: Vec<f64> = (0..n)
        .map(|k| -(2.0 * PI * k as f64 / (2.0 * nf - 1.0)).cos())
        .collect();
    nodes[0] = -1.0;

    for x in nodes.iter_mut().skip(1) {
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (p_nm1, p_n) = legendre_pair(n, *x);
            let update = ((1.0 - *x) / nf) * (p_nm1 + p_n) / (p_nm1 - p_n);
            *x -= update;
            if update.abs() < NEWTON_TOLERANCE {
                break;
            }
        }
    }
    nodes.sort_by(f64::total_cmp);

    let mut weights: Vec<f64> = nodes
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if i == 0 {
                2.0 / (nf * nf)
            } else {
                let (p_nm1, _) = legendre_pair(n, x);
                (1.0 - x) / (nf * p_nm1).powi(2)
            }
        })
        .collect();

    if include_endpoint {
        nodes.push(1.0);
        weights.push(0.0);
    }

    Ok(NodeSet { nodes, weights })
}

/// Chebyshev-Gauss-Lobatto nodes with Clenshaw-Curtis weights
pub fn cgl(n: usize) -> Result<NodeSet, GridError> {
    check_count("cgl", n)?;
    let order = n - 1;
    let nf = order as f64;

    let theta: Vec<f64> = (0..n).map(|k| PI * k as f64 / nf).collect();
    let mut nodes: Vec<f64> = theta.iter().map(|t| -t.cos()).collect();
    nodes[0] = -1.0;
    nodes[order] = 1.0;
    symmetrize(&mut nodes);

    let weights = theta
        .iter()
        .enumerate()
        .map(|(k, &t)| {
            let c_k = if k == 0 || k == order { 1.0 } else { 2.0 };
            let mut sum = 1.0;
            for j in 1..=order / 2 {
                let b_j = if 2 * j == order { 1.0 } else { 2.0 };
                let jf = j as f64;
                sum -= b_j / (4.0 * jf * jf - 1.0) * (2.0 * jf * t).cos();
            }
            c_k / nf * sum
        })
        .collect();

    Ok(NodeSet { nodes, weights })
}

/// Equally spaced nodes with un-normalized trapezoidal weights
pub fn uniform(n: usize) -> Result<NodeSet, GridError> {
    check_count("uniform", n)?;
    let last = n - 1;
    let nodes = (0..n)
        .map(|i| {
            if i == last {
                1.0
            } else {
                -1.0 + 2.0 * i as f64 / last as f64
            }
        })
        .collect();
    let weights = (0..n)
        .map(|i| if i == 0 || i == last { 1.0 } else { 2.0 })
        .collect();
    Ok(NodeSet { nodes, weights })
}

/// Force exact antisymmetry about zero, including an exact 0.0 midpoint
fn symmetrize(nodes: &mut [f64]) {
    let n = nodes.len();
    for i in 0..n / 2 {
        let half = 0.5 * (nodes[n - 1 - i] - nodes[i]);
        nodes[i] = -half;
        nodes[n - 1 - i] = half;
    }
    if n % 2 == 1 {
        nodes[n / 2] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn integrate_monomial(set: &NodeSet, k: i32) -> f64 {
        set.nodes
            .iter()
            .zip(set.weights.iter())
            .map(|(&x, &w)| w * x.powi(k))
            .sum()
    }

    fn exact_monomial(k: i32) -> f64 {
        if k % 2 == 0 {
            2.0 / (k + 1) as f64
        } else {
            0.0
        }
    }

    #[test]
    fn test_rejects_small_counts() {
        for family in [NodeFamily::Lgl, NodeFamily::Lgr, NodeFamily::Cgl, NodeFamily::Uniform] {
            assert!(matches!(
                family.generate(1),
                Err(GridError::InvalidNodeCount { n: 1, .. })
            ));
            assert!(family.generate(0).is_err());
        }
    }

    #[test]
    fn test_lgl_known_nodes() {
        let set = lgl(3).unwrap();
        assert_eq!(set.nodes, vec![-1.0, 0.0, 1.0]);
        assert_relative_eq!(set.weights[0], 1.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(set.weights[1], 4.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(set.weights[2], 1.0 / 3.0, epsilon = 1e-14);

        let set = lgl(5).unwrap();
        let a = (3.0_f64 / 7.0).sqrt();
        assert_relative_eq!(set.nodes[1], -a, epsilon = 1e-14);
        assert_relative_eq!(set.nodes[3], a, epsilon = 1e-14);
        assert_relative_eq!(set.weights[0], 0.1, epsilon = 1e-14);
        assert_relative_eq!(set.weights[1], 49.0 / 90.0, epsilon = 1e-14);
        assert_relative_eq!(set.weights[2], 32.0 / 45.0, epsilon = 1e-14);
    }

    #[test]
    fn test_lgl_quadrature_exactness() {
        // n points integrate degree 2n-3 exactly
        for n in 2..=10 {
            let set = lgl(n).unwrap();
            for k in 0..=(2 * n as i32 - 3) {
                assert_relative_eq!(integrate_monomial(&set, k), exact_monomial(k), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_lgr_known_nodes() {
        // Two-point Radau: -1 and 1/3, weights 1/2 and 3/2
        let set = lgr(2, false).unwrap();
        assert_eq!(set.nodes[0], -1.0);
        assert_relative_eq!(set.nodes[1], 1.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(set.weights[0], 0.5, epsilon = 1e-14);
        assert_relative_eq!(set.weights[1], 1.5, epsilon = 1e-14);
    }

    #[test]
    fn test_lgr_quadrature_exactness() {
        // n points integrate degree 2n-2 exactly
        for n in 2..=10 {
            let set = lgr(n, false).unwrap();
            for k in 0..=(2 * n as i32 - 2) {
                assert_relative_eq!(integrate_monomial(&set, k), exact_monomial(k), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_lgr_with_endpoint() {
        let set = lgr(4, true).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(*set.nodes.last().unwrap(), 1.0);
        assert_eq!(*set.weights.last().unwrap(), 0.0);
        let sum: f64 = set.weights.iter().sum();
        assert_relative_eq!(sum, 2.0, epsilon = 1e-13);
    }

    #[test]
    fn test_cgl_nodes_and_weights() {
        let set = cgl(3).unwrap();
        assert_eq!(set.nodes, vec![-1.0, 0.0, 1.0]);
        // Simpson's rule
        assert_relative_eq!(set.weights[0], 1.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(set.weights[1], 4.0 / 3.0, epsilon = 1e-14);

        for n in 2..=12 {
            let set = cgl(n).unwrap();
            let sum: f64 = set.weights.iter().sum();
            assert_relative_eq!(sum, 2.0, epsilon = 1e-13);
            assert!(set.weights.iter().all(|&w| w > 0.0));
            assert!(set.nodes.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_uniform_trapezoid_weights() {
        let set = uniform(5).unwrap();
        assert_eq!(set.nodes, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(set.weights, vec![1.0, 2.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_family_tags() {
        assert_eq!("LGL".parse::<NodeFamily>().unwrap(), NodeFamily::Lgl);
        assert_eq!("cgl".parse::<NodeFamily>().unwrap(), NodeFamily::Cgl);
        assert!(matches!(
            "legendre".parse::<NodeFamily>(),
            Err(GridError::InvalidGridType(_))
        ));
        assert_eq!(NodeFamily::Lgr.to_string(), "lgr");
    }
}
