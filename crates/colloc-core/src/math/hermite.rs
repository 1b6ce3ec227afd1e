//! Hermite interpolation matrices
//!
//! Given values and derivatives at nodes x_j, the Hermite interpolant is
//!
//! ```text
//! p(ξ) = Σ_j A_j(ξ) y_j + B_j(ξ) y'_j
//! A_j(ξ) = [1 - 2 ℓ'_j(x_j)(ξ - x_j)] ℓ_j(ξ)²
//! B_j(ξ) = (ξ - x_j) ℓ_j(ξ)²
//! ```
//!
//! which has degree 2n - 1 for n given nodes.

use nalgebra::DMatrix;

use super::lagrange::lagrange_matrices;

/// The four Hermite operators for one pair of node sets
///
/// - `ai`: values at given nodes -> values at eval nodes
/// - `bi`: derivatives at given nodes -> values at eval nodes
/// - `ad`: values at given nodes -> derivatives at eval nodes
/// - `bd`: derivatives at given nodes -> derivatives at eval nodes
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteMatrices {
    pub ai: DMatrix<f64>,
    pub bi: DMatrix<f64>,
    pub ad: DMatrix<f64>,
    pub bd: DMatrix<f64>,
}

/// Build the Hermite matrices mapping (values, derivatives) at `x_given`
/// to (values, derivatives) at `x_eval`
pub fn hermite_matrices(x_given: &[f64], x_eval: &[f64]) -> HermiteMatrices {
    let n_given = x_given.len();
    let n_eval = x_eval.len();

    let (l, dl) = lagrange_matrices(x_given, x_eval);
    let (_, dl_given) = lagrange_matrices(x_given, x_given);

    let mut ai = DMatrix::zeros(n_eval, n_given);
    let mut bi = DMatrix::zeros(n_eval, n_given);
    let mut ad = DMatrix::zeros(n_eval, n_given);
    let mut bd = DMatrix::zeros(n_eval, n_given);

    for j in 0..n_given {
        let c_j = dl_given[(j, j)];
        for i in 0..n_eval {
            let dx = x_eval[i] - x_given[j];
            let lij = l[(i, j)];
            let dlij = dl[(i, j)];
            let l2 = lij * lij;

            ai[(i, j)] = (1.0 - 2.0 * c_j * dx) * l2;
            bi[(i, j)] = dx * l2;
            ad[(i, j)] = -2.0 * c_j * l2 + (1.0 - 2.0 * c_j * dx) * 2.0 * lij * dlij;
            bd[(i, j)] = l2 + 2.0 * dx * lij * dlij;
        }
    }

    HermiteMatrices { ai, bi, ad, bd }
}
