//! Lagrange interpolation and differentiation matrices
//!
//! For given nodes x_j and evaluation points ξ_i, builds
//!
//! ```text
//! L[i, j] = ℓ_j(ξ_i)        (values)
//! D[i, j] = ℓ'_j(ξ_i)       (derivatives w.r.t. the node coordinate)
//! ```
//!
//! using barycentric weights w_j = 1 / Π_{k≠j} (x_j - x_k).

use nalgebra::DMatrix;

/// Barycentric weights of the given nodes
pub fn barycentric_weights(x_given: &[f64]) -> Vec<f64> {
    x_given
        .iter()
        .enumerate()
        .map(|(j, &xj)| {
            let prod: f64 = x_given
                .iter()
                .enumerate()
                .filter(|&(k, _)| k != j)
                .map(|(_, &xk)| xj - xk)
                .product();
            1.0 / prod
        })
        .collect()
}

/// Interpolation matrix `L` and derivative matrix `D` mapping values at
/// `x_given` to values and derivatives at `x_eval`
///
/// Both matrices have shape (x_eval.len(), x_given.len()). Empty inputs
/// produce empty matrices.
///
/// # Arguments
/// * `x_given` - Distinct nodes where values are known
/// * `x_eval` - Points to evaluate at
///
/// # Returns
/// `(L, D)` where `L * y` interpolates and `D * y` differentiates
pub fn lagrange_matrices(x_given: &[f64], x_eval: &[f64]) -> (DMatrix<f64>, DMatrix<f64>) {
    let nd = x_given.len();
    let ni = x_eval.len();
    let wb = barycentric_weights(x_given);

    let mut l = DMatrix::zeros(ni, nd);
    let mut d = DMatrix::zeros(ni, nd);

    for (i, &xi) in x_eval.iter().enumerate() {
        for j in 0..nd {
            let mut value = wb[j];
            for (k, &xk) in x_given.iter().enumerate() {
                if k != j {
                    value *= xi - xk;
                }
            }
            l[(i, j)] = value;

            let mut deriv = 0.0;
            for k in (0..nd).filter(|&k| k != j) {
                let prod: f64 = x_given
                    .iter()
                    .enumerate()
                    .filter(|&(m, _)| m != j && m != k)
                    .map(|(_, &xm)| xi - xm)
                    .product();
                deriv += wb[j] * prod;
            }
            d[(i, j)] = deriv;
        }
    }

    (l, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::nodes::lgl;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    #[test]
    fn test_identity_on_own_nodes() {
        let x = lgl(5).unwrap().nodes;
        let (l, _) = lagrange_matrices(&x, &x);
        assert_relative_eq!(l, DMatrix::identity(5, 5), epsilon = 1e-13);
    }

    #[test]
    fn test_reproduces_cubic() {
        let x = lgl(4).unwrap().nodes;
        let xi = vec![-0.9, -0.3, 0.1, 0.75];
        let f = |t: f64| 2.0 * t.powi(3) - t + 0.5;
        let df = |t: f64| 6.0 * t.powi(2) - 1.0;

        let (l, d) = lagrange_matrices(&x, &xi);
        let y = DVector::from_iterator(x.len(), x.iter().map(|&t| f(t)));
        let values = &l * &y;
        let derivs = &d * &y;

        for (i, &t) in xi.iter().enumerate() {
            assert_relative_eq!(values[i], f(t), epsilon = 1e-12);
            assert_relative_eq!(derivs[i], df(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_derivative_rows_sum_to_zero() {
        let x = lgl(6).unwrap().nodes;
        let (l, d) = lagrange_matrices(&x, &[-0.2, 0.4]);
        for i in 0..2 {
            assert_relative_eq!(l.row(i).sum(), 1.0, epsilon = 1e-13);
            assert_relative_eq!(d.row(i).sum(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let (l, d) = lagrange_matrices(&[], &[0.0, 0.5]);
        assert_eq!(l.shape(), (2, 0));
        assert_eq!(d.shape(), (2, 0));

        let (l, _) = lagrange_matrices(&[-1.0, 1.0], &[]);
        assert_eq!(l.shape(), (0, 2));
    }
}
