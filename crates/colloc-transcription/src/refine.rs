//! Carry a solution from one grid onto another
//!
//! Used after grid refinement: the new grid may change transcription or
//! per-segment order, but shares the old grid's segment boundaries. Each
//! segment's `solution` values are re-interpolated in segment tau.

use colloc_core::grid::DEFAULT_ALIGNMENT_TOL;
use colloc_core::math::{block_diag, lagrange_matrices};
use colloc_core::{GridData, Subset};
use nalgebra::DMatrix;

use crate::error::TranscriptionError;

/// Block-diagonal interpolation matrix from `old` solution nodes to `new` solution nodes
pub fn solution_interp_matrix(old: &GridData, new: &GridData) -> Result<DMatrix<f64>, TranscriptionError> {
    if !old.is_aligned_with(new, DEFAULT_ALIGNMENT_TOL) {
        return Err(TranscriptionError::MisalignedGrids);
    }

    let blocks: Vec<DMatrix<f64>> = (0..old.num_segments())
        .map(|iseg| {
            let x_given = old.subset_node_stau(Subset::Solution, iseg);
            let x_eval = new.subset_node_stau(Subset::Solution, iseg);
            lagrange_matrices(&x_given, &x_eval).0
        })
        .collect();

    Ok(block_diag(&blocks))
}

/// Interpolate `values`, one row per `old` solution node, onto the `new` solution nodes
pub fn interpolate_solution(
    old: &GridData,
    new: &GridData,
    values: &DMatrix<f64>,
) -> Result<DMatrix<f64>, TranscriptionError> {
    let expected = old.subset_num_nodes(Subset::Solution);
    if values.nrows() != expected {
        return Err(TranscriptionError::DimensionMismatch {
            what: "solution rows",
            expected,
            got: values.nrows(),
        });
    }

    let interp = solution_interp_matrix(old, new)?;
    tracing::debug!(
        from = %old,
        to = %new,
        columns = values.ncols(),
        "interpolating solution across grids"
    );
    Ok(interp * values)
}
