//! Interpolation of input-node values onto every node
//!
//! Controls are free at the `control_input` nodes and states at the
//! `state_input` nodes. Both are first gathered to their discretization
//! subset through the grid's input maps, then pushed through the phase
//! Lagrange matrices onto `all`:
//!
//! ```text
//! u_disc = u_input[input_to_disc]
//! u      = L u_disc
//! du/dt  = (D u_disc) / dt_dstau
//! d2u/dt2 = (D D_dd u_disc) / dt_dstau²
//! ```

use colloc_core::{GridData, Subset};
use nalgebra::{DMatrix, DVector};

use crate::error::TranscriptionError;

/// Interpolated values and time derivatives at every node
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedValues {
    pub values: DMatrix<f64>,
    pub rates: DMatrix<f64>,
    /// Second time derivatives; only filled for controls
    pub rates2: Option<DMatrix<f64>>,
}

fn gather(
    what: &'static str,
    input: &DMatrix<f64>,
    num_input: usize,
    input_to_disc: &[usize],
) -> Result<DMatrix<f64>, TranscriptionError> {
    if input.nrows() != num_input {
        return Err(TranscriptionError::DimensionMismatch {
            what,
            expected: num_input,
            got: input.nrows(),
        });
    }
    Ok(input.select_rows(input_to_disc.iter()))
}

fn check_dt_dstau(dt_dstau: &DVector<f64>, num_nodes: usize) -> Result<(), TranscriptionError> {
    if dt_dstau.len() != num_nodes {
        return Err(TranscriptionError::DimensionMismatch {
            what: "dt_dstau",
            expected: num_nodes,
            got: dt_dstau.len(),
        });
    }
    Ok(())
}

/// Divide row `i` of `m` by `scale[i]^power`
fn scale_rows(mut m: DMatrix<f64>, scale: &DVector<f64>, power: i32) -> DMatrix<f64> {
    for (mut row, &s) in m.row_iter_mut().zip(scale.iter()) {
        row /= s.powi(power);
    }
    m
}

/// Control values, rates and second rates at every node
#[derive(Debug, Clone)]
pub struct ControlInterp {
    num_nodes: usize,
    num_input: usize,
    input_to_disc: Vec<usize>,
    l: DMatrix<f64>,
    d: DMatrix<f64>,
    d2: DMatrix<f64>,
}

impl ControlInterp {
    pub fn new(grid: &GridData) -> Self {
        let to_all = grid.phase_lagrange_matrices(Subset::ControlDisc, Subset::All);
        let to_disc = grid.phase_lagrange_matrices(Subset::ControlDisc, Subset::ControlDisc);
        let d2 = &to_all.d * &to_disc.d;

        Self {
            num_nodes: grid.num_nodes(),
            num_input: grid.subset_num_nodes(Subset::ControlInput),
            input_to_disc: grid.input_maps().dynamic_control_input_to_disc.clone(),
            l: to_all.l,
            d: to_all.d,
            d2,
        }
    }

    /// Number of rows expected in the control input
    pub fn num_input_nodes(&self) -> usize {
        self.num_input
    }

    /// Interpolate controls given at the `control_input` nodes
    ///
    /// `u_input` has one row per input node and one column per flattened
    /// control element.
    pub fn interpolate(
        &self,
        u_input: &DMatrix<f64>,
        dt_dstau: &DVector<f64>,
    ) -> Result<InterpolatedValues, TranscriptionError> {
        check_dt_dstau(dt_dstau, self.num_nodes)?;
        let u_disc = gather("control input rows", u_input, self.num_input, &self.input_to_disc)?;

        Ok(InterpolatedValues {
            values: &self.l * &u_disc,
            rates: scale_rows(&self.d * &u_disc, dt_dstau, 1),
            rates2: Some(scale_rows(&self.d2 * &u_disc, dt_dstau, 2)),
        })
    }
}

/// State values and rates at every node
#[derive(Debug, Clone)]
pub struct StateInterp {
    num_nodes: usize,
    num_input: usize,
    input_to_disc: Vec<usize>,
    l: DMatrix<f64>,
    d: DMatrix<f64>,
}

impl StateInterp {
    pub fn new(grid: &GridData) -> Self {
        let to_all = grid.phase_lagrange_matrices(Subset::StateDisc, Subset::All);

        Self {
            num_nodes: grid.num_nodes(),
            num_input: grid.subset_num_nodes(Subset::StateInput),
            input_to_disc: grid.input_maps().state_input_to_disc.clone(),
            l: to_all.l,
            d: to_all.d,
        }
    }

    pub fn num_input_nodes(&self) -> usize {
        self.num_input
    }

    /// Interpolate states given at the `state_input` nodes
    pub fn interpolate(
        &self,
        x_input: &DMatrix<f64>,
        dt_dstau: &DVector<f64>,
    ) -> Result<InterpolatedValues, TranscriptionError> {
        check_dt_dstau(dt_dstau, self.num_nodes)?;
        let x_disc = gather("state input rows", x_input, self.num_input, &self.input_to_disc)?;

        Ok(InterpolatedValues {
            values: &self.l * &x_disc,
            rates: scale_rows(&self.d * &x_disc, dt_dstau, 1),
            rates2: None,
        })
    }
}
