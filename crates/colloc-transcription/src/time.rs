//! Physical time at every grid node
//!
//! ```text
//! t        = t_initial + 0.5 * (ptau + 1) * t_duration
//! t_phase  = t - t_initial
//! dt_dstau = 0.5 * t_duration * dptau_dstau
//! ```

use colloc_core::GridData;
use nalgebra::DVector;

use crate::error::TranscriptionError;

/// Node times of one phase
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    pub t_initial: f64,
    pub t_duration: f64,
    /// Time at each node
    pub t: DVector<f64>,
    /// Elapsed phase time at each node
    pub t_phase: DVector<f64>,
    /// Segment-tau to time scale at each node
    pub dt_dstau: DVector<f64>,
}

impl TimeGrid {
    pub fn new(grid: &GridData, t_initial: f64, t_duration: f64) -> Result<Self, TranscriptionError> {
        // `!(x > 0)` also rejects NaN
        if !(t_duration > 0.0) {
            return Err(TranscriptionError::InvalidDuration(t_duration));
        }

        let t_phase = grid.node_ptau().map(|ptau| 0.5 * (ptau + 1.0) * t_duration);
        let t = t_phase.add_scalar(t_initial);
        let dt_dstau = grid.node_dptau_dstau() * (0.5 * t_duration);

        Ok(Self {
            t_initial,
            t_duration,
            t,
            t_phase,
            dt_dstau,
        })
    }

    pub fn t_final(&self) -> f64 {
        self.t_initial + self.t_duration
    }

    pub fn num_nodes(&self) -> usize {
        self.t.len()
    }
}
