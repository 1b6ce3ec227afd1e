//! Interleave component
//!
//! Merges values known only at the state discretization nodes and values
//! known only at the collocation nodes into one array over every node.
//! Values are stored node-major: one row per node, one column per flattened
//! element of the variable's per-node shape.
//!
//! Variables that name the same upstream (disc, col) source pair share input
//! storage. Each still gets its own output.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use colloc_core::{GridData, Subset};
use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};

use crate::error::TranscriptionError;

/// Constant Jacobians of one interleaved output
#[derive(Debug, Clone, PartialEq)]
pub struct InterleaveJacobian {
    /// d(all values) / d(disc values)
    pub wrt_disc: CsMat<f64>,
    /// d(all values) / d(col values)
    pub wrt_col: CsMat<f64>,
}

/// Registration record of one interleaved variable
#[derive(Debug, Clone)]
pub struct InterleaveVar {
    pub shape: Vec<usize>,
    pub units: Option<String>,
    pub disc_source: String,
    pub col_source: String,
    slot: usize,
    all_values: DMatrix<f64>,
    jacobian: InterleaveJacobian,
}

impl InterleaveVar {
    /// Flattened per-node element count
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }
}

/// Input storage shared by every variable wired to the same sources
#[derive(Debug, Clone)]
struct InputSlot {
    size: usize,
    disc_values: DMatrix<f64>,
    col_values: DMatrix<f64>,
}

/// Interleaves disc and col values onto all nodes of one grid
#[derive(Debug, Clone)]
pub struct InterleaveComp {
    grid: Arc<GridData>,
    vars: BTreeMap<String, InterleaveVar>,
    sources: HashMap<(String, String), usize>,
    slots: Vec<InputSlot>,
}

/// Ones at `(node * size + k, row * size + k)` for each `row`-th entry of `node_indices`
fn scatter_jacobian(node_indices: &[usize], size: usize, num_nodes: usize) -> CsMat<f64> {
    let mut tri = TriMat::new((num_nodes * size, node_indices.len() * size));
    for (row, &node) in node_indices.iter().enumerate() {
        for k in 0..size {
            tri.add_triplet(node * size + k, row * size + k, 1.0);
        }
    }
    tri.to_csr()
}

impl InterleaveComp {
    pub fn new(grid: Arc<GridData>) -> Self {
        Self {
            grid,
            vars: BTreeMap::new(),
            sources: HashMap::new(),
            slots: Vec::new(),
        }
    }

    pub fn grid(&self) -> &GridData {
        &self.grid
    }

    /// Register a variable to interleave
    ///
    /// Returns `Ok(true)` when the variable wired a new pair of sources, so
    /// the caller must connect them, and `Ok(false)` when `name` was already
    /// registered or its sources are already wired by another variable.
    pub fn register(
        &mut self,
        name: &str,
        shape: Vec<usize>,
        units: Option<String>,
        disc_source: &str,
        col_source: &str,
    ) -> Result<bool, TranscriptionError> {
        if self.vars.contains_key(name) {
            return Ok(false);
        }

        let size: usize = shape.iter().product();
        let num_disc = self.grid.subset_num_nodes(Subset::StateDisc);
        let num_col = self.grid.subset_num_nodes(Subset::Col);
        let num_nodes = self.grid.num_nodes();

        let key = (disc_source.to_string(), col_source.to_string());
        let (slot, added_source) = match self.sources.get(&key) {
            Some(&slot) => {
                let expected = self.slots[slot].size;
                if expected != size {
                    return Err(TranscriptionError::ShapeMismatch {
                        name: name.to_string(),
                        expected,
                        got: size,
                    });
                }
                tracing::debug!(name, disc_source, col_source, "aliased interleave source");
                (slot, false)
            }
            None => {
                let slot = self.slots.len();
                self.slots.push(InputSlot {
                    size,
                    disc_values: DMatrix::zeros(num_disc, size),
                    col_values: DMatrix::zeros(num_col, size),
                });
                self.sources.insert(key, slot);
                tracing::debug!(name, disc_source, col_source, "wired interleave source");
                (slot, true)
            }
        };

        let jacobian = InterleaveJacobian {
            wrt_disc: scatter_jacobian(self.grid.subset_node_indices(Subset::StateDisc), size, num_nodes),
            wrt_col: scatter_jacobian(self.grid.subset_node_indices(Subset::Col), size, num_nodes),
        };

        self.vars.insert(
            name.to_string(),
            InterleaveVar {
                shape,
                units,
                disc_source: disc_source.to_string(),
                col_source: col_source.to_string(),
                slot,
                all_values: DMatrix::zeros(num_nodes, size),
                jacobian,
            },
        );

        Ok(added_source)
    }

    pub fn var(&self, name: &str) -> Option<&InterleaveVar> {
        self.vars.get(name)
    }

    /// Registered variable names in sorted order
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Result<&InterleaveVar, TranscriptionError> {
        self.vars
            .get(name)
            .ok_or_else(|| TranscriptionError::UnknownVariable(name.to_string()))
    }

    /// Set the disc and col input values of `name`
    ///
    /// Writes the shared slot, so every variable aliasing the same sources
    /// sees the new values.
    pub fn set_inputs(
        &mut self,
        name: &str,
        disc_values: &DMatrix<f64>,
        col_values: &DMatrix<f64>,
    ) -> Result<(), TranscriptionError> {
        let slot_idx = self.lookup(name)?.slot;
        let slot = &mut self.slots[slot_idx];

        check_shape("disc rows", slot.disc_values.nrows(), disc_values.nrows())?;
        check_shape("disc columns", slot.size, disc_values.ncols())?;
        check_shape("col rows", slot.col_values.nrows(), col_values.nrows())?;
        check_shape("col columns", slot.size, col_values.ncols())?;

        slot.disc_values.copy_from(disc_values);
        slot.col_values.copy_from(col_values);
        Ok(())
    }

    /// Scatter every variable's inputs onto all nodes
    ///
    /// Positions covered by neither subset keep their previous values.
    pub fn compute(&mut self) {
        let disc_idxs = self.grid.subset_node_indices(Subset::StateDisc);
        let col_idxs = self.grid.subset_node_indices(Subset::Col);

        for var in self.vars.values_mut() {
            let slot = &self.slots[var.slot];
            for (row, &node) in disc_idxs.iter().enumerate() {
                var.all_values.row_mut(node).copy_from(&slot.disc_values.row(row));
            }
            for (row, &node) in col_idxs.iter().enumerate() {
                var.all_values.row_mut(node).copy_from(&slot.col_values.row(row));
            }
        }
    }

    /// Values of `name` at all nodes as of the last [`compute`](Self::compute)
    pub fn all_values(&self, name: &str) -> Result<&DMatrix<f64>, TranscriptionError> {
        Ok(&self.lookup(name)?.all_values)
    }

    pub fn jacobian(&self, name: &str) -> Result<&InterleaveJacobian, TranscriptionError> {
        Ok(&self.lookup(name)?.jacobian)
    }
}

fn check_shape(what: &'static str, expected: usize, got: usize) -> Result<(), TranscriptionError> {
    if expected != got {
        return Err(TranscriptionError::DimensionMismatch { what, expected, got });
    }
    Ok(())
}
