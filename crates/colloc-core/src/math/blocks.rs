//! Block-diagonal assembly and dense-to-CSR conversion

use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};

/// Block-diagonal composition of per-segment blocks
///
/// Blocks may have zero rows or zero columns; they still shift the offsets of
/// the blocks that follow.
pub fn block_diag(blocks: &[DMatrix<f64>]) -> DMatrix<f64> {
    let rows = blocks.iter().map(|b| b.nrows()).sum();
    let cols = blocks.iter().map(|b| b.ncols()).sum();
    let mut out = DMatrix::zeros(rows, cols);

    let (mut r, mut c) = (0, 0);
    for block in blocks {
        out.view_mut((r, c), block.shape()).copy_from(block);
        r += block.nrows();
        c += block.ncols();
    }
    out
}

/// Convert a dense matrix to CSR, dropping exact zeros
pub fn to_csr(m: &DMatrix<f64>) -> CsMat<f64> {
    let mut tri = TriMat::new((m.nrows(), m.ncols()));
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            let v = m[(i, j)];
            if v != 0.0 {
                tri.add_triplet(i, j, v);
            }
        }
    }
    tri.to_csr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_diag_layout() {
        let a = DMatrix::from_element(2, 1, 1.0);
        let b = DMatrix::from_element(1, 2, 2.0);
        let m = block_diag(&[a, b]);
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(2, 1)], 2.0);
        assert_eq!(m[(2, 2)], 2.0);
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(2, 0)], 0.0);
    }

    #[test]
    fn test_block_diag_empty_blocks() {
        let a = DMatrix::<f64>::zeros(0, 2);
        let b = DMatrix::from_element(1, 1, 3.0);
        let m = block_diag(&[a, b]);
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn test_to_csr_keeps_nonzeros() {
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 2.0, 0.0, 0.0, -3.0]);
        let csr = to_csr(&m);
        assert!(csr.is_csr());
        assert_eq!(csr.shape(), (2, 3));
        assert_eq!(csr.nnz(), 3);
        assert_eq!(csr.get(0, 2), Some(&2.0));
        assert_eq!(csr.get(1, 2), Some(&-3.0));
        assert_eq!(csr.get(1, 0), None);
    }
}
