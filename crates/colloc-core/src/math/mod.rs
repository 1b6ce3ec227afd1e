//! Numerical building blocks for collocation grids
//!
//! Node families on [-1, 1], Lagrange and Hermite interpolation matrices,
//! block-diagonal assembly and conversion of dense operators to sparse form.

pub mod nodes;
pub mod lagrange;
pub mod hermite;
pub mod blocks;

pub use nodes::*;
pub use lagrange::*;
pub use hermite::*;
pub use blocks::*;
