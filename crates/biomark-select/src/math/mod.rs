//! Small ndarray-like containers used throughout the crate.
//!
//! `Array2` is a row-major sample x feature matrix and `Array1` a plain
//! vector with the handful of reductions the selectors and the t-test need.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
