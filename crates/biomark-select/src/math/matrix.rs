use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Zero;

use crate::math::vector::Array1;

/// Dense row-major matrix. Rows are samples, columns are features.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    values: Vec<T>,
    n_rows: usize,
    n_cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec((n_rows, n_cols): (usize, usize), values: Vec<T>) -> Result<Self, ShapeError> {
        if values.len() != n_rows * n_cols {
            return Err(ShapeError {
                shape: (n_rows, n_cols),
                len: values.len(),
            });
        }
        Ok(Array2 {
            values,
            n_rows,
            n_cols,
        })
    }

    pub fn nrows(&self) -> usize {
        self.n_rows
    }

    pub fn ncols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// One sample's feature values.
    pub fn row_slice(&self, row: usize) -> &[T] {
        let start = row * self.n_cols;
        &self.values[start..start + self.n_cols]
    }

    /// Samples in order; yields nothing for a zero-width matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.n_rows).map(move |r| self.row_slice(r))
    }

    /// One feature's values across all samples.
    pub fn column(&self, col: usize) -> Array1<T>
    where
        T: Clone,
    {
        assert!(col < self.n_cols, "column {} out of bounds ({} columns)", col, self.n_cols);
        self.rows().map(|row| row[col].clone()).collect()
    }

    /// Copy the given columns, in the given order, into a new matrix.
    pub fn select_columns(&self, cols: &[usize]) -> Array2<T>
    where
        T: Clone,
    {
        let values = self
            .rows()
            .flat_map(|row| cols.iter().map(move |&c| row[c].clone()))
            .collect();
        Array2 {
            values,
            n_rows: self.n_rows,
            n_cols: cols.len(),
        }
    }
}

impl<T: Clone + Zero> Array2<T> {
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Array2 {
            values: vec![T::zero(); n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }
}

impl Array2<f64> {
    /// Per-column arithmetic means; zeros for a matrix without rows.
    pub fn column_means(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_cols];
        for row in self.rows() {
            for (s, v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        let n = self.n_rows.max(1) as f64;
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Matrix-vector product `X w`.
    pub fn dot_vec(&self, w: &[f64]) -> Vec<f64> {
        assert_eq!(w.len(), self.n_cols, "dot_vec requires one weight per column");
        self.rows()
            .map(|row| row.iter().zip(w).map(|(a, b)| a * b).sum())
            .collect()
    }

    /// Copy into an `ndarray` matrix for the linfa learners.
    pub fn to_ndarray(&self) -> ndarray::Array2<f64> {
        ndarray::Array2::from_shape_fn((self.n_rows, self.n_cols), |(r, c)| self[(r, c)])
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.values[row * self.n_cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.values[row * self.n_cols + col]
    }
}

/// Buffer length does not match the requested shape.
#[derive(Debug, Clone)]
pub struct ShapeError {
    shape: (usize, usize),
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot view {} values as a {:?} matrix",
            self.len, self.shape
        )
    }
}

impl Error for ShapeError {}
