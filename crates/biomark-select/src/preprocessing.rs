//! Per-feature standardization ahead of the SVM ranking.
//!
//! The scaler is fit on the whole expression matrix; there is no held-out
//! split in this pipeline.
use crate::math::Array2;

/// Column means and population standard deviations.
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Floor for the stddev; constant columns map to all zeros.
    const MIN_STD: f64 = 1e-6;
}

pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    assert!(
        x.nrows() > 0 && x.ncols() > 0,
        "cannot fit a scaler on an empty matrix"
    );

    let mean = x.column_means();
    let mut sq_dev = vec![0.0f64; x.ncols()];
    for row in x.rows() {
        for ((acc, v), m) in sq_dev.iter_mut().zip(row).zip(&mean) {
            *acc += (v - m) * (v - m);
        }
    }
    let n = x.nrows() as f64;
    let std = sq_dev
        .into_iter()
        .map(|s| (s / n).sqrt().max(Scaler::MIN_STD))
        .collect();

    Scaler { mean, std }
}

/// Apply `(v - mean) / std` column-wise.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Array2<f64> {
    let (n_rows, n_cols) = x.shape();
    let mut out = Array2::zeros(n_rows, n_cols);
    for (r, row) in x.rows().enumerate() {
        for (c, v) in row.iter().enumerate() {
            out[(r, c)] = (v - sc.mean[c]) / sc.std[c];
        }
    }
    out
}

pub fn fit_transform(x: &Array2<f64>) -> Array2<f64> {
    transform_all(x, &fit_scaler(x))
}
