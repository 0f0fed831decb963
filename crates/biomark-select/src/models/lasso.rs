//! L1-regularized least squares, fit with `linfa-elasticnet`.
//!
//! Minimizes `(1 / (2n)) * ||y - Xw - b||^2 + alpha * ||w||_1` (an elastic
//! net with `l1_ratio = 1`). The intercept is not penalized. Coordinate
//! descent stops once the duality gap falls under the tolerance.
use linfa::traits::Fit;
use linfa::Dataset;
use linfa_elasticnet::ElasticNet;
use ndarray::Array1;

use crate::config::LassoParams;
use crate::error::SelectionError;
use crate::math::Array2;
use crate::models::model_trait::ImportanceModel;

pub struct Lasso {
    params: LassoParams,
    coef: Vec<f64>,
    intercept: f64,
    n_iter: usize,
    duality_gap: f64,
}

impl Lasso {
    pub fn new(params: LassoParams) -> Self {
        Lasso {
            params,
            coef: Vec::new(),
            intercept: 0.0,
            n_iter: 0,
            duality_gap: 0.0,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coef
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coordinate descent sweeps used by the last fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Duality gap of the last fit.
    pub fn duality_gap(&self) -> f64 {
        self.duality_gap
    }

    pub fn predict(&self, x: &Array2<f64>) -> Vec<f64> {
        x.dot_vec(&self.coef)
            .into_iter()
            .map(|v| v + self.intercept)
            .collect()
    }
}

impl ImportanceModel for Lasso {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<(), SelectionError> {
        let (n, p) = x.shape();
        if n == 0 || p == 0 {
            return Err(SelectionError::EmptyInput);
        }
        if n != y.len() {
            return Err(SelectionError::LengthMismatch {
                rows: n,
                labels: y.len(),
            });
        }

        let targets: Array1<f64> = y.iter().map(|&l| l as f64).collect();
        let dataset = Dataset::new(x.to_ndarray(), targets);

        let model = ElasticNet::<f64>::params()
            .penalty(self.params.alpha)
            .l1_ratio(1.0)
            .with_intercept(true)
            .tolerance(self.params.tol)
            .max_iterations(self.params.max_iter as u32)
            .fit(&dataset)
            .map_err(|e| SelectionError::ModelFit {
                model: "Lasso",
                message: e.to_string(),
            })?;

        self.coef = model.hyperplane().to_vec();
        self.intercept = model.intercept();
        self.n_iter = model.n_steps() as usize;
        self.duality_gap = model.duality_gap();

        if self.n_iter >= self.params.max_iter {
            log::warn!(
                "Lasso did not converge after {} iterations (alpha = {}, duality gap = {:.3e}); consider raising max_iter",
                self.params.max_iter,
                self.params.alpha,
                self.duality_gap
            );
        }
        Ok(())
    }

    /// `|coef|` per feature.
    fn feature_importances(&self) -> Vec<f64> {
        self.coef.iter().map(|c| c.abs()).collect()
    }

    fn name(&self) -> &str {
        "Lasso"
    }
}
