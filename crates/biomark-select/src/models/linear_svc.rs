//! Linear-kernel C-SVC backed by `linfa-svm`.
//!
//! The solver keeps the bias outside the regularizer. RFE consumes the
//! squared primal weights, read back from the separating hyperplane.
use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::Array1;

use crate::error::{check_binary_input, SelectionError};
use crate::math::Array2;
use crate::models::model_trait::ImportanceModel;

#[derive(Debug, Clone)]
pub struct LinearSvcParams {
    pub c: f64,
    /// Stopping tolerance of the SMO solver.
    pub eps: f64,
}

impl Default for LinearSvcParams {
    fn default() -> Self {
        Self { c: 1.0, eps: 1e-3 }
    }
}

pub struct LinearSvc {
    params: LinearSvcParams,
    model: Option<Svm<f64, bool>>,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearSvc {
    pub fn new(params: LinearSvcParams) -> Self {
        LinearSvc {
            params,
            model: None,
            weights: Vec::new(),
            bias: 0.0,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// `w.x + b` per row; positive means case.
    pub fn decision_function(&self, x: &Array2<f64>) -> Vec<f64> {
        x.dot_vec(&self.weights)
            .into_iter()
            .map(|v| v + self.bias)
            .collect()
    }

    /// Class predicted by the fitted solver, `true` for case. Empty before `fit`.
    pub fn predict(&self, x: &Array2<f64>) -> Vec<bool> {
        match &self.model {
            Some(model) => {
                let predictions: Array1<bool> = model.predict(&x.to_ndarray());
                predictions.to_vec()
            }
            None => Vec::new(),
        }
    }
}

impl ImportanceModel for LinearSvc {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<(), SelectionError> {
        check_binary_input(x.nrows(), x.ncols(), y)?;
        let p = x.ncols();

        let targets: Array1<bool> = y.iter().map(|&l| l == 1).collect();
        let dataset = Dataset::new(x.to_ndarray(), targets);

        let params: SvmParams<f64, bool> = Svm::<f64, bool>::params()
            .eps(self.params.eps)
            .pos_neg_weights(self.params.c, self.params.c)
            .linear_kernel();
        let model = <SvmParams<f64, bool> as Fit<_, _, _>>::fit(&params, &dataset).map_err(|e| {
            SelectionError::ModelFit {
                model: "Linear SVM",
                message: e.to_string(),
            }
        })?;

        // The kernel is linear, so the decision value is affine in x: probing
        // the origin and each unit vector recovers b and w.
        let origin = ndarray::Array1::<f64>::zeros(p);
        let offset = model.weighted_sum(&origin.view());
        let mut weights = Vec::with_capacity(p);
        let mut unit = origin;
        for j in 0..p {
            unit[j] = 1.0;
            weights.push(model.weighted_sum(&unit.view()) - offset);
            unit[j] = 0.0;
        }
        let bias = offset - model.rho;

        log::trace!(
            "Linear SVM fit on {} features with {} support vectors",
            p,
            model.nsupport()
        );

        self.weights = weights;
        self.bias = bias;
        self.model = Some(model);
        Ok(())
    }

    /// Squared primal weights.
    fn feature_importances(&self) -> Vec<f64> {
        self.weights.iter().map(|w| w * w).collect()
    }

    fn name(&self) -> &str {
        "Linear SVM"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_linearly_separable_data() {
        // Feature 0 carries the class; feature 1 is small noise.
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![2.0, 0.1, 1.5, -0.2, 1.8, 0.0, -2.0, 0.2, -1.6, -0.1, -1.9, 0.1],
        )
        .unwrap();
        let y = [1, 1, 1, 0, 0, 0];
        let mut svc = LinearSvc::new(LinearSvcParams::default());
        svc.fit(&x, &y).unwrap();

        let scores = svc.decision_function(&x);
        for (s, &label) in scores.iter().zip(&y) {
            assert_eq!(*s > 0.0, label == 1, "score {} for label {}", s, label);
        }
        assert_eq!(svc.predict(&x), vec![true, true, true, false, false, false]);
        let imp = svc.feature_importances();
        assert!(imp[0] > imp[1], "importances: {:?}", imp);
        assert!(svc.coefficients()[0] > 0.0);
    }

    #[test]
    fn large_offset_is_absorbed_by_an_unpenalized_bias() {
        // Cases sit just above controls, far from the origin. A penalized
        // bias cannot reach -17 and flips the weight sign.
        let x = Array2::from_shape_vec((5, 1), vec![10.0, 10.2, 10.4, 11.0, 11.2]).unwrap();
        let y = [0, 0, 0, 1, 1];
        let mut svc = LinearSvc::new(LinearSvcParams::default());
        svc.fit(&x, &y).unwrap();

        let w = svc.coefficients()[0];
        assert!(w > 0.0, "weight {}", w);
        assert!((w - 1.6).abs() < 0.3, "weight {}", w);
        assert_eq!(svc.predict(&x), vec![false, false, false, true, true]);
        let scores = svc.decision_function(&x);
        for (s, &label) in scores.iter().zip(&y) {
            assert_eq!(*s > 0.0, label == 1, "score {} for label {}", s, label);
        }
    }

    #[test]
    fn refit_resets_dimensions() {
        let x3 = Array2::from_shape_vec((4, 3), vec![1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0])
            .unwrap();
        let y = [1, 0, 1, 0];
        let mut svc = LinearSvc::new(LinearSvcParams::default());
        svc.fit(&x3, &y).unwrap();
        assert_eq!(svc.feature_importances().len(), 3);
        svc.fit(&x3.select_columns(&[0]), &y).unwrap();
        assert_eq!(svc.feature_importances().len(), 1);
    }

    #[test]
    fn single_class_is_rejected() {
        let x = Array2::from_shape_vec((2, 1), vec![1.0, 2.0]).unwrap();
        let mut svc = LinearSvc::new(LinearSvcParams::default());
        assert_eq!(svc.fit(&x, &[0, 0]).unwrap_err(), SelectionError::SingleClass(0));
    }
}
