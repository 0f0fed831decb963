use crate::error::SelectionError;
use crate::math::Array2;

/// A model that, once fit, scores every input column.
///
/// Each selector wraps one implementation; recursive elimination refits the
/// same model on shrinking column subsets, so `fit` must fully reset any
/// state left from a previous call.
pub trait ImportanceModel {
    /// Fit the model. `y` uses the crate convention (1 for case, 0 for control).
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<(), SelectionError>;

    /// Non-negative per-column importance from the last `fit`, in column order.
    fn feature_importances(&self) -> Vec<f64>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "model"
    }
}
