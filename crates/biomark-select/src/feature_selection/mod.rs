//! Feature selection utilities.
//!
//! Model-based selectors (Lasso, random forest, SVM-RFE), the ranked
//! importance tables they produce, and the consensus intersection.
pub mod importance;
pub mod intersection;
pub mod rfe;
pub mod selectors;

pub use importance::{FeatureImportance, FeatureImportanceTable, SelectedFeatureSet, SelectorKind};
pub use intersection::{intersect, IntersectionSet, ScoredFeature, ScoredIntersectionTable};
pub use selectors::{lasso_selection, random_forest_selection, svm_rfe_selection, SelectorOutcome};
