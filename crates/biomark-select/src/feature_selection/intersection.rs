//! Consensus of the selectors and the side-by-side score table.
use std::collections::HashSet;

use serde::Serialize;

use crate::error::SelectionError;
use crate::feature_selection::importance::{FeatureImportanceTable, SelectedFeatureSet, SelectorKind};

/// Features kept by every selector, listed in dataset column order.
///
/// An empty set is a valid result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntersectionSet {
    features: Vec<String>,
}

impl IntersectionSet {
    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

/// Intersect the selected sets. `feature_order` fixes the output order.
pub fn intersect(sets: &[&SelectedFeatureSet], feature_order: &[String]) -> IntersectionSet {
    if sets.is_empty() {
        return IntersectionSet::default();
    }
    let lookups: Vec<HashSet<&str>> = sets
        .iter()
        .map(|s| s.features.iter().map(String::as_str).collect())
        .collect();

    let mut seen = HashSet::new();
    let mut features = Vec::new();
    for f in feature_order {
        if lookups.iter().all(|l| l.contains(f.as_str())) && seen.insert(f.as_str()) {
            features.push(f.clone());
        }
    }
    IntersectionSet { features }
}

/// One row of the scored intersection output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFeature {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Lasso")]
    pub lasso: f64,
    #[serde(rename = "Random Forest")]
    pub random_forest: f64,
    #[serde(rename = "SVM-RFE")]
    pub svm_rfe: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoredIntersectionTable {
    pub rows: Vec<ScoredFeature>,
}

impl ScoredIntersectionTable {
    pub const HEADER: [&'static str; 4] = ["Feature", "Lasso", "Random Forest", "SVM-RFE"];

    /// Look up each intersected feature's score in the three tables.
    pub fn build(
        intersection: &IntersectionSet,
        lasso: &FeatureImportanceTable,
        random_forest: &FeatureImportanceTable,
        svm_rfe: &FeatureImportanceTable,
    ) -> Result<Self, SelectionError> {
        debug_assert_eq!(lasso.selector, SelectorKind::Lasso);
        debug_assert_eq!(random_forest.selector, SelectorKind::RandomForest);
        debug_assert_eq!(svm_rfe.selector, SelectorKind::SvmRfe);

        let rows = intersection
            .features()
            .iter()
            .map(|f| {
                Ok(ScoredFeature {
                    feature: f.clone(),
                    lasso: lasso.score(f)?,
                    random_forest: random_forest.score(f)?,
                    svm_rfe: svm_rfe.score(f)?,
                })
            })
            .collect::<Result<Vec<_>, SelectionError>>()?;
        Ok(ScoredIntersectionTable { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
