use std::collections::HashMap;
use std::fmt;

use crate::error::SelectionError;

/// The three selectors whose votes are intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Lasso,
    RandomForest,
    SvmRfe,
}

impl SelectorKind {
    /// Column header used in the scored-intersection output.
    pub fn column_name(&self) -> &'static str {
        match self {
            SelectorKind::Lasso => "Lasso",
            SelectorKind::RandomForest => "Random Forest",
            SelectorKind::SvmRfe => "SVM-RFE",
        }
    }
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// One score per dataset feature, sorted best-first.
///
/// For Lasso and the forest "best" is the highest importance. For SVM-RFE
/// the score is the elimination rank and rank 1 comes first.
#[derive(Debug, Clone)]
pub struct FeatureImportanceTable {
    pub selector: SelectorKind,
    entries: Vec<FeatureImportance>,
    index: HashMap<String, usize>,
}

impl FeatureImportanceTable {
    /// Build a table from scores given in dataset column order.
    pub fn from_scores(
        selector: SelectorKind,
        feature_names: &[String],
        scores: &[f64],
        descending: bool,
    ) -> Result<Self, SelectionError> {
        if feature_names.len() != scores.len() {
            return Err(SelectionError::FeatureCountMismatch {
                columns: scores.len(),
                names: feature_names.len(),
            });
        }
        let mut entries: Vec<FeatureImportance> = feature_names
            .iter()
            .zip(scores)
            .map(|(f, &s)| FeatureImportance {
                feature: f.clone(),
                importance: s,
            })
            .collect();
        // Stable sort keeps column order among ties.
        entries.sort_by(|a, b| {
            let ord = a
                .importance
                .partial_cmp(&b.importance)
                .unwrap_or(std::cmp::Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.feature.clone(), i))
            .collect();
        Ok(FeatureImportanceTable {
            selector,
            entries,
            index,
        })
    }

    pub fn entries(&self) -> &[FeatureImportance] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn score(&self, feature: &str) -> Result<f64, SelectionError> {
        self.index
            .get(feature)
            .map(|&i| self.entries[i].importance)
            .ok_or_else(|| SelectionError::UnknownFeature(feature.to_string()))
    }

    /// Keep every feature whose score passes `keep`, preserving table order.
    pub fn select<F>(&self, keep: F) -> SelectedFeatureSet
    where
        F: Fn(f64) -> bool,
    {
        SelectedFeatureSet {
            selector: self.selector,
            features: self
                .entries
                .iter()
                .filter(|e| keep(e.importance))
                .map(|e| e.feature.clone())
                .collect(),
        }
    }

    pub fn log_top(&self, n: usize) {
        log::info!("[{}] top {} of {} features:", self.selector, n.min(self.len()), self.len());
        for e in self.entries.iter().take(n) {
            log::info!("  {:<24} {:.6}", e.feature, e.importance);
        }
    }
}

/// Names of the features a selector keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFeatureSet {
    pub selector: SelectorKind,
    pub features: Vec<String>,
}

impl SelectedFeatureSet {
    pub fn contains(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["A", "B", "C"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn descending_table_orders_best_first() {
        let t = FeatureImportanceTable::from_scores(SelectorKind::Lasso, &names(), &[0.1, 0.0, 0.5], true).unwrap();
        let order: Vec<&str> = t.entries().iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(t.score("B").unwrap(), 0.0);
        assert!(t.score("Z").is_err());
    }

    #[test]
    fn ascending_table_keeps_column_order_among_ties() {
        let t = FeatureImportanceTable::from_scores(SelectorKind::SvmRfe, &names(), &[2.0, 1.0, 1.0], false).unwrap();
        let order: Vec<&str> = t.entries().iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn select_positive() {
        let t = FeatureImportanceTable::from_scores(SelectorKind::RandomForest, &names(), &[0.3, 0.0, 0.7], true).unwrap();
        let s = t.select(|v| v > 0.0);
        assert_eq!(s.features, vec!["C", "A"]);
        assert!(s.contains("A") && !s.contains("B"));
        assert_eq!(SelectorKind::RandomForest.to_string(), "Random Forest");
    }

    #[test]
    fn score_count_must_match_names() {
        let err = FeatureImportanceTable::from_scores(SelectorKind::Lasso, &names(), &[0.1, 0.2], true)
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::FeatureCountMismatch {
                columns: 2,
                names: 3
            }
        );
    }
}
