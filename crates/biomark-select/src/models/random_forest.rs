use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::ForestParams;
use crate::error::{check_binary_input, SelectionError};
use crate::math::Array2;
use crate::models::model_trait::ImportanceModel;

/// One bagged Gini tree and the columns it was grown on.
struct ForestMember {
    tree: DecisionTree<f64, usize>,
    features: Vec<usize>,
}

/// Bagged ensemble of `linfa-trees` CART classifiers over random feature
/// subspaces.
///
/// Tree `t` draws its bootstrap rows and its columns from a generator seeded
/// with `seed + t`, so a fit is reproducible regardless of how rayon
/// schedules the trees.
pub struct RandomForest {
    params: ForestParams,
    members: Vec<ForestMember>,
    importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        RandomForest {
            params,
            members: Vec::new(),
            importances: Vec::new(),
        }
    }

    pub fn n_trees(&self) -> usize {
        self.members.len()
    }

    /// Fraction of trees voting case, one value per row.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Vec<f64> {
        let records = x.to_ndarray();
        let mut votes = vec![0usize; x.nrows()];
        for member in &self.members {
            let sub = records.select(Axis(1), &member.features);
            let predicted: Array1<usize> = member.tree.predict(&sub);
            for (v, &class) in votes.iter_mut().zip(predicted.iter()) {
                *v += class;
            }
        }
        let n_trees = self.members.len().max(1) as f64;
        votes.into_iter().map(|v| v as f64 / n_trees).collect()
    }

    /// Fraction of rows whose majority vote matches `y`.
    pub fn accuracy(&self, x: &Array2<f64>, y: &[i32]) -> f64 {
        let proba = self.predict_proba(x);
        let hits = proba
            .iter()
            .zip(y)
            .filter(|&(&p, &t)| (p > 0.5) == (t == 1))
            .count();
        hits as f64 / y.len().max(1) as f64
    }
}

impl ImportanceModel for RandomForest {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<(), SelectionError> {
        check_binary_input(x.nrows(), x.ncols(), y)?;

        let n_samples = x.nrows();
        let n_features = x.ncols();
        let subspace = self.params.max_features.resolve(n_features);
        let seed = self.params.seed;
        let bootstrap = self.params.bootstrap;

        let tree_params = DecisionTree::<f64, usize>::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(self.params.max_depth)
            .min_weight_split(self.params.min_samples_split.max(2) as f32)
            .min_weight_leaf(1.0);

        log::debug!(
            "Growing {} trees ({} of {} features per tree, bootstrap = {})",
            self.params.n_estimators,
            subspace,
            n_features,
            bootstrap
        );

        let records = x.to_ndarray();
        let targets: Array1<usize> = y.iter().map(|&l| l as usize).collect();

        let members = (0..self.params.n_estimators)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let rows: Vec<usize> = if bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };
                let mut features = sample(&mut rng, n_features, subspace).into_vec();
                features.sort_unstable();

                let dataset = Dataset::new(
                    records.select(Axis(0), &rows).select(Axis(1), &features),
                    targets.select(Axis(0), &rows),
                );
                let tree = tree_params
                    .fit(&dataset)
                    .map_err(|e| SelectionError::ModelFit {
                        model: "Random Forest",
                        message: e.to_string(),
                    })?;
                Ok(ForestMember { tree, features })
            })
            .collect::<Result<Vec<_>, SelectionError>>()?;

        // Trees that never split carry no importance information.
        let mut importances = vec![0.0f64; n_features];
        let mut informative = 0usize;
        for member in &members {
            let raw: Vec<f64> = member
                .tree
                .feature_importance()
                .into_iter()
                .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
                .collect();
            let total: f64 = raw.iter().sum();
            if total <= 0.0 {
                continue;
            }
            informative += 1;
            for (&col, v) in member.features.iter().zip(&raw) {
                importances[col] += v / total;
            }
        }
        if informative > 0 {
            let total: f64 = importances.iter().sum();
            importances.iter_mut().for_each(|v| *v /= total);
        } else {
            log::warn!("No tree in the forest found a split; all importances are zero");
        }
        log::debug!("{} of {} trees split at least once", informative, members.len());

        self.members = members;
        self.importances = importances;
        Ok(())
    }

    fn feature_importances(&self) -> Vec<f64> {
        self.importances.clone()
    }

    fn name(&self) -> &str {
        "Random Forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaxFeatures;

    fn separable() -> (Array2<f64>, Vec<i32>) {
        // Feature 1 separates the classes; features 0 and 2 are noise.
        let x = Array2::from_shape_vec(
            (10, 3),
            vec![
                0.1, 1.0, 5.0, 0.4, -1.0, 5.1, 0.6, 1.1, 4.9, 0.9, -1.2, 5.0, 1.2, 0.9, 5.2,
                1.5, -0.8, 4.8, 1.8, 1.2, 5.0, 2.1, -1.1, 5.1, 2.4, 1.0, 4.9, 2.7, -0.9, 5.0,
            ],
        )
        .unwrap();
        let y = vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0];
        (x, y)
    }

    fn all_features() -> ForestParams {
        ForestParams {
            max_features: MaxFeatures::All,
            ..ForestParams::default()
        }
    }

    #[test]
    fn importances_sum_to_one_and_favor_signal() {
        let (x, y) = separable();
        let mut forest = RandomForest::new(all_features());
        forest.fit(&x, &y).unwrap();

        let imp = forest.feature_importances();
        assert_eq!(forest.n_trees(), 100);
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(imp[1] > imp[0] && imp[1] > imp[2], "importances: {:?}", imp);
        assert!(forest.accuracy(&x, &y) >= 0.9);
    }

    #[test]
    fn constant_feature_gets_no_importance() {
        // Column 0 is constant; sqrt(2) = 1 feature per tree.
        let x = Array2::from_shape_vec((4, 2), vec![3.0, 0.0, 3.0, 1.0, 3.0, 0.1, 3.0, 0.9]).unwrap();
        let mut forest = RandomForest::new(ForestParams::default());
        forest.fit(&x, &[0, 1, 0, 1]).unwrap();
        let imp = forest.feature_importances();
        assert_eq!(imp[0], 0.0);
        assert!((imp[1] - 1.0).abs() < 1e-9, "importances: {:?}", imp);
    }

    #[test]
    fn same_seed_same_importances() {
        let (x, y) = separable();
        let mut a = RandomForest::new(ForestParams::default());
        let mut b = RandomForest::new(ForestParams::default());
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.feature_importances(), b.feature_importances());
    }

    #[test]
    fn single_class_is_rejected() {
        let (x, _) = separable();
        let mut forest = RandomForest::new(ForestParams::default());
        assert_eq!(
            forest.fit(&x, &[1; 10]).unwrap_err(),
            SelectionError::SingleClass(1)
        );
    }
}
