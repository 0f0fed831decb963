//! Recursive feature elimination.
//!
//! Repeatedly fits a model on the surviving columns and drops the `step`
//! columns with the smallest importance until `n_features_to_select` remain.
use crate::error::SelectionError;
use crate::math::Array2;
use crate::models::ImportanceModel;

pub struct Rfe {
    n_features_to_select: usize,
    step: usize,
}

/// Outcome of an elimination run, indexed by original column.
#[derive(Debug, Clone, PartialEq)]
pub struct RfeResult {
    /// 1 for retained columns; larger means eliminated earlier.
    pub ranking: Vec<usize>,
    pub support: Vec<bool>,
    /// Number of model fits performed.
    pub n_rounds: usize,
}

impl Rfe {
    pub fn new(n_features_to_select: usize, step: usize) -> Self {
        Rfe {
            n_features_to_select: n_features_to_select.max(1),
            step: step.max(1),
        }
    }

    pub fn fit<M: ImportanceModel + ?Sized>(
        &self,
        model: &mut M,
        x: &Array2<f64>,
        y: &[i32],
    ) -> Result<RfeResult, SelectionError> {
        let n_features = x.ncols();
        if n_features == 0 {
            return Err(SelectionError::EmptyInput);
        }
        let mut ranking = vec![1usize; n_features];
        let mut support = vec![true; n_features];
        let mut n_rounds = 0;

        loop {
            let remaining: Vec<usize> = (0..n_features).filter(|&j| support[j]).collect();
            if remaining.len() <= self.n_features_to_select {
                break;
            }

            model.fit(&x.select_columns(&remaining), y)?;
            n_rounds += 1;
            let importances = model.feature_importances();

            // Stable: among equal importances the leftmost column goes first.
            let mut order: Vec<usize> = (0..remaining.len()).collect();
            order.sort_by(|&a, &b| {
                importances[a]
                    .partial_cmp(&importances[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let n_drop = self.step.min(remaining.len() - self.n_features_to_select);
            for &k in order.iter().take(n_drop) {
                support[remaining[k]] = false;
            }
            for (rank, &kept) in ranking.iter_mut().zip(&support) {
                if !kept {
                    *rank += 1;
                }
            }

            log::debug!(
                "[RFE] round {}: {} ({} features) dropped {:?}",
                n_rounds,
                model.name(),
                remaining.len(),
                order.iter().take(n_drop).map(|&k| remaining[k]).collect::<Vec<_>>()
            );
        }

        Ok(RfeResult {
            ranking,
            support,
            n_rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Importance equals the column's first-row value.
    struct FirstRow {
        imp: Vec<f64>,
    }

    impl ImportanceModel for FirstRow {
        fn fit(&mut self, x: &Array2<f64>, _y: &[i32]) -> Result<(), SelectionError> {
            self.imp = x.row_slice(0).to_vec();
            Ok(())
        }

        fn feature_importances(&self) -> Vec<f64> {
            self.imp.clone()
        }
    }

    fn x() -> Array2<f64> {
        Array2::from_shape_vec((2, 5), vec![5.0, 1.0, 4.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap()
    }

    #[test]
    fn ranking_follows_elimination_order() {
        let mut model = FirstRow { imp: vec![] };
        let res = Rfe::new(2, 1).fit(&mut model, &x(), &[0, 1]).unwrap();
        // col1 (1.0) goes first, then col3 (2.0), then col4 (3.0).
        assert_eq!(res.ranking, vec![1, 4, 1, 3, 2]);
        assert_eq!(res.support, vec![true, false, true, false, false]);
        assert_eq!(res.n_rounds, 3);
    }

    #[test]
    fn larger_step_shares_ranks() {
        let mut model = FirstRow { imp: vec![] };
        let res = Rfe::new(2, 2).fit(&mut model, &x(), &[0, 1]).unwrap();
        // Round 1 drops col1 and col3, round 2 drops only col4.
        assert_eq!(res.ranking, vec![1, 3, 1, 3, 2]);
        assert_eq!(res.n_rounds, 2);
    }

    #[test]
    fn fewer_features_than_target_are_all_retained() {
        let mut model = FirstRow { imp: vec![] };
        let res = Rfe::new(10, 1).fit(&mut model, &x(), &[0, 1]).unwrap();
        assert!(res.ranking.iter().all(|&r| r == 1));
        assert_eq!(res.n_rounds, 0);
    }
}
