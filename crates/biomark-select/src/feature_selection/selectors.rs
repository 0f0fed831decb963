//! The three embedded/wrapper selectors.
//!
//! Each selector fits its model, turns the scores into a
//! [`FeatureImportanceTable`] and applies its own keep rule.
use crate::config::{ForestParams, LassoParams, RfeParams, RfeSelection};
use crate::error::SelectionError;
use crate::feature_selection::importance::{
    FeatureImportanceTable, SelectedFeatureSet, SelectorKind,
};
use crate::feature_selection::rfe::Rfe;
use crate::math::Array2;
use crate::models::{ImportanceModel, Lasso, LinearSvc, LinearSvcParams, RandomForest};

/// Ranked table plus the features the selector keeps.
#[derive(Debug, Clone)]
pub struct SelectorOutcome {
    pub table: FeatureImportanceTable,
    pub selected: SelectedFeatureSet,
}

fn select_from_model<M: ImportanceModel>(
    kind: SelectorKind,
    model: &mut M,
    x: &Array2<f64>,
    y: &[i32],
    feature_names: &[String],
) -> Result<SelectorOutcome, SelectionError> {
    model.fit(x, y)?;
    let table =
        FeatureImportanceTable::from_scores(kind, feature_names, &model.feature_importances(), true)?;
    let selected = table.select(|v| v > 0.0);
    log::info!(
        "[{}] {} of {} features have non-zero importance",
        kind,
        selected.len(),
        table.len()
    );
    Ok(SelectorOutcome { table, selected })
}

/// L1 regression of the 0/1 label on raw expression; importance `|coef|`.
pub fn lasso_selection(
    x: &Array2<f64>,
    y: &[i32],
    feature_names: &[String],
    params: &LassoParams,
) -> Result<SelectorOutcome, SelectionError> {
    let mut model = Lasso::new(params.clone());
    let outcome = select_from_model(SelectorKind::Lasso, &mut model, x, y, feature_names)?;
    log::debug!(
        "[Lasso] alpha = {}, {} coordinate descent sweeps, duality gap = {:.3e}, intercept = {:.6}",
        params.alpha,
        model.n_iter(),
        model.duality_gap(),
        model.intercept()
    );
    Ok(outcome)
}

/// Seeded forest on raw expression; importance = mean impurity decrease.
pub fn random_forest_selection(
    x: &Array2<f64>,
    y: &[i32],
    feature_names: &[String],
    params: &ForestParams,
) -> Result<SelectorOutcome, SelectionError> {
    let mut model = RandomForest::new(params.clone());
    let outcome = select_from_model(SelectorKind::RandomForest, &mut model, x, y, feature_names)?;
    log::debug!(
        "[Random Forest] {} trees, training accuracy {:.3}",
        model.n_trees(),
        model.accuracy(x, y)
    );
    Ok(outcome)
}

/// Linear-SVM recursive elimination on standardized expression.
///
/// The table holds elimination ranks (1 = retained), best first. Which
/// ranks count as selected is governed by `params.selection`.
pub fn svm_rfe_selection(
    x_scaled: &Array2<f64>,
    y: &[i32],
    feature_names: &[String],
    params: &RfeParams,
) -> Result<SelectorOutcome, SelectionError> {
    let mut model = LinearSvc::new(LinearSvcParams {
        c: params.c,
        eps: params.tol,
    });
    let result = Rfe::new(params.n_features_to_select, params.step).fit(&mut model, x_scaled, y)?;

    let ranks: Vec<f64> = result.ranking.iter().map(|&r| r as f64).collect();
    let table = FeatureImportanceTable::from_scores(SelectorKind::SvmRfe, feature_names, &ranks, false)?;
    let retained = result.support.iter().filter(|&&s| s).count();

    let selected = match params.selection {
        RfeSelection::AnyRank => table.select(|rank| rank > 0.0),
        RfeSelection::Retained => table.select(|rank| rank == 1.0),
    };
    if selected.len() > retained {
        log::warn!(
            "[SVM-RFE] selection = any_rank keeps all {} ranked features, not only the {} retained by elimination",
            selected.len(),
            retained
        );
    }
    log::info!(
        "[SVM-RFE] {} rounds, {} features retained, {} selected",
        result.n_rounds,
        retained,
        selected.len()
    );
    Ok(SelectorOutcome { table, selected })
}
