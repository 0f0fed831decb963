//! End-to-end consensus selection: load, standardize, select three ways,
//! intersect, validate, write.
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{OutputConfig, PipelineConfig};
use crate::data_handling::Dataset;
use crate::error::check_binary_input;
use crate::feature_selection::{
    intersect, lasso_selection, random_forest_selection, svm_rfe_selection, IntersectionSet,
    ScoredIntersectionTable, SelectorOutcome,
};
use crate::io::{read_expression_csv, write_scored_features, write_ttest_results};
use crate::preprocessing::fit_transform;
use crate::stats::{validate_features, TTestResultTable};

/// Number of top-ranked features echoed to the log per selector.
const LOG_TOP_N: usize = 10;

/// Every table the analysis derives, kept for inspection after the run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub lasso: SelectorOutcome,
    pub random_forest: SelectorOutcome,
    pub svm_rfe: SelectorOutcome,
    pub intersection: IntersectionSet,
    pub scored: ScoredIntersectionTable,
    pub ttest: TTestResultTable,
}

/// Run the selectors, intersection and t-tests on an in-memory dataset.
pub fn run_analysis(dataset: &Dataset, config: &PipelineConfig) -> Result<PipelineOutput> {
    check_binary_input(dataset.n_samples(), dataset.n_features(), dataset.labels())
        .context("Dataset is not a valid two-class expression table")?;
    dataset.log_input_data_summary();

    let names = &dataset.feature_names;
    let y = dataset.labels();
    let x_scaled = fit_transform(&dataset.x);

    let lasso = lasso_selection(&dataset.x, y, names, &config.lasso)
        .context("Lasso selection failed")?;
    lasso.table.log_top(LOG_TOP_N);

    let random_forest = random_forest_selection(&dataset.x, y, names, &config.random_forest)
        .context("Random forest selection failed")?;
    random_forest.table.log_top(LOG_TOP_N);

    let svm_rfe = svm_rfe_selection(&x_scaled, y, names, &config.svm_rfe)
        .context("SVM-RFE selection failed")?;
    svm_rfe.table.log_top(LOG_TOP_N);

    let intersection = intersect(
        &[&lasso.selected, &random_forest.selected, &svm_rfe.selected],
        names,
    );
    if intersection.is_empty() {
        log::warn!("The three selectors share no features; result tables will be empty");
    } else {
        log::info!(
            "{} features selected by all three methods: {}",
            intersection.len(),
            intersection.features().join(", ")
        );
    }

    let scored = ScoredIntersectionTable::build(
        &intersection,
        &lasso.table,
        &random_forest.table,
        &svm_rfe.table,
    )?;
    let ttest = validate_features(dataset, &intersection, config.ttest.equal_var)?;

    Ok(PipelineOutput {
        lasso,
        random_forest,
        svm_rfe,
        intersection,
        scored,
        ttest,
    })
}

/// Write the scored-intersection and t-test tables.
pub fn write_outputs(output: &PipelineOutput, config: &OutputConfig) -> Result<()> {
    write_scored_features(&config.scored_features, &output.scored)?;
    write_ttest_results(&config.ttest, &output.ttest)?;
    Ok(())
}

/// Load the configured input, run the analysis and write both result tables.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput> {
    let input: &Path = &config.input.path;
    log::info!("Reading expression data from {}", input.display());
    let dataset = read_expression_csv(input, &config.input)?;

    let output = run_analysis(&dataset, config)?;
    write_outputs(&output, &config.output)?;
    Ok(output)
}
