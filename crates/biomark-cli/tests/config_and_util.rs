//! Integration tests for CLI config loading, overrides and util helpers.

use std::path::PathBuf;

use biomark_cli::input::{load_pipeline_config, resolve_config, CliOverrides};
use biomark_cli::util::validate_tsv_or_csv_file;
use biomark_select::config::{MaxFeatures, PipelineConfig, RfeSelection};

// ---------------------------------------------------------------------------
// validate_tsv_or_csv_file
// ---------------------------------------------------------------------------

#[test]
fn validate_csv_and_tsv_files_exist() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["data.csv", "data.TSV"] {
        let path = dir.path().join(name);
        std::fs::File::create(&path).unwrap();
        assert!(validate_tsv_or_csv_file(&path).is_ok(), "{}", name);
    }
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_tsv_or_csv_file(&path).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_tsv_or_csv_file("/nonexistent/path/data.csv").is_err());
}

// ---------------------------------------------------------------------------
// PipelineConfig defaults & JSON
// ---------------------------------------------------------------------------

#[test]
fn pipeline_config_default_values() {
    let cfg = PipelineConfig::default();
    assert_eq!(cfg.input.path, PathBuf::from("data/gene_expression.csv"));
    assert_eq!(cfg.input.label_column, "label");
    assert_eq!(cfg.output.scored_features, PathBuf::from("results/intersected_features.csv"));
    assert_eq!(cfg.output.ttest, PathBuf::from("results/ttest_results.csv"));
    assert_eq!(cfg.lasso.alpha, 0.01);
    assert_eq!(cfg.random_forest.n_estimators, 100);
    assert_eq!(cfg.random_forest.seed, 42);
    assert_eq!(cfg.random_forest.max_features, MaxFeatures::Sqrt);
    assert_eq!(cfg.svm_rfe.n_features_to_select, 10);
    assert_eq!(cfg.svm_rfe.step, 1);
    assert_eq!(cfg.svm_rfe.selection, RfeSelection::AnyRank);
    assert!(cfg.ttest.equal_var);
}

#[test]
fn partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "lasso": { "alpha": 0.5 }, "svm_rfe": { "selection": "retained" } }"#,
    )
    .unwrap();

    let cfg = load_pipeline_config(&path).unwrap();
    assert_eq!(cfg.lasso.alpha, 0.5);
    assert_eq!(cfg.lasso.max_iter, 1000);
    assert_eq!(cfg.svm_rfe.selection, RfeSelection::Retained);
    assert_eq!(cfg.random_forest.n_estimators, 100);
}

#[test]
fn malformed_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_pipeline_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config"));
}

#[test]
fn default_config_round_trips_json() {
    let cfg = PipelineConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"any_rank\""));
    let back: PipelineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.svm_rfe.selection, cfg.svm_rfe.selection);
    assert_eq!(back.input.path, cfg.input.path);
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

#[test]
fn overrides_take_precedence() {
    let mut cfg = PipelineConfig::default();
    CliOverrides {
        input: Some(PathBuf::from("other.tsv")),
        scored_output: Some(PathBuf::from("a.csv")),
        ttest_output: None,
        rfe_selection: Some(RfeSelection::Retained),
        welch: true,
    }
    .apply(&mut cfg);

    assert_eq!(cfg.input.path, PathBuf::from("other.tsv"));
    assert_eq!(cfg.output.scored_features, PathBuf::from("a.csv"));
    assert_eq!(cfg.output.ttest, PathBuf::from("results/ttest_results.csv"));
    assert_eq!(cfg.svm_rfe.selection, RfeSelection::Retained);
    assert!(!cfg.ttest.equal_var);
}

#[test]
fn empty_overrides_leave_config_untouched() {
    let mut cfg = PipelineConfig::default();
    CliOverrides::default().apply(&mut cfg);
    assert!(cfg.ttest.equal_var);
    assert_eq!(cfg.svm_rfe.selection, RfeSelection::AnyRank);
}

#[test]
fn resolve_config_checks_input_exists() {
    let dir = tempfile::tempdir().unwrap();
    let missing = CliOverrides {
        input: Some(dir.path().join("missing.csv")),
        ..CliOverrides::default()
    };
    assert!(resolve_config(None, missing).is_err());

    let present = dir.path().join("expr.csv");
    std::fs::write(&present, "label,G0\n0,1\n1,2\n").unwrap();
    let cfg = resolve_config(
        None,
        CliOverrides {
            input: Some(present.clone()),
            ..CliOverrides::default()
        },
    )
    .unwrap();
    assert_eq!(cfg.input.path, present);
}
