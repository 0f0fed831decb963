use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Central configuration for one pipeline run.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub lasso: LassoParams,
    pub random_forest: ForestParams,
    pub svm_rfe: RfeParams,
    pub ttest: TTestParams,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    pub label_column: String,
    /// Raw label value encoding the control (healthy) class.
    pub control_label: String,
    /// Raw label value encoding the case (disease) class.
    pub case_label: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/gene_expression.csv"),
            label_column: "label".to_string(),
            control_label: "0".to_string(),
            case_label: "1".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub scored_features: PathBuf,
    pub ttest: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scored_features: PathBuf::from("results/intersected_features.csv"),
            ttest: PathBuf::from("results/ttest_results.csv"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct LassoParams {
    pub alpha: f64,
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for LassoParams {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Size of the random feature subspace each tree is grown on.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    Sqrt,
    Log2,
    All,
}

impl MaxFeatures {
    pub fn resolve(&self, n_features: usize) -> usize {
        let k = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2() as usize,
            MaxFeatures::All => n_features,
        };
        k.clamp(1, n_features.max(1))
    }
}

impl FromStr for MaxFeatures {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqrt" => Ok(MaxFeatures::Sqrt),
            "log2" => Ok(MaxFeatures::Log2),
            "all" => Ok(MaxFeatures::All),
            _ => Err(format!(
                "Unknown max_features: {}. Valid options are: sqrt, log2, all",
                s
            )),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Which RFE-ranked features count as "selected".
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RfeSelection {
    /// Every feature with rank > 0, i.e. all of them.
    AnyRank,
    /// Only the features RFE never eliminated (rank 1).
    Retained,
}

impl FromStr for RfeSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "any_rank" => Ok(RfeSelection::AnyRank),
            "retained" => Ok(RfeSelection::Retained),
            _ => Err(format!(
                "Unknown RFE selection: {}. Valid options are: any-rank, retained",
                s
            )),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct RfeParams {
    pub n_features_to_select: usize,
    /// Features removed per elimination round.
    pub step: usize,
    pub c: f64,
    /// Stopping tolerance of the SVM solver.
    pub tol: f64,
    pub selection: RfeSelection,
}

impl Default for RfeParams {
    fn default() -> Self {
        Self {
            n_features_to_select: 10,
            step: 1,
            c: 1.0,
            tol: 1e-3,
            selection: RfeSelection::AnyRank,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct TTestParams {
    /// Student's pooled-variance test when true, Welch's test otherwise.
    pub equal_var: bool,
}

impl Default for TTestParams {
    fn default() -> Self {
        Self { equal_var: true }
    }
}
