use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use biomark_select::config::{PipelineConfig, RfeSelection};

use crate::util::validate_tsv_or_csv_file;

/// Load a JSON pipeline configuration. Missing keys take their defaults.
pub fn load_pipeline_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: PipelineConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Command line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub scored_output: Option<PathBuf>,
    pub ttest_output: Option<PathBuf>,
    pub rfe_selection: Option<RfeSelection>,
    pub welch: bool,
}

impl CliOverrides {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let rfe_selection = matches
            .get_one::<String>("rfe_selection")
            .map(|s| RfeSelection::from_str(s).map_err(anyhow::Error::msg))
            .transpose()?;

        Ok(Self {
            input: matches.get_one::<PathBuf>("input").cloned(),
            scored_output: matches.get_one::<PathBuf>("scored_output").cloned(),
            ttest_output: matches.get_one::<PathBuf>("ttest_output").cloned(),
            rfe_selection,
            welch: matches.get_flag("welch"),
        })
    }

    pub fn apply(self, config: &mut PipelineConfig) {
        if let Some(input) = self.input {
            config.input.path = input;
        }
        if let Some(path) = self.scored_output {
            config.output.scored_features = path;
        }
        if let Some(path) = self.ttest_output {
            config.output.ttest = path;
        }
        if let Some(selection) = self.rfe_selection {
            config.svm_rfe.selection = selection;
        }
        if self.welch {
            config.ttest.equal_var = false;
        }
    }
}

/// Build the effective configuration: file (or defaults), then overrides,
/// then a check that the input table exists.
pub fn resolve_config(config_path: Option<&PathBuf>, overrides: CliOverrides) -> Result<PipelineConfig> {
    let mut config = match config_path {
        Some(path) => load_pipeline_config(path)?,
        None => PipelineConfig::default(),
    };
    overrides.apply(&mut config);
    validate_tsv_or_csv_file(&config.input.path)?;
    Ok(config)
}
