use anyhow::Result;
use clap::{Arg, ArgAction, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use biomark_cli::input::{resolve_config, CliOverrides};
use biomark_select::config::PipelineConfig;
use biomark_select::pipeline::run_pipeline;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("BIOMARK_LOG", "error,biomark=info"))
        .init();

    let matches = Command::new("biomark")
        .version(clap::crate_version!())
        .about("Consensus biomarker selection: Lasso, random forest and SVM-RFE, validated by t-test")
        .arg(
            Arg::new("config")
                .help("Path to a JSON pipeline configuration file. Built-in defaults are used when omitted.")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .short('d')
                .long("input")
                .help(
                    "Path to the expression table (*.csv or *.tsv). \
                     Overrides the input path in the configuration file.",
                )
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("scored_output")
                .long("scored-output")
                .help("Path for the scored intersection table (CSV).")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("ttest_output")
                .long("ttest-output")
                .help("Path for the t-test results table (CSV).")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("rfe_selection")
                .long("rfe-selection")
                .help("Which RFE-ranked features count as selected.")
                .value_parser(["any-rank", "retained"])
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("welch")
                .long("welch")
                .help("Use Welch's unequal-variance t-test instead of Student's.")
                .action(ArgAction::SetTrue),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let config_path: Option<&PathBuf> = matches.get_one("config");
    match config_path {
        Some(path) => log::info!("[biomark] Using config: {:?}", path),
        None => {
            let default_json =
                serde_json::to_string_pretty(&PipelineConfig::default()).unwrap_or_default();
            eprintln!("[biomark] No config provided; using defaults:\n{}", default_json);
        }
    }

    let overrides = CliOverrides::from_matches(&matches)?;
    let result = resolve_config(config_path, overrides).and_then(|config| run_pipeline(&config));

    match result {
        Ok(output) => {
            log::info!(
                "[biomark] {} features selected by all three methods",
                output.intersection.len()
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Pipeline failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
