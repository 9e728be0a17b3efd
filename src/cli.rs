//! Command-line interface components.

use crate::config::{ForestConfig, PredictorConfig};
use crate::error::PredictorError;
use crate::models::canonical_district;
use chrono::{Local, NaiveDate};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kerala-weather")]
#[command(about = "Predict Kerala district weather from synthetic monsoon-aware features")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress everything except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train on the dataset and predict the weather for a district and date
    Predict(PredictArgs),
    /// Generate the synthetic weather features for a district and date (no model)
    Features(FeaturesArgs),
    /// List the districts present in the dataset with their climatic class
    Districts(DatasetArgs),
    /// Summarise the dataset and report training accuracy
    Inspect(InspectArgs),
}

/// Location of the training dataset
#[derive(ClapArgs, Debug, Clone)]
pub struct DatasetArgs {
    /// Path to the labelled weather CSV (defaults to kerala_district_weather_20000.csv
    /// in the working directory, then in the user data directory)
    #[arg(short, long, value_name = "CSV")]
    pub dataset: Option<PathBuf>,
}

/// Random forest hyperparameters
#[derive(ClapArgs, Debug, Clone)]
pub struct ForestArgs {
    /// Number of trees
    #[arg(long, default_value_t = crate::constants::DEFAULT_N_ESTIMATORS)]
    pub trees: usize,

    /// Forest random seed
    #[arg(long, default_value_t = crate::constants::DEFAULT_FOREST_SEED)]
    pub seed: u64,

    /// Maximum tree depth (unbounded if omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Candidate features drawn at each split (defaults to 3 of 9)
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Worker threads used while fitting (defaults to CPU count)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,
}

/// District and date to generate weather for
#[derive(ClapArgs, Debug, Clone)]
pub struct TargetArgs {
    /// District name, e.g. Ernakulam (case-insensitive)
    #[arg(long)]
    pub district: String,

    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Seed for feature sampling (random if omitted)
    #[arg(long)]
    pub sample_seed: Option<u64>,
}

#[derive(ClapArgs, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub forest: ForestArgs,
}

#[derive(ClapArgs, Debug)]
pub struct FeaturesArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(ClapArgs, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub forest: ForestArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON for scripting
    Json,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl ForestArgs {
    pub fn to_config(&self) -> ForestConfig {
        let mut config = ForestConfig::default()
            .with_n_estimators(self.trees)
            .with_seed(self.seed)
            .with_max_depth(self.max_depth);
        if self.max_features.is_some() {
            config = config.with_max_features(self.max_features);
        }
        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }
}

impl TargetArgs {
    /// District as the dataset spells it when the name is a known district
    pub fn district(&self) -> &str {
        canonical_district(&self.district)
    }

    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl DatasetArgs {
    /// Explicit dataset path, else the first default location that exists
    pub fn resolve(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.dataset {
            return Ok(path.clone());
        }

        PredictorConfig::discover_dataset().ok_or_else(|| {
            let searched: Vec<String> = PredictorConfig::dataset_search_paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            anyhow::anyhow!(
                "No dataset given and none found (searched: {}). Pass --dataset <CSV>.",
                searched.join(", ")
            )
        })
    }
}

/// Build the predictor configuration from parsed arguments
pub fn predictor_config(
    dataset: &DatasetArgs,
    forest: &ForestArgs,
    sample_seed: Option<u64>,
) -> anyhow::Result<PredictorConfig> {
    let config = PredictorConfig::default()
        .with_dataset_path(dataset.resolve()?)
        .with_forest(forest.to_config())
        .with_sample_seed(sample_seed);
    config.validate()?;
    Ok(config)
}

pub fn parse_date(input: &str) -> Result<NaiveDate, PredictorError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| PredictorError::InvalidDate {
        input: input.to_string(),
    })
}
