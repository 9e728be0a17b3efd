//! Configuration management and validation.
//!
//! Provides configuration structures for dataset location, forest
//! hyperparameters and sampling, with defaults matching the reference
//! model (400 trees, seed 42).

use crate::constants::{
    DATA_DIR_NAME, DEFAULT_DATASET_FILE, DEFAULT_FOREST_SEED, DEFAULT_MAX_FEATURES,
    DEFAULT_MIN_SAMPLES_SPLIT, DEFAULT_N_ESTIMATORS, FEATURE_COUNT,
};
use crate::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Random forest hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_estimators: usize,

    /// Seed for bootstrap resampling and per-split feature sampling
    pub seed: u64,

    /// Maximum tree depth (None = grow until leaves are pure)
    pub max_depth: Option<usize>,

    /// Minimum number of samples required to split a node
    pub min_samples_split: usize,

    /// Candidate features drawn at each split (None = all features)
    pub max_features: Option<usize>,

    /// Fit each tree on a bootstrap resample of the rows
    pub bootstrap: bool,

    /// Worker threads used while fitting
    pub workers: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_FOREST_SEED,
            max_depth: None,
            min_samples_split: DEFAULT_MIN_SAMPLES_SPLIT,
            max_features: Some(DEFAULT_MAX_FEATURES),
            bootstrap: true,
            workers: num_cpus::get(),
        }
    }
}

impl ForestConfig {
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn without_bootstrap(mut self) -> Self {
        self.bootstrap = false;
        self
    }

    /// Check hyperparameters before fitting
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(PredictorError::configuration(
                "n_estimators must be at least 1",
            ));
        }
        if self.workers == 0 {
            return Err(PredictorError::configuration("workers must be at least 1"));
        }
        if self.min_samples_split < 2 {
            return Err(PredictorError::configuration(
                "min_samples_split must be at least 2",
            ));
        }
        if self.max_depth == Some(0) {
            return Err(PredictorError::configuration("max_depth must be at least 1"));
        }
        if let Some(k) = self.max_features {
            if k == 0 || k > FEATURE_COUNT {
                return Err(PredictorError::configuration(format!(
                    "max_features must be between 1 and {}",
                    FEATURE_COUNT
                )));
            }
        }
        Ok(())
    }
}

/// Global configuration for the predictor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// Labelled training dataset (CSV)
    pub dataset_path: PathBuf,

    /// Forest hyperparameters
    pub forest: ForestConfig,

    /// Seed for feature sampling (None = OS entropy)
    pub sample_seed: Option<u64>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_FILE),
            forest: ForestConfig::default(),
            sample_seed: None,
        }
    }
}

impl PredictorConfig {
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    pub fn with_forest(mut self, forest: ForestConfig) -> Self {
        self.forest = forest;
        self
    }

    pub fn with_sample_seed(mut self, seed: Option<u64>) -> Self {
        self.sample_seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.forest.validate()
    }

    /// Candidate dataset locations, in lookup order
    pub fn dataset_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(DEFAULT_DATASET_FILE)];
        if let Some(data_dir) = dirs::data_dir() {
            paths.push(data_dir.join(DATA_DIR_NAME).join(DEFAULT_DATASET_FILE));
        }
        paths
    }

    /// First existing default dataset location, if any
    pub fn discover_dataset() -> Option<PathBuf> {
        let found = Self::dataset_search_paths()
            .into_iter()
            .find(|path| path.exists());
        debug!("Default dataset lookup: {:?}", found);
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_model() {
        let config = PredictorConfig::default();
        assert_eq!(config.forest.n_estimators, 400);
        assert_eq!(config.forest.seed, 42);
        assert!(config.forest.bootstrap);
        assert!(config.forest.workers >= 1);
        assert_eq!(config.forest.max_depth, None);
        assert_eq!(
            config.dataset_path,
            PathBuf::from("kerala_district_weather_20000.csv")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_samples_features_at_each_split() {
        let forest = ForestConfig::default();
        assert_eq!(forest.max_features, Some(DEFAULT_MAX_FEATURES));
        assert!(forest.max_features.is_some_and(|k| k < FEATURE_COUNT));
    }

    #[test]
    fn test_builders() {
        let config = PredictorConfig::default()
            .with_dataset_path("/tmp/data.csv")
            .with_sample_seed(Some(5))
            .with_forest(
                ForestConfig::default()
                    .with_n_estimators(10)
                    .with_seed(1)
                    .with_max_depth(Some(8))
                    .with_workers(2)
                    .without_bootstrap(),
            );

        assert_eq!(config.dataset_path, PathBuf::from("/tmp/data.csv"));
        assert_eq!(config.sample_seed, Some(5));
        assert_eq!(config.forest.n_estimators, 10);
        assert_eq!(config.forest.max_depth, Some(8));
        assert!(!config.forest.bootstrap);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(ForestConfig::default().with_n_estimators(0).validate().is_err());
        assert!(ForestConfig::default().with_workers(0).validate().is_err());
        assert!(ForestConfig::default().with_max_depth(Some(0)).validate().is_err());
        assert!(ForestConfig::default().with_max_features(Some(0)).validate().is_err());
        assert!(ForestConfig::default().with_max_features(Some(10)).validate().is_err());
        assert!(ForestConfig::default().with_max_features(Some(3)).validate().is_ok());
    }

    #[test]
    fn test_config_serializes() {
        let config = PredictorConfig::default().with_sample_seed(Some(9));
        let json = serde_json::to_string(&config).unwrap();
        let back: PredictorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_search_paths_start_with_working_directory() {
        let paths = PredictorConfig::dataset_search_paths();
        assert_eq!(paths[0], PathBuf::from(DEFAULT_DATASET_FILE));
    }
}
