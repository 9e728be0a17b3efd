//! Kerala Weather Predictor Library
//!
//! Generates synthetic, monsoon-aware weather features for the districts of
//! Kerala and predicts a weather label for them with a random forest trained
//! on a labelled district weather dataset.
//!
//! This library provides tools for:
//! - Mapping day-of-year onto the Kerala monsoon calendar
//! - Sampling district- and season-adjusted weather features
//! - Loading and validating the labelled training CSV
//! - Stable label encoding of categorical columns
//! - Fitting a seeded random forest with per-split feature sampling
//! - A read-only predictor handle created once per process

pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod forest;
pub mod generator;
pub mod models;
pub mod predictor;
pub mod tree;

// Re-export commonly used types
pub use classifier::WeatherClassifier;
pub use config::{ForestConfig, PredictorConfig};
pub use dataset::{Dataset, DatasetSummary};
pub use error::{PredictorError, Result};
pub use generator::{GaussianSource, RngSource, WeatherGenerator};
pub use models::{
    District, DistrictClass, Measurements, MonsoonPhase, Prediction, WeatherRecord, WeatherSample,
    canonical_district,
};
pub use predictor::WeatherPredictor;
