//! Error handling for dataset loading, label encoding and model fitting.
//!
//! Provides a single error enum with enough context to tell the operator
//! which file, column or label caused the failure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Dataset not found at path: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("Dataset {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Malformed dataset {path}: {reason}")]
    MalformedDataset { path: PathBuf, reason: String },

    #[error("Dataset {path} contains no records")]
    EmptyDataset { path: PathBuf },

    #[error("Unseen {column} label '{value}' (not present in training data)")]
    UnseenLabel { column: String, value: String },

    #[error("Unknown {column} code {code}")]
    UnknownCode { column: String, code: usize },

    #[error("Model training failed: {reason}")]
    Training { reason: String },

    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl PredictorError {
    /// Create a malformed dataset error
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDataset {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a training error
    pub fn training(reason: impl Into<String>) -> Self {
        Self::Training {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
