//! Label encoding for categorical dataset columns.
//!
//! Each categorical column gets an explicit two-way table: a sorted
//! label → code map and the matching code → label list. Codes follow the
//! lexicographic order of the distinct labels, so the same vocabulary
//! always yields the same codes.

use crate::constants::{FEATURE_COUNT, columns};
use crate::error::{PredictorError, Result};
use crate::models::{WeatherRecord, WeatherSample};
use std::collections::{BTreeMap, BTreeSet};

/// Bidirectional mapping between the labels of one column and integer codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    column: String,
    codes: BTreeMap<String, usize>,
    labels: Vec<String>,
}

impl LabelEncoder {
    /// Build the table from every value observed in a column
    pub fn fit<'a, I>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        let labels: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        let codes = labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code))
            .collect();

        Self {
            column: column.into(),
            codes,
            labels,
        }
    }

    pub fn encode(&self, label: &str) -> Result<usize> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| PredictorError::UnseenLabel {
                column: self.column.clone(),
                value: label.to_string(),
            })
    }

    pub fn decode(&self, code: usize) -> Result<&str> {
        self.labels
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| PredictorError::UnknownCode {
                column: self.column.clone(),
                code,
            })
    }

    pub fn contains(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }

    /// Labels in code order
    pub fn classes(&self) -> &[String] {
        &self.labels
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The three column encoders learned from a training dataset
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    pub district: LabelEncoder,
    pub monsoon_phase: LabelEncoder,
    pub weather: LabelEncoder,
}

impl FeatureEncoder {
    pub fn fit(records: &[WeatherRecord]) -> Self {
        Self {
            district: LabelEncoder::fit(
                columns::DISTRICT,
                records.iter().map(|r| r.sample.district.as_str()),
            ),
            monsoon_phase: LabelEncoder::fit(
                columns::MONSOON_PHASE,
                records.iter().map(|r| r.sample.monsoon_phase.as_str()),
            ),
            weather: LabelEncoder::fit(columns::WEATHER, records.iter().map(|r| r.weather.as_str())),
        }
    }

    /// Project a sample onto the classifier's numeric feature order
    pub fn encode(&self, sample: &WeatherSample) -> Result<[f64; FEATURE_COUNT]> {
        let m = &sample.measurements;
        Ok([
            self.district.encode(&sample.district)? as f64,
            m.temperature,
            m.humidity,
            m.pressure,
            m.wind_speed,
            m.precipitation,
            m.cloud_cover,
            sample.day_of_year as f64,
            self.monsoon_phase.encode(&sample.monsoon_phase)? as f64,
        ])
    }
}
