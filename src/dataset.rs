//! Training dataset loading.
//!
//! Reads the labelled CSV once with polars, checks that every required
//! column is present and fully populated, and converts the frame into an
//! immutable list of [`WeatherRecord`]s.

use crate::constants::columns;
use crate::error::{PredictorError, Result};
use crate::models::{Measurements, WeatherRecord, WeatherSample};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Immutable labelled dataset used to fit the classifier
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    records: Vec<WeatherRecord>,
}

/// Row count and per-column label frequencies
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub records: usize,
    pub districts: BTreeMap<String, usize>,
    pub monsoon_phases: BTreeMap<String, usize>,
    pub weather: BTreeMap<String, usize>,
}

impl Dataset {
    /// Load and validate a dataset CSV
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PredictorError::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        debug!("Reading dataset from {}", path.display());

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        let dataset = Self::from_frame(path, &frame)?;
        info!(
            "Loaded {} Kerala weather records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Build a dataset from an already materialised frame
    pub fn from_frame(path: &Path, frame: &DataFrame) -> Result<Self> {
        let present: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        for required in columns::REQUIRED {
            if !present.iter().any(|name| name == required) {
                return Err(PredictorError::MissingColumn {
                    path: path.to_path_buf(),
                    column: required.to_string(),
                });
            }
        }

        let extra: Vec<&String> = present
            .iter()
            .filter(|name| !columns::REQUIRED.contains(&name.as_str()))
            .collect();
        if !extra.is_empty() {
            warn!("Ignoring unexpected dataset columns: {:?}", extra);
        }

        if frame.height() == 0 {
            return Err(PredictorError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }

        let districts = string_column(path, frame, columns::DISTRICT)?;
        let weather = string_column(path, frame, columns::WEATHER)?;
        let phases = string_column(path, frame, columns::MONSOON_PHASE)?;
        let temperature = float_column(path, frame, columns::TEMPERATURE)?;
        let humidity = float_column(path, frame, columns::HUMIDITY)?;
        let pressure = float_column(path, frame, columns::PRESSURE)?;
        let wind_speed = float_column(path, frame, columns::WIND_SPEED)?;
        let precipitation = float_column(path, frame, columns::PRECIPITATION)?;
        let cloud_cover = float_column(path, frame, columns::CLOUD_COVER)?;
        let day_of_year = day_column(path, frame)?;

        let records: Vec<WeatherRecord> = (0..frame.height())
            .map(|row| WeatherRecord {
                sample: WeatherSample {
                    district: districts[row].clone(),
                    day_of_year: day_of_year[row],
                    monsoon_phase: phases[row].clone(),
                    measurements: Measurements {
                        temperature: temperature[row],
                        humidity: humidity[row],
                        pressure: pressure[row],
                        wind_speed: wind_speed[row],
                        precipitation: precipitation[row],
                        cloud_cover: cloud_cover[row],
                    },
                },
                weather: weather[row].clone(),
            })
            .collect();

        let out_of_range = records
            .iter()
            .filter(|r| {
                let m = &r.sample.measurements;
                m.precipitation < 0.0
                    || !(0.0..=100.0).contains(&m.cloud_cover)
                    || !(1..=366).contains(&r.sample.day_of_year)
            })
            .count();
        if out_of_range > 0 {
            warn!(
                "{} records fall outside the expected ranges (precipitation, cloud cover or day-of-year)",
                out_of_range
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Wrap records built in memory
    pub fn from_records(path: impl Into<PathBuf>, records: Vec<WeatherRecord>) -> Result<Self> {
        let path = path.into();
        if records.is_empty() {
            return Err(PredictorError::EmptyDataset { path });
        }
        Ok(Self { path, records })
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        let mut summary = DatasetSummary {
            path: self.path.clone(),
            records: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            *summary
                .districts
                .entry(record.sample.district.clone())
                .or_default() += 1;
            *summary
                .monsoon_phases
                .entry(record.sample.monsoon_phase.clone())
                .or_default() += 1;
            *summary.weather.entry(record.weather.clone()).or_default() += 1;
        }

        summary
    }
}

fn string_column(path: &Path, frame: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(|v| v.trim().to_string())
                .ok_or_else(|| missing_value(path, name, row))
        })
        .collect()
}

fn float_column(path: &Path, frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = frame
        .column(name)?
        .cast(&DataType::Float64)
        .map_err(|e| PredictorError::malformed(path, format!("column '{}' is not numeric: {}", name, e)))?;
    column
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| value.ok_or_else(|| missing_value(path, name, row)))
        .collect()
}

fn day_column(path: &Path, frame: &DataFrame) -> Result<Vec<u32>> {
    float_column(path, frame, columns::DAY_OF_YEAR)?
        .into_iter()
        .enumerate()
        .map(|(row, day)| {
            if day.fract() != 0.0 || day < 0.0 || day > u32::MAX as f64 {
                Err(PredictorError::malformed(
                    path,
                    format!("row {}: DayOfYear '{}' is not a whole day", row + 1, day),
                ))
            } else {
                Ok(day as u32)
            }
        })
        .collect()
}

/// Rows are reported 1-based, excluding the header line
fn missing_value(path: &Path, column: &str, row: usize) -> PredictorError {
    PredictorError::malformed(
        path,
        format!("row {}: missing or invalid value in column '{}'", row + 1, column),
    )
}

#[cfg(test)]
mod tests;
