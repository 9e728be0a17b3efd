//! Weather label classifier.
//!
//! Learns the District, MonsoonPhase and Weather label tables from the
//! training dataset, fits a random forest on the encoded rows, and turns
//! forest output back into Weather labels.

use crate::config::ForestConfig;
use crate::constants::FEATURE_COUNT;
use crate::dataset::Dataset;
use crate::encoding::FeatureEncoder;
use crate::error::{PredictorError, Result};
use crate::forest::RandomForest;
use crate::models::{WeatherRecord, WeatherSample};
use indicatif::ProgressBar;
use ndarray::{Array1, Array2};
use std::time::Instant;
use tracing::info;

/// Fitted classifier: label tables plus forest
#[derive(Debug)]
pub struct WeatherClassifier {
    encoder: FeatureEncoder,
    forest: RandomForest,
}

impl WeatherClassifier {
    /// Fit on every row of the dataset with Weather as the target
    pub fn fit(dataset: &Dataset, config: &ForestConfig, progress: &ProgressBar) -> Result<Self> {
        let start_time = Instant::now();
        let encoder = FeatureEncoder::fit(dataset.records());

        let (records, targets) = encode_records(&encoder, dataset.records())?;
        let forest = RandomForest::fit(&records, &targets, config, progress)?;

        info!(
            "Trained on {} records ({} districts, {} monsoon phases, {} weather labels) in {:.2?}",
            dataset.len(),
            encoder.district.len(),
            encoder.monsoon_phase.len(),
            encoder.weather.len(),
            start_time.elapsed()
        );

        Ok(Self { encoder, forest })
    }

    /// Predict the Weather label of one sample
    pub fn predict(&self, sample: &WeatherSample) -> Result<String> {
        let features = self.encoder.encode(sample)?;
        let code = self.forest.predict_one(&features)?;
        Ok(self.encoder.weather.decode(code)?.to_string())
    }

    /// Predict the Weather label of many samples
    pub fn predict_batch(&self, samples: &[WeatherSample]) -> Result<Vec<String>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let mut flat = Vec::with_capacity(samples.len() * FEATURE_COUNT);
        for sample in samples {
            flat.extend_from_slice(&self.encoder.encode(sample)?);
        }
        let records = Array2::from_shape_vec((samples.len(), FEATURE_COUNT), flat)
            .map_err(|e| PredictorError::training(e.to_string()))?;

        self.forest
            .predict(&records)?
            .iter()
            .map(|&code| self.encoder.weather.decode(code).map(str::to_string))
            .collect()
    }

    /// Fraction of records whose label the classifier reproduces
    pub fn accuracy(&self, records: &[WeatherRecord]) -> Result<f64> {
        if records.is_empty() {
            return Ok(0.0);
        }

        let samples: Vec<WeatherSample> = records.iter().map(|r| r.sample.clone()).collect();
        let predicted = self.predict_batch(&samples)?;
        let correct = predicted
            .iter()
            .zip(records)
            .filter(|(label, record)| **label == record.weather)
            .count();

        Ok(correct as f64 / records.len() as f64)
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Weather labels the classifier can emit
    pub fn weather_labels(&self) -> &[String] {
        self.encoder.weather.classes()
    }

    pub fn n_trees(&self) -> usize {
        self.forest.n_trees()
    }
}

/// Encode labelled records into a feature matrix and target codes
fn encode_records(
    encoder: &FeatureEncoder,
    records: &[WeatherRecord],
) -> Result<(Array2<f64>, Array1<usize>)> {
    let mut flat = Vec::with_capacity(records.len() * FEATURE_COUNT);
    let mut targets = Vec::with_capacity(records.len());

    for record in records {
        flat.extend_from_slice(&encoder.encode(&record.sample)?);
        targets.push(encoder.weather.encode(&record.weather)?);
    }

    let matrix = Array2::from_shape_vec((records.len(), FEATURE_COUNT), flat)
        .map_err(|e| PredictorError::training(e.to_string()))?;
    Ok((matrix, Array1::from(targets)))
}

#[cfg(test)]
mod tests;
