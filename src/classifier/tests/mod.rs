//! Classifier tests
//!
//! Train on synthetic generator output labelled by a simple rainfall and
//! cloud rule, then check encoding, prediction and determinism.

pub mod fit_tests;
pub mod predict_tests;

use crate::classifier::WeatherClassifier;
use crate::config::ForestConfig;
use crate::dataset::Dataset;
use crate::generator::WeatherGenerator;
use crate::models::{District, Measurements, WeatherRecord};
use indicatif::ProgressBar;

pub const LABELS: &[&str] = &["Heavy Rain", "Rainy", "Cloudy", "Sunny"];

/// Deterministic label derived from rainfall and cloud cover
pub fn label_for(m: &Measurements) -> &'static str {
    if m.precipitation >= 14.0 {
        "Heavy Rain"
    } else if m.precipitation >= 6.0 {
        "Rainy"
    } else if m.cloud_cover >= 70.0 {
        "Cloudy"
    } else {
        "Sunny"
    }
}

/// Every district sampled every `step` days, labelled by [`label_for`]
pub fn synthetic_dataset(step: usize) -> Dataset {
    let mut generator = WeatherGenerator::seeded(42);
    let mut records = Vec::new();

    for district in District::ALL {
        for day in (1..=366u32).step_by(step) {
            let sample = generator.generate(district.as_str(), day);
            let weather = label_for(&sample.measurements).to_string();
            records.push(WeatherRecord { sample, weather });
        }
    }

    Dataset::from_records("synthetic", records).unwrap()
}

pub fn small_forest() -> ForestConfig {
    ForestConfig::default().with_n_estimators(20).with_workers(2)
}

pub fn trained_classifier() -> (Dataset, WeatherClassifier) {
    let dataset = synthetic_dataset(5);
    let classifier = WeatherClassifier::fit(&dataset, &small_forest(), &ProgressBar::hidden())
        .expect("classifier should fit synthetic data");
    (dataset, classifier)
}
