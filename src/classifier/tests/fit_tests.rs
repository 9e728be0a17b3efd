//! Fitting tests

use super::{LABELS, small_forest, synthetic_dataset, trained_classifier};
use crate::classifier::WeatherClassifier;
use crate::config::ForestConfig;
use crate::error::PredictorError;
use crate::models::{District, MonsoonPhase};
use indicatif::ProgressBar;

#[test]
fn test_fit_learns_label_vocabulary() {
    let (dataset, classifier) = trained_classifier();
    let summary = dataset.summary();

    assert_eq!(classifier.n_trees(), 20);

    let labels = classifier.weather_labels();
    assert_eq!(labels.len(), summary.weather.len());
    for label in labels {
        assert!(LABELS.contains(&label.as_str()), "unexpected label {}", label);
    }

    let districts = classifier.encoder().district.classes();
    assert_eq!(districts.len(), District::ALL.len());

    let phases = classifier.encoder().monsoon_phase.classes();
    for phase in [
        MonsoonPhase::SouthWest,
        MonsoonPhase::NorthEast,
        MonsoonPhase::PreMonsoon,
        MonsoonPhase::PostMonsoon,
    ] {
        assert!(phases.iter().any(|p| p == phase.label()));
    }
}

#[test]
fn test_training_accuracy_is_high() {
    let (dataset, classifier) = trained_classifier();
    let accuracy = classifier.accuracy(dataset.records()).unwrap();
    assert!(accuracy > 0.9, "training accuracy {}", accuracy);
}

#[test]
fn test_refit_on_same_data_is_reproducible() {
    let dataset = synthetic_dataset(7);
    let first = WeatherClassifier::fit(&dataset, &small_forest(), &ProgressBar::hidden()).unwrap();
    let second = WeatherClassifier::fit(
        &dataset,
        &small_forest().with_workers(1),
        &ProgressBar::hidden(),
    )
    .unwrap();

    let samples: Vec<_> = dataset.records().iter().map(|r| r.sample.clone()).collect();
    assert_eq!(
        first.predict_batch(&samples).unwrap(),
        second.predict_batch(&samples).unwrap()
    );
    assert_eq!(
        first.encoder().district.classes(),
        second.encoder().district.classes()
    );
}

#[test]
fn test_invalid_forest_config_fails_fit() {
    let dataset = synthetic_dataset(30);
    let config = ForestConfig::default().with_n_estimators(0);

    let result = WeatherClassifier::fit(&dataset, &config, &ProgressBar::hidden());
    assert!(matches!(result, Err(PredictorError::Configuration { .. })));
}
