//! Prediction tests

use super::{LABELS, trained_classifier};
use crate::error::PredictorError;
use crate::generator::WeatherGenerator;

#[test]
fn test_prediction_is_in_training_vocabulary() {
    let (_, classifier) = trained_classifier();
    let mut generator = WeatherGenerator::seeded(3);

    let sample = generator.generate("Ernakulam", 200);
    assert_eq!(sample.monsoon_phase, "SouthWest Monsoon");

    let label = classifier.predict(&sample).unwrap();
    assert!(classifier.weather_labels().contains(&label));
    assert!(LABELS.contains(&label.as_str()));
}

#[test]
fn test_repeated_predictions_agree() {
    let (_, classifier) = trained_classifier();
    let sample = WeatherGenerator::seeded(11).generate("Wayanad", 240);

    let first = classifier.predict(&sample).unwrap();
    for _ in 0..5 {
        assert_eq!(classifier.predict(&sample).unwrap(), first);
    }
}

#[test]
fn test_batch_matches_single_predictions() {
    let (_, classifier) = trained_classifier();
    let mut generator = WeatherGenerator::seeded(5);
    let samples: Vec<_> = [("Kollam", 10), ("Idukki", 160), ("Thrissur", 300), ("Kannur", 95)]
        .into_iter()
        .map(|(district, day)| generator.generate(district, day))
        .collect();

    let batch = classifier.predict_batch(&samples).unwrap();
    let single: Vec<String> = samples
        .iter()
        .map(|s| classifier.predict(s).unwrap())
        .collect();

    assert_eq!(batch, single);
    assert!(classifier.predict_batch(&[]).unwrap().is_empty());
}

#[test]
fn test_unseen_district_is_an_encoding_error() {
    let (_, classifier) = trained_classifier();
    let sample = WeatherGenerator::seeded(1).generate("Lakshadweep", 200);

    match classifier.predict(&sample) {
        Err(PredictorError::UnseenLabel { column, value }) => {
            assert_eq!(column, "District");
            assert_eq!(value, "Lakshadweep");
        }
        other => panic!("Expected UnseenLabel, got {:?}", other),
    }
}

#[test]
fn test_unseen_monsoon_phase_is_an_encoding_error() {
    let (_, classifier) = trained_classifier();
    let mut sample = WeatherGenerator::seeded(1).generate("Kollam", 200);
    sample.monsoon_phase = "Winter".to_string();

    assert!(matches!(
        classifier.predict(&sample),
        Err(PredictorError::UnseenLabel { .. })
    ));
}

#[test]
fn test_clearly_wet_sample_predicts_rain() {
    let (_, classifier) = trained_classifier();
    let mut sample = WeatherGenerator::seeded(8).generate("Idukki", 200);
    sample.measurements.precipitation = 30.0;
    sample.measurements.cloud_cover = 95.0;

    assert_eq!(classifier.predict(&sample).unwrap(), "Heavy Rain");
}
