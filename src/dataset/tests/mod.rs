//! Dataset loading tests
//!
//! Exercise the CSV loader against small hand-written files.

use crate::dataset::Dataset;
use crate::error::PredictorError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str =
    "District,Temperature,Humidity,Pressure,WindSpeed,Precipitation,CloudCover,DayOfYear,MonsoonPhase,Weather";

/// Write a dataset CSV into the temp directory and return its path
fn write_csv(temp_dir: &TempDir, body: &str) -> PathBuf {
    let path = temp_dir.path().join("weather.csv");
    fs::write(&path, format!("{}\n{}", HEADER, body)).unwrap();
    path
}

#[test]
fn test_load_valid_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        "Ernakulam,28.4,88.1,1011.2,12.3,16.2,77.5,200,SouthWest Monsoon,Heavy Rain\n\
         Idukki,24.9,76.0,1008.7,9.1,9.8,61.0,15,Post-Monsoon,Cloudy\n\
         Palakkad,32.0,70.5,1012.4,10.2,0.0,40.25,120,Pre-Monsoon,Sunny\n",
    );

    let dataset = Dataset::load(&path).unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.path(), path.as_path());

    let first = &dataset.records()[0];
    assert_eq!(first.sample.district, "Ernakulam");
    assert_eq!(first.sample.day_of_year, 200);
    assert_eq!(first.sample.monsoon_phase, "SouthWest Monsoon");
    assert_eq!(first.sample.measurements.cloud_cover, 77.5);
    assert_eq!(first.weather, "Heavy Rain");

    let third = &dataset.records()[2];
    assert_eq!(third.sample.measurements.precipitation, 0.0);
    assert_eq!(third.weather, "Sunny");
}

#[test]
fn test_column_order_does_not_matter() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("reordered.csv");
    fs::write(
        &path,
        "Weather,DayOfYear,District,MonsoonPhase,CloudCover,Precipitation,WindSpeed,Pressure,Humidity,Temperature\n\
         Sunny,100,Kollam,Pre-Monsoon,50,1.5,11,1010,78,31\n",
    )
    .unwrap();

    let dataset = Dataset::load(&path).unwrap();
    let record = &dataset.records()[0];
    assert_eq!(record.weather, "Sunny");
    assert_eq!(record.sample.district, "Kollam");
    assert_eq!(record.sample.measurements.temperature, 31.0);
    assert_eq!(record.sample.measurements.humidity, 78.0);
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.csv");

    match Dataset::load(&path) {
        Err(PredictorError::DatasetNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("Expected DatasetNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_column() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_weather.csv");
    fs::write(
        &path,
        "District,Temperature,Humidity,Pressure,WindSpeed,Precipitation,CloudCover,DayOfYear,MonsoonPhase\n\
         Kollam,31,78,1010,11,1.5,50,100,Pre-Monsoon\n",
    )
    .unwrap();

    match Dataset::load(&path) {
        Err(PredictorError::MissingColumn { column, .. }) => assert_eq!(column, "Weather"),
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_header_only_dataset_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(&temp_dir, "");

    assert!(matches!(
        Dataset::load(&path),
        Err(PredictorError::EmptyDataset { .. })
    ));
}

#[test]
fn test_missing_value_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        "Kollam,31,78,1010,11,1.5,50,100,Pre-Monsoon,Sunny\n\
         Kannur,,80,1010,12,3.0,65,180,SouthWest Monsoon,Rainy\n",
    );

    match Dataset::load(&path) {
        Err(PredictorError::MalformedDataset { reason, .. }) => {
            assert!(reason.contains("Temperature"), "{}", reason);
            assert!(reason.contains("row 2"), "{}", reason);
        }
        other => panic!("Expected MalformedDataset, got {:?}", other),
    }
}

#[test]
fn test_summary_counts_labels() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_csv(
        &temp_dir,
        "Kollam,31,78,1010,11,1.5,50,100,Pre-Monsoon,Sunny\n\
         Kollam,27,90,1009,13,18.0,80,190,SouthWest Monsoon,Rainy\n\
         Wayanad,24,82,1011,9,20.0,78,200,SouthWest Monsoon,Rainy\n",
    );

    let summary = Dataset::load(&path).unwrap().summary();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.districts["Kollam"], 2);
    assert_eq!(summary.districts["Wayanad"], 1);
    assert_eq!(summary.monsoon_phases["SouthWest Monsoon"], 2);
    assert_eq!(summary.weather["Rainy"], 2);
    assert_eq!(summary.weather["Sunny"], 1);
}

#[test]
fn test_from_records_rejects_empty() {
    assert!(matches!(
        Dataset::from_records("memory", Vec::new()),
        Err(PredictorError::EmptyDataset { .. })
    ));
}
