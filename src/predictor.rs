//! Prediction context.
//!
//! [`WeatherPredictor`] is built once per process: it loads the dataset,
//! fits the classifier and then serves read-only predictions. It is passed
//! explicitly to whatever needs it instead of living in a global.

use crate::classifier::WeatherClassifier;
use crate::config::PredictorConfig;
use crate::dataset::{Dataset, DatasetSummary};
use crate::error::Result;
use crate::generator::{GaussianSource, WeatherGenerator};
use crate::models::{DistrictClass, Prediction, canonical_district};
use chrono::{Datelike, NaiveDate};
use indicatif::ProgressBar;
use tracing::{debug, info};

/// Loaded dataset summary plus fitted classifier
#[derive(Debug)]
pub struct WeatherPredictor {
    summary: DatasetSummary,
    classifier: WeatherClassifier,
}

impl WeatherPredictor {
    /// Load the configured dataset and fit the classifier
    pub fn initialize(config: &PredictorConfig, progress: &ProgressBar) -> Result<Self> {
        config.validate()?;
        let dataset = Dataset::load(&config.dataset_path)?;
        Self::from_dataset(&dataset, config, progress)
    }

    /// Fit on an already loaded dataset
    pub fn from_dataset(
        dataset: &Dataset,
        config: &PredictorConfig,
        progress: &ProgressBar,
    ) -> Result<Self> {
        let classifier = WeatherClassifier::fit(dataset, &config.forest, progress)?;
        info!(
            "Predictor ready: {} trees, {} weather labels",
            classifier.n_trees(),
            classifier.weather_labels().len()
        );

        Ok(Self {
            summary: dataset.summary(),
            classifier,
        })
    }

    /// Generate features for a district and date, then predict its weather.
    ///
    /// Known district names match case-insensitively; anything else is used as given.
    pub fn predict<S: GaussianSource>(
        &self,
        district: &str,
        date: NaiveDate,
        generator: &mut WeatherGenerator<S>,
    ) -> Result<Prediction> {
        let district = canonical_district(district);
        let day_of_year = date.ordinal();
        let features = generator.generate(district, day_of_year);
        let weather = self.classifier.predict(&features)?;

        debug!(
            "{} on {} (day {}, {}): {}",
            district, date, day_of_year, features.monsoon_phase, weather
        );

        Ok(Prediction {
            district: district.to_string(),
            district_class: DistrictClass::for_name(district),
            date,
            day_of_year,
            features,
            weather,
        })
    }

    /// Districts the classifier was trained on, in code order
    pub fn districts(&self) -> &[String] {
        self.classifier.encoder().district.classes()
    }

    pub fn weather_labels(&self) -> &[String] {
        self.classifier.weather_labels()
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn classifier(&self) -> &WeatherClassifier {
        &self.classifier
    }
}
