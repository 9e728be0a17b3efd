//! Synthetic weather feature generation.
//!
//! Turns a district and a day-of-year into a plausible weather sample:
//! base values are shifted by the district's climatic class and by the
//! monsoon phase, then each field is drawn from a Gaussian around the
//! shifted base. Sampling goes through [`GaussianSource`] so callers can
//! supply a seeded RNG or a fixed source.

use crate::constants::{CLOUD_COVER_RANGE, ROUND_DECIMALS, base, spread};
use crate::models::{DistrictClass, Measurements, MonsoonPhase, WeatherSample};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::trace;

/// Source of normally distributed values
pub trait GaussianSource {
    /// Draw one value from N(mean, std_dev²)
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64;
}

/// Adapts any [`Rng`] into a [`GaussianSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> GaussianSource for RngSource<R> {
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.0.sample(StandardNormal);
        mean + std_dev * z
    }
}

/// Centre of each sampling distribution after all adjustments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseValues {
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub cloud_cover: f64,
    pub wind_speed: f64,
}

impl BaseValues {
    /// Apply the district-class and monsoon-phase shifts to the base values
    pub fn adjusted(class: DistrictClass, phase: MonsoonPhase) -> Self {
        let mut values = Self {
            temperature: base::TEMPERATURE,
            humidity: base::HUMIDITY,
            precipitation: base::PRECIPITATION,
            cloud_cover: base::CLOUD_COVER,
            wind_speed: base::WIND_SPEED,
        };

        match class {
            DistrictClass::Coastal => {
                values.temperature -= 1.0;
                values.humidity += 5.0;
                values.wind_speed += 2.0;
            }
            DistrictClass::Highland => {
                values.temperature -= 3.0;
                values.humidity -= 2.0;
                values.precipitation += 5.0;
            }
            DistrictClass::Midland => {
                values.temperature += 0.5;
                values.humidity += 1.0;
            }
            DistrictClass::Other => {}
        }

        match phase {
            MonsoonPhase::SouthWest => {
                values.precipitation += 10.0;
                values.cloud_cover += 15.0;
                values.humidity += 5.0;
            }
            MonsoonPhase::NorthEast => {
                values.precipitation += 6.0;
                values.cloud_cover += 10.0;
            }
            MonsoonPhase::PreMonsoon => {
                values.temperature += 2.0;
                values.humidity -= 5.0;
                values.precipitation -= 3.0;
            }
            MonsoonPhase::PostMonsoon => {
                values.precipitation -= 2.0;
                values.temperature -= 1.0;
            }
        }

        values
    }
}

/// Generator of synthetic per-district, per-day weather samples
#[derive(Debug)]
pub struct WeatherGenerator<S> {
    source: S,
}

impl WeatherGenerator<RngSource<StdRng>> {
    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngSource(StdRng::seed_from_u64(seed)))
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(RngSource(StdRng::from_entropy()))
    }
}

impl<S: GaussianSource> WeatherGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Generate one weather sample for a district on a given day.
    ///
    /// Names outside the known district groups use the unadjusted base.
    /// Never fails.
    pub fn generate(&mut self, district: &str, day_of_year: u32) -> WeatherSample {
        let phase = MonsoonPhase::from_day_of_year(day_of_year);
        let class = DistrictClass::for_name(district);
        let base = BaseValues::adjusted(class, phase);

        trace!(
            "Generating {} ({}) day {} [{}]: {:?}",
            district, class, day_of_year, phase, base
        );

        let temperature = self.source.gaussian(base.temperature, spread::TEMPERATURE);
        let humidity = self.source.gaussian(base.humidity, spread::HUMIDITY);
        let pressure = self.source.gaussian(base::PRESSURE, spread::PRESSURE);
        let wind_speed = self.source.gaussian(base.wind_speed, spread::WIND_SPEED);
        let precipitation = self
            .source
            .gaussian(base.precipitation, spread::PRECIPITATION)
            .max(0.0);
        let cloud_cover = self
            .source
            .gaussian(base.cloud_cover, spread::CLOUD_COVER)
            .clamp(CLOUD_COVER_RANGE.0, CLOUD_COVER_RANGE.1);

        WeatherSample {
            district: district.to_string(),
            day_of_year,
            monsoon_phase: phase.label().to_string(),
            measurements: Measurements {
                temperature: round(temperature),
                humidity: round(humidity),
                pressure: round(pressure),
                wind_speed: round(wind_speed),
                precipitation: round(precipitation),
                cloud_cover: round(cloud_cover),
            },
        }
    }
}

fn round(value: f64) -> f64 {
    let factor = 10f64.powi(ROUND_DECIMALS);
    (value * factor).round() / factor
}
