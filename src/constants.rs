//! Application constants for the Kerala weather predictor
//!
//! District groupings, generator base values and spreads, calendar bands,
//! dataset column names and model defaults.

// =============================================================================
// Districts
// =============================================================================

/// Coastal districts: cooler, more humid, windier
pub const COASTAL_DISTRICTS: &[&str] = &[
    "Thiruvananthapuram",
    "Kollam",
    "Alappuzha",
    "Ernakulam",
    "Kozhikode",
    "Kannur",
    "Kasaragod",
];

/// Highland districts: coolest, slightly drier air, more rain
pub const HIGHLAND_DISTRICTS: &[&str] = &["Idukki", "Wayanad"];

/// Midland districts
pub const MIDLAND_DISTRICTS: &[&str] = &[
    "Kottayam",
    "Pathanamthitta",
    "Thrissur",
    "Palakkad",
    "Malappuram",
];

// =============================================================================
// Feature Generator
// =============================================================================

/// Base values before any district or monsoon adjustment
pub mod base {
    pub const TEMPERATURE: f64 = 29.0;
    pub const HUMIDITY: f64 = 80.0;
    pub const PRECIPITATION: f64 = 5.0;
    pub const CLOUD_COVER: f64 = 60.0;
    pub const WIND_SPEED: f64 = 10.0;

    /// Pressure ignores district and monsoon phase
    pub const PRESSURE: f64 = 1010.0;
}

/// Standard deviation of each sampled field
pub mod spread {
    pub const TEMPERATURE: f64 = 1.5;
    pub const HUMIDITY: f64 = 5.0;
    pub const PRESSURE: f64 = 5.0;
    pub const WIND_SPEED: f64 = 2.0;
    pub const PRECIPITATION: f64 = 4.0;
    pub const CLOUD_COVER: f64 = 10.0;
}

/// Cloud cover is a percentage
pub const CLOUD_COVER_RANGE: (f64, f64) = (0.0, 100.0);

/// Generated values are rounded to this many decimal places
pub const ROUND_DECIMALS: i32 = 2;

// =============================================================================
// Monsoon Calendar (day-of-year bands, inclusive unless noted)
// =============================================================================

pub const SOUTHWEST_MONSOON_DAYS: (u32, u32) = (150, 270);
pub const NORTHEAST_MONSOON_DAYS: (u32, u32) = (271, 330);
/// Upper bound is exclusive: day 150 belongs to the south-west monsoon
pub const PRE_MONSOON_DAYS: (u32, u32) = (90, 150);

// =============================================================================
// Dataset Columns
// =============================================================================

pub mod columns {
    pub const DISTRICT: &str = "District";
    pub const WEATHER: &str = "Weather";
    pub const MONSOON_PHASE: &str = "MonsoonPhase";
    pub const TEMPERATURE: &str = "Temperature";
    pub const HUMIDITY: &str = "Humidity";
    pub const PRESSURE: &str = "Pressure";
    pub const WIND_SPEED: &str = "WindSpeed";
    pub const PRECIPITATION: &str = "Precipitation";
    pub const CLOUD_COVER: &str = "CloudCover";
    pub const DAY_OF_YEAR: &str = "DayOfYear";

    /// Every column the dataset must provide
    pub const REQUIRED: &[&str] = &[
        DISTRICT,
        WEATHER,
        MONSOON_PHASE,
        TEMPERATURE,
        HUMIDITY,
        PRESSURE,
        WIND_SPEED,
        PRECIPITATION,
        CLOUD_COVER,
        DAY_OF_YEAR,
    ];

    /// Classifier input columns, in model order
    pub const FEATURES: &[&str] = &[
        DISTRICT,
        TEMPERATURE,
        HUMIDITY,
        PRESSURE,
        WIND_SPEED,
        PRECIPITATION,
        CLOUD_COVER,
        DAY_OF_YEAR,
        MONSOON_PHASE,
    ];
}

/// Width of the encoded feature vector
pub const FEATURE_COUNT: usize = 9;

// =============================================================================
// Defaults
// =============================================================================

/// Dataset file name looked up when no path is given
pub const DEFAULT_DATASET_FILE: &str = "kerala_district_weather_20000.csv";

/// Application directory under the user data dir
pub const DATA_DIR_NAME: &str = "kerala-weather";

pub const DEFAULT_N_ESTIMATORS: usize = 400;
pub const DEFAULT_FOREST_SEED: u64 = 42;
pub const DEFAULT_MIN_SAMPLES_SPLIT: usize = 2;
/// Candidate features per split: ceil(sqrt(FEATURE_COUNT))
pub const DEFAULT_MAX_FEATURES: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_district_groups_cover_fourteen_districts() {
        let total = COASTAL_DISTRICTS.len() + HIGHLAND_DISTRICTS.len() + MIDLAND_DISTRICTS.len();
        assert_eq!(total, 14);
    }

    #[test]
    fn test_feature_columns_exclude_target() {
        assert_eq!(columns::FEATURES.len(), FEATURE_COUNT);
        assert_eq!(
            DEFAULT_MAX_FEATURES,
            (FEATURE_COUNT as f64).sqrt().ceil() as usize
        );
        assert!(!columns::FEATURES.contains(&columns::WEATHER));
        for feature in columns::FEATURES {
            assert!(columns::REQUIRED.contains(feature));
        }
    }
}
