//! Core data structures for weather generation and prediction.
//!
//! Defines districts and their climatic classes, monsoon phases, the
//! unlabelled weather sample produced by the generator, the labelled
//! training record, and the prediction returned to the CLI.

use crate::constants::{
    COASTAL_DISTRICTS, HIGHLAND_DISTRICTS, MIDLAND_DISTRICTS, NORTHEAST_MONSOON_DAYS,
    PRE_MONSOON_DAYS, SOUTHWEST_MONSOON_DAYS,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fourteen districts of Kerala
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum District {
    Thiruvananthapuram,
    Kollam,
    Alappuzha,
    Ernakulam,
    Kozhikode,
    Kannur,
    Kasaragod,
    Idukki,
    Wayanad,
    Kottayam,
    Pathanamthitta,
    Thrissur,
    Palakkad,
    Malappuram,
}

impl District {
    pub const ALL: [District; 14] = [
        District::Thiruvananthapuram,
        District::Kollam,
        District::Alappuzha,
        District::Ernakulam,
        District::Kozhikode,
        District::Kannur,
        District::Kasaragod,
        District::Idukki,
        District::Wayanad,
        District::Kottayam,
        District::Pathanamthitta,
        District::Thrissur,
        District::Palakkad,
        District::Malappuram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            District::Thiruvananthapuram => "Thiruvananthapuram",
            District::Kollam => "Kollam",
            District::Alappuzha => "Alappuzha",
            District::Ernakulam => "Ernakulam",
            District::Kozhikode => "Kozhikode",
            District::Kannur => "Kannur",
            District::Kasaragod => "Kasaragod",
            District::Idukki => "Idukki",
            District::Wayanad => "Wayanad",
            District::Kottayam => "Kottayam",
            District::Pathanamthitta => "Pathanamthitta",
            District::Thrissur => "Thrissur",
            District::Palakkad => "Palakkad",
            District::Malappuram => "Malappuram",
        }
    }

    pub fn class(&self) -> DistrictClass {
        DistrictClass::for_name(self.as_str())
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = String;

    /// Case-insensitive match on the district name
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        District::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown district: {}", s))
    }
}

/// Exact district name for a case-insensitive match, otherwise the input unchanged
pub fn canonical_district(name: &str) -> &str {
    match name.parse::<District>() {
        Ok(district) => district.as_str(),
        Err(_) => name,
    }
}

/// Climatic grouping used to bias generated features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictClass {
    Coastal,
    Highland,
    Midland,
    /// Any name outside the three groups; takes the unadjusted base values
    Other,
}

impl DistrictClass {
    /// Classify a district by exact name
    pub fn for_name(name: &str) -> Self {
        if COASTAL_DISTRICTS.contains(&name) {
            DistrictClass::Coastal
        } else if HIGHLAND_DISTRICTS.contains(&name) {
            DistrictClass::Highland
        } else if MIDLAND_DISTRICTS.contains(&name) {
            DistrictClass::Midland
        } else {
            DistrictClass::Other
        }
    }
}

impl fmt::Display for DistrictClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistrictClass::Coastal => write!(f, "Coastal"),
            DistrictClass::Highland => write!(f, "Highland"),
            DistrictClass::Midland => write!(f, "Midland"),
            DistrictClass::Other => write!(f, "Other"),
        }
    }
}

/// Seasonal phase derived purely from day-of-year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsoonPhase {
    SouthWest,
    NorthEast,
    PreMonsoon,
    PostMonsoon,
}

impl MonsoonPhase {
    /// Map a day-of-year onto the monsoon calendar.
    ///
    /// Bands are checked in order and the first match wins. Days outside
    /// 1..=366 land in the post-monsoon catch-all.
    pub fn from_day_of_year(day: u32) -> Self {
        let in_band = |(start, end): (u32, u32)| (start..=end).contains(&day);

        if in_band(SOUTHWEST_MONSOON_DAYS) {
            MonsoonPhase::SouthWest
        } else if in_band(NORTHEAST_MONSOON_DAYS) {
            MonsoonPhase::NorthEast
        } else if (PRE_MONSOON_DAYS.0..PRE_MONSOON_DAYS.1).contains(&day) {
            MonsoonPhase::PreMonsoon
        } else {
            MonsoonPhase::PostMonsoon
        }
    }

    /// Label used in the dataset's MonsoonPhase column
    pub fn label(&self) -> &'static str {
        match self {
            MonsoonPhase::SouthWest => "SouthWest Monsoon",
            MonsoonPhase::NorthEast => "NorthEast Monsoon",
            MonsoonPhase::PreMonsoon => "Pre-Monsoon",
            MonsoonPhase::PostMonsoon => "Post-Monsoon",
        }
    }
}

impl fmt::Display for MonsoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six sampled weather measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measurements {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    /// hPa
    pub pressure: f64,
    pub wind_speed: f64,
    /// Never negative
    pub precipitation: f64,
    /// Percent, within 0..=100
    pub cloud_cover: f64,
}

/// An unlabelled weather observation: the classifier's input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherSample {
    pub district: String,
    pub day_of_year: u32,
    pub monsoon_phase: String,
    #[serde(flatten)]
    pub measurements: Measurements,
}

/// One labelled row of the training dataset
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub sample: WeatherSample,
    pub weather: String,
}

/// Result of a single district/date prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub district: String,
    pub district_class: DistrictClass,
    pub date: NaiveDate,
    pub day_of_year: u32,
    pub features: WeatherSample,
    pub weather: String,
}
