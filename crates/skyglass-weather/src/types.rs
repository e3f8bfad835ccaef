use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::code::WeatherCode;

/// Which forecast strip is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMode {
    #[default]
    Hourly,
    Daily,
}

impl ForecastMode {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Hourly => Self::Daily,
            Self::Daily => Self::Hourly,
        }
    }
}

/// Day or night background theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    /// Day from 06:00 through 18:59 local time.
    pub fn for_hour(hour: u32) -> Self {
        if (6..=18).contains(&hour) {
            Self::Day
        } else {
            Self::Night
        }
    }

    pub fn is_night(&self) -> bool {
        matches!(self, Self::Night)
    }
}

/// Geographic location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
    pub city_name: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters: None,
            city_name: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Current weather conditions, in the location's local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub code: WeatherCode,
}

impl CurrentConditions {
    pub fn theme(&self) -> Theme {
        Theme::for_hour(self.time.hour())
    }
}

/// One hour of the hourly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub time: NaiveDateTime,
    pub temperature: f64,
    pub code: WeatherCode,
}

/// One day of the daily series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub code: WeatherCode,
}

/// Hourly samples in API order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub samples: Vec<HourlySample>,
}

/// Daily samples in API order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    pub samples: Vec<DailySample>,
}

impl HourlySeries {
    pub fn new(samples: Vec<HourlySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl DailySeries {
    pub fn new(samples: Vec<DailySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Everything one forecast request returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub current: Option<CurrentConditions>,
    pub hourly: Option<HourlySeries>,
    pub daily: Option<DailySeries>,
    /// IANA zone the server resolved the coordinates to.
    pub timezone: Option<String>,
}

/// A display-ready cell of the forecast strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub label: String,
    pub temperature_text: String,
    pub weather_code: WeatherCode,
    pub is_highlighted: bool,
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Location access was denied. Allow it in settings.",
            Self::ServiceUnavailable => "Could not determine your location. Check settings.",
            Self::Timeout => "Location lookup timed out. Please try again.",
            Self::Other(_) => "Could not determine your location.",
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) if e.is_timeout() => {
                "The weather request timed out. Please try again."
            }
            Self::Network(_) => "Unable to reach the weather service. Check your connection.",
            Self::Location(e) => e.user_message(),
            Self::Api { status, .. } if *status >= 500 => {
                "The weather service is having issues. Please try again later."
            }
            Self::Api { .. } => "The weather request was rejected.",
            Self::Parse(_) => "Received unexpected weather data.",
        }
    }
}
