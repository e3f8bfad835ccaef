//! Open-Meteo forecast response shapes and their conversion into typed series.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::code::WeatherCode;
use crate::types::{
    CurrentConditions, DailySample, DailySeries, HourlySample, HourlySeries, WeatherError,
    WeatherPayload,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    timezone: Option<String>,
    current: Option<CurrentBlock>,
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    temperature_2m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
}

/// Body Open-Meteo sends with a 4xx status.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub reason: String,
}

/// Parse a local timestamp as sent by the API (`2024-03-01T14:00`, seconds optional).
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::Parse(format!("invalid timestamp {:?}: {}", s, e)))
}

/// Parse a local date (`2024-03-01`).
pub fn parse_local_date(s: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| WeatherError::Parse(format!("invalid date {:?}: {}", s, e)))
}

fn check_aligned(
    block: &str,
    expected: usize,
    lengths: &[(&str, usize)],
) -> Result<(), WeatherError> {
    for (name, len) in lengths {
        if *len != expected {
            return Err(WeatherError::Parse(format!(
                "{}.{} has {} values but {}.time has {}",
                block, name, len, block, expected
            )));
        }
    }
    Ok(())
}

impl TryFrom<HourlyBlock> for HourlySeries {
    type Error = WeatherError;

    fn try_from(block: HourlyBlock) -> Result<Self, Self::Error> {
        check_aligned(
            "hourly",
            block.time.len(),
            &[
                ("temperature_2m", block.temperature_2m.len()),
                ("weather_code", block.weather_code.len()),
            ],
        )?;

        let mut samples = Vec::with_capacity(block.time.len());
        for ((time, temperature), code) in block
            .time
            .iter()
            .zip(block.temperature_2m)
            .zip(block.weather_code)
        {
            let time = parse_local_datetime(time)?;
            match (temperature, code) {
                (Some(temperature), Some(code)) => samples.push(HourlySample {
                    time,
                    temperature,
                    code: WeatherCode(code),
                }),
                _ => tracing::debug!("Skipping hourly sample with missing values at {}", time),
            }
        }
        Ok(HourlySeries::new(samples))
    }
}

impl TryFrom<DailyBlock> for DailySeries {
    type Error = WeatherError;

    fn try_from(block: DailyBlock) -> Result<Self, Self::Error> {
        check_aligned(
            "daily",
            block.time.len(),
            &[
                ("temperature_2m_max", block.temperature_2m_max.len()),
                ("temperature_2m_min", block.temperature_2m_min.len()),
                ("weather_code", block.weather_code.len()),
            ],
        )?;

        let mut samples = Vec::with_capacity(block.time.len());
        for (((date, max), min), code) in block
            .time
            .iter()
            .zip(block.temperature_2m_max)
            .zip(block.temperature_2m_min)
            .zip(block.weather_code)
        {
            let date = parse_local_date(date)?;
            match (max, min, code) {
                (Some(temperature_max), Some(temperature_min), Some(code)) => {
                    samples.push(DailySample {
                        date,
                        temperature_max,
                        temperature_min,
                        code: WeatherCode(code),
                    })
                }
                _ => tracing::debug!("Skipping daily sample with missing values on {}", date),
            }
        }
        Ok(DailySeries::new(samples))
    }
}

impl TryFrom<ForecastResponse> for WeatherPayload {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let current = response
            .current
            .map(|c| -> Result<_, WeatherError> {
                Ok(CurrentConditions {
                    time: parse_local_datetime(&c.time)?,
                    temperature: c.temperature_2m,
                    code: WeatherCode(c.weather_code),
                })
            })
            .transpose()?;

        Ok(WeatherPayload {
            current,
            hourly: response.hourly.map(HourlySeries::try_from).transpose()?,
            daily: response.daily.map(DailySeries::try_from).transpose()?,
            timezone: response.timezone,
        })
    }
}

impl WeatherPayload {
    /// Parse a forecast response body.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Parse`] for malformed JSON, bad timestamps or
    /// parallel arrays of different lengths.
    pub fn from_json(body: &str) -> Result<Self, WeatherError> {
        let response: ForecastResponse =
            serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;
        Self::try_from(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const SAMPLE: &str = r#"{
        "latitude": 55.75,
        "longitude": 37.625,
        "timezone": "Europe/Moscow",
        "current": { "time": "2024-03-01T14:15", "interval": 900, "temperature_2m": -2.6, "weather_code": 71 },
        "hourly": {
            "time": ["2024-03-01T14:00", "2024-03-01T15:00", "2024-03-01T16:00"],
            "temperature_2m": [-2.5, null, -3.1],
            "weather_code": [71, 73, 3]
        },
        "daily": {
            "time": ["2024-03-01", "2024-03-02"],
            "temperature_2m_max": [-1.0, 2.4],
            "temperature_2m_min": [-7.9, -3.0],
            "weather_code": [71, 3]
        }
    }"#;

    #[test]
    fn test_parse_full_response() {
        let payload = WeatherPayload::from_json(SAMPLE).unwrap();

        let current = payload.current.unwrap();
        assert_eq!(current.time.hour(), 14);
        assert_eq!(current.time.minute(), 15);
        assert_eq!(current.code, WeatherCode(71));

        let hourly = payload.hourly.unwrap();
        assert_eq!(hourly.len(), 2, "null temperature sample is skipped");
        assert_eq!(hourly.samples[1].code, WeatherCode(3));

        let daily = payload.daily.unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.samples[1].temperature_max, 2.4);
        assert_eq!(payload.timezone.as_deref(), Some("Europe/Moscow"));
    }

    #[test]
    fn test_optional_blocks_absent() {
        let body = r#"{"current": {"time": "2024-03-01T14:00", "temperature_2m": 1.0, "weather_code": 0}}"#;
        let payload = WeatherPayload::from_json(body).unwrap();
        assert!(payload.current.is_some());
        assert!(payload.hourly.is_none());
        assert!(payload.daily.is_none());
    }

    #[test]
    fn test_misaligned_arrays_rejected() {
        let body = r#"{"hourly": {"time": ["2024-03-01T14:00"], "temperature_2m": [1.0, 2.0], "weather_code": [0]}}"#;
        let err = WeatherPayload::from_json(body).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(ref m) if m.contains("temperature_2m")));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let body = r#"{"daily": {"time": ["01/03/2024"], "temperature_2m_max": [1.0], "temperature_2m_min": [0.0], "weather_code": [0]}}"#;
        assert!(matches!(WeatherPayload::from_json(body), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn test_timestamp_with_seconds() {
        let t = parse_local_datetime("2024-03-01T14:00:30").unwrap();
        assert_eq!(t.second(), 30);
    }
}
