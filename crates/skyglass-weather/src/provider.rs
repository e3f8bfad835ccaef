//! Open-Meteo forecast client.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::api::ApiErrorBody;
use crate::types::{ForecastMode, Location, WeatherError, WeatherPayload};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1";

const CURRENT_FIELDS: &str = "temperature_2m,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API root, without the trailing `/forecast`.
    pub base_url: String,
    pub timeout: Duration,
    /// Days of hourly/daily data requested (Open-Meteo accepts 1..=16).
    pub forecast_days: u8,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_URL.to_string(),
            timeout: Duration::from_secs(10),
            forecast_days: 7,
        }
    }
}

/// Optional series blocks to request alongside current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastBlocks {
    pub hourly: bool,
    pub daily: bool,
}

impl ForecastBlocks {
    pub const ALL: Self = Self {
        hourly: true,
        daily: true,
    };

    pub const CURRENT_ONLY: Self = Self {
        hourly: false,
        daily: false,
    };

    /// Only the block the given mode displays.
    pub fn for_mode(mode: ForecastMode) -> Self {
        match mode {
            ForecastMode::Hourly => Self {
                hourly: true,
                daily: false,
            },
            ForecastMode::Daily => Self {
                hourly: false,
                daily: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    config: ProviderConfig,
}

impl WeatherProvider {
    /// Build a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ProviderConfig) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn query(&self, location: &Location, blocks: ForecastBlocks) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latitude", location.latitude.to_string()),
            ("longitude", location.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
        ];
        if blocks.hourly {
            query.push(("hourly", HOURLY_FIELDS.to_string()));
        }
        if blocks.daily {
            query.push(("daily", DAILY_FIELDS.to_string()));
        }
        query.push(("forecast_days", self.config.forecast_days.to_string()));
        query.push(("timezone", "auto".to_string()));
        query
    }

    /// Fetch current conditions plus the requested series blocks.
    ///
    /// Issues exactly one request; failures are not retried.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Network`] on transport failure, [`WeatherError::Api`]
    /// on a non-success status and [`WeatherError::Parse`] on a malformed body.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(
        &self,
        location: &Location,
        blocks: ForecastBlocks,
    ) -> Result<WeatherPayload, WeatherError> {
        let url = format!("{}/forecast", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .query(&self.query(location, blocks))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.reason)
                .unwrap_or(body);
            tracing::warn!("Forecast request failed with {}: {}", status, message);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload = WeatherPayload::from_json(&body)?;
        tracing::debug!(
            hourly = payload.hourly.as_ref().map(|s| s.len()),
            daily = payload.daily.as_ref().map(|s| s.len()),
            "Forecast received"
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::WeatherCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str) -> WeatherProvider {
        WeatherProvider::new(ProviderConfig {
            base_url: base_url.to_string(),
            ..ProviderConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_blocks_for_mode() {
        assert_eq!(
            ForecastBlocks::for_mode(ForecastMode::Hourly),
            ForecastBlocks {
                hourly: true,
                daily: false
            }
        );
        assert!(ForecastBlocks::for_mode(ForecastMode::Daily).daily);
    }

    #[tokio::test]
    async fn test_fetch_current_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("latitude", "55.75"))
            .and(query_param("current", "temperature_2m,weather_code"))
            .and(query_param("timezone", "auto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": { "time": "2024-03-01T14:00", "temperature_2m": 3.2, "weather_code": 2 }
            })))
            .mount(&mock_server)
            .await;

        let payload = provider(&mock_server.uri())
            .fetch(&Location::new(55.75, 37.62), ForecastBlocks::CURRENT_ONLY)
            .await
            .unwrap();

        let current = payload.current.unwrap();
        assert_eq!(current.code, WeatherCode(2));
        assert!(payload.hourly.is_none());
    }

    #[tokio::test]
    async fn test_fetch_api_error_reason() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "Latitude must be in range of -90 to 90°."
            })))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server.uri())
            .fetch(&Location::new(95.0, 0.0), ForecastBlocks::ALL)
            .await;

        match result {
            Err(WeatherError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("Latitude"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = provider(&mock_server.uri())
            .fetch(&Location::new(0.0, 0.0), ForecastBlocks::ALL)
            .await;
        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }
}
