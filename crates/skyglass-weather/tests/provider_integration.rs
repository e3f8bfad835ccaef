//! End-to-end: fetch from a mock Open-Meteo server and derive the strip.

use chrono::NaiveDate;
use skyglass_weather::{
    DeriveOptions, ForecastBlocks, ForecastMode, Location, ModeSwitchPolicy, ProviderConfig,
    ScreenState, WeatherProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    let hours: Vec<String> = (0..48)
        .map(|h| format!("2024-10-{:02}T{:02}:00", 19 + h / 24, h % 24))
        .collect();
    let temps: Vec<f64> = (0..48).map(|h| 5.0 + f64::from(h % 24) * 0.5).collect();
    let codes: Vec<i32> = (0..48).map(|h| if h < 30 { 3 } else { 61 }).collect();

    serde_json::json!({
        "timezone": "Europe/Berlin",
        "current": { "time": "2024-10-19T09:30", "temperature_2m": 9.8, "weather_code": 3 },
        "hourly": { "time": hours, "temperature_2m": temps, "weather_code": codes },
        "daily": {
            "time": ["2024-10-19", "2024-10-20", "2024-10-21", "2024-10-22"],
            "temperature_2m_max": [12.1, 14.6, 11.0, 9.9],
            "temperature_2m_min": [4.2, 6.0, 5.5, 1.3],
            "weather_code": [3, 61, 80, 0]
        }
    })
}

#[tokio::test]
async fn test_fetch_and_derive() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("hourly", "temperature_2m,weather_code"))
        .and(query_param("daily", "temperature_2m_max,temperature_2m_min,weather_code"))
        .and(query_param("forecast_days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(ProviderConfig {
        base_url: format!("{}/v1/", mock_server.uri()),
        forecast_days: 2,
        ..ProviderConfig::default()
    })
    .unwrap();

    let mut state = ScreenState::new(ForecastMode::Hourly, "Unknown");
    let blocks = state.blocks_to_fetch(ModeSwitchPolicy::RenderCached);
    assert_eq!(blocks, ForecastBlocks::ALL);

    let payload = provider
        .fetch(&Location::new(52.52, 13.41), blocks)
        .await
        .unwrap();

    let fallback_now = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    state.apply_payload(&payload, fallback_now, &DeriveOptions::default());

    // Current time 09:30 -> strip starts at 10:00.
    let hourly = state.visible_entries();
    assert_eq!(hourly.len(), 24);
    assert_eq!(hourly[0].label, "Now");
    assert_eq!(hourly[0].temperature_text, "10°");
    assert_eq!(hourly[1].label, "11:00");

    state.switch_mode(ForecastMode::Daily, ModeSwitchPolicy::RenderCached);
    let daily: Vec<(&str, &str)> = state
        .visible_entries()
        .iter()
        .map(|e| (e.label.as_str(), e.temperature_text.as_str()))
        .collect();
    // 2024-10-21 is a Monday.
    assert_eq!(
        daily,
        vec![
            ("Today", "12° / 4°"),
            ("Tomorrow", "14° / 6°"),
            ("Mon", "11° / 5°"),
            ("Tue", "9° / 1°"),
        ]
    );
}

#[tokio::test]
async fn test_server_error_keeps_previous_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let provider = WeatherProvider::new(ProviderConfig {
        base_url: mock_server.uri(),
        ..ProviderConfig::default()
    })
    .unwrap();

    let mut state = ScreenState::new(ForecastMode::Hourly, "Unknown");
    let err = provider
        .fetch(&Location::new(0.0, 0.0), ForecastBlocks::ALL)
        .await
        .unwrap_err();
    state.record_failure(err.user_message());

    assert!(state.hourly.is_empty());
    assert!(state.last_error.unwrap().contains("later"));
}
