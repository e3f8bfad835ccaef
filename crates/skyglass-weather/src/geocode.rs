//! Reverse geocoding: convert coordinates to a locality name.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::Location;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
/// Shown when no locality can be determined.
pub const FALLBACK_CITY: &str = "Unknown";

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("Skyglass/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state_district: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
}

impl NominatimAddress {
    /// Locality first, then the administrative area it belongs to.
    fn locality(self) -> Option<String> {
        [
            self.city,
            self.town,
            self.village,
            self.municipality,
            self.state_district,
            self.state,
            self.county,
            self.country,
        ]
        .into_iter()
        .flatten()
        .find(|name| !name.trim().is_empty())
    }
}

/// Name to display for a lookup result, or `fallback` when there is none.
pub fn display_city(name: Option<String>, fallback: &str) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Reverse geocode coordinates to a locality name (e.g. "Kazan").
/// Returns `None` on failure or timeout; the caller falls back to a fixed label.
pub async fn reverse_geocode(location: &Location, base_url: &str) -> Option<String> {
    if location.city_name.is_some() {
        return location.city_name.clone();
    }

    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let response = match client
        .get(base_url)
        .query(&[
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("zoom", "10".to_string()),
        ])
        .send()
        .await
    {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    let result = body.address?.locality()?;
    tracing::info!("Reverse geocoded to: {}", result);
    Some(result)
}
