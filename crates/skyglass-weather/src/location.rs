//! Location lookup.
//!
//! Configured coordinates take priority. Without them, an optional IP
//! geolocation endpoint returning `{latitude, longitude, city}` is queried.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{Location, LocationError};

#[derive(Debug, Clone)]
pub struct LocationSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub ip_lookup_url: Option<String>,
    pub timeout: Duration,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            ip_lookup_url: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    latitude: f64,
    longitude: f64,
    city: Option<String>,
}

fn checked(location: Location) -> Result<Location, LocationError> {
    if location.is_valid() {
        Ok(location)
    } else {
        Err(LocationError::Other(format!(
            "coordinates out of range: {}, {}",
            location.latitude, location.longitude
        )))
    }
}

/// Resolve the device location.
///
/// # Errors
///
/// [`LocationError::ServiceUnavailable`] when no source is configured or the
/// lookup endpoint answers with an error status, [`LocationError::Timeout`]
/// when it does not answer in time, and [`LocationError::Other`] for
/// half-configured or out-of-range coordinates and unreadable responses.
pub async fn get_current_location(settings: &LocationSettings) -> Result<Location, LocationError> {
    match (settings.latitude, settings.longitude) {
        (Some(latitude), Some(longitude)) => {
            tracing::debug!("Using configured location {}, {}", latitude, longitude);
            return checked(Location::new(latitude, longitude));
        }
        (None, None) => {}
        _ => {
            return Err(LocationError::Other(
                "latitude and longitude must be configured together".to_string(),
            ))
        }
    }

    let Some(url) = settings.ip_lookup_url.as_deref() else {
        return Err(LocationError::ServiceUnavailable);
    };

    let client = Client::builder()
        .timeout(settings.timeout)
        .build()
        .map_err(|e| LocationError::Other(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            LocationError::Timeout
        } else {
            LocationError::Other(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        tracing::debug!("IP location lookup returned status {}", response.status());
        return Err(LocationError::ServiceUnavailable);
    }

    let body: IpLookupResponse = response
        .json()
        .await
        .map_err(|e| LocationError::Other(format!("unreadable location response: {}", e)))?;

    let location = checked(Location {
        latitude: body.latitude,
        longitude: body.longitude,
        accuracy_meters: None,
        city_name: body.city.filter(|c| !c.trim().is_empty()),
    })?;
    tracing::info!("Got location: {}, {}", location.latitude, location.longitude);
    Ok(location)
}
