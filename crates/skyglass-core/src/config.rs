use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skyglass_blur::{stack::MAX_RADIUS, BlurOptions, FrostOptions, Tint};
use skyglass_weather::{
    DeriveOptions, ForecastMode, HourlyAnchor, Language, LocationSettings, ModeSwitchPolicy,
    ProviderConfig, FALLBACK_CITY, NOMINATIM_URL, OPEN_METEO_URL,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub location: LocationConfig,

    /// Panel background effect
    #[serde(default)]
    pub frost: FrostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Open-Meteo API root
    pub api_base_url: String,

    /// Refresh interval in minutes (0 disables periodic refresh)
    pub refresh_minutes: u32,

    /// Days of forecast to request (1-16)
    pub forecast_days: u8,

    /// HTTP timeout for every request
    pub timeout_secs: u64,

    pub language: Language,

    pub hourly_anchor: HourlyAnchor,

    /// Tab shown on start
    pub default_mode: ForecastMode,

    /// Whether switching tabs also refetches
    pub mode_switch: ModeSwitchPolicy,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: OPEN_METEO_URL.to_string(),
            refresh_minutes: 15,
            forecast_days: 7,
            timeout_secs: 10,
            language: Language::default(),
            hourly_anchor: HourlyAnchor::default(),
            default_mode: ForecastMode::default(),
            mode_switch: ModeSwitchPolicy::default(),
        }
    }
}

impl WeatherConfig {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            forecast_days: self.forecast_days,
        }
    }

    pub fn derive_options(&self) -> DeriveOptions {
        DeriveOptions {
            language: self.language,
            anchor: self.hourly_anchor,
        }
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_minutes > 0)
            .then(|| Duration::from_secs(u64::from(self.refresh_minutes) * 60))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Fixed coordinates; both or neither
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// IP geolocation endpoint returning `{latitude, longitude, city}`
    pub ip_lookup_url: Option<String>,

    /// Nominatim reverse endpoint
    pub geocode_url: String,

    /// Shown when the locality is unknown
    pub fallback_city: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            ip_lookup_url: Some("https://ipapi.co/json/".to_string()),
            geocode_url: NOMINATIM_URL.to_string(),
            fallback_city: FALLBACK_CITY.to_string(),
        }
    }
}

impl LocationConfig {
    pub fn settings(&self, timeout: Duration) -> LocationSettings {
        LocationSettings {
            latitude: self.latitude,
            longitude: self.longitude,
            ip_lookup_url: self.ip_lookup_url.clone(),
            timeout,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrostConfig {
    pub radius: u32,

    /// Working resolution for the blur, in (0, 1]
    pub scale: f32,

    /// Opacity of the black shade over the blur
    pub tint_alpha: u8,

    /// PNG to frost; nothing is rendered when unset
    pub background_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl Default for FrostConfig {
    fn default() -> Self {
        let defaults = FrostOptions::default();
        Self {
            radius: defaults.blur.radius,
            scale: defaults.blur.scale,
            tint_alpha: defaults.tint.alpha,
            background_path: None,
            output_path: None,
        }
    }
}

impl FrostConfig {
    pub fn options(&self) -> FrostOptions {
        FrostOptions {
            blur: BlurOptions::new(self.radius).with_scale(self.scale),
            tint: Tint::shade(self.tint_alpha),
        }
    }

    /// Where the frosted PNG goes: the configured path, or `<background>.frost.png`.
    pub fn resolved_output_path(&self) -> Option<PathBuf> {
        self.output_path.clone().or_else(|| {
            self.background_path
                .as_ref()
                .map(|p| p.with_extension("frost.png"))
        })
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);
        validate_url(&self.location.geocode_url, "location.geocode_url", &mut result);
        if let Some(url) = &self.location.ip_lookup_url {
            validate_url(url, "location.ip_lookup_url", &mut result);
        }

        if self.weather.refresh_minutes == 0 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh disabled (0 minutes)",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if !(1..=16).contains(&self.weather.forecast_days) {
            result.add_error("weather.forecast_days", "Forecast days must be between 1 and 16");
        }

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within -90..90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("location.longitude", "Longitude must be within -180..180");
                }
            }
            (None, None) => {
                if self.location.ip_lookup_url.is_none() {
                    result.add_warning(
                        "location",
                        "No coordinates or IP lookup configured - location will be unavailable",
                    );
                }
            }
            _ => result.add_error(
                "location",
                "latitude and longitude must be set together",
            ),
        }

        if self.frost.radius > MAX_RADIUS {
            result.add_error(
                "frost.radius",
                format!("Radius must be at most {}", MAX_RADIUS),
            );
        }
        if !(self.frost.scale > 0.0 && self.frost.scale <= 1.0) {
            result.add_error("frost.scale", "Scale must be in (0, 1]");
        }
        if let Some(path) = &self.frost.background_path {
            if !path.is_file() {
                result.add_warning(
                    "frost.background_path",
                    format!("File does not exist: {}", path.display()),
                );
            }
        }

        result
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyglass");

        Ok(config_dir.join("config.toml"))
    }
}

/// Validate a URL field
fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.api_base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.api_base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.location.geocode_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_half_configured_coordinates() {
        let mut config = Config::default();
        config.location.latitude = Some(55.0);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location"));
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let mut config = Config::default();
        config.location.latitude = Some(95.0);
        config.location.longitude = Some(10.0);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_no_location_source_is_warning() {
        let mut config = Config::default();
        config.location.ip_lookup_url = None;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_frost_limits() {
        let mut config = Config::default();
        config.frost.radius = MAX_RADIUS + 1;
        config.frost.scale = 0.0;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "frost.radius"));
        assert!(result.errors.iter().any(|e| e.field == "frost.scale"));
    }

    #[test]
    fn test_refresh_disabled_is_warning() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        assert!(config.weather.refresh_interval().is_none());
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            language = "russian"
            default_mode = "daily"

            [frost]
            radius = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.weather.language, Language::Russian);
        assert_eq!(config.weather.default_mode, ForecastMode::Daily);
        assert_eq!(config.weather.refresh_minutes, 15);
        assert_eq!(config.frost.radius, 10);
        assert_eq!(config.frost.tint_alpha, 128);
        assert_eq!(config.location.fallback_city, "Unknown");
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.weather.forecast_days, 7);

        let mut changed = config.clone();
        changed.weather.mode_switch = ModeSwitchPolicy::Refetch;
        changed.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.mode_switch, ModeSwitchPolicy::Refetch);
    }

    #[test]
    fn test_load_validated_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nforecast_days = 0\n").unwrap();
        assert!(Config::load_validated(Some(&path)).is_err());
    }

    #[test]
    fn test_frost_output_path_default() {
        let frost = FrostConfig {
            background_path: Some(PathBuf::from("/tmp/screen.png")),
            ..FrostConfig::default()
        };
        assert_eq!(
            frost.resolved_output_path(),
            Some(PathBuf::from("/tmp/screen.frost.png"))
        );
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
