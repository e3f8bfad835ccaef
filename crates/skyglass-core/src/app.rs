use anyhow::Result;
use skyglass_blur::FrostOptions;
use skyglass_weather::{DeriveOptions, LocationSettings, ScreenState, WeatherProvider};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, ConfigError};
use crate::Config;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    provider: Arc<WeatherProvider>,
}

impl App {
    /// Create an application from an explicit configuration
    pub fn new(config: Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }
        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }
        Self::from_validated(config)
    }

    fn from_validated(config: Config) -> Result<Self, AppError> {
        let provider = WeatherProvider::new(config.weather.provider_config())?;

        Ok(Self {
            config: Arc::new(config),
            provider: Arc::new(provider),
        })
    }

    /// Load configuration from `path` (or the default location) and create the application
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config, _) = Config::load_validated(path)?;
        Ok(Self::from_validated(config)?)
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> Arc<WeatherProvider> {
        Arc::clone(&self.provider)
    }

    pub fn location_settings(&self) -> LocationSettings {
        self.config
            .location
            .settings(Duration::from_secs(self.config.weather.timeout_secs))
    }

    pub fn derive_options(&self) -> DeriveOptions {
        self.config.weather.derive_options()
    }

    pub fn frost_options(&self) -> FrostOptions {
        self.config.frost.options()
    }

    /// Fresh state for one screen session
    pub fn new_screen_state(&self) -> ScreenState {
        ScreenState::new(
            self.config.weather.default_mode,
            self.config.location.fallback_city.clone(),
        )
    }

    pub fn shutdown(&self) {
        tracing::info!("Shutting down application");
    }
}
