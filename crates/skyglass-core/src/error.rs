//! Centralized error types for Skyglass.
//!
//! Every crate's error converts into [`AppError`]; `user_message()` gives a
//! short, display-ready string while `Display` keeps the full detail for logs.

use skyglass_blur::BlurError;
use skyglass_weather::{LocationError, WeatherError};
use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Background error: {0}")]
    Blur(#[from] BlurError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Blur(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
