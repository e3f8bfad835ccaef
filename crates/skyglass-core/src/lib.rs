pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{Config, FrostConfig, LocationConfig, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError};

/// Initialize tracing/logging.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init() {
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("Skyglass core initialized");
    }
}
