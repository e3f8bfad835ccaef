//! Weather data for Skyglass
//!
//! Fetches current conditions and hourly/daily series from the Open-Meteo
//! API, maps WMO codes to descriptions and icons, and derives the forecast
//! strip shown on the screen.

pub mod api;
pub mod code;
pub mod forecast;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod state;
pub mod types;

pub use code::{Language, WeatherCode, WeatherCondition, WeatherIcon};
pub use forecast::{derive_daily, derive_hourly, DeriveOptions, HourlyAnchor, HOURLY_WINDOW};
pub use geocode::{display_city, reverse_geocode, FALLBACK_CITY, NOMINATIM_URL};
pub use location::LocationSettings;
pub use provider::{ForecastBlocks, ProviderConfig, WeatherProvider, OPEN_METEO_URL};
pub use state::{ModeSwitch, ModeSwitchPolicy, ScreenState};
pub use types::*;
