//! Caller-owned screen state.
//!
//! Holds everything one screen session displays. The host owns a single
//! `ScreenState` and feeds it results; derivation stays in [`crate::forecast`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::forecast::{derive_daily, derive_hourly, DeriveOptions};
use crate::geocode::display_city;
use crate::provider::ForecastBlocks;
use crate::types::{CurrentConditions, ForecastEntry, ForecastMode, Location, Theme, WeatherPayload};

/// What switching the forecast tab does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModeSwitchPolicy {
    /// Show the already-derived list of the new mode.
    #[default]
    RenderCached,
    /// Show the cached list and also ask for a fresh fetch.
    Refetch,
}

/// Outcome of [`ScreenState::switch_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSwitch {
    pub changed: bool,
    pub refetch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub location: Option<Location>,
    pub city: String,
    pub mode: ForecastMode,
    pub current: Option<CurrentConditions>,
    pub hourly: Vec<ForecastEntry>,
    pub daily: Vec<ForecastEntry>,
    pub updated_at: Option<NaiveDateTime>,
    pub last_error: Option<String>,
    fallback_city: String,
}

impl ScreenState {
    pub fn new(mode: ForecastMode, fallback_city: impl Into<String>) -> Self {
        let fallback_city = fallback_city.into();
        Self {
            location: None,
            city: fallback_city.clone(),
            mode,
            current: None,
            hourly: Vec::new(),
            daily: Vec::new(),
            updated_at: None,
            last_error: None,
            fallback_city,
        }
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Store a resolved location and its (possibly missing) locality name.
    pub fn apply_location(&mut self, location: Location, city: Option<String>) {
        self.city = display_city(city, &self.fallback_city);
        self.location = Some(location);
    }

    /// Update from a fetched payload.
    ///
    /// Lists are derived relative to the payload's own current time (the
    /// location's local clock); `clock_now` is used when the payload has no
    /// current block. A series block missing from the payload keeps its
    /// previously derived list.
    pub fn apply_payload(
        &mut self,
        payload: &WeatherPayload,
        clock_now: NaiveDateTime,
        options: &DeriveOptions,
    ) {
        let now = payload.current.as_ref().map_or(clock_now, |c| c.time);

        if let Some(current) = &payload.current {
            self.current = Some(current.clone());
        }
        if let Some(hourly) = &payload.hourly {
            self.hourly = derive_hourly(hourly, now, options);
        }
        if let Some(daily) = &payload.daily {
            self.daily = derive_daily(daily, now, options);
        }
        self.updated_at = Some(now);
        self.last_error = None;

        tracing::debug!(
            hourly = self.hourly.len(),
            daily = self.daily.len(),
            "Screen state updated"
        );
    }

    /// Remember a failure without discarding what is already shown.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("Refresh failed: {}", message);
        self.last_error = Some(message);
    }

    /// Change the visible forecast tab.
    pub fn switch_mode(&mut self, mode: ForecastMode, policy: ModeSwitchPolicy) -> ModeSwitch {
        let changed = self.mode != mode;
        self.mode = mode;
        ModeSwitch {
            changed,
            refetch: changed && policy == ModeSwitchPolicy::Refetch,
        }
    }

    /// Entries of the active tab.
    pub fn visible_entries(&self) -> &[ForecastEntry] {
        match self.mode {
            ForecastMode::Hourly => &self.hourly,
            ForecastMode::Daily => &self.daily,
        }
    }

    pub fn theme(&self) -> Theme {
        self.current.as_ref().map(|c| c.theme()).unwrap_or_default()
    }

    /// Blocks a refresh should request.
    ///
    /// Rendering cached lists on a tab switch needs both series up front;
    /// refetching on switch only needs the visible one.
    pub fn blocks_to_fetch(&self, policy: ModeSwitchPolicy) -> ForecastBlocks {
        match policy {
            ModeSwitchPolicy::RenderCached => ForecastBlocks::ALL,
            ModeSwitchPolicy::Refetch => ForecastBlocks::for_mode(self.mode),
        }
    }
}
