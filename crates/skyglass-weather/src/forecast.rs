//! Forecast strip derivation.
//!
//! Turns typed hourly/daily series into display-ready [`ForecastEntry`]
//! lists. Pure and deterministic: the same series and `now` always produce
//! the same entries.

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::code::Language;
use crate::types::{DailySeries, ForecastEntry, HourlySeries};

/// Maximum number of hourly entries shown.
pub const HOURLY_WINDOW: usize = 24;

/// Where the hourly strip starts relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HourlyAnchor {
    /// First sample not earlier than `now`.
    #[default]
    AtOrAfterNow,
    /// First sample not earlier than one hour before `now`, so the hour in
    /// progress is still shown as "Now".
    WithinPastHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeriveOptions {
    pub language: Language,
    pub anchor: HourlyAnchor,
}

struct Labels {
    now: &'static str,
    today: &'static str,
    tomorrow: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::English => Labels {
            now: "Now",
            today: "Today",
            tomorrow: "Tomorrow",
        },
        Language::Russian => Labels {
            now: "Сейчас",
            today: "Сегодня",
            tomorrow: "Завтра",
        },
    }
}

/// Abbreviated weekday name.
pub fn weekday_short(weekday: Weekday, language: Language) -> &'static str {
    match language {
        Language::English => match weekday {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        },
        Language::Russian => match weekday {
            Weekday::Mon => "Пн",
            Weekday::Tue => "Вт",
            Weekday::Wed => "Ср",
            Weekday::Thu => "Чт",
            Weekday::Fri => "Пт",
            Weekday::Sat => "Сб",
            Weekday::Sun => "Вс",
        },
    }
}

/// Whole degrees, truncated toward zero.
pub fn degrees(temperature: f64) -> String {
    format!("{}°", temperature.trunc() as i64)
}

/// Up to [`HOURLY_WINDOW`] hourly entries starting at the anchor hour.
///
/// The first entry is labelled "Now" and highlighted; the rest carry their
/// own local `HH:MM`. A series with no sample at or after the anchor yields
/// an empty list.
pub fn derive_hourly(
    series: &HourlySeries,
    now: NaiveDateTime,
    options: &DeriveOptions,
) -> Vec<ForecastEntry> {
    let threshold = match options.anchor {
        HourlyAnchor::AtOrAfterNow => now,
        HourlyAnchor::WithinPastHour => now - Duration::hours(1),
    };
    let labels = labels(options.language);

    let Some(start) = series.samples.iter().position(|s| s.time >= threshold) else {
        return Vec::new();
    };

    series.samples[start..]
        .iter()
        .take(HOURLY_WINDOW)
        .enumerate()
        .map(|(i, sample)| {
            let label = if i == 0 {
                labels.now.to_string()
            } else {
                sample.time.format("%H:%M").to_string()
            };
            ForecastEntry {
                label,
                temperature_text: degrees(sample.temperature),
                weather_code: sample.code,
                is_highlighted: i == 0,
            }
        })
        .collect()
}

/// One entry per daily sample, labelled relative to `now`'s date.
///
/// Today's entry is highlighted. Temperatures read `max° / min°`.
pub fn derive_daily(
    series: &DailySeries,
    now: NaiveDateTime,
    options: &DeriveOptions,
) -> Vec<ForecastEntry> {
    let today = now.date();
    let labels = labels(options.language);

    series
        .samples
        .iter()
        .map(|sample| {
            let offset = (sample.date - today).num_days();
            let label = match offset {
                0 => labels.today,
                1 => labels.tomorrow,
                _ => weekday_short(sample.date.weekday(), options.language),
            };
            ForecastEntry {
                label: label.to_string(),
                temperature_text: format!(
                    "{} / {}",
                    degrees(sample.temperature_max),
                    degrees(sample.temperature_min)
                ),
                weather_code: sample.code,
                is_highlighted: offset == 0,
            }
        })
        .collect()
}
