//! Behavioural checks for the forecast deriver.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use skyglass_weather::{
    derive_daily, derive_hourly, DailySample, DailySeries, DeriveOptions, HourlySample,
    HourlySeries, WeatherCode, HOURLY_WINDOW,
};

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn hourly_from(start: NaiveDateTime, count: i64) -> HourlySeries {
    HourlySeries::new(
        (0..count)
            .map(|h| HourlySample {
                time: start + Duration::hours(h),
                temperature: -5.0 + h as f64,
                code: WeatherCode(if h % 2 == 0 { 0 } else { 61 }),
            })
            .collect(),
    )
}

fn daily_from(start: NaiveDate, count: u64) -> DailySeries {
    DailySeries::new(
        (0..count)
            .map(|d| DailySample {
                date: start + chrono::Days::new(d),
                temperature_max: 3.0,
                temperature_min: -4.0,
                code: WeatherCode(71),
            })
            .collect(),
    )
}

#[test]
fn test_thirty_hours_from_five_hours_in() {
    let series = hourly_from(t0(), 30);
    let now = t0() + Duration::hours(5);
    let entries = derive_hourly(&series, now, &DeriveOptions::default());

    assert!(entries.len() <= HOURLY_WINDOW);
    assert_eq!(entries.len(), 25.min(HOURLY_WINDOW));
    assert_eq!(entries[0].label, "Now");
    assert!(entries[0].is_highlighted);
    assert!(entries[1..].iter().all(|e| !e.is_highlighted));

    // Labels after "Now" are the consecutive following hours.
    let expected: Vec<String> = (6..5 + HOURLY_WINDOW as i64)
        .map(|h| (t0() + Duration::hours(h)).format("%H:%M").to_string())
        .collect();
    let labels: Vec<String> = entries[1..].iter().map(|e| e.label.clone()).collect();
    assert_eq!(labels, expected);
}

#[test]
fn test_fewer_than_window_future_samples() {
    let series = hourly_from(t0(), 30);
    let now = t0() + Duration::hours(20);
    let entries = derive_hourly(&series, now, &DeriveOptions::default());
    assert_eq!(entries.len(), 10);
    assert_eq!(entries.last().unwrap().label, "05:00");
}

#[test]
fn test_today_tomorrow_weekday() {
    let series = daily_from(t0().date(), 3);
    let entries = derive_daily(&series, t0(), &DeriveOptions::default());

    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    // 2025-01-08 is a Wednesday.
    assert_eq!(labels, vec!["Today", "Tomorrow", "Wed"]);
    let highlighted: Vec<bool> = entries.iter().map(|e| e.is_highlighted).collect();
    assert_eq!(highlighted, vec![true, false, false]);
    assert!(entries.iter().all(|e| e.temperature_text == "3° / -4°"));
}

#[test]
fn test_daily_has_no_cap() {
    let series = daily_from(t0().date(), 16);
    assert_eq!(derive_daily(&series, t0(), &DeriveOptions::default()).len(), 16);
}

#[test]
fn test_derivation_is_deterministic() {
    let hourly = hourly_from(t0(), 48);
    let daily = daily_from(t0().date(), 7);
    let now = t0() + Duration::minutes(90);
    let options = DeriveOptions::default();

    assert_eq!(
        derive_hourly(&hourly, now, &options),
        derive_hourly(&hourly, now, &options)
    );
    assert_eq!(derive_daily(&daily, now, &options), derive_daily(&daily, now, &options));
}

#[test]
fn test_empty_series_yield_empty_lists() {
    let options = DeriveOptions::default();
    assert!(derive_hourly(&HourlySeries::default(), t0(), &options).is_empty());
    assert!(derive_daily(&DailySeries::default(), t0(), &options).is_empty());
}
