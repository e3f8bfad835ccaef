//! Plain-text rendering of the screen state.

use skyglass_weather::forecast::degrees;
use skyglass_weather::{ForecastMode, Language, ScreenState, Theme};

fn tab_label(mode: ForecastMode, language: Language) -> &'static str {
    match (mode, language) {
        (ForecastMode::Hourly, Language::English) => "Hourly",
        (ForecastMode::Daily, Language::English) => "Weekly",
        (ForecastMode::Hourly, Language::Russian) => "По часам",
        (ForecastMode::Daily, Language::Russian) => "На неделю",
    }
}

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Day => "day",
        Theme::Night => "night",
    }
}

fn tabs(active: ForecastMode, language: Language) -> String {
    [ForecastMode::Hourly, ForecastMode::Daily]
        .into_iter()
        .map(|mode| {
            let label = tab_label(mode, language);
            if mode == active {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the screen as a block of text.
pub fn render(state: &ScreenState, language: Language) -> String {
    let theme = state.theme();
    let mut lines = vec![format!("{} ({})", state.city, theme_label(theme))];

    lines.push(match &state.current {
        Some(current) => format!(
            "{}  {}  [{}]",
            degrees(current.temperature),
            current.code.description(language),
            current.code.icon_key(theme.is_night())
        ),
        None => "--".to_string(),
    });

    lines.push(tabs(state.mode, language));

    lines.extend(state.visible_entries().iter().map(|entry| {
        let marker = if entry.is_highlighted { '>' } else { ' ' };
        format!(
            "{} {:<6} {:<12} {}",
            marker,
            entry.label,
            entry.temperature_text,
            entry.weather_code.icon_key(theme.is_night())
        )
    }));

    if let Some(updated) = state.updated_at {
        lines.push(format!("updated {}", updated.format("%Y-%m-%d %H:%M")));
    }
    if let Some(error) = &state.last_error {
        lines.push(format!("! {}", error));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
