//! WMO weather interpretation codes.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Display language for descriptions and forecast labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
}

/// A raw WMO code as reported by the API. Any integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub i32);

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    #[default]
    Unknown,
}

/// Icon shown next to a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Fog,
    HeavyRain,
    Snow,
    Thunderstorm,
    Placeholder,
}

impl WeatherIcon {
    pub fn key(&self) -> &'static str {
        match self {
            Self::ClearDay => "clear_day",
            Self::ClearNight => "clear_night",
            Self::PartlyCloudyDay => "partly_cloudy_day",
            Self::PartlyCloudyNight => "partly_cloudy_night",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::HeavyRain => "heavy_rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
            Self::Placeholder => "placeholder",
        }
    }
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::Sleet, // Freezing drizzle
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            66 | 67 => Self::Sleet, // Freezing rain
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Icon for this condition; clear and partly cloudy skies have night variants.
    pub fn icon(&self, is_night: bool) -> WeatherIcon {
        match (self, is_night) {
            (Self::Clear, false) => WeatherIcon::ClearDay,
            (Self::Clear, true) => WeatherIcon::ClearNight,
            (Self::PartlyCloudy, false) => WeatherIcon::PartlyCloudyDay,
            (Self::PartlyCloudy, true) => WeatherIcon::PartlyCloudyNight,
            (Self::Cloudy, _) => WeatherIcon::Cloudy,
            (Self::Fog, _) => WeatherIcon::Fog,
            (Self::Drizzle | Self::Rain | Self::HeavyRain | Self::Sleet, _) => {
                WeatherIcon::HeavyRain
            }
            (Self::Snow, _) => WeatherIcon::Snow,
            (Self::Thunderstorm, _) => WeatherIcon::Thunderstorm,
            (Self::Unknown, _) => WeatherIcon::Placeholder,
        }
    }
}

impl WeatherCode {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.0)
    }

    pub fn is_known(&self) -> bool {
        self.condition() != WeatherCondition::Unknown
    }

    pub fn icon(&self, is_night: bool) -> WeatherIcon {
        self.condition().icon(is_night)
    }

    pub fn icon_key(&self, is_night: bool) -> &'static str {
        self.icon(is_night).key()
    }

    /// Human-readable description; unmapped codes yield "Unknown".
    pub fn description(&self, language: Language) -> &'static str {
        match language {
            Language::English => english_description(self.0),
            Language::Russian => russian_description(self.0),
        }
    }
}

impl From<i32> for WeatherCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

fn english_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

fn russian_description(code: i32) -> &'static str {
    match code {
        0 => "Ясно",
        1 => "В основном ясно",
        2 => "Частично облачно",
        3 => "Пасмурно",
        45 => "Туман",
        48 => "Инейный туман",
        51 => "Легкая морось",
        53 => "Умеренная морось",
        55 => "Сильная морось",
        56 => "Легкая изморось",
        57 => "Сильная изморось",
        61 => "Легкий дождь",
        63 => "Умеренный дождь",
        65 => "Сильный дождь",
        66 => "Легкий ледяной дождь",
        67 => "Сильный ледяной дождь",
        71 => "Легкий снег",
        73 => "Умеренный снег",
        75 => "Сильный снег",
        77 => "Снежные зерна",
        80 => "Легкий ливень",
        81 => "Умеренный ливень",
        82 => "Сильный ливень",
        85 => "Легкий снегопад",
        86 => "Сильный снегопад",
        95 => "Гроза",
        96 => "Гроза с легким градом",
        99 => "Гроза с сильным градом",
        _ => "Неизвестно",
    }
}
