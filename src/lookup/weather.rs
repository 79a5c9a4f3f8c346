//! Weather snapshot model
//!
//! A flattened view of an OpenWeather current-weather response, plus the
//! icon-code catalogue used to pick a condition for display.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Current weather at one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Place name reported by the weather service
    pub place_name: String,
    /// Temperature in Kelvin
    pub temperature_k: f64,
    /// Perceived temperature in Kelvin
    pub feels_like_k: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Free-text condition description ("light rain")
    pub description: String,
    /// OpenWeather icon code ("10d")
    pub icon: String,
    /// Sunrise, unix seconds
    pub sunrise: Option<i64>,
    /// Sunset, unix seconds
    pub sunset: Option<i64>,
    /// Offset from UTC in seconds
    pub utc_offset_secs: i32,
}

impl WeatherSnapshot {
    /// Temperature in degrees Celsius
    pub fn temperature_c(&self) -> f64 {
        self.temperature_k - KELVIN_OFFSET
    }

    /// Perceived temperature in degrees Celsius
    pub fn feels_like_c(&self) -> f64 {
        self.feels_like_k - KELVIN_OFFSET
    }

    /// Condition decoded from the icon code
    pub fn condition(&self) -> Option<WeatherIcon> {
        WeatherIcon::from_code(&self.icon)
    }
}

/// Weather condition icons, day and night variants where they differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    ClearSky,
    ClearSkyNight,
    FewClouds,
    FewCloudsNight,
    ScatteredClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    RainNight,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherIcon {
    /// Decode an OpenWeather icon code
    pub fn from_code(code: &str) -> Option<Self> {
        let icon = match code {
            "01d" => Self::ClearSky,
            "01n" => Self::ClearSkyNight,
            "02d" => Self::FewClouds,
            "02n" => Self::FewCloudsNight,
            "03d" | "03n" => Self::ScatteredClouds,
            "04d" | "04n" => Self::BrokenClouds,
            "09d" | "09n" => Self::ShowerRain,
            "10d" => Self::Rain,
            "10n" => Self::RainNight,
            "11d" | "11n" => Self::Thunderstorm,
            "13d" | "13n" => Self::Snow,
            "50d" | "50n" => Self::Mist,
            _ => return None,
        };
        Some(icon)
    }

    /// Short display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::ClearSky | Self::ClearSkyNight => "clear sky",
            Self::FewClouds | Self::FewCloudsNight => "few clouds",
            Self::ScatteredClouds => "scattered clouds",
            Self::BrokenClouds => "broken clouds",
            Self::ShowerRain => "shower rain",
            Self::Rain | Self::RainNight => "rain",
            Self::Thunderstorm => "thunderstorm",
            Self::Snow => "snow",
            Self::Mist => "mist",
        }
    }

    /// Whether this is a night-time variant
    pub fn is_night(&self) -> bool {
        matches!(self, Self::ClearSkyNight | Self::FewCloudsNight | Self::RainNight)
    }
}

/// OpenWeather `data/2.5/weather` response
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
    sys: Option<OwSys>,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

/// Parse an OpenWeather current-weather JSON body
pub fn parse_current_weather(body: &str) -> Result<WeatherSnapshot> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| Error::Lookup(format!("Failed to parse OpenWeather weather response: {}", e)))?;

    let (description, icon) = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_default();

    let (sunrise, sunset) = parsed
        .sys
        .map(|sys| (sys.sunrise, sys.sunset))
        .unwrap_or((None, None));

    Ok(WeatherSnapshot {
        place_name: parsed.name,
        temperature_k: parsed.main.temp,
        feels_like_k: parsed.main.feels_like,
        humidity: parsed.main.humidity,
        description,
        icon,
        sunrise,
        sunset,
        utc_offset_secs: parsed.timezone,
    })
}
