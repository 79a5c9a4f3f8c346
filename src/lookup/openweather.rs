//! OpenWeather client
//!
//! Serves two links of the lookup chain: reverse geocoding to a country code
//! (`geo/1.0/reverse`) and current weather (`data/2.5/weather`).

use crate::constants::api::{OPENWEATHER_REVERSE_URL, OPENWEATHER_WEATHER_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::lookup::weather::{parse_current_weather, WeatherSnapshot};
use crate::lookup::{CountryLocator, WeatherSource};
use serde::Deserialize;
use tracing::debug;

/// OpenWeather API client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
}

/// One entry of the reverse geocoding response
#[derive(Debug, Deserialize)]
struct ReverseEntry {
    country: Option<String>,
}

impl OpenWeatherClient {
    /// Create a client for the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    /// GET `url` with the coordinates and key, returning the body of a
    /// successful response
    async fn fetch(&self, url: &str, coords: Coordinates, extra: &[(&str, &str)]) -> Result<String> {
        let lat = coords.lat.to_string();
        let lon = coords.lng.to_string();
        let mut query = vec![("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", self.api_key.as_str())];
        query.extend_from_slice(extra);

        debug!("OpenWeather request {} at {}", url, coords);

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("OpenWeather request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Lookup(format!("Failed to read OpenWeather response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Lookup(format!(
                "OpenWeather returned status {}: {}",
                status,
                truncate_body(&body)
            )));
        }

        Ok(body)
    }
}

impl CountryLocator for OpenWeatherClient {
    async fn country_code(&self, coords: Coordinates) -> Result<Option<String>> {
        let body = self.fetch(OPENWEATHER_REVERSE_URL, coords, &[("limit", "1")]).await?;
        parse_reverse_country(&body)
    }
}

impl WeatherSource for OpenWeatherClient {
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot> {
        let body = self.fetch(OPENWEATHER_WEATHER_URL, coords, &[]).await?;
        parse_current_weather(&body)
    }
}

/// Extract the country code of the first reverse geocoding match
pub fn parse_reverse_country(body: &str) -> Result<Option<String>> {
    let entries: Vec<ReverseEntry> = serde_json::from_str(body)
        .map_err(|e| Error::Lookup(format!("Failed to parse OpenWeather reverse response: {}", e)))?;

    Ok(entries
        .into_iter()
        .next()
        .and_then(|entry| entry.country)
        .filter(|code| !code.is_empty()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
