//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for place search and, as a keyless
//! alternative to OpenWeather, for reverse geocoding to a country code.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::{NOMINATIM_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use crate::lookup::CountryLocator;
use serde::Deserialize;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// Nominatim reverse response with address details
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    country_code: Option<String>,
}

impl NominatimBackend {
    /// Create a new Nominatim backend
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid longitude: {}", lng)))?;
        Ok((lat, lng))
    }

    /// Turn a search response body into the best match
    fn parse_search(body: &str) -> Result<Option<GeoLocation>> {
        let results: Vec<NominatimResult> = serde_json::from_str(body)
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        match results.into_iter().next() {
            Some(result) => {
                let (lat, lng) = Self::parse_coords(&result.lat, &result.lon)?;
                Ok(Some(GeoLocation {
                    lat,
                    lng,
                    display_name: result.display_name,
                }))
            }
            None => Ok(None),
        }
    }

    /// Extract the upper-cased country code from a reverse response body
    ///
    /// Nominatim answers `{"error": "Unable to geocode"}` over open water.
    fn parse_country(body: &str) -> Result<Option<String>> {
        let reverse: NominatimReverse = serde_json::from_str(body)
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        Ok(reverse
            .address
            .and_then(|address| address.country_code)
            .filter(|code| !code.is_empty())
            .map(|code| code.to_uppercase()))
    }

    async fn get_body(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to read Nominatim response: {}", e)))
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            NOMINATIM_URL,
            urlencoding::encode(query)
        );

        let body = self.get_body(&url).await?;
        Self::parse_search(&body)
    }
}

impl CountryLocator for NominatimBackend {
    async fn country_code(&self, coords: Coordinates) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&addressdetails=1&zoom=3",
            NOMINATIM_URL, coords.lat, coords.lng
        );

        let body = self.get_body(&url).await?;
        Self::parse_country(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        let (lat, lng) = NominatimBackend::parse_coords("40.7128", "-74.0060").unwrap();
        assert!((lat - 40.7128).abs() < 0.0001);
        assert!((lng - (-74.0060)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_parse_search() {
        let body = r#"[{"place_id": 1, "lat": "48.8588897", "lon": "2.3200410",
                        "display_name": "Paris, Île-de-France, France"}]"#;
        let location = NominatimBackend::parse_search(body).unwrap().unwrap();

        assert!((location.lat - 48.8589).abs() < 0.0001);
        assert_eq!(location.display_name, "Paris, Île-de-France, France");
    }

    #[test]
    fn test_parse_search_no_match() {
        assert!(NominatimBackend::parse_search("[]").unwrap().is_none());
    }

    #[test]
    fn test_parse_country() {
        let body = r#"{"lat": "48.85", "lon": "2.35", "display_name": "France",
                       "address": {"country": "France", "country_code": "fr"}}"#;
        assert_eq!(NominatimBackend::parse_country(body).unwrap(), Some("FR".to_string()));
    }

    #[test]
    fn test_parse_country_open_water() {
        assert_eq!(
            NominatimBackend::parse_country(r#"{"error": "Unable to geocode"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_backend_creation() {
        let backend = NominatimBackend::new().unwrap();
        assert!(format!("{:?}", backend).contains("NominatimBackend"));
    }
}
