//! Place search
//!
//! Turns free text typed by the user into coordinates.

pub mod nominatim;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    /// Coordinates of the match
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(&self, query: &str) -> impl Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Search for a place, skipping blank input
///
/// Blank queries never reach the backend and report no match.
pub async fn search<G: GeoBackend>(geocoder: &G, query: &str) -> Result<Option<GeoLocation>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    geocoder.geocode(query).await
}

/// Get the default geocoding backend
pub fn get_geocoder() -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new()
}
