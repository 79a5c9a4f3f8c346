//! Coordinate geometry
//!
//! This module handles:
//! - The `Coordinates` value type and its validation
//! - Great-circle midpoint, distance and interpolation
//! - Distance-based zoom selection and map framing

pub mod midpoint;
pub mod zoom;

pub use midpoint::{haversine_distance, interpolate, midpoint};
pub use zoom::{frame_pins, zoom_for_distance, MapFrame};

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = crate::error::Error;

    /// Parse `"lat,lng"`, validating the ranges
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            crate::error::Error::InvalidCoordinates(format!("Expected \"lat,lng\", got \"{}\"", s))
        })?;

        let parse = |part: &str, what: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                crate::error::Error::InvalidCoordinates(format!("Invalid {}: {}", what, part.trim()))
            })
        };

        let coords = Coordinates::new(parse(lat, "latitude")?, parse(lng, "longitude")?);
        coords.validate()?;
        Ok(coords)
    }
}

/// Wrap a longitude into [-180, 180)
pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}
