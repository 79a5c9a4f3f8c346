//! geo-compare: compare two places on a map
//!
//! A library and CLI tool that pins two locations and reports the distance
//! between them, the map framing that shows both, and what each place looks
//! like right now: country, currency, weather and local time.
//!
//! ## Features
//!
//! - Great-circle midpoint, haversine distance and distance-based zoom
//! - Rotated distance label rendered onto any drawing surface (SVG included)
//! - Country, currency and weather lookups via OpenWeather and REST Countries
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use geo_compare::coord::{frame_pins, haversine_distance, midpoint, zoom_for_distance, Coordinates};
//!
//! let london = Coordinates::new(51.5074, -0.1278);
//! let paris = Coordinates::new(48.8566, 2.3522);
//!
//! let distance = haversine_distance(london, paris);
//! println!("{:.2} km apart", distance / 1000.0);
//!
//! // The camera centers on the midpoint at a zoom that fits both pins
//! let frame = frame_pins(Some(london), Some(paris));
//! assert_eq!(frame.center, midpoint(london, paris));
//! assert_eq!(frame.zoom, zoom_for_distance(distance));
//! ```

pub mod cli;
pub mod clock;
pub mod compare;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod lookup;
pub mod overlay;
pub mod pin;
pub mod server;

// Re-export commonly used types
pub use compare::{Comparison, RouteSummary};
pub use config::Config;
pub use coord::{Coordinates, MapFrame};
pub use error::{Error, Result};
pub use pin::{LocationPin, PinBoard, PinRole};
