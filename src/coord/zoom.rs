//! Distance-based zoom selection and map framing
//!
//! The zoom table maps the distance between two points to a map zoom level
//! that keeps both of them on screen.

use crate::constants::map::{CLOSE_UP_ZOOM, WORLD_CENTER, WORLD_ZOOM};
use crate::coord::{haversine_distance, midpoint, Coordinates};
use serde::{Deserialize, Serialize};

/// Zoom used when the distance is at or below every threshold
pub const NEAREST_ZOOM: f64 = 12.0;

/// Ordered (threshold meters, zoom) steps, largest distance first
///
/// A distance selects the first step whose threshold it strictly exceeds,
/// so a distance equal to a threshold falls into the next (closer) bucket.
pub const ZOOM_STEPS: &[(f64, f64)] = &[
    (5_000_000.0, 3.0),
    (3_000_000.0, 3.5),
    (2_000_000.0, 4.0),
    (1_500_000.0, 4.5),
    (1_000_000.0, 5.0),
    (750_000.0, 5.5),
    (500_000.0, 6.0),
    (300_000.0, 6.5),
    (200_000.0, 7.0),
    (150_000.0, 7.5),
    (100_000.0, 8.0),
    (75_000.0, 8.5),
    (50_000.0, 9.0),
    (35_000.0, 9.5),
    (25_000.0, 10.0),
    (15_000.0, 10.5),
    (10_000.0, 11.0),
    (5_000.0, 11.5),
];

/// Select a zoom level for two points `distance_meters` apart
///
/// Callers showing a single point should use a fixed close-up zoom instead
/// of passing a zero distance here (see [`frame_pins`]).
pub fn zoom_for_distance(distance_meters: f64) -> f64 {
    ZOOM_STEPS
        .iter()
        .find(|(threshold, _)| distance_meters > *threshold)
        .map(|(_, zoom)| *zoom)
        .unwrap_or(NEAREST_ZOOM)
}

/// Where the map camera should point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapFrame {
    pub center: Coordinates,
    pub zoom: f64,
}

impl MapFrame {
    /// Initial view of the whole world
    pub fn world() -> Self {
        Self {
            center: Coordinates::new(WORLD_CENTER.0, WORLD_CENTER.1),
            zoom: WORLD_ZOOM,
        }
    }

    /// Close-up on a single point
    pub fn close_up(center: Coordinates) -> Self {
        Self {
            center,
            zoom: CLOSE_UP_ZOOM,
        }
    }

    /// Replace the zoom level
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self { zoom, ..self }
    }
}

impl Default for MapFrame {
    fn default() -> Self {
        Self::world()
    }
}

/// Frame up to two points
///
/// - no point: world view
/// - one point, or two identical points: close-up on that point
/// - two distinct points: their midpoint at the distance-based zoom
pub fn frame_pins(a: Option<Coordinates>, b: Option<Coordinates>) -> MapFrame {
    match (a, b) {
        (None, None) => MapFrame::world(),
        (Some(point), None) | (None, Some(point)) => MapFrame::close_up(point),
        (Some(a), Some(b)) => {
            let distance = haversine_distance(a, b);
            if distance == 0.0 {
                MapFrame::close_up(a)
            } else {
                MapFrame {
                    center: midpoint(a, b),
                    zoom: zoom_for_distance(distance),
                }
            }
        }
    }
}
