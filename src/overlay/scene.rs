//! Map scene planning
//!
//! Decides what goes on the map for the current pins: one marker per pin,
//! and when both pins are set, the connecting geodesic and its distance
//! label. The camera frame is planned alongside.

use crate::constants::map::GEODESIC_SEGMENTS;
use crate::coord::{frame_pins, interpolate, Coordinates, MapFrame};
use crate::overlay::label::DistanceOverlay;
use crate::overlay::projection::MapProjection;
use crate::overlay::{DrawSurface, ScreenPoint};
use crate::pin::{LocationPin, PinBoard, PinRole};

/// Width of the connecting line in pixels
pub const LINE_WIDTH: f64 = 1.0;

/// Color of the connecting line
pub const LINE_COLOR: &str = "#000000";

/// A pin marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub role: PinRole,
    pub coords: Coordinates,
    pub title: String,
}

/// Everything drawn on the map for a pin pair
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub markers: Vec<Marker>,
    pub route: Option<DistanceOverlay>,
    pub frame: MapFrame,
}

impl MapScene {
    /// Plan the scene for up to two pins
    ///
    /// The line and label only appear when both pins are present.
    pub fn plan(source: Option<&LocationPin>, target: Option<&LocationPin>) -> Self {
        let markers = [(PinRole::Source, source), (PinRole::Target, target)]
            .into_iter()
            .filter_map(|(role, pin)| {
                pin.map(|pin| Marker {
                    role,
                    coords: pin.coords,
                    title: pin.name.clone(),
                })
            })
            .collect();

        let route = match (source, target) {
            (Some(a), Some(b)) => Some(DistanceOverlay::new(a.coords, b.coords)),
            _ => None,
        };

        Self {
            markers,
            route,
            frame: frame_pins(source.map(|pin| pin.coords), target.map(|pin| pin.coords)),
        }
    }

    /// Plan the scene for the pins on a board
    pub fn from_board(board: &PinBoard) -> Self {
        Self::plan(board.get(PinRole::Source), board.get(PinRole::Target))
    }

    /// Draw the line, the markers and finally the label
    pub fn render<S: DrawSurface + ?Sized>(&self, projection: &MapProjection, surface: &mut S) {
        if let Some(route) = &self.route {
            let points: Vec<ScreenPoint> = (0..=GEODESIC_SEGMENTS)
                .map(|i| {
                    let fraction = i as f64 / GEODESIC_SEGMENTS as f64;
                    projection.to_screen(interpolate(route.start, route.end, fraction))
                })
                .collect();
            surface.draw_polyline(&points, LINE_COLOR, LINE_WIDTH);
        }

        for marker in &self.markers {
            surface.draw_marker(
                projection.to_screen(marker.coords),
                marker.role.marker_color(),
                &marker.title,
            );
        }

        if let Some(route) = &self.route {
            route.draw(projection, surface);
        }
    }
}
