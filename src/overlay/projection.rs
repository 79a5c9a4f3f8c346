//! Web Mercator projection
//!
//! Maps coordinates to pixels of a viewport centered on a [`MapFrame`],
//! using the usual 256-pixel tile pyramid (EPSG:3857).

use crate::constants::geo::{MAX_MERCATOR_LAT, MERCATOR_RADIUS_METERS};
use crate::constants::map::TILE_SIZE;
use crate::coord::{wrap_lng, Coordinates, MapFrame};
use crate::overlay::ScreenPoint;
use std::f64::consts::PI;

/// A viewport onto the projected map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    frame: MapFrame,
    width: f64,
    height: f64,
    center_px: ScreenPoint,
}

impl MapProjection {
    /// Viewport of `width` x `height` pixels showing `frame`
    pub fn new(frame: MapFrame, width: f64, height: f64) -> Self {
        Self {
            frame,
            width,
            height,
            center_px: world_pixel(frame.center, frame.zoom),
        }
    }

    pub fn frame(&self) -> MapFrame {
        self.frame
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Screen position of a coordinate
    ///
    /// Longitudes are taken on the copy of the world nearest the center,
    /// so a pair straddling the antimeridian stays side by side.
    pub fn to_screen(&self, coords: Coordinates) -> ScreenPoint {
        let center = self.frame.center;
        let lng = center.lng + wrap_lng(coords.lng - center.lng);
        let px = world_pixel(Coordinates::new(coords.lat, lng), self.frame.zoom);

        ScreenPoint::new(
            px.x - self.center_px.x + self.width / 2.0,
            px.y - self.center_px.y + self.height / 2.0,
        )
    }

    /// Whether a screen point falls inside the viewport
    pub fn contains(&self, point: ScreenPoint) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// Global pixel position at a zoom level (0,0 is the north-west corner)
fn world_pixel(coords: Coordinates, zoom: f64) -> ScreenPoint {
    let scale = TILE_SIZE * 2_f64.powf(zoom);
    let lat = coords.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);

    let x = coords.lng.to_radians() * MERCATOR_RADIUS_METERS;
    let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * MERCATOR_RADIUS_METERS;

    let circumference = 2.0 * PI * MERCATOR_RADIUS_METERS;
    ScreenPoint::new(
        (x + PI * MERCATOR_RADIUS_METERS) / circumference * scale,
        (-y + PI * MERCATOR_RADIUS_METERS) / circumference * scale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_world_pixel_origin() {
        let px = world_pixel(Coordinates::new(0.0, 0.0), 0.0);
        assert_abs_diff_eq!(px.x, 128.0, epsilon = 1e-9);
        assert_abs_diff_eq!(px.y, 128.0, epsilon = 1e-9);

        let px = world_pixel(Coordinates::new(0.0, 0.0), 1.0);
        assert_abs_diff_eq!(px.x, 256.0, epsilon = 1e-9);
    }

    #[test]
    fn test_world_pixel_corners() {
        let nw = world_pixel(Coordinates::new(MAX_MERCATOR_LAT, -180.0), 0.0);
        assert_abs_diff_eq!(nw.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(nw.y, 0.0, epsilon = 1e-6);

        // Poles clamp to the projection edge
        let pole = world_pixel(Coordinates::new(90.0, 0.0), 0.0);
        assert!(pole.y.is_finite());
        assert_abs_diff_eq!(pole.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_center_maps_to_viewport_middle() {
        let frame = MapFrame::close_up(Coordinates::new(48.8566, 2.3522));
        let projection = MapProjection::new(frame, 800.0, 600.0);

        let center = projection.to_screen(frame.center);
        assert_abs_diff_eq!(center.x, 400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(center.y, 300.0, epsilon = 1e-6);
        assert!(projection.contains(center));
    }

    #[test]
    fn test_orientation() {
        let frame = MapFrame::close_up(Coordinates::new(0.0, 0.0));
        let projection = MapProjection::new(frame, 800.0, 600.0);

        let north = projection.to_screen(Coordinates::new(0.01, 0.0));
        let east = projection.to_screen(Coordinates::new(0.0, 0.01));

        assert!(north.y < 300.0, "north should be up");
        assert!(east.x > 400.0, "east should be right");
    }

    #[test]
    fn test_antimeridian_neighbors() {
        let frame = MapFrame::close_up(Coordinates::new(10.0, 180.0)).with_zoom(6.0);
        let projection = MapProjection::new(frame, 800.0, 600.0);

        let west = projection.to_screen(Coordinates::new(10.0, 179.0));
        let east = projection.to_screen(Coordinates::new(10.0, -179.0));

        assert!(west.x < east.x);
        assert!(projection.contains(west));
        assert!(projection.contains(east));
    }

    #[test]
    fn test_contains() {
        let projection = MapProjection::new(MapFrame::world(), 800.0, 600.0);
        assert!(!projection.contains(ScreenPoint::new(-1.0, 10.0)));
        assert!(!projection.contains(ScreenPoint::new(10.0, 601.0)));
        assert_eq!(projection.width(), 800.0);
        assert_eq!(projection.height(), 600.0);
        assert_eq!(projection.frame(), MapFrame::world());
    }
}
