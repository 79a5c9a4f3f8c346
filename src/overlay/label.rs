//! Distance label overlay
//!
//! Draws "NN.NN km" halfway along the line between two points, rotated to
//! follow the line and kept right side up.

use crate::coord::{haversine_distance, Coordinates};
use crate::overlay::projection::MapProjection;
use crate::overlay::{DrawSurface, PaintStyle, ScreenPoint, TextPaint};

/// Label text size in pixels
pub const LABEL_TEXT_SIZE: f64 = 30.0;

/// Outline pass, drawn first
pub const OUTLINE_PAINT: TextPaint = TextPaint {
    color: "#000000",
    size: LABEL_TEXT_SIZE,
    style: PaintStyle::Stroke,
    stroke_width: 8.0,
};

/// Fill pass, drawn over the outline
pub const FILL_PAINT: TextPaint = TextPaint {
    color: "#00ff00",
    size: LABEL_TEXT_SIZE,
    style: PaintStyle::Fill,
    stroke_width: 0.0,
};

/// Format a distance in meters as kilometers with two decimals
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Rotation for text running from `start` to `end`, in degrees
///
/// The raw line angle is turned by 180° whenever text drawn along it would
/// be upside down, so the result is always in (-90, 90].
pub fn label_angle(start: ScreenPoint, end: ScreenPoint) -> f64 {
    let angle = (end.y - start.y).atan2(end.x - start.x).to_degrees();

    if angle > 90.0 {
        angle - 180.0
    } else if angle <= -90.0 {
        angle + 180.0
    } else {
        angle
    }
}

/// A label placed between two screen points
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLabel {
    pub text: String,
    pub anchor: ScreenPoint,
    pub angle: f64,
}

impl DistanceLabel {
    /// Place `text` at the midpoint of `start`-`end`, aligned with the line
    pub fn between(start: ScreenPoint, end: ScreenPoint, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: start.midpoint(end),
            angle: label_angle(start, end),
        }
    }

    /// Outline pass then fill pass, inside a saved rotation
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.save();
        surface.rotate(self.angle, self.anchor);
        surface.draw_text(&self.text, self.anchor, &OUTLINE_PAINT);
        surface.draw_text(&self.text, self.anchor, &FILL_PAINT);
        surface.restore();
    }
}

/// Distance label between two geographic points
///
/// Projected afresh on every draw, so it follows the map as it moves.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceOverlay {
    pub start: Coordinates,
    pub end: Coordinates,
    pub text: String,
}

impl DistanceOverlay {
    /// Label the great-circle distance between two points
    pub fn new(start: Coordinates, end: Coordinates) -> Self {
        Self {
            start,
            end,
            text: format_distance_km(haversine_distance(start, end)),
        }
    }

    /// Screen-space label for the given projection
    pub fn label(&self, projection: &MapProjection) -> DistanceLabel {
        DistanceLabel::between(
            projection.to_screen(self.start),
            projection.to_screen(self.end),
            self.text.clone(),
        )
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, projection: &MapProjection, surface: &mut S) {
        self.label(projection).draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::MapFrame;
    use crate::overlay::testing::{DrawCall, RecordingSurface};
    use approx::assert_abs_diff_eq;

    const ORIGIN: ScreenPoint = ScreenPoint { x: 100.0, y: 100.0 };

    fn angle_to(dx: f64, dy: f64) -> f64 {
        label_angle(ORIGIN, ScreenPoint::new(ORIGIN.x + dx, ORIGIN.y + dy))
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance_km(343_940.92), "343.94 km");
        assert_eq!(format_distance_km(0.0), "0.00 km");
        assert_eq!(format_distance_km(1_234.5), "1.23 km");
    }

    #[test]
    fn test_angle_cardinal_directions() {
        // right
        assert_abs_diff_eq!(angle_to(50.0, 0.0), 0.0);
        // left: raw 180 flips to 0
        assert_abs_diff_eq!(angle_to(-50.0, 0.0), 0.0);
        // below (screen y grows downward): raw 90 stays
        assert_abs_diff_eq!(angle_to(0.0, 50.0), 90.0);
        // above: raw -90 flips to 90
        assert_abs_diff_eq!(angle_to(0.0, -50.0), 90.0);
    }

    #[test]
    fn test_angle_diagonals() {
        assert_abs_diff_eq!(angle_to(50.0, 50.0), 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_to(50.0, -50.0), -45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_to(-50.0, 50.0), -45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angle_to(-50.0, -50.0), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_always_upright() {
        for step in 0..360 {
            let theta = (step as f64).to_radians();
            let angle = angle_to(100.0 * theta.cos(), 100.0 * theta.sin());
            assert!(
                angle > -90.0 && angle <= 90.0,
                "angle {} for direction {}° is upside down",
                angle,
                step
            );
        }
    }

    #[test]
    fn test_angle_is_direction_independent() {
        let a = ScreenPoint::new(12.0, 80.0);
        let b = ScreenPoint::new(140.0, 20.0);
        assert_abs_diff_eq!(label_angle(a, b), label_angle(b, a), epsilon = 1e-9);
    }

    #[test]
    fn test_label_between() {
        let label = DistanceLabel::between(
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(200.0, 0.0),
            "12.00 km",
        );
        assert_eq!(label.anchor, ScreenPoint::new(100.0, 0.0));
        assert_eq!(label.angle, 0.0);
        assert_eq!(label.text, "12.00 km");
    }

    #[test]
    fn test_draw_outline_then_fill() {
        let label = DistanceLabel::between(
            ScreenPoint::new(0.0, 100.0),
            ScreenPoint::new(100.0, 0.0),
            "5.00 km",
        );
        let mut surface = RecordingSurface::default();
        label.draw(&mut surface);

        let anchor = ScreenPoint::new(50.0, 50.0);
        assert_eq!(surface.calls.len(), 5);
        assert_eq!(surface.calls[0], DrawCall::Save);
        match surface.calls[1] {
            DrawCall::Rotate(angle, pivot) => {
                assert_abs_diff_eq!(angle, -45.0, epsilon = 1e-9);
                assert_eq!(pivot, anchor);
            }
            ref other => panic!("expected rotate, got {:?}", other),
        }
        assert_eq!(
            surface.calls[2],
            DrawCall::Text("5.00 km".to_string(), anchor, PaintStyle::Stroke)
        );
        assert_eq!(
            surface.calls[3],
            DrawCall::Text("5.00 km".to_string(), anchor, PaintStyle::Fill)
        );
        assert_eq!(surface.calls[4], DrawCall::Restore);
    }

    #[test]
    fn test_overlay_projects_endpoints() {
        let london = Coordinates::new(51.5074, -0.1278);
        let paris = Coordinates::new(48.8566, 2.3522);
        let overlay = DistanceOverlay::new(london, paris);
        assert_eq!(overlay.text, "343.94 km");

        let projection = MapProjection::new(MapFrame::world().with_zoom(6.5), 800.0, 600.0);
        let label = overlay.label(&projection);
        let expected = projection.to_screen(london).midpoint(projection.to_screen(paris));

        assert_abs_diff_eq!(label.anchor.x, expected.x, epsilon = 1e-9);
        assert_abs_diff_eq!(label.anchor.y, expected.y, epsilon = 1e-9);
        // Paris lies south-east of London: the line runs down to the right
        assert!(label.angle > 0.0 && label.angle < 90.0);
    }
}
