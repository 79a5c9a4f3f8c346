//! Map overlay rendering
//!
//! This module handles:
//! - The drawing-surface abstraction the overlay renders against
//! - Projecting coordinates to screen pixels
//! - The rotated distance label between two points
//! - Planning and drawing the full two-pin scene
//! - An SVG surface

pub mod label;
pub mod projection;
pub mod scene;
pub mod svg;

pub use label::{format_distance_km, label_angle, DistanceLabel, DistanceOverlay};
pub use projection::MapProjection;
pub use scene::MapScene;
pub use svg::SvgSurface;

use serde::{Deserialize, Serialize};

/// A point in screen pixels, origin top-left, y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Halfway between two points
    pub fn midpoint(self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Whether text is outlined or filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// How a piece of text is painted; text is always centered on its anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub color: &'static str,
    pub size: f64,
    pub style: PaintStyle,
    pub stroke_width: f64,
}

/// Something the overlay can draw on
///
/// Rotations accumulate until the matching `restore`.
pub trait DrawSurface {
    /// Push the current transform
    fn save(&mut self);

    /// Pop back to the last saved transform
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` (clockwise on screen) around `pivot`
    fn rotate(&mut self, degrees: f64, pivot: ScreenPoint);

    /// Draw text centered on `at`
    fn draw_text(&mut self, text: &str, at: ScreenPoint, paint: &TextPaint);

    /// Draw connected line segments
    fn draw_polyline(&mut self, points: &[ScreenPoint], color: &str, width: f64);

    /// Draw a location marker
    fn draw_marker(&mut self, at: ScreenPoint, color: &str, title: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    //! A surface that records calls, for asserting draw order

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Save,
        Restore,
        Rotate(f64, ScreenPoint),
        Text(String, ScreenPoint, PaintStyle),
        Polyline(usize),
        Marker(ScreenPoint, String, String),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl DrawSurface for RecordingSurface {
        fn save(&mut self) {
            self.calls.push(DrawCall::Save);
        }

        fn restore(&mut self) {
            self.calls.push(DrawCall::Restore);
        }

        fn rotate(&mut self, degrees: f64, pivot: ScreenPoint) {
            self.calls.push(DrawCall::Rotate(degrees, pivot));
        }

        fn draw_text(&mut self, text: &str, at: ScreenPoint, paint: &TextPaint) {
            self.calls.push(DrawCall::Text(text.to_string(), at, paint.style));
        }

        fn draw_polyline(&mut self, points: &[ScreenPoint], _color: &str, _width: f64) {
            self.calls.push(DrawCall::Polyline(points.len()));
        }

        fn draw_marker(&mut self, at: ScreenPoint, color: &str, title: &str) {
            self.calls
                .push(DrawCall::Marker(at, color.to_string(), title.to_string()));
        }
    }
}
