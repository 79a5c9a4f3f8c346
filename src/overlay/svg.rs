//! SVG drawing surface

use crate::overlay::{DrawSurface, PaintStyle, ScreenPoint, TextPaint};

/// Radius of a marker dot in pixels
const MARKER_RADIUS: f64 = 8.0;

/// A surface that accumulates SVG elements
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: String,
    body: String,
    transforms: Vec<String>,
    saved: Vec<usize>,
}

impl SvgSurface {
    /// Empty canvas of the given size
    pub fn new(width: f64, height: f64, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            body: String::new(),
            transforms: Vec::new(),
            saved: Vec::new(),
        }
    }

    /// Close the document and return it
    pub fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            escape_xml(&self.background)
        ));
        svg.push('\n');
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn transform_attr(&self) -> String {
        if self.transforms.is_empty() {
            String::new()
        } else {
            format!(r#" transform="{}""#, self.transforms.join(" "))
        }
    }
}

impl DrawSurface for SvgSurface {
    fn save(&mut self) {
        self.saved.push(self.transforms.len());
    }

    fn restore(&mut self) {
        // Unbalanced restore resets to identity
        let depth = self.saved.pop().unwrap_or(0);
        self.transforms.truncate(depth);
    }

    fn rotate(&mut self, degrees: f64, pivot: ScreenPoint) {
        self.transforms
            .push(format!("rotate({:.2} {:.2} {:.2})", degrees, pivot.x, pivot.y));
    }

    fn draw_text(&mut self, text: &str, at: ScreenPoint, paint: &TextPaint) {
        let paint_attrs = match paint.style {
            PaintStyle::Fill => format!(r#"fill="{}""#, paint.color),
            PaintStyle::Stroke => format!(
                r#"fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round""#,
                paint.color, paint.stroke_width
            ),
        };

        self.body.push_str(&format!(
            r#"  <text x="{:.2}" y="{:.2}" font-size="{}" font-family="sans-serif" text-anchor="middle" {}{}>{}</text>"#,
            at.x,
            at.y,
            paint.size,
            paint_attrs,
            self.transform_attr(),
            escape_xml(text)
        ));
        self.body.push('\n');
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], color: &str, width: f64) {
        if points.len() < 2 {
            return;
        }

        let coords = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.body.push_str(&format!(
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
            coords,
            escape_xml(color),
            width,
            self.transform_attr()
        ));
        self.body.push('\n');
    }

    fn draw_marker(&mut self, at: ScreenPoint, color: &str, title: &str) {
        self.body.push_str(&format!(
            r##"  <g{}><title>{}</title><circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="#ffffff" stroke-width="2"/></g>"##,
            self.transform_attr(),
            escape_xml(title),
            at.x,
            at.y,
            MARKER_RADIUS,
            escape_xml(color)
        ));
        self.body.push('\n');
    }
}

/// Escape text for use in XML content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
