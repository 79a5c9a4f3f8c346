//! SVG map output formatter

use crate::compare::Comparison;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::overlay::{MapProjection, MapScene, SvgSurface};

/// SVG formatter - draws markers, route and distance label
pub struct SvgFormatter;

impl OutputFormatter for SvgFormatter {
    fn name(&self) -> &str {
        "svg"
    }

    fn description(&self) -> &str {
        "SVG map overlay"
    }

    fn format(&self, comparison: &Comparison, config: &Config) -> Result<String> {
        let scene = MapScene::plan(comparison.source.as_ref(), comparison.target.as_ref());
        Ok(render_scene(&scene, config))
    }
}

/// Render a planned scene with the configured map size and background
pub fn render_scene(scene: &MapScene, config: &Config) -> String {
    let projection = MapProjection::new(scene.frame, config.map.width, config.map.height);
    let mut surface = SvgSurface::new(config.map.width, config.map.height, &config.map.background);
    scene.render(&projection, &mut surface);
    surface.finish()
}
