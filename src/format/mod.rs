//! Output formatters
//!
//! Provides trait-based output formatting for comparison results.

pub mod json;
pub mod svg;
pub mod text;

use crate::compare::Comparison;
use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a comparison
    ///
    /// # Arguments
    /// * `comparison` - The comparison to format
    /// * `config` - Application config (map size and background for svg)
    fn format(&self, comparison: &Comparison, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "svg" => Some(Box::new(svg::SvgFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &svg::SvgFormatter,
    ]
    .into_iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::compare::Comparison;
    use crate::coord::Coordinates;
    use crate::lookup::testing::sample_weather;
    use crate::lookup::{Currency, PinDetails};
    use crate::pin::LocationPin;

    /// London (fully resolved) against Paris (nothing resolved)
    pub fn london_paris() -> Comparison {
        let london = LocationPin::new("London", Coordinates::new(51.5074, -0.1278)).with_details(
            PinDetails {
                country_code: Some("GB".to_string()),
                currency: Some(Currency {
                    code: "GBP".to_string(),
                    name: "British pound".to_string(),
                    symbol: "£".to_string(),
                }),
                weather: Some(sample_weather()),
            },
        );
        let paris = LocationPin::new("Paris", Coordinates::new(48.8566, 2.3522));

        Comparison::from_pins(Some(london), Some(paris))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("svg").is_some());
        assert!(get_formatter("gpx").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("SVG").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        for info in &formats {
            let formatter = get_formatter(&info.name).unwrap();
            assert_eq!(formatter.description(), info.description);
        }
    }
}
