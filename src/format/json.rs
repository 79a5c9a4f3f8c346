//! JSON output formatter

use crate::compare::Comparison;
use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;

/// JSON formatter - outputs the full comparison as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON comparison"
    }

    fn format(&self, comparison: &Comparison, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(comparison)?)
    }
}
