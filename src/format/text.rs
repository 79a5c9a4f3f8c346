//! Human-readable text output formatter

use crate::clock::{date_at_offset, epoch_to_local_time, offset_label, time_at_offset};
use crate::compare::Comparison;
use crate::config::Config;
use crate::constants::placeholder::{NOT_AVAILABLE, NO_LOCATION, NO_TIME};
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::pin::{LocationPin, PinRole};
use chrono::{DateTime, Utc};

/// Text formatter - outputs one card per pin and the route summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, comparison: &Comparison, _config: &Config) -> Result<String> {
        let mut output = String::new();

        for role in [PinRole::Source, PinRole::Target] {
            push_card(&mut output, role, comparison.pin(role), comparison.generated_at);
            output.push('\n');
        }

        match &comparison.route {
            Some(route) => {
                output.push_str(&format!("Distance: {}\n", route.label));
                output.push_str(&format!("Midpoint: {}\n", route.midpoint));
                output.push_str(&format!("Zoom:     {}\n", route.zoom));
            }
            None => output.push_str(&format!("Distance: {}\n", NOT_AVAILABLE)),
        }

        Ok(output)
    }
}

fn push_line(output: &mut String, label: &str, value: &str) {
    output.push_str(&format!("  {:<11} {}\n", format!("{}:", label), value));
}

fn push_card(output: &mut String, role: PinRole, pin: Option<&LocationPin>, now: DateTime<Utc>) {
    let Some(pin) = pin else {
        output.push_str(&format!("[{}] {}\n", role, NO_LOCATION));
        push_line(output, "Time", NO_TIME);
        push_line(output, "Date", NO_LOCATION);
        return;
    };

    output.push_str(&format!("[{}] {} {}\n", role, pin.name, pin.coords));
    push_line(output, "Country", pin.country_code.as_deref().unwrap_or(NOT_AVAILABLE));
    push_line(output, "Flag", pin.flag.as_deref().unwrap_or(NOT_AVAILABLE));
    push_line(output, "Currency", &pin.currency_label());

    let Some(weather) = &pin.weather else {
        push_line(output, "Weather", NOT_AVAILABLE);
        push_line(output, "Time", NO_TIME);
        push_line(output, "Date", NO_LOCATION);
        return;
    };

    let offset = weather.utc_offset_secs;
    let sun_time = |epoch: Option<i64>| {
        epoch
            .and_then(|epoch| epoch_to_local_time(epoch, offset))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    push_line(
        output,
        "Weather",
        &format!(
            "{:.1}°C (feels like {:.1}°C), {}",
            weather.temperature_c(),
            weather.feels_like_c(),
            weather.description
        ),
    );
    push_line(output, "Humidity", &format!("{}%", weather.humidity));
    push_line(output, "Sunrise", &sun_time(weather.sunrise));
    push_line(output, "Sunset", &sun_time(weather.sunset));
    push_line(
        output,
        "Time",
        &format!("{} ({})", time_at_offset(now, offset), offset_label(offset)),
    );
    push_line(output, "Date", &date_at_offset(now, offset));
}
