//! Clock command handler
//!
//! Prints the wall-clock time and date at a UTC offset.

use crate::clock::{date_at_offset, offset_label, parse_utc_offset, time_at_offset};
use crate::error::{Error, Result};
use chrono::Utc;
use clap::Args;

/// Clock command arguments
#[derive(Args)]
pub struct ClockArgs {
    /// Offset from UTC in seconds (e.g. 32400)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "utc")]
    pub offset: Option<i32>,

    /// Offset label (e.g. "UTC+09:00")
    #[arg(long)]
    pub utc: Option<String>,
}

impl ClockArgs {
    fn offset_secs(&self) -> Result<i32> {
        match (&self.utc, self.offset) {
            (Some(label), _) => parse_utc_offset(label)
                .ok_or_else(|| Error::Config(format!("Invalid UTC offset: {}", label))),
            (None, Some(secs)) => Ok(secs),
            (None, None) => Ok(0),
        }
    }
}

/// Run the clock command
pub fn run(args: ClockArgs) -> Result<()> {
    let offset = args.offset_secs()?;
    let now = Utc::now();

    println!("{} ({})", time_at_offset(now, offset), offset_label(offset));
    println!("{}", date_at_offset(now, offset));

    Ok(())
}
