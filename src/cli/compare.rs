//! Compare command handler
//!
//! Geocodes two places, looks up their country, currency and weather, and
//! prints the comparison.

use crate::compare::{compare, PinQuery};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::get_geocoder;
use crate::lookup::chain_from_config;
use clap::Args;
use tracing::warn;

/// Compare command arguments
#[derive(Args)]
pub struct CompareArgs {
    /// Source place name (geocoded)
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Source as "lat,lng"
    #[arg(long, allow_hyphen_values = true, conflicts_with = "source")]
    pub source_at: Option<Coordinates>,

    /// Target place name (geocoded)
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Target as "lat,lng"
    #[arg(long, allow_hyphen_values = true, conflicts_with = "target")]
    pub target_at: Option<Coordinates>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Skip country, currency and weather lookups
    #[arg(long)]
    pub no_lookup: bool,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl CompareArgs {
    fn source_query(&self) -> Option<PinQuery> {
        query(&self.source, self.source_at)
    }

    fn target_query(&self) -> Option<PinQuery> {
        query(&self.target, self.target_at)
    }
}

fn query(name: &Option<String>, at: Option<Coordinates>) -> Option<PinQuery> {
    match (name, at) {
        (_, Some(coords)) => Some(PinQuery::At(coords, None)),
        (Some(name), None) if !name.trim().is_empty() => Some(PinQuery::Search(name.clone())),
        _ => None,
    }
}

/// Run the compare command
pub async fn run(args: CompareArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let (source, target) = (args.source_query(), args.target_query());
    if source.is_none() && target.is_none() {
        eprintln!("Error: No location specified. Use --source/--target or --source-at/--target-at");
        std::process::exit(1);
    }

    let format = args.format.clone().unwrap_or(config.defaults.format.clone());
    let formatter =
        get_formatter(&format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let chain = if args.no_lookup {
        None
    } else {
        match chain_from_config(&config) {
            Ok(chain) => Some(chain),
            Err(e) => {
                warn!("Lookups disabled: {}", e);
                None
            }
        }
    };

    let geocoder = get_geocoder()?;
    let comparison = compare(&geocoder, chain.as_ref(), source.as_ref(), target.as_ref()).await?;

    for (query, pin) in [(&source, &comparison.source), (&target, &comparison.target)] {
        if let (Some(PinQuery::Search(text)), None) = (query, pin) {
            eprintln!("Location not found: {}", text.trim());
        }
    }

    let output = formatter.format(&comparison, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
