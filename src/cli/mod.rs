//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod clock;
pub mod compare;
pub mod config;
pub mod route;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Compare two places: distance, currency, weather and local time
#[derive(Parser)]
#[command(name = "geo-compare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two locations
    Compare(compare::CompareArgs),

    /// Distance, midpoint and zoom between two coordinates (offline)
    Route(route::RouteArgs),

    /// Show the local time at a UTC offset
    Clock(clock::ClockArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    init_logging(match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    });

    match cli.command {
        Commands::Compare(args) => compare::run(args).await,
        Commands::Route(args) => route::run(args),
        Commands::Clock(args) => clock::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
