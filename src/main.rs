//! geo-compare CLI entry point
//!
//! Two-location comparison - CLI + web app

use geo_compare::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
