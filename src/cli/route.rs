//! Route command handler
//!
//! Distance, midpoint and map zoom between two coordinates. Needs no network.

use crate::compare::RouteSummary;
use crate::coord::Coordinates;
use crate::error::Result;
use clap::Args;

/// Route command arguments
#[derive(Args)]
pub struct RouteArgs {
    /// Start point as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    pub from: Coordinates,

    /// End point as "lat,lng"
    #[arg(long, allow_hyphen_values = true)]
    pub to: Coordinates,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the route command
pub fn run(args: RouteArgs) -> Result<()> {
    let route = RouteSummary::between(args.from, args.to);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        print!("{}", describe(&route));
    }

    Ok(())
}

fn describe(route: &RouteSummary) -> String {
    format!(
        "Distance: {} ({:.0} m)\nMidpoint: {}\nZoom:     {}\n",
        route.label, route.distance_m, route.midpoint, route.zoom
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let route = RouteSummary::between(
            Coordinates::new(51.5074, -0.1278),
            Coordinates::new(48.8566, 2.3522),
        );
        let text = describe(&route);

        assert!(text.starts_with("Distance: 343.94 km ("));
        assert!(text.contains("Zoom:     6.5"));
    }
}
