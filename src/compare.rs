//! Location comparison
//!
//! Geocodes up to two queries, resolves each pin through the lookup chain,
//! and summarizes the route between them.

use crate::coord::{frame_pins, haversine_distance, midpoint, zoom_for_distance, Coordinates, MapFrame};
use crate::error::Result;
use crate::geo::{self, GeoBackend};
use crate::lookup::PinResolver;
use crate::overlay::format_distance_km;
use crate::pin::{LocationPin, PinRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Distance and framing between two pinned locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Great-circle distance in meters
    pub distance_m: f64,
    /// Distance label, e.g. "343.94 km"
    pub label: String,
    pub midpoint: Coordinates,
    /// Zoom level that keeps both ends in view
    pub zoom: f64,
}

impl RouteSummary {
    pub fn between(a: Coordinates, b: Coordinates) -> Self {
        let distance_m = haversine_distance(a, b);
        Self {
            distance_m,
            label: format_distance_km(distance_m),
            midpoint: midpoint(a, b),
            zoom: zoom_for_distance(distance_m),
        }
    }
}

/// Where a pin comes from
#[derive(Debug, Clone, PartialEq)]
pub enum PinQuery {
    /// Free-text place search
    Search(String),
    /// Explicit coordinates with an optional display name
    At(Coordinates, Option<String>),
}

impl PinQuery {
    fn label(&self) -> String {
        match self {
            Self::Search(text) => text.trim().to_string(),
            Self::At(coords, name) => name.clone().unwrap_or_else(|| coords.to_string()),
        }
    }
}

/// The result of comparing two locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub source: Option<LocationPin>,
    pub target: Option<LocationPin>,
    /// Present only when both pins are set
    pub route: Option<RouteSummary>,
    pub frame: MapFrame,
    pub generated_at: DateTime<Utc>,
}

impl Comparison {
    /// Assemble a comparison from already-resolved pins
    pub fn from_pins(source: Option<LocationPin>, target: Option<LocationPin>) -> Self {
        let route = match (&source, &target) {
            (Some(a), Some(b)) => Some(RouteSummary::between(a.coords, b.coords)),
            _ => None,
        };
        let frame = frame_pins(
            source.as_ref().map(|pin| pin.coords),
            target.as_ref().map(|pin| pin.coords),
        );

        Self {
            source,
            target,
            route,
            frame,
            generated_at: Utc::now(),
        }
    }

    /// The pin for a role
    pub fn pin(&self, role: PinRole) -> Option<&LocationPin> {
        match role {
            PinRole::Source => self.source.as_ref(),
            PinRole::Target => self.target.as_ref(),
        }
    }
}

/// Turn a query into a bare pin
///
/// A search with no match yields None and leaves the slot empty.
pub async fn locate<G: GeoBackend>(geocoder: &G, query: &PinQuery) -> Result<Option<LocationPin>> {
    match query {
        PinQuery::At(coords, _) => {
            coords.validate()?;
            Ok(Some(LocationPin::new(query.label(), *coords)))
        }
        PinQuery::Search(text) => match geo::search(geocoder, text).await? {
            Some(location) => {
                info!("Found '{}' at {}", text.trim(), location.coords());
                Ok(Some(LocationPin::from_search(text, &location)))
            }
            None => {
                info!("Location not found: '{}'", text.trim());
                Ok(None)
            }
        },
    }
}

/// Locate both queries and resolve their attributes
///
/// Without a resolver the pins keep only their name and coordinates.
pub async fn compare<G, R>(
    geocoder: &G,
    resolver: Option<&R>,
    source: Option<&PinQuery>,
    target: Option<&PinQuery>,
) -> Result<Comparison>
where
    G: GeoBackend,
    R: PinResolver,
{
    let locate_opt = |query: Option<&PinQuery>| {
        let query = query.cloned();
        async move {
            match query {
                Some(query) => locate(geocoder, &query).await,
                None => Ok(None),
            }
        }
    };

    let (source, target) = tokio::join!(locate_opt(source), locate_opt(target));
    let (mut source, mut target) = (source?, target?);

    if let Some(resolver) = resolver {
        let (source_details, target_details) = resolver
            .resolve_pair(
                source.as_ref().map(|pin| pin.coords),
                target.as_ref().map(|pin| pin.coords),
            )
            .await;

        if let (Some(pin), Some(details)) = (source.as_mut(), source_details) {
            pin.apply(details);
        }
        if let (Some(pin), Some(details)) = (target.as_mut(), target_details) {
            pin.apply(details);
        }
    }

    Ok(Comparison::from_pins(source, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::testing::KnownPlaces;
    use crate::lookup::testing::{sample_weather, FixedCountry, FixedWeather, TableCurrency};
    use crate::lookup::LookupChain;
    use approx::assert_relative_eq;

    type TestChain = LookupChain<FixedCountry, TableCurrency, FixedWeather>;

    fn chain() -> TestChain {
        LookupChain::new(
            FixedCountry(Ok(Some("GB"))),
            TableCurrency::default(),
            FixedWeather(Some(sample_weather())),
        )
    }

    fn search(text: &str) -> PinQuery {
        PinQuery::Search(text.to_string())
    }

    #[test]
    fn test_route_summary() {
        let route = RouteSummary::between(
            Coordinates::new(51.5074, -0.1278),
            Coordinates::new(48.8566, 2.3522),
        );

        assert_relative_eq!(route.distance_m, 343_941.0, epsilon = 1.0);
        assert_eq!(route.label, "343.94 km");
        assert_eq!(route.zoom, 6.5);
        assert!((route.midpoint.lat - 50.17).abs() < 0.05);
        assert!((route.midpoint.lng - 1.12).abs() < 0.05);
    }

    #[tokio::test]
    async fn test_compare_pair() {
        let comparison = compare(
            &KnownPlaces::europe(),
            Some(&chain()),
            Some(&search("London")),
            Some(&search("paris")),
        )
        .await
        .unwrap();

        let source = comparison.source.as_ref().unwrap();
        assert_eq!(source.name, "London");
        assert_eq!(source.country_code.as_deref(), Some("GB"));
        assert_eq!(source.currency_label(), "British pound (£)");
        assert!(source.weather.is_some());

        assert_eq!(comparison.target.as_ref().unwrap().name, "paris");
        assert_eq!(comparison.route.as_ref().unwrap().label, "343.94 km");
        assert_eq!(comparison.frame.zoom, 6.5);
    }

    #[tokio::test]
    async fn test_unknown_place_leaves_slot_empty() {
        let comparison = compare(
            &KnownPlaces::europe(),
            Some(&chain()),
            Some(&search("Atlantis")),
            Some(&search("Berlin")),
        )
        .await
        .unwrap();

        assert!(comparison.source.is_none());
        assert!(comparison.route.is_none());
        assert_eq!(comparison.frame, MapFrame::close_up(Coordinates::new(52.52, 13.405)));
    }

    #[tokio::test]
    async fn test_compare_without_chain() {
        let comparison = compare::<_, TestChain>(
            &KnownPlaces::europe(),
            None,
            Some(&search("London")),
            None,
        )
        .await
        .unwrap();

        let source = comparison.source.unwrap();
        assert_eq!(source.country_code, None);
        assert_eq!(source.weather, None);
        assert!(comparison.target.is_none());
    }

    #[tokio::test]
    async fn test_explicit_coordinates() {
        let tokyo = Coordinates::new(35.6762, 139.6503);
        let comparison = compare(
            &KnownPlaces::default(),
            Some(&chain()),
            Some(&PinQuery::At(tokyo, Some("Tokyo".to_string()))),
            Some(&PinQuery::At(Coordinates::new(40.7128, -74.006), None)),
        )
        .await
        .unwrap();

        assert_eq!(comparison.source.as_ref().unwrap().name, "Tokyo");
        assert_eq!(comparison.target.as_ref().unwrap().name, "(40.7128, -74.0060)");
        assert!(comparison.route.is_some());
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected() {
        let result = compare::<_, TestChain>(
            &KnownPlaces::default(),
            None,
            Some(&PinQuery::At(Coordinates::new(95.0, 0.0), None)),
            None,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_comparison() {
        let comparison = compare::<_, TestChain>(
            &KnownPlaces::default(),
            None,
            None,
            None,
        )
        .await
        .unwrap();

        assert!(comparison.pin(PinRole::Source).is_none());
        assert_eq!(comparison.frame, MapFrame::world());
    }
}
