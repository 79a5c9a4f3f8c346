//! Centralized constants for the geo-compare crate
//!
//! Values shared by several modules live here so the geometry, the clients
//! and the renderer agree on them.

/// Geographic constants
pub mod geo {
    /// WGS84 equatorial radius in meters, used for route distances
    ///
    /// Distances, labels and zoom selection all measure with this value so
    /// they agree with what the map toolkit reports.
    pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

    /// Sphere radius of the Web Mercator projection (EPSG:3857)
    pub const MERCATOR_RADIUS_METERS: f64 = EARTH_RADIUS_METERS;

    /// Latitude limit of the Web Mercator projection
    pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_6;
}

/// Map camera constants
pub mod map {
    /// Center of the initial world view
    pub const WORLD_CENTER: (f64, f64) = (50.0, 0.0);

    /// Zoom of the initial world view
    pub const WORLD_ZOOM: f64 = 3.0;

    /// Zoom used when only one point (or two identical points) is shown
    pub const CLOSE_UP_ZOOM: f64 = 10.0;

    /// Pixel size of one map tile
    pub const TILE_SIZE: f64 = 256.0;

    /// Number of segments used to draw the connecting geodesic
    pub const GEODESIC_SEGMENTS: usize = 32;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// OpenWeather current weather API
    pub const OPENWEATHER_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

    /// OpenWeather reverse geocoding API
    pub const OPENWEATHER_REVERSE_URL: &str = "https://api.openweathermap.org/geo/1.0/reverse";

    /// REST Countries API
    pub const REST_COUNTRIES_URL: &str = "https://restcountries.com/v3.1/alpha";

    /// Environment variable that overrides the configured OpenWeather key
    pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";

    /// User agent sent to every external service
    pub const USER_AGENT: &str = concat!("geo-compare/", env!("CARGO_PKG_VERSION"));
}

/// Display placeholders for missing data
pub mod placeholder {
    /// Missing weather value
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Missing clock time
    pub const NO_TIME: &str = "--:--:--";

    /// Missing clock date
    pub const NO_LOCATION: &str = "No location";

    /// Missing currency name
    pub const UNKNOWN_CURRENCY: &str = "Unknown";

    /// Missing currency symbol
    pub const UNKNOWN_SYMBOL: &str = "???";
}
