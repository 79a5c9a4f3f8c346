//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default reverse geocoder for country codes
pub const DEFAULT_COUNTRY_SOURCE: &str = "openweather";

/// Default rendered map width in pixels
pub const DEFAULT_MAP_WIDTH: f64 = 800.0;

/// Default rendered map height in pixels
pub const DEFAULT_MAP_HEIGHT: f64 = 600.0;

/// Default rendered map background
pub const DEFAULT_MAP_BACKGROUND: &str = "#e5e3df";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7879;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geo-compare";
