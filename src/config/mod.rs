//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geo-compare/config.toml

pub mod defaults;

use crate::constants::api::OPENWEATHER_KEY_ENV;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for commands
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Lookup chain settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Rendered map settings
    #[serde(default)]
    pub map: MapConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Which service turns coordinates into a country code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountrySourceKind {
    OpenWeather,
    Nominatim,
}

impl std::str::FromStr for CountrySourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openweather" => Ok(Self::OpenWeather),
            "nominatim" => Ok(Self::Nominatim),
            _ => Err(format!("Unknown country source: {}", s)),
        }
    }
}

impl std::fmt::Display for CountrySourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenWeather => write!(f, "openweather"),
            Self::Nominatim => write!(f, "nominatim"),
        }
    }
}

/// Lookup chain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Reverse geocoder used for country codes
    #[serde(default = "default_country_source")]
    pub country_source: CountrySourceKind,
}

/// Rendered map settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Width in pixels
    #[serde(default = "default_map_width")]
    pub width: f64,

    /// Height in pixels
    #[serde(default = "default_map_height")]
    pub height: f64,

    /// Background fill
    #[serde(default = "default_map_background")]
    pub background: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// OpenWeather API key (weather and reverse geocoding)
    #[serde(default)]
    pub openweather: String,
}

// Default value functions for serde
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_country_source() -> CountrySourceKind {
    DEFAULT_COUNTRY_SOURCE
        .parse()
        .unwrap_or(CountrySourceKind::OpenWeather)
}
fn default_map_width() -> f64 {
    DEFAULT_MAP_WIDTH
}
fn default_map_height() -> f64 {
    DEFAULT_MAP_HEIGHT
}
fn default_map_background() -> String {
    DEFAULT_MAP_BACKGROUND.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            country_source: default_country_source(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            background: default_map_background(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["lookup", "country_source"] => Some(self.lookup.country_source.to_string()),

            ["map", "width"] => Some(self.map.width.to_string()),
            ["map", "height"] => Some(self.map.height.to_string()),
            ["map", "background"] => Some(self.map.background.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["api_keys", "openweather"] => Some(self.api_keys.openweather.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["lookup", "country_source"] => {
                self.lookup.country_source = value.parse().map_err(Error::Config)?;
            }

            ["map", "width"] => {
                self.map.width = parse_dimension(value)?;
            }
            ["map", "height"] => {
                self.map.height = parse_dimension(value)?;
            }
            ["map", "background"] => {
                self.map.background = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["api_keys", "openweather"] => {
                self.api_keys.openweather = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "lookup.country_source",
            "map.width",
            "map.height",
            "map.background",
            "server.host",
            "server.port",
            "api_keys.openweather",
        ]
    }

    /// OpenWeather API key, the environment taking precedence over the file
    pub fn openweather_key(&self) -> Option<String> {
        std::env::var(OPENWEATHER_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                Some(self.api_keys.openweather.clone()).filter(|key| !key.trim().is_empty())
            })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_dimension(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v > 0.0 && v.is_finite() => Ok(v),
        _ => Err(Error::Config(format!("Invalid dimension value: {}", value))),
    }
}
