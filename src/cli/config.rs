//! Config command handler
//!
//! Show, change or reset settings in the config file.

use crate::config::Config;
use crate::constants::api::OPENWEATHER_KEY_ENV;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Setting to show or change (e.g. "lookup.country_source")
    pub key: Option<String>,

    /// New value for the setting
    #[arg(requires = "key")]
    pub value: Option<String>,

    /// Print the config file location
    #[arg(long, conflicts_with_all = ["key", "reset"])]
    pub path: bool,

    /// Overwrite the config file with defaults
    #[arg(long, conflicts_with = "key")]
    pub reset: bool,

    /// List the settable keys
    #[arg(long, conflicts_with_all = ["key", "path", "reset"])]
    pub keys: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.keys {
        Config::available_keys().iter().for_each(|key| println!("{}", key));
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    let Some(key) = args.key else {
        print!("{}", render(&config));
        return Ok(());
    };

    match args.value {
        Some(value) => {
            config.set(&key, &value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
        None => {
            let value = config.get(&key).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::available_keys().join(", ")
                ))
            })?;
            println!("{}", value);
        }
    }

    Ok(())
}

/// The whole configuration as TOML, with the API key masked
fn render(config: &Config) -> String {
    let mut out = String::new();

    out.push_str("[defaults]\n");
    out.push_str(&format!("format = \"{}\"\n\n", config.defaults.format));

    out.push_str("[lookup]\n");
    out.push_str(&format!("country_source = \"{}\"\n\n", config.lookup.country_source));

    out.push_str("[map]\n");
    out.push_str(&format!("width = {}\n", config.map.width));
    out.push_str(&format!("height = {}\n", config.map.height));
    out.push_str(&format!("background = \"{}\"\n\n", config.map.background));

    out.push_str("[server]\n");
    out.push_str(&format!("host = \"{}\"\n", config.server.host));
    out.push_str(&format!("port = {}\n\n", config.server.port));

    out.push_str("[api_keys]\n");
    if !config.api_keys.openweather.is_empty() {
        out.push_str("openweather = \"***\" # configured\n");
    } else if config.openweather_key().is_some() {
        out.push_str(&format!("openweather = \"\" # using {}\n", OPENWEATHER_KEY_ENV));
    } else {
        out.push_str("openweather = \"\" # not configured\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_key() {
        let mut config = Config::default();
        config.api_keys.openweather = "secret".to_string();

        let text = render(&config);
        assert!(text.contains("openweather = \"***\""));
        assert!(!text.contains("secret"));
        assert!(text.contains("country_source = \"openweather\""));
    }

    #[test]
    fn test_render_is_valid_toml() {
        let text = render(&Config::default());
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.server.port, 7879);
        assert_eq!(parsed.map.background, "#e5e3df");
    }
}
