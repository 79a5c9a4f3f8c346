//! External lookup chain
//!
//! Resolves the derived attributes of a pin from its coordinates:
//! - country code (reverse geocoding)
//! - currency (country info, needs the country code first)
//! - current weather (independent of the other two)
//!
//! Every attribute is fallible on its own. A failed lookup is logged and
//! becomes `None` for that attribute only.

pub mod openweather;
pub mod restcountries;
pub mod weather;

use crate::config::{Config, CountrySourceKind};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::nominatim::NominatimBackend;
use openweather::OpenWeatherClient;
use restcountries::RestCountriesClient;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

pub use weather::{WeatherIcon, WeatherSnapshot};

/// A country's currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code ("GBP")
    pub code: String,
    /// Display name ("British pound")
    pub name: String,
    /// Symbol ("£")
    pub symbol: String,
}

impl Currency {
    /// Display label, e.g. "British pound (£)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Resolve coordinates to an ISO 3166-1 alpha-2 country code
pub trait CountryLocator: Send + Sync {
    /// Returns None when the coordinates are not inside any country (open sea)
    fn country_code(&self, coords: Coordinates) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Resolve a country code to its currency
pub trait CurrencyLookup: Send + Sync {
    fn currency(&self, country_code: &str) -> impl Future<Output = Result<Option<Currency>>> + Send;
}

/// Fetch the current weather at some coordinates
pub trait WeatherSource: Send + Sync {
    fn current_weather(&self, coords: Coordinates) -> impl Future<Output = Result<WeatherSnapshot>> + Send;
}

/// Resolve every derived attribute of a pin
pub trait PinResolver: Send + Sync {
    /// Resolve one location; failures become `None` per attribute
    fn resolve(&self, coords: Coordinates) -> impl Future<Output = PinDetails> + Send;

    /// Resolve two independent locations concurrently
    fn resolve_pair(
        &self,
        source: Option<Coordinates>,
        target: Option<Coordinates>,
    ) -> impl Future<Output = (Option<PinDetails>, Option<PinDetails>)> + Send {
        async move {
            let resolve_opt = |coords: Option<Coordinates>| async move {
                match coords {
                    Some(coords) => Some(self.resolve(coords).await),
                    None => None,
                }
            };

            tokio::join!(resolve_opt(source), resolve_opt(target))
        }
    }
}

/// Everything the lookup chain learned about one location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PinDetails {
    pub country_code: Option<String>,
    pub currency: Option<Currency>,
    pub weather: Option<WeatherSnapshot>,
}

/// Country and currency, the two sequential stages of the chain
#[derive(Debug, Clone, Default, PartialEq)]
struct Region {
    country_code: Option<String>,
    currency: Option<Currency>,
}

/// The per-pin lookup pipeline
#[derive(Debug, Clone)]
pub struct LookupChain<C, K, W> {
    country: C,
    currency: K,
    weather: W,
}

impl<C, K, W> LookupChain<C, K, W>
where
    C: CountryLocator,
    K: CurrencyLookup,
    W: WeatherSource,
{
    /// Build a chain from its three collaborators
    pub fn new(country: C, currency: K, weather: W) -> Self {
        Self {
            country,
            currency,
            weather,
        }
    }

    /// Stage one (country code) feeding stage two (currency)
    async fn resolve_region(&self, coords: Coordinates) -> Region {
        let Some(country_code) = self.country_stage(coords).await else {
            return Region::default();
        };
        let currency = self.currency_stage(&country_code).await;

        Region {
            country_code: Some(country_code),
            currency,
        }
    }

    async fn country_stage(&self, coords: Coordinates) -> Option<String> {
        match self.country.country_code(coords).await {
            Ok(Some(code)) => Some(code),
            Ok(None) => {
                debug!("No country found at {}", coords);
                None
            }
            Err(e) => {
                warn!("Country lookup failed at {}: {}", coords, e);
                None
            }
        }
    }

    async fn currency_stage(&self, country_code: &str) -> Option<Currency> {
        match self.currency.currency(country_code).await {
            Ok(Some(currency)) => Some(currency),
            Ok(None) => {
                debug!("No currency listed for {}", country_code);
                None
            }
            Err(e) => {
                warn!("Currency lookup failed for {}: {}", country_code, e);
                None
            }
        }
    }

    async fn resolve_weather(&self, coords: Coordinates) -> Option<WeatherSnapshot> {
        match self.weather.current_weather(coords).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Weather lookup failed at {}: {}", coords, e);
                None
            }
        }
    }
}

impl<C, K, W> PinResolver for LookupChain<C, K, W>
where
    C: CountryLocator,
    K: CurrencyLookup,
    W: WeatherSource,
{
    /// The country/currency stages run concurrently with the weather lookup.
    async fn resolve(&self, coords: Coordinates) -> PinDetails {
        let (region, weather) = tokio::join!(self.resolve_region(coords), self.resolve_weather(coords));

        PinDetails {
            country_code: region.country_code,
            currency: region.currency,
            weather,
        }
    }
}

/// Reverse geocoder selected by configuration
#[derive(Debug, Clone)]
pub enum CountrySource {
    OpenWeather(OpenWeatherClient),
    Nominatim(NominatimBackend),
}

impl CountryLocator for CountrySource {
    async fn country_code(&self, coords: Coordinates) -> Result<Option<String>> {
        match self {
            Self::OpenWeather(client) => client.country_code(coords).await,
            Self::Nominatim(backend) => backend.country_code(coords).await,
        }
    }
}

/// The lookup chain wired to the real services
pub type DefaultLookupChain = LookupChain<CountrySource, RestCountriesClient, OpenWeatherClient>;

/// Build the lookup chain from configuration
///
/// Fails when no OpenWeather API key is available, since weather (and the
/// default reverse geocoder) cannot work without one.
pub fn chain_from_config(config: &Config) -> Result<DefaultLookupChain> {
    let api_key = config.openweather_key().ok_or_else(|| {
        Error::Config(
            "No OpenWeather API key configured. Set api_keys.openweather or OPENWEATHER_API_KEY"
                .to_string(),
        )
    })?;

    let weather = OpenWeatherClient::new(api_key)?;
    let country = match config.lookup.country_source {
        CountrySourceKind::OpenWeather => CountrySource::OpenWeather(weather.clone()),
        CountrySourceKind::Nominatim => CountrySource::Nominatim(NominatimBackend::new()?),
    };

    Ok(LookupChain::new(country, RestCountriesClient::new()?, weather))
}
