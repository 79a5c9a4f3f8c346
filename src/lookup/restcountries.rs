//! REST Countries client
//!
//! Maps a country code to the currency used there.

use crate::constants::api::{REST_COUNTRIES_URL, USER_AGENT};
use crate::error::{Error, Result};
use crate::lookup::{Currency, CurrencyLookup};
use serde::Deserialize;
use serde_json::{Map, Value};

/// REST Countries API client
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CountryInfo {
    /// Kept in response order (serde_json `preserve_order`)
    #[serde(default)]
    currencies: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct CurrencyInfo {
    name: String,
    #[serde(default)]
    symbol: String,
}

impl RestCountriesClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl CurrencyLookup for RestCountriesClient {
    async fn currency(&self, country_code: &str) -> Result<Option<Currency>> {
        let url = format!("{}/{}", REST_COUNTRIES_URL, urlencoding::encode(country_code));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("REST Countries request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Lookup(format!(
                "REST Countries returned status: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Lookup(format!("Failed to read REST Countries response: {}", e)))?;

        parse_currency(&body)
    }
}

/// Pick the first currency of the first country in a REST Countries body
///
/// Countries with several currencies (e.g. Panama) yield the one listed
/// first in the response.
pub fn parse_currency(body: &str) -> Result<Option<Currency>> {
    let parse_error =
        |e: serde_json::Error| Error::Lookup(format!("Failed to parse REST Countries response: {}", e));

    let countries: Vec<CountryInfo> = serde_json::from_str(body).map_err(parse_error)?;

    let Some((code, info)) = countries
        .into_iter()
        .next()
        .and_then(|country| country.currencies.into_iter().next())
    else {
        return Ok(None);
    };

    let info: CurrencyInfo = serde_json::from_value(info).map_err(parse_error)?;
    Ok(Some(Currency {
        code,
        name: info.name,
        symbol: info.symbol,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency() {
        let body = r#"[{
            "name": {"common": "United Kingdom", "official": "United Kingdom of Great Britain and Northern Ireland"},
            "cca2": "GB",
            "currencies": {"GBP": {"name": "British pound", "symbol": "£"}}
        }]"#;

        let currency = parse_currency(body).unwrap().unwrap();
        assert_eq!(currency.code, "GBP");
        assert_eq!(currency.name, "British pound");
        assert_eq!(currency.symbol, "£");
    }

    #[test]
    fn test_parse_currency_multiple() {
        let body = r#"[{"currencies": {
            "USD": {"name": "United States dollar", "symbol": "$"},
            "PAB": {"name": "Panamanian balboa", "symbol": "B/."}
        }}]"#;

        let currency = parse_currency(body).unwrap().unwrap();
        assert_eq!(currency.code, "USD");

        let body = r#"[{"currencies": {
            "PAB": {"name": "Panamanian balboa", "symbol": "B/."},
            "USD": {"name": "United States dollar", "symbol": "$"}
        }}]"#;
        assert_eq!(parse_currency(body).unwrap().unwrap().code, "PAB");
    }

    #[test]
    fn test_parse_currency_none() {
        // Antarctica lists no currency
        assert_eq!(parse_currency(r#"[{"name": {"common": "Antarctica"}}]"#).unwrap(), None);
        assert_eq!(parse_currency("[]").unwrap(), None);
    }

    #[test]
    fn test_parse_currency_missing_symbol() {
        let body = r#"[{"currencies": {"XYZ": {"name": "Test unit"}}}]"#;
        let currency = parse_currency(body).unwrap().unwrap();
        assert_eq!(currency.symbol, "");
    }

    #[test]
    fn test_parse_currency_invalid() {
        assert!(parse_currency(r#"{"status": 404, "message": "Not Found"}"#).is_err());
        assert!(parse_currency(r#"[{"currencies": {"XYZ": {"symbol": "x"}}}]"#).is_err());
    }
}
