//! Provider abstraction: where to fetch gas prices from and how to read them

use crate::error::ProviderError;
use serde_json::Value;
use url::Url;

/// Trait for gas price providers
///
/// A provider owns its fully-qualified request URL (including any API key
/// folded into the query string) and a pure parser from the decoded JSON
/// body into one of the two price shapes,
/// [`TierPrices`](crate::types::TierPrices) or
/// [`FeeMarketPrices`](crate::types::FeeMarketPrices).
pub trait GasPriceProvider: Send + Sync + 'static {
    /// Snapshot type produced by [`parse`](Self::parse)
    type Prices: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;

    /// Returns the request target
    fn url(&self) -> &Url;

    /// Maps a decoded payload to normalized Wei prices
    ///
    /// Must fail on any missing or non-numeric field instead of substituting a
    /// default.
    fn parse(&self, payload: &Value) -> Result<Self::Prices, ProviderError>;
}

/// Builds a request URL, appending an optional `key=value` query pair
pub fn endpoint(base: &str, query: Option<(&str, &str)>) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base)?;
    if let Some((key, value)) = query {
        url.query_pairs_mut().append_pair(key, value);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_without_query() {
        let url = endpoint("https://ethgasstation.info/json/ethgasAPI.json", None).unwrap();
        assert_eq!(url.as_str(), "https://ethgasstation.info/json/ethgasAPI.json");
    }

    #[test]
    fn test_endpoint_extends_existing_query() {
        let url = endpoint(
            "https://api.etherscan.io/api?module=gastracker&action=gasoracle",
            Some(("apikey", "abcdefg")),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.etherscan.io/api?module=gastracker&action=gasoracle&apikey=abcdefg"
        );
    }

    #[test]
    fn test_endpoint_encodes_credential() {
        let url = endpoint("https://example.org/gas", Some(("utm_source", "my app&co"))).unwrap();
        assert_eq!(url.as_str(), "https://example.org/gas?utm_source=my+app%26co");
    }

    #[test]
    fn test_endpoint_rejects_garbage() {
        assert!(matches!(
            endpoint("not a url", None),
            Err(ProviderError::InvalidUrl(_))
        ));
    }
}
