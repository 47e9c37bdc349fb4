//! POA Network gas price oracle

use crate::{
    constants::{GWEI_DECIMALS, POA_NETWORK_URL},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

/// POA Network provider
///
/// The oracle is open source and often self-hosted, so an alternate URL can
/// replace the public one.
pub struct PoaNetwork {
    url: Url,
}

impl PoaNetwork {
    pub fn new(alt_url: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(alt_url.unwrap_or(POA_NETWORK_URL), None)?,
        })
    }
}

impl GasPriceProvider for PoaNetwork {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "poa"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            safe_low: wei_at(payload, &["slow"], GWEI_DECIMALS)?,
            standard: wei_at(payload, &["standard"], GWEI_DECIMALS)?,
            fast: wei_at(payload, &["fast"], GWEI_DECIMALS)?,
            fastest: wei_at(payload, &["instant"], GWEI_DECIMALS)?,
            suggested_base_fee: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alternate_url() {
        let local = PoaNetwork::new(Some("http://127.0.0.1:8000")).unwrap();
        assert_eq!(local.url().as_str(), "http://127.0.0.1:8000/");

        let public = PoaNetwork::new(None).unwrap();
        assert_eq!(public.url().as_str(), "https://gasprice.poa.network/");
    }

    #[test]
    fn test_parse() {
        let provider = PoaNetwork::new(None).unwrap();
        let payload = json!({
            "health": true,
            "block_number": 11_000_000,
            "slow": 35.1,
            "standard": 42,
            "fast": 51.5,
            "instant": 70
        });
        let prices = provider.parse(&payload).unwrap();

        assert_eq!(prices.safe_low, 35_100_000_000);
        assert_eq!(prices.fast, 51_500_000_000);
        assert_eq!(prices.fastest, 70_000_000_000);
    }
}
