//! ethgas.watch gas price API

use crate::{
    constants::{ETH_GAS_WATCH_URL, GWEI_DECIMALS},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

/// ethgas.watch provider, prices reported in Gwei
///
/// Maps `slow`/`normal`/`fast`/`instant` onto the four tiers.
pub struct EthGasWatch {
    url: Url,
}

impl EthGasWatch {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_url(ETH_GAS_WATCH_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, None)?,
        })
    }
}

impl GasPriceProvider for EthGasWatch {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "ethgaswatch"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            safe_low: wei_at(payload, &["slow", "gwei"], GWEI_DECIMALS)?,
            standard: wei_at(payload, &["normal", "gwei"], GWEI_DECIMALS)?,
            fast: wei_at(payload, &["fast", "gwei"], GWEI_DECIMALS)?,
            fastest: wei_at(payload, &["instant", "gwei"], GWEI_DECIMALS)?,
            suggested_base_fee: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_nested_gwei() {
        let provider = EthGasWatch::new().unwrap();
        let payload = json!({
            "slow": {"gwei": 40, "usd": 1.2},
            "normal": {"gwei": 45, "usd": 1.4},
            "fast": {"gwei": 50, "usd": 1.6},
            "instant": {"gwei": 60, "usd": 1.9}
        });
        let prices = provider.parse(&payload).unwrap();

        assert_eq!(prices.safe_low, 40_000_000_000);
        assert_eq!(prices.standard, 45_000_000_000);
        assert_eq!(prices.fastest, 60_000_000_000);
    }
}
