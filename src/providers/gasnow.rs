//! gasnow.org gas price API

use crate::{
    constants::{GASNOW_URL, WEI_DECIMALS},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

/// gasnow.org provider, prices already in Wei
///
/// An optional application name is sent as `utm_source`.
pub struct GasNow {
    url: Url,
}

impl GasNow {
    pub fn new(app_name: Option<&str>) -> Result<Self, ProviderError> {
        Self::with_url(GASNOW_URL, app_name)
    }

    pub fn with_url(url: &str, app_name: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, app_name.map(|name| ("utm_source", name)))?,
        })
    }
}

impl GasPriceProvider for GasNow {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "gasnow"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            safe_low: wei_at(payload, &["data", "slow"], WEI_DECIMALS)?,
            standard: wei_at(payload, &["data", "standard"], WEI_DECIMALS)?,
            fast: wei_at(payload, &["data", "fast"], WEI_DECIMALS)?,
            fastest: wei_at(payload, &["data", "rapid"], WEI_DECIMALS)?,
            suggested_base_fee: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_with_app_name() {
        let plain = GasNow::new(None).unwrap();
        assert_eq!(plain.url().as_str(), "https://www.gasnow.org/api/v3/gas/price");

        let tagged = GasNow::new(Some("abcdefg")).unwrap();
        assert_eq!(
            tagged.url().as_str(),
            "https://www.gasnow.org/api/v3/gas/price?utm_source=abcdefg"
        );
    }

    #[test]
    fn test_parse_wei() {
        let provider = GasNow::new(None).unwrap();
        let payload = json!({
            "code": 200,
            "data": {
                "rapid": 180_132_000_000u64,
                "fast": 177_000_000_000u64,
                "standard": 150_000_000_000u64,
                "slow": 130_000_000_000u64,
                "timestamp": 1_598_434_638
            }
        });
        let prices = provider.parse(&payload).unwrap();

        assert_eq!(prices.safe_low, 130_000_000_000);
        assert_eq!(prices.fastest, 180_132_000_000);
    }
}
