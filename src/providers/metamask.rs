//! MetaMask (codefi metaswap) gas APIs
//!
//! Two endpoints exist: the legacy flat gas price one and the EIP-1559
//! `suggestedGasFees` one. Both report Gwei. Neither has a separate fastest
//! tier, so the fast values are repeated.

use crate::{
    constants::{GWEI_DECIMALS, METAMASK_1559_URL, METAMASK_URL},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::{FeeEstimate, FeeMarketPrices, TierPrices, WaitTime},
    units::{field, integer_at, wei_at},
};
use serde_json::Value;
use url::Url;

/// Legacy MetaMask gas price provider
pub struct Metamask {
    url: Url,
}

impl Metamask {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_url(METAMASK_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, None)?,
        })
    }
}

impl GasPriceProvider for Metamask {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "metamask"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        let fast = wei_at(payload, &["FastGasPrice"], GWEI_DECIMALS)?;
        Ok(TierPrices {
            safe_low: wei_at(payload, &["SafeGasPrice"], GWEI_DECIMALS)?,
            standard: wei_at(payload, &["ProposeGasPrice"], GWEI_DECIMALS)?,
            fast,
            fastest: fast,
            suggested_base_fee: None,
        })
    }
}

/// MetaMask EIP-1559 fee suggestion provider
pub struct Metamask1559 {
    url: Url,
}

/// Response buckets in tier order; `high` serves both fast and fastest
const LEVELS: [&str; 4] = ["low", "medium", "high", "high"];

impl Metamask1559 {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_url(METAMASK_1559_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, None)?,
        })
    }

    fn fee(payload: &Value, level: &str) -> Result<FeeEstimate, ProviderError> {
        Ok(FeeEstimate {
            max_priority_fee: wei_at(
                payload,
                &[level, "suggestedMaxPriorityFeePerGas"],
                GWEI_DECIMALS,
            )?,
            max_fee: wei_at(payload, &[level, "suggestedMaxFeePerGas"], GWEI_DECIMALS)?,
        })
    }

    fn wait_times(payload: &Value) -> Result<Option<[WaitTime; 4]>, ProviderError> {
        if field(payload, &["low", "minWaitTimeEstimate"]).is_err() {
            return Ok(None);
        }

        let mut times = [WaitTime { min_ms: 0, max_ms: 0 }; 4];
        for (slot, level) in times.iter_mut().zip(LEVELS) {
            *slot = WaitTime {
                min_ms: integer_at(payload, &[level, "minWaitTimeEstimate"])?,
                max_ms: integer_at(payload, &[level, "maxWaitTimeEstimate"])?,
            };
        }
        Ok(Some(times))
    }
}

impl GasPriceProvider for Metamask1559 {
    type Prices = FeeMarketPrices;

    fn provider_name(&self) -> &'static str {
        "metamask1559"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<FeeMarketPrices, ProviderError> {
        let estimated_base_fee = match payload.get("estimatedBaseFee") {
            Some(_) => Some(wei_at(payload, &["estimatedBaseFee"], GWEI_DECIMALS)?),
            None => None,
        };

        Ok(FeeMarketPrices {
            safe_low: Self::fee(payload, LEVELS[0])?,
            standard: Self::fee(payload, LEVELS[1])?,
            fast: Self::fee(payload, LEVELS[2])?,
            fastest: Self::fee(payload, LEVELS[3])?,
            wait_times: Self::wait_times(payload)?,
            estimated_base_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fee_market_fixture() -> Value {
        json!({
            "low": {
                "suggestedMaxPriorityFeePerGas": "3",
                "suggestedMaxFeePerGas": "53.323842299",
                "minWaitTimeEstimate": 15000,
                "maxWaitTimeEstimate": 30000
            },
            "medium": {
                "suggestedMaxPriorityFeePerGas": "4",
                "suggestedMaxFeePerGas": "62.711149349",
                "minWaitTimeEstimate": 15000,
                "maxWaitTimeEstimate": 45000
            },
            "high": {
                "suggestedMaxPriorityFeePerGas": "5",
                "suggestedMaxFeePerGas": "72.098456399",
                "minWaitTimeEstimate": 15000,
                "maxWaitTimeEstimate": 60000
            },
            "estimatedBaseFee": "41.936535249"
        })
    }

    #[test]
    fn test_legacy_parse_repeats_fast() {
        let provider = Metamask::new().unwrap();
        let payload = json!({"SafeGasPrice": "20", "ProposeGasPrice": "25", "FastGasPrice": "31.5"});
        let prices = provider.parse(&payload).unwrap();

        assert_eq!(prices.safe_low, 20_000_000_000);
        assert_eq!(prices.standard, 25_000_000_000);
        assert_eq!(prices.fast, 31_500_000_000);
        assert_eq!(prices.fastest, prices.fast);
    }

    #[test]
    fn test_fee_market_parse() {
        let provider = Metamask1559::new().unwrap();
        let prices = provider.parse(&fee_market_fixture()).unwrap();

        assert_eq!(
            prices.safe_low,
            FeeEstimate {
                max_priority_fee: 3_000_000_000,
                max_fee: 53_323_842_299
            }
        );
        assert_eq!(
            prices.standard,
            FeeEstimate {
                max_priority_fee: 4_000_000_000,
                max_fee: 62_711_149_349
            }
        );
        assert_eq!(
            prices.fast,
            FeeEstimate {
                max_priority_fee: 5_000_000_000,
                max_fee: 72_098_456_399
            }
        );
        assert_eq!(prices.fastest, prices.fast);
        assert_eq!(prices.estimated_base_fee, Some(41_936_535_249));

        let waits = prices.wait_times.unwrap();
        assert_eq!(waits[0], WaitTime { min_ms: 15_000, max_ms: 30_000 });
        assert_eq!(waits[3], WaitTime { min_ms: 15_000, max_ms: 60_000 });
    }

    #[test]
    fn test_fee_market_truncates_sub_wei() {
        let provider = Metamask1559::new().unwrap();
        let mut payload = fee_market_fixture();
        payload["low"]["suggestedMaxFeePerGas"] = json!("53.3238422999");

        let prices = provider.parse(&payload).unwrap();
        assert_eq!(prices.safe_low.max_fee, 53_323_842_299);
    }

    #[test]
    fn test_fee_market_without_wait_times() {
        let provider = Metamask1559::new().unwrap();
        let mut payload = fee_market_fixture();
        for level in ["low", "medium", "high"] {
            let bucket = payload[level].as_object_mut().unwrap();
            bucket.remove("minWaitTimeEstimate");
            bucket.remove("maxWaitTimeEstimate");
        }
        payload.as_object_mut().unwrap().remove("estimatedBaseFee");

        let prices = provider.parse(&payload).unwrap();
        assert_eq!(prices.wait_times, None);
        assert_eq!(prices.estimated_base_fee, None);
    }

    #[test]
    fn test_fee_market_missing_fee_is_error() {
        let provider = Metamask1559::new().unwrap();
        let mut payload = fee_market_fixture();
        payload["medium"]
            .as_object_mut()
            .unwrap()
            .remove("suggestedMaxFeePerGas");

        assert!(matches!(
            provider.parse(&payload),
            Err(ProviderError::MissingField(field)) if field == "medium.suggestedMaxFeePerGas"
        ));
    }

    #[test]
    fn test_fee_market_rejects_garbage_base_fee() {
        let provider = Metamask1559::new().unwrap();
        let mut payload = fee_market_fixture();
        payload["estimatedBaseFee"] = json!("n/a");

        assert!(matches!(
            provider.parse(&payload),
            Err(ProviderError::InvalidField { field, .. }) if field == "estimatedBaseFee"
        ));
    }
}
