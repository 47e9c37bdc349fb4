//! Etherscan-family gas oracles (etherscan.io, polygonscan.com)
//!
//! Both wrap their answer in a `result` object and report Gwei; Polygonscan
//! adds a base fee suggestion.

use crate::{
    constants::{ETHERSCAN_URL, GWEI_DECIMALS, POLYGONSCAN_URL},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

fn parse_result(payload: &Value) -> Result<TierPrices, ProviderError> {
    let fast = wei_at(payload, &["result", "FastGasPrice"], GWEI_DECIMALS)?;
    Ok(TierPrices {
        safe_low: wei_at(payload, &["result", "SafeGasPrice"], GWEI_DECIMALS)?,
        standard: wei_at(payload, &["result", "ProposeGasPrice"], GWEI_DECIMALS)?,
        fast,
        fastest: fast,
        suggested_base_fee: None,
    })
}

/// etherscan.io gas oracle
pub struct Etherscan {
    url: Url,
}

impl Etherscan {
    pub fn new(api_key: Option<&str>) -> Result<Self, ProviderError> {
        Self::with_url(ETHERSCAN_URL, api_key)
    }

    pub fn with_url(url: &str, api_key: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, api_key.map(|key| ("apikey", key)))?,
        })
    }
}

impl GasPriceProvider for Etherscan {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "etherscan"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        parse_result(payload)
    }
}

/// polygonscan.com gas oracle
pub struct Polygonscan {
    url: Url,
}

impl Polygonscan {
    pub fn new(api_key: Option<&str>) -> Result<Self, ProviderError> {
        Self::with_url(POLYGONSCAN_URL, api_key)
    }

    pub fn with_url(url: &str, api_key: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, api_key.map(|key| ("apikey", key)))?,
        })
    }
}

impl GasPriceProvider for Polygonscan {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "polygonscan"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            suggested_base_fee: Some(wei_at(
                payload,
                &["result", "suggestBaseFee"],
                GWEI_DECIMALS,
            )?),
            ..parse_result(payload)?
        })
    }
}
