//! ethgasstation.info gas price API

use crate::{
    constants::{DECI_GWEI_DECIMALS, ETH_GAS_STATION_URL},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

/// ethgasstation.info provider
///
/// Prices are reported in tenths of a Gwei.
pub struct EthGasStation {
    url: Url,
}

impl EthGasStation {
    pub fn new(api_key: Option<&str>) -> Result<Self, ProviderError> {
        Self::with_url(ETH_GAS_STATION_URL, api_key)
    }

    pub fn with_url(url: &str, api_key: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, api_key.map(|key| ("api-key", key)))?,
        })
    }
}

impl GasPriceProvider for EthGasStation {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "ethgasstation"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            safe_low: wei_at(payload, &["safeLow"], DECI_GWEI_DECIMALS)?,
            standard: wei_at(payload, &["average"], DECI_GWEI_DECIMALS)?,
            fast: wei_at(payload, &["fast"], DECI_GWEI_DECIMALS)?,
            fastest: wei_at(payload, &["fastest"], DECI_GWEI_DECIMALS)?,
            suggested_base_fee: None,
        })
    }
}
