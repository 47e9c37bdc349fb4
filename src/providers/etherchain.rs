//! etherchain.org gas price oracle

use crate::{
    constants::{ETHERCHAIN_URL, GWEI_DECIMALS},
    error::ProviderError,
    provider::{endpoint, GasPriceProvider},
    types::TierPrices,
    units::wei_at,
};
use serde_json::Value;
use url::Url;

/// etherchain.org provider, prices reported in Gwei
pub struct EtherchainOrg {
    url: Url,
}

impl EtherchainOrg {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_url(ETHERCHAIN_URL)
    }

    pub fn with_url(url: &str) -> Result<Self, ProviderError> {
        Ok(Self {
            url: endpoint(url, None)?,
        })
    }
}

impl GasPriceProvider for EtherchainOrg {
    type Prices = TierPrices;

    fn provider_name(&self) -> &'static str {
        "etherchain"
    }

    fn url(&self) -> &Url {
        &self.url
    }

    fn parse(&self, payload: &Value) -> Result<TierPrices, ProviderError> {
        Ok(TierPrices {
            safe_low: wei_at(payload, &["safeLow"], GWEI_DECIMALS)?,
            standard: wei_at(payload, &["standard"], GWEI_DECIMALS)?,
            fast: wei_at(payload, &["fast"], GWEI_DECIMALS)?,
            fastest: wei_at(payload, &["fastest"], GWEI_DECIMALS)?,
            suggested_base_fee: None,
        })
    }
}
