//! Constants for the gas price feeds
//!
//! Defaults for [`FeedConfig`](crate::config::FeedConfig) and the upstream
//! endpoints of every bundled provider live here.

/// Default interval between fetches (in seconds)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

/// Default time after the last successful fetch before prices expire (in seconds)
pub const DEFAULT_EXPIRY_SECS: u64 = 600;

/// Default HTTP request timeout for a single fetch (in seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the refresh interval
pub const ENV_REFRESH_INTERVAL_SECS: &str = "GASPRICE_REFRESH_INTERVAL_SECS";

/// Environment variable overriding the expiry window
pub const ENV_EXPIRY_SECS: &str = "GASPRICE_EXPIRY_SECS";

/// Environment variable overriding the request timeout
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "GASPRICE_REQUEST_TIMEOUT_SECS";

/// Capacity of the feed event broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "gasprice-client/0.1.0";

/// Decimal places between Gwei and Wei
pub const GWEI_DECIMALS: u32 = 9;

/// Decimal places between ethgasstation's tenth-of-Gwei unit and Wei
pub const DECI_GWEI_DECIMALS: u32 = 8;

/// Decimal places for values already denominated in Wei
pub const WEI_DECIMALS: u32 = 0;

pub const ETHERCHAIN_URL: &str = "https://www.etherchain.org/api/gasPriceOracle";

pub const METAMASK_URL: &str = "https://api.metaswap.codefi.network/gasPrices";

pub const METAMASK_1559_URL: &str =
    "https://gas-api.metaswap.codefi.network/networks/1/suggestedGasFees";

pub const POA_NETWORK_URL: &str = "https://gasprice.poa.network";

pub const ETH_GAS_STATION_URL: &str = "https://ethgasstation.info/json/ethgasAPI.json";

pub const ETHERSCAN_URL: &str = "https://api.etherscan.io/api?module=gastracker&action=gasoracle";

pub const POLYGONSCAN_URL: &str =
    "https://api.polygonscan.com/api?module=gastracker&action=gasoracle";

pub const GASNOW_URL: &str = "https://www.gasnow.org/api/v3/gas/price";

pub const ETH_GAS_WATCH_URL: &str = "http://ethgas.watch/api/gas";
