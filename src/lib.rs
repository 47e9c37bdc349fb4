//! # Gas Price Client
//!
//! Background-refreshed gas price recommendations from public gas price APIs
//! (etherchain, Etherscan, MetaMask, ...), normalized to Wei.
//!
//! Each [`GasPriceTracker`] polls one provider on a fixed interval and keeps
//! the last successfully parsed prices. Reads are synchronous and return
//! `None` before the first successful fetch and whenever the last one is
//! older than the configured expiry. Callers should treat `None` as "do not
//! act on this value now".
//!
//! ## Usage
//!
//! ```no_run
//! use gasprice_client::{providers::Etherscan, FeedConfig, GasPriceTracker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Etherscan::new(Some("MY-API-KEY"))?;
//! let tracker = GasPriceTracker::spawn(provider, FeedConfig::from_env()?)?;
//!
//! match tracker.standard_price() {
//!     Some(wei) => println!("standard: {} wei", wei),
//!     None => println!("gas prices currently unavailable"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! GasPriceTracker::spawn()
//!     ↓
//! Background Task (polls every refresh_interval)
//!     ↓
//! Transport (HTTP GET, JSON) → GasPriceProvider::parse
//!     ↓
//! GasPriceStore (in-memory, expiry checked on read)
//!     ↓
//! Your Code (safe_low_price, fast_max_fee, ...)
//! ```
//!
//! ## Adding New Providers
//!
//! Implement [`GasPriceProvider`] with `Prices = TierPrices` for flat
//! per-tier prices or `Prices = FeeMarketPrices` for EIP-1559 fee pairs.
//! The matching accessors on [`GasPriceTracker`] become available
//! automatically.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod store;
pub mod tracker;
pub mod transport;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use config::FeedConfig;
pub use error::{ConfigError, FeedError, ProviderError};
pub use metrics::FetchMetrics;
pub use provider::GasPriceProvider;
pub use store::GasPriceStore;
pub use tracker::GasPriceTracker;
pub use types::{FeeEstimate, FeeMarketPrices, FeedEvent, Tier, TierPrices, WaitTime};
