//! Types for the gas price feeds

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Urgency class of a gas price recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Cheapest, may take up to ~30 minutes
    SafeLow,
    /// Typically included within ~5 minutes
    Standard,
    /// Typically included within ~2 minutes
    Fast,
    /// Highest urgency the provider reports
    Fastest,
}

impl Tier {
    /// Get all tiers in ascending urgency
    pub fn all() -> &'static [Tier] {
        &[Tier::SafeLow, Tier::Standard, Tier::Fast, Tier::Fastest]
    }
}

/// Flat per-tier gas prices in Wei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrices {
    pub safe_low: u64,
    pub standard: u64,
    pub fast: u64,
    pub fastest: u64,
    /// Base fee suggestion, only reported by some providers
    pub suggested_base_fee: Option<u64>,
}

impl TierPrices {
    /// Get the price for a tier
    pub fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::SafeLow => self.safe_low,
            Tier::Standard => self.standard,
            Tier::Fast => self.fast,
            Tier::Fastest => self.fastest,
        }
    }
}

/// EIP-1559 fee pair for one tier, in Wei
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub max_priority_fee: u64,
    pub max_fee: u64,
}

/// Inclusion time estimate for one tier, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitTime {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Fee-market recommendations for all tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMarketPrices {
    pub safe_low: FeeEstimate,
    pub standard: FeeEstimate,
    pub fast: FeeEstimate,
    pub fastest: FeeEstimate,
    /// Wait time estimates in tier order, when the provider reports them
    pub wait_times: Option<[WaitTime; 4]>,
    pub estimated_base_fee: Option<u64>,
}

impl FeeMarketPrices {
    /// Get the fee pair for a tier
    pub fn get(&self, tier: Tier) -> FeeEstimate {
        match tier {
            Tier::SafeLow => self.safe_low,
            Tier::Standard => self.standard,
            Tier::Fast => self.fast,
            Tier::Fastest => self.fastest,
        }
    }

    /// Get the wait time estimate for a tier
    pub fn wait_time(&self, tier: Tier) -> Option<WaitTime> {
        let index = Tier::all().iter().position(|t| *t == tier)?;
        self.wait_times.map(|times| times[index])
    }
}

/// Availability transitions and failures of a feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedEvent {
    /// First successful fetch, or first one after the feed expired
    Available {
        id: Uuid,
        source: String,
        timestamp: DateTime<Utc>,
    },

    /// Prices were requested before any fetch succeeded
    Unavailable {
        id: Uuid,
        source: String,
        timestamp: DateTime<Utc>,
    },

    /// Prices were requested after the expiry window elapsed
    Expired {
        id: Uuid,
        source: String,
        last_refresh: i64,
        timestamp: DateTime<Utc>,
    },

    /// A fetch cycle failed
    FetchFailed {
        id: Uuid,
        source: String,
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

impl FeedEvent {
    pub fn available(source: &str) -> Self {
        Self::Available {
            id: Uuid::new_v4(),
            source: source.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn unavailable(source: &str) -> Self {
        Self::Unavailable {
            id: Uuid::new_v4(),
            source: source.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn expired(source: &str, last_refresh: i64) -> Self {
        Self::Expired {
            id: Uuid::new_v4(),
            source: source.to_string(),
            last_refresh,
            timestamp: Utc::now(),
        }
    }

    pub fn fetch_failed(source: &str, error_message: impl Into<String>) -> Self {
        Self::FetchFailed {
            id: Uuid::new_v4(),
            source: source.to_string(),
            error_message: error_message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Get the event ID
    pub fn id(&self) -> Uuid {
        match self {
            FeedEvent::Available { id, .. }
            | FeedEvent::Unavailable { id, .. }
            | FeedEvent::Expired { id, .. }
            | FeedEvent::FetchFailed { id, .. } => *id,
        }
    }

    /// Get the event type as string
    pub fn event_type(&self) -> &'static str {
        match self {
            FeedEvent::Available { .. } => "AVAILABLE",
            FeedEvent::Unavailable { .. } => "UNAVAILABLE",
            FeedEvent::Expired { .. } => "EXPIRED",
            FeedEvent::FetchFailed { .. } => "FETCH_FAILED",
        }
    }
}

impl std::fmt::Display for FeedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedEvent::Available { source, .. } => {
                write!(f, "Gas prices from {} became available", source)
            }
            FeedEvent::Unavailable { source, .. } => {
                write!(f, "Gas prices from {} are unavailable", source)
            }
            FeedEvent::Expired { source, .. } => {
                write!(f, "Gas prices from {} have expired", source)
            }
            FeedEvent::FetchFailed {
                source,
                error_message,
                ..
            } => {
                write!(f, "Failed to fetch gas prices from {}: {}", source, error_message)
            }
        }
    }
}
