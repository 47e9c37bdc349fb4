//! In-memory gas price store with read-time expiry

use crate::{clock::Clock, constants::EVENT_CHANNEL_CAPACITY, types::FeedEvent};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;

/// `last_refresh` value meaning no fetch has succeeded yet
const NEVER_REFRESHED: i64 = 0;

/// Marks that the "unavailable" notification was already emitted
const UNAVAILABLE_REPORTED: i64 = 1;

struct FeedState<T> {
    prices: Option<T>,
    /// Unix seconds of the last successful fetch
    last_refresh: i64,
    /// Last staleness classification, only used for transition notifications
    expired: bool,
}

/// Latest prices of one feed, tagged with the time they were fetched
///
/// Written by the fetch loop through [`update`](Self::update); read by anyone.
/// Reads classify staleness against the clock on every call, so a stored
/// snapshot older than `expiry` is reported as `None` without being dropped.
pub struct GasPriceStore<T> {
    source: String,
    expiry_secs: i64,
    clock: Arc<dyn Clock>,
    state: Mutex<FeedState<T>>,
    events: broadcast::Sender<FeedEvent>,
}

impl<T: Clone> GasPriceStore<T> {
    /// Creates an empty store
    ///
    /// # Arguments
    /// * `source` - Identifier used in notifications, normally the request URL
    /// * `expiry` - Maximum age of prices still handed out to readers
    /// * `clock` - Wall-clock source
    pub fn new(source: impl Into<String>, expiry: Duration, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source: source.into(),
            expiry_secs: i64::try_from(expiry.as_secs()).unwrap_or(i64::MAX),
            clock,
            state: Mutex::new(FeedState {
                prices: None,
                last_refresh: NEVER_REFRESHED,
                expired: true,
            }),
            events,
        }
    }

    fn state(&self) -> MutexGuard<'_, FeedState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the stored prices and marks them as fetched now
    pub fn update(&self, prices: T) {
        let now = self.clock.now_secs();
        let was_expired = {
            let mut state = self.state();
            state.prices = Some(prices);
            state.last_refresh = state.last_refresh.max(now);
            std::mem::replace(&mut state.expired, false)
        };

        if was_expired {
            tracing::info!(source = %self.source, "Current gas prices became available");
            self.publish(FeedEvent::available(&self.source));
        }
    }

    /// Applies `f` to the stored prices if they are still fresh
    ///
    /// Returns `None` before the first successful fetch and once more than
    /// `expiry` seconds have passed since the last one.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let now = self.clock.now_secs();
        let (unavailable, expired_since) = {
            let mut state = self.state();
            if now.saturating_sub(state.last_refresh) <= self.expiry_secs {
                return state.prices.as_ref().map(f);
            }

            let unavailable = state.last_refresh == NEVER_REFRESHED;
            if unavailable {
                state.last_refresh = UNAVAILABLE_REPORTED;
            }
            let newly_expired = !std::mem::replace(&mut state.expired, true);
            (unavailable, newly_expired.then_some(state.last_refresh))
        };

        if unavailable {
            tracing::warn!(source = %self.source, "Current gas prices are unavailable");
            self.publish(FeedEvent::unavailable(&self.source));
        }
        if let Some(last_refresh) = expired_since {
            tracing::warn!(
                source = %self.source,
                last_refresh,
                "Current gas prices have expired"
            );
            self.publish(FeedEvent::expired(&self.source, last_refresh));
        }

        None
    }

    /// Gets a copy of the whole snapshot if it is still fresh
    pub fn snapshot(&self) -> Option<T> {
        self.read(T::clone)
    }

    /// Checks freshness without emitting notifications
    pub fn is_fresh(&self) -> bool {
        let now = self.clock.now_secs();
        let state = self.state();
        state.prices.is_some() && now.saturating_sub(state.last_refresh) <= self.expiry_secs
    }

    /// Unix seconds of the last successful fetch, `0` if none
    ///
    /// A value of `1` means no fetch succeeded but a reader was already told so.
    pub fn last_refresh(&self) -> i64 {
        self.state().last_refresh
    }

    /// Last staleness classification made by a read or write
    pub fn is_expired(&self) -> bool {
        self.state().expired
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.expiry_secs as u64)
    }

    /// Subscribes to availability transitions and fetch failures
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.events.subscribe()
    }

    pub(crate) fn publish(&self, event: FeedEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
