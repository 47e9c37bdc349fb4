//! Background-refreshed gas price feed
//!
//! A [`GasPriceTracker`] owns one provider, one store and one background task
//! that refetches prices every `refresh_interval`. Reads never wait on the
//! network; they only classify the last stored snapshot as fresh or expired.

use crate::{
    clock::{Clock, SystemClock},
    config::FeedConfig,
    error::{ConfigError, FeedError, ProviderError},
    metrics::{FetchMetrics, MetricsCollector},
    provider::GasPriceProvider,
    store::GasPriceStore,
    transport::{HttpTransport, Transport},
    types::{FeeEstimate, FeeMarketPrices, FeedEvent, Tier, TierPrices, WaitTime},
};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Gas price feed for a single upstream provider
///
/// # Example
/// ```no_run
/// use gasprice_client::{providers::EtherchainOrg, FeedConfig, GasPriceTracker};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = GasPriceTracker::spawn(EtherchainOrg::new()?, FeedConfig::new(10, 600)?)?;
///
/// if let Some(fast) = tracker.fast_price() {
///     println!("fast: {} wei", fast);
/// }
/// tracker.shutdown().await;
/// # Ok(())
/// # }
/// ```
pub struct GasPriceTracker<P: GasPriceProvider> {
    provider: Arc<P>,
    store: Arc<GasPriceStore<P::Prices>>,
    transport: Arc<dyn Transport>,
    metrics: Arc<MetricsCollector>,
    config: FeedConfig,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<P: GasPriceProvider> GasPriceTracker<P> {
    /// Creates a tracker backed by HTTP and the system clock without starting it
    pub fn new(provider: P, config: FeedConfig) -> Result<Self, FeedError> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(config.request_timeout)?);
        Ok(Self::with_transport(
            provider,
            transport,
            config,
            Arc::new(SystemClock),
        )?)
    }

    /// Creates a tracker and starts its background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(provider: P, config: FeedConfig) -> Result<Self, FeedError> {
        let tracker = Self::new(provider, config)?;
        tracker.start();
        Ok(tracker)
    }

    /// Creates a tracker with a custom transport and clock
    ///
    /// This is primarily for testing.
    pub fn with_transport(
        provider: P,
        transport: Arc<dyn Transport>,
        config: FeedConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = Arc::new(GasPriceStore::new(
            provider.url().as_str(),
            config.expiry,
            clock,
        ));
        let metrics = Arc::new(MetricsCollector::new(provider.provider_name()));

        Ok(Self {
            provider: Arc::new(provider),
            store,
            transport,
            metrics,
            config,
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        })
    }

    /// Starts the background polling task
    ///
    /// Calling this more than once has no effect.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.is_some() || self.cancel.is_cancelled() {
            return;
        }

        let provider = self.provider.clone();
        let transport = self.transport.clone();
        let store = self.store.clone();
        let metrics = self.metrics.clone();
        let interval = self.config.refresh_interval;
        let cancel = self.cancel.clone();

        *task = Some(tokio::spawn(async move {
            tracing::info!(
                source = %provider.url(),
                provider = provider.provider_name(),
                refresh_interval_secs = interval.as_secs(),
                "Starting gas price background task"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = Self::fetch_and_update(&provider, transport.as_ref(), &store, &metrics) => {}
                }

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = sleep(interval) => {}
                }
            }

            tracing::info!(source = %provider.url(), "Gas price background task stopped");
        }));
    }

    /// Runs one fetch cycle, updating the store on success
    ///
    /// Failures are logged, counted and published; the store is left as is.
    async fn fetch_and_update(
        provider: &P,
        transport: &dyn Transport,
        store: &GasPriceStore<P::Prices>,
        metrics: &MetricsCollector,
    ) -> Result<(), ProviderError> {
        let start = Instant::now();

        match Self::fetch(provider, transport).await {
            Ok(prices) => {
                store.update(prices);
                metrics.record_fetch(start.elapsed(), true).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    source = %provider.url(),
                    error = %e,
                    "Failed to fetch current gas prices"
                );
                store.publish(FeedEvent::fetch_failed(store.source(), e.to_string()));
                metrics.record_fetch(start.elapsed(), false).await;
                Err(e)
            }
        }
    }

    async fn fetch(provider: &P, transport: &dyn Transport) -> Result<P::Prices, ProviderError> {
        let payload = transport.get_json(provider.url()).await?;
        // A panicking parser must not take the polling task down with it
        let prices = panic::catch_unwind(AssertUnwindSafe(|| provider.parse(&payload)))
            .map_err(|cause| ProviderError::ParserPanic(panic_message(cause.as_ref())))??;
        tracing::debug!(
            source = %provider.url(),
            %payload,
            "Fetched current gas prices"
        );
        Ok(prices)
    }

    /// Forces an immediate fetch, bypassing the polling interval
    pub async fn refresh_now(&self) -> Result<(), ProviderError> {
        Self::fetch_and_update(
            &self.provider,
            self.transport.as_ref(),
            &self.store,
            &self.metrics,
        )
        .await
    }

    /// Stops the background task and waits for it to finish
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let handle = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Gas price background task ended abnormally");
            }
        }
    }

    /// Returns true while the background task is running
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Gets a copy of the whole snapshot if it has not expired
    pub fn snapshot(&self) -> Option<P::Prices> {
        self.store.snapshot()
    }

    /// Checks freshness without emitting notifications
    pub fn is_fresh(&self) -> bool {
        self.store.is_fresh()
    }

    /// Unix seconds of the last successful fetch, `0` if none
    pub fn last_refresh(&self) -> i64 {
        self.store.last_refresh()
    }

    pub fn is_expired(&self) -> bool {
        self.store.is_expired()
    }

    /// Subscribes to availability transitions and fetch failures
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.store.subscribe()
    }

    /// Returns the fully-qualified request URL
    pub fn source(&self) -> &str {
        self.store.source()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Gets fetch latency and success metrics
    pub async fn fetch_metrics(&self) -> FetchMetrics {
        self.metrics.snapshot().await
    }
}

impl<P: GasPriceProvider<Prices = TierPrices>> GasPriceTracker<P> {
    /// Current price for a tier in Wei, `None` if unavailable or expired
    pub fn price(&self, tier: Tier) -> Option<u64> {
        self.store.read(|p| p.get(tier))
    }

    /// Current 'SafeLow (<30m)' gas price in Wei
    pub fn safe_low_price(&self) -> Option<u64> {
        self.price(Tier::SafeLow)
    }

    /// Current 'Standard (<5m)' gas price in Wei
    pub fn standard_price(&self) -> Option<u64> {
        self.price(Tier::Standard)
    }

    /// Current 'Fast (<2m)' gas price in Wei
    pub fn fast_price(&self) -> Option<u64> {
        self.price(Tier::Fast)
    }

    /// Current fastest gas price in Wei
    pub fn fastest_price(&self) -> Option<u64> {
        self.price(Tier::Fastest)
    }

    /// Base fee suggestion in Wei, for providers that report one
    pub fn suggested_base_fee(&self) -> Option<u64> {
        self.store.read(|p| p.suggested_base_fee).flatten()
    }
}

impl<P: GasPriceProvider<Prices = FeeMarketPrices>> GasPriceTracker<P> {
    /// Current fee pair for a tier, `None` if unavailable or expired
    pub fn fee(&self, tier: Tier) -> Option<FeeEstimate> {
        self.store.read(|p| p.get(tier))
    }

    pub fn safe_low_max_priority_fee(&self) -> Option<u64> {
        self.fee(Tier::SafeLow).map(|f| f.max_priority_fee)
    }

    pub fn standard_max_priority_fee(&self) -> Option<u64> {
        self.fee(Tier::Standard).map(|f| f.max_priority_fee)
    }

    pub fn fast_max_priority_fee(&self) -> Option<u64> {
        self.fee(Tier::Fast).map(|f| f.max_priority_fee)
    }

    pub fn fastest_max_priority_fee(&self) -> Option<u64> {
        self.fee(Tier::Fastest).map(|f| f.max_priority_fee)
    }

    pub fn safe_low_max_fee(&self) -> Option<u64> {
        self.fee(Tier::SafeLow).map(|f| f.max_fee)
    }

    pub fn standard_max_fee(&self) -> Option<u64> {
        self.fee(Tier::Standard).map(|f| f.max_fee)
    }

    pub fn fast_max_fee(&self) -> Option<u64> {
        self.fee(Tier::Fast).map(|f| f.max_fee)
    }

    pub fn fastest_max_fee(&self) -> Option<u64> {
        self.fee(Tier::Fastest).map(|f| f.max_fee)
    }

    /// Inclusion time estimate for a tier, when the provider reports one
    pub fn wait_time(&self, tier: Tier) -> Option<WaitTime> {
        self.store.read(|p| p.wait_time(tier)).flatten()
    }

    pub fn estimated_base_fee(&self) -> Option<u64> {
        self.store.read(|p| p.estimated_base_fee).flatten()
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    cause
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl<P: GasPriceProvider> Drop for GasPriceTracker<P> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
