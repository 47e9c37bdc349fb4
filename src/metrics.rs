//! Fetch cycle metrics
//!
//! Tracks latency percentiles and success rates of one feed's fetch loop.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::RwLock;

/// Maximum number of samples to keep for percentile calculation
const MAX_SAMPLES: usize = 100;

/// Point-in-time metrics of one feed
#[derive(Debug, Clone, PartialEq)]
pub struct FetchMetrics {
    /// Name of the provider
    pub provider_name: String,
    /// 50th percentile latency of successful fetches in milliseconds
    pub latency_p50_ms: f64,
    /// 99th percentile latency of successful fetches in milliseconds
    pub latency_p99_ms: f64,
    /// Success rate (0.0 to 1.0) over the lifetime of the feed
    pub success_rate: f64,
    pub total_fetches: u64,
    pub failed_fetches: u64,
    /// Failures since the last successful fetch
    pub consecutive_failures: u64,
}

impl FetchMetrics {
    /// Creates metrics with no data
    pub fn empty(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            latency_p50_ms: 0.0,
            latency_p99_ms: 0.0,
            success_rate: 1.0,
            total_fetches: 0,
            failed_fetches: 0,
            consecutive_failures: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LatencySample {
    duration_ms: f64,
    success: bool,
}

#[derive(Debug, Default)]
struct Counters {
    samples: VecDeque<LatencySample>,
    total: u64,
    failed: u64,
    consecutive_failures: u64,
}

/// Collects fetch outcomes for a feed
pub struct MetricsCollector {
    provider_name: String,
    counters: RwLock<Counters>,
}

impl MetricsCollector {
    pub fn new(provider_name: &str) -> Self {
        Self {
            provider_name: provider_name.to_string(),
            counters: RwLock::new(Counters {
                samples: VecDeque::with_capacity(MAX_SAMPLES),
                ..Counters::default()
            }),
        }
    }

    /// Records one fetch cycle with its duration and outcome
    pub async fn record_fetch(&self, duration: Duration, success: bool) {
        let mut counters = self.counters.write().await;
        counters.total += 1;
        if success {
            counters.consecutive_failures = 0;
        } else {
            counters.failed += 1;
            counters.consecutive_failures += 1;
        }

        if counters.samples.len() >= MAX_SAMPLES {
            counters.samples.pop_front();
        }
        counters.samples.push_back(LatencySample {
            duration_ms: duration.as_secs_f64() * 1000.0,
            success,
        });
    }

    /// Computes current metrics from collected samples
    pub async fn snapshot(&self) -> FetchMetrics {
        let counters = self.counters.read().await;
        if counters.total == 0 {
            return FetchMetrics::empty(&self.provider_name);
        }

        let mut latencies: Vec<f64> = counters
            .samples
            .iter()
            .filter(|s| s.success)
            .map(|s| s.duration_ms)
            .collect();
        latencies.sort_by(|a, b| a.total_cmp(b));

        FetchMetrics {
            provider_name: self.provider_name.clone(),
            latency_p50_ms: percentile(&latencies, 50.0),
            latency_p99_ms: percentile(&latencies, 99.0),
            success_rate: (counters.total - counters.failed) as f64 / counters.total as f64,
            total_fetches: counters.total,
            failed_fetches: counters.failed,
            consecutive_failures: counters.consecutive_failures,
        }
    }
}

/// Calculate percentile from sorted values
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let idx = (p / 100.0 * (sorted_values.len() - 1) as f64).round() as usize;
    sorted_values[idx.min(sorted_values.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_collector() {
        let collector = MetricsCollector::new("test");

        collector.record_fetch(Duration::from_millis(100), true).await;
        collector.record_fetch(Duration::from_millis(200), true).await;
        collector.record_fetch(Duration::from_millis(150), false).await;

        let metrics = collector.snapshot().await;

        assert_eq!(metrics.provider_name, "test");
        assert_eq!(metrics.total_fetches, 3);
        assert_eq!(metrics.failed_fetches, 1);
        assert_eq!(metrics.consecutive_failures, 1);
        assert!(metrics.success_rate > 0.6 && metrics.success_rate < 0.7);
        assert_eq!(metrics.latency_p99_ms, 200.0);
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failures() {
        let collector = MetricsCollector::new("test");
        collector.record_fetch(Duration::from_millis(5), false).await;
        collector.record_fetch(Duration::from_millis(5), false).await;
        assert_eq!(collector.snapshot().await.consecutive_failures, 2);

        collector.record_fetch(Duration::from_millis(5), true).await;
        assert_eq!(collector.snapshot().await.consecutive_failures, 0);
    }

    #[tokio::test]
    async fn test_empty_metrics() {
        let collector = MetricsCollector::new("idle");
        assert_eq!(collector.snapshot().await, FetchMetrics::empty("idle"));
    }

    #[test]
    fn test_percentile() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(percentile(&values, 50.0), 5.0);
        assert_eq!(percentile(&values, 99.0), 9.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }
}
