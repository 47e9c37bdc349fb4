use gasprice_client::{providers::Etherscan, FeedConfig, GasPriceTracker};
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the feed; ETHERSCAN_API_KEY is optional but avoids rate limiting
    let api_key = std::env::var("ETHERSCAN_API_KEY").ok();
    let provider = Etherscan::new(api_key.as_deref())?;
    let tracker = GasPriceTracker::new(provider, FeedConfig::from_env()?)?;

    println!(
        "Polling {} every {}s",
        tracker.provider_name(),
        tracker.config().refresh_interval.as_secs()
    );
    println!("-------------------------------------------");

    // 2. Measure one fetch directly, then hand over to the background task
    let start = Instant::now();
    if let Err(e) = tracker.refresh_now().await {
        eprintln!("   Warning: initial fetch failed: {}", e);
    }
    println!("Initial fetch took {:?}", start.elapsed());
    tracker.start();

    // 3. Print a few readings; None means "do not act on this value now"
    for _ in 0..5 {
        match (tracker.safe_low_price(), tracker.standard_price(), tracker.fast_price()) {
            (Some(safe_low), Some(standard), Some(fast)) => println!(
                "safe low: {} wei | standard: {} wei | fast: {} wei | base fee: {:?}",
                safe_low,
                standard,
                fast,
                tracker.suggested_base_fee()
            ),
            _ => println!("gas prices currently unavailable"),
        }
        tokio::time::sleep(Duration::from_secs(3)).await;
    }

    let metrics = tracker.fetch_metrics().await;
    println!("-------------------------------------------");
    println!(
        "fetches: {} (failed: {}), p50 latency: {:.1} ms",
        metrics.total_fetches, metrics.failed_fetches, metrics.latency_p50_ms
    );

    tracker.shutdown().await;
    Ok(())
}
