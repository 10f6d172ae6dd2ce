// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - schema:    Strongly typed market data record definitions
// - util:      Shared helper utilities (sampling, time)
// - processor: Shared sink owning the collected records
// - collector: Feed simulation runtime (spawning + delivery)
// - metrics:   Global runtime counters
//
mod schema;
mod util;
mod processor;
mod collector;
mod metrics;

// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use std::sync::atomic::Ordering;

use futures_util::future::join_all;

use collector::runner::spawn_feeds;
use metrics::METRICS;
use processor::DataProcessor;

/// Number of concurrently simulated feeds.
///
/// Each feed delivers exactly two records, so a full run
/// collects 2 x FEED_COUNT records.
const FEED_COUNT: usize = 5;

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// This is the main runtime for the simulated multi-feed collector.
//
// Responsibilities:
// - Initialize logging
// - Create the shared DataProcessor
// - Spawn all simulated feeds
// - Wait for every feed at the join barrier
// - Run the consumption pass exactly once
// - Report runtime metrics
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --------------------------------------------------------
    // Logging goes to stderr; standard output carries only the
    // processing lines of the consumption pass. The default
    // filter shows errors only; RUST_LOG opens it up.
    // --------------------------------------------------------
    env_logger::init();

    let started = util::now_ms();

    // --------------------------------------------------------
    // The DataProcessor is the single shared mutable resource.
    // Every feed gets a cloned handle to the same sink.
    // --------------------------------------------------------
    let processor = DataProcessor::new();

    log::info!("Starting {} simulated feeds", FEED_COUNT);

    let handles = spawn_feeds(&processor, FEED_COUNT);

    // --------------------------------------------------------
    // Join barrier
    //
    // The only synchronization point of the run: collection is
    // over once every feed task has completed. A panicked feed
    // surfaces here as a JoinError and aborts the run.
    // --------------------------------------------------------
    for joined in join_all(handles).await {
        joined?;
    }

    log::info!(
        "All feeds finished; {} records collected",
        processor.len().await
    );

    // --------------------------------------------------------
    // Consumption pass
    //
    // Runs exactly once, from this task only. The collection is
    // read-only from here on.
    // --------------------------------------------------------
    processor.process_all().await;

    // --------------------------------------------------------
    // Metrics summary (single line, low-noise)
    // --------------------------------------------------------
    log::info!(
        "[METRICS] feeds={} completed={} generated={} collected={} processed={} errors={} elapsed_ms={}",
        METRICS.feeds_spawned.load(Ordering::Relaxed),
        METRICS.feeds_completed.load(Ordering::Relaxed),
        METRICS.items_generated.load(Ordering::Relaxed),
        METRICS.items_collected.load(Ordering::Relaxed),
        METRICS.items_processed.load(Ordering::Relaxed),
        METRICS.process_errors.load(Ordering::Relaxed),
        util::now_ms() - started,
    );

    Ok(())
}
