use std::sync::atomic::Ordering;

use tokio::task::JoinHandle;

use crate::{
    metrics::METRICS,
    processor::DataProcessor,
    schema::{BondData, InterestRateData, MarketData},
    util,
};

/// Spawns all simulated feed tasks.
///
/// This function is responsible for:
/// - Launching one task per feed, eagerly
/// - Binding every task to the shared DataProcessor handle
/// - Handing the join handles back to the caller
///
/// DESIGN:
/// - One feed → one task → one delivered batch
/// - Feeds are fully independent of each other
/// - The caller owns the join barrier; nothing here blocks
///
/// This function does NOT:
/// - Wait for feed completion (driver responsibility)
/// - Consume collected records
///
pub fn spawn_feeds(processor: &DataProcessor, count: usize) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::with_capacity(count);

    for feed_id in 0..count {
        let processor = processor.clone();

        METRICS.feeds_spawned.fetch_add(1, Ordering::Relaxed);

        handles.push(tokio::spawn(run_feed(processor, feed_id)));
    }

    handles
}

/// Runs a single simulated feed to completion.
///
/// This task:
/// - Draws two values from the simulated market range
/// - Wraps them as one bond and one interest rate record
/// - Delivers both through a single batch insertion
///
/// GUARANTEES:
/// - Sampling happens before the sink lock is taken; the lock
///   scope is exactly the two insertions.
/// - Both records of a feed end up adjacent in the final
///   sequence, bond first.
///
/// NOT RESPONSIBLE FOR:
/// - Record formatting (schema responsibility)
/// - Consumption (processor responsibility)
///
async fn run_feed(processor: DataProcessor, feed_id: usize) {
    let bond_price = util::random_market_value();
    let interest_rate = util::random_market_value();

    METRICS.items_generated.fetch_add(2, Ordering::Relaxed);

    let batch = vec![
        MarketData::Bond(BondData { price: bond_price }),
        MarketData::InterestRate(InterestRateData { rate: interest_rate }),
    ];

    processor.add_batch(batch).await;

    log::debug!(
        "feed {} delivered bond={} rate={}",
        feed_id,
        bond_price,
        interest_rate
    );

    METRICS.feeds_completed.fetch_add(1, Ordering::Relaxed);
}
