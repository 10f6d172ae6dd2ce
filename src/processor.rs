use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::Mutex;

use crate::metrics::METRICS;
use crate::schema::MarketData;

/// ============================================================
/// DataProcessor
/// ============================================================
///
/// The **shared sink** every feed simulator delivers into.
///
/// Responsibilities:
/// - Own the collected records for the lifetime of the process
/// - Serialize all mutation through a single lock
/// - Keep each feed's delivery contiguous in the final sequence
/// - Run the consumption pass after collection has finished
///
/// Design constraints:
/// - Cloning the processor clones a handle, not the data;
///   all clones share one underlying sequence.
/// - Records only ever get appended during collection and are
///   never removed before the consumption pass.
///
/// This component is intentionally the only shared mutable state
/// in the program.
#[derive(Clone)]
pub struct DataProcessor {
    /// Ordered sequence of collected records.
    ///
    /// The mutex is the designated lock for every append;
    /// insertion order is lock-acquisition order across feeds.
    entries: Arc<Mutex<Vec<MarketData>>>,
}

impl DataProcessor {

    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends a whole batch under one lock acquisition.
    ///
    /// CONTRACT:
    /// - The lock is taken exactly once per call, so the items of
    ///   a batch end up adjacent in the final sequence no matter
    ///   how feeds interleave.
    /// - Items are appended in the order given.
    ///
    /// Each accepted record is echoed as JSON at debug level,
    /// mirroring what a downstream consumer would receive.
    pub async fn add_batch(&self, batch: Vec<MarketData>) {
        let mut entries = self.entries.lock().await;

        for item in batch {
            if log::log_enabled!(log::Level::Debug) {
                if let Ok(json) = serde_json::to_string(&item) {
                    log::debug!("collected {}", json);
                }
            }

            entries.push(item);
            METRICS.items_collected.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of records collected so far.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Returns a copy of the collected sequence.
    #[allow(dead_code)]
    pub async fn snapshot(&self) -> Vec<MarketData> {
        self.entries.lock().await.clone()
    }

    /// Runs the consumption pass against standard output.
    ///
    /// CONTRACT:
    /// - Must only run after all feeds have been joined;
    ///   collection must be over (caller-enforced).
    /// - Does not mutate the sequence; calling it twice writes
    ///   the same lines twice.
    pub async fn process_all(&self) {
        let entries = self.entries.lock().await;
        process_entries(&entries, &mut io::stdout().lock());
    }

    /// Consumption pass against an arbitrary writer.
    #[allow(dead_code)]
    pub async fn process_all_to<W: Write>(&self, out: &mut W) {
        let entries = self.entries.lock().await;
        process_entries(&entries, out);
    }
}

/// Processes every record in insertion order.
///
/// FAILURE HANDLING:
/// - A record whose processing fails is logged to the error
///   stream and skipped; the remaining records still run.
/// - No per-record failure aborts the batch.
fn process_entries<W: Write>(entries: &[MarketData], out: &mut W) {
    for item in entries {
        match item.process(out) {
            Ok(()) => {
                METRICS.items_processed.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log::error!("Error while processing {} market data: {}", item.kind(), e);
                METRICS.process_errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BondData, InterestRateData};

    fn bond(price: f64) -> MarketData {
        MarketData::Bond(BondData { price })
    }

    fn rate(rate: f64) -> MarketData {
        MarketData::InterestRate(InterestRateData { rate })
    }

    /// Writer that fails its first `failures_left` write calls and
    /// behaves like a normal buffer afterwards.
    struct FailingWriter {
        out: Vec<u8>,
        failures_left: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink failure"));
            }
            self.out.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn batches_append_in_insertion_order() {
        let processor = DataProcessor::new();
        processor.add_batch(vec![bond(1.0), rate(2.0)]).await;
        processor.add_batch(vec![bond(3.0)]).await;

        assert_eq!(processor.len().await, 3);

        let entries = processor.snapshot().await;
        assert!(matches!(&entries[0], MarketData::Bond(b) if b.price == 1.0));
        assert!(matches!(&entries[1], MarketData::InterestRate(r) if r.rate == 2.0));
        assert!(matches!(&entries[2], MarketData::Bond(b) if b.price == 3.0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_batches_stay_contiguous() {
        let processor = DataProcessor::new();

        let mut handles = Vec::new();
        for id in 0..8 {
            let processor = processor.clone();
            handles.push(tokio::spawn(async move {
                let value = id as f64;
                processor.add_batch(vec![bond(value), rate(value)]).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = processor.snapshot().await;
        assert_eq!(entries.len(), 16);

        // Batches may interleave in any order across tasks, but each
        // task's pair must be adjacent and keep its internal order.
        for pair in entries.chunks(2) {
            match (&pair[0], &pair[1]) {
                (MarketData::Bond(b), MarketData::InterestRate(r)) => {
                    assert_eq!(b.price, r.rate);
                }
                other => panic!("split batch: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn processing_preserves_insertion_order() {
        let processor = DataProcessor::new();
        processor.add_batch(vec![bond(10.0), rate(0.5)]).await;

        let mut out = Vec::new();
        processor.process_all_to(&mut out).await;

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Processing Bond Market Data: Price = 10\n\
             Processing Interest Rate Market Data: Rate = 0.5\n"
        );
    }

    #[tokio::test]
    async fn processing_twice_repeats_identical_output() {
        let processor = DataProcessor::new();
        processor.add_batch(vec![bond(7.25), rate(3.5)]).await;

        let mut first = Vec::new();
        processor.process_all_to(&mut first).await;
        let mut second = Vec::new();
        processor.process_all_to(&mut second).await;

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_collector_writes_nothing() {
        let processor = DataProcessor::new();

        let mut out = Vec::new();
        processor.process_all_to(&mut out).await;

        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn write_failure_skips_record_and_continues() {
        let processor = DataProcessor::new();
        processor
            .add_batch(vec![bond(1.0), rate(2.0), bond(3.0)])
            .await;

        // First write call fails, so the first record is dropped;
        // the remaining two must still be processed.
        let mut writer = FailingWriter {
            out: Vec::new(),
            failures_left: 1,
        };
        processor.process_all_to(&mut writer).await;

        assert_eq!(
            String::from_utf8(writer.out).unwrap(),
            "Processing Interest Rate Market Data: Rate = 2\n\
             Processing Bond Market Data: Price = 3\n"
        );
    }
}
