use std::sync::atomic::{AtomicUsize};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global runtime metrics for the collector.
///
/// Purpose:
/// - Track feed lifecycle (spawned / completed)
/// - Track throughput (generated / collected / processed records)
/// - Track consumption failures
///
/// Design:
/// - Lock-free (Atomics)
/// - Cheap to update
/// - Safe in async + multithreaded contexts
#[derive(Default)]
pub struct RuntimeMetrics {
    // Feed lifecycle
    pub feeds_spawned: AtomicUsize,
    pub feeds_completed: AtomicUsize,

    // Throughput
    pub items_generated: AtomicUsize,
    pub items_collected: AtomicUsize,
    pub items_processed: AtomicUsize,

    pub process_errors: AtomicUsize,
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
