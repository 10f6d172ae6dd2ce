/// Utility helpers shared by the feed simulators and the driver.
///
/// This module contains:
/// - The simulated value range and its sampler
/// - Time helpers
///
/// IMPORTANT:
/// - No record-kind-specific logic should live here.
/// - This module must remain lightweight.
///

use std::time::{SystemTime, UNIX_EPOCH};

use rand::random_range;

/// Lower bound of the simulated value range (inclusive).
pub const VALUE_MIN: f64 = 1.0;

/// Upper bound of the simulated value range (inclusive).
pub const VALUE_MAX: f64 = 100.0;

/// Draws one simulated market value uniformly from
/// [`VALUE_MIN`, `VALUE_MAX`].
///
/// DESIGN NOTES:
/// - Uses the thread-local generator, seeded from OS entropy;
///   feeds never share generator state, so no synchronization
///   is needed around sampling.
/// - Values are accepted as-is downstream; no rounding or
///   validation happens here.
///
pub fn random_market_value() -> f64 {
    random_range(VALUE_MIN..=VALUE_MAX)
}

/// Returns the current Unix timestamp in milliseconds.
///
/// Used for the run-duration figure in the metrics summary.
///
/// PANIC:
/// - Panics if system time is before UNIX_EPOCH (should never happen).
///
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before UNIX_EPOCH")
        .as_millis() as i64
}
