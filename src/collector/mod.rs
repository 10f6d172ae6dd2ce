/// Collector module
///
/// This module groups all logic responsible for:
/// - Spawning the simulated feed tasks
/// - Generating records per feed
/// - Delivering records into the shared DataProcessor
///
/// The collector layer acts as the orchestration layer between:
/// - The record schema (what a feed produces)
/// - The DataProcessor (shared sink / consumption layer)
///
/// Design notes:
/// - Record formatting MUST NOT live here
/// - This module should remain thin and orchestration-focused
/// - Sampling and sink logic belong to util / processor
pub mod runner;
