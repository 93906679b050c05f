use serde::{Deserialize, Serialize};

/// Result of a completed benchmark, recorded when the hook requests a stop.
///
/// Kept in memory only; callers decide what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    /// Global step value at which benchmarking began.
    pub benchmark_global_step: u64,
    /// Number of measured steps.
    pub steps: u64,
    /// Examples per step.
    pub batch_size: f64,
    /// Wall-clock seconds between the end of warm-up and the final step.
    pub elapsed_secs: f64,
    /// `steps * batch_size / elapsed_secs`.
    pub examples_per_sec: f64,
}
