use serde::{Deserialize, Serialize};

use crate::error::HookResult;

/// Construction parameters for a `BenchmarkHook`.
///
/// # Fields
/// - `steps`        — steps to measure after warm-up before requesting a stop
/// - `warmup_steps` — initial steps excluded from measurement
/// - `log_steps`    — interval between interim speed lines; `0` disables them
/// - `batch_size`   — examples processed per step
///
/// Fields missing from a JSON file take their `Default` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub steps: u64,
    pub warmup_steps: u64,
    pub log_steps: u64,
    pub batch_size: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig { steps: 100, warmup_steps: 10, log_steps: 10, batch_size: 32.0 }
    }
}

impl BenchmarkConfig {
    pub fn new(steps: u64, warmup_steps: u64, log_steps: u64, batch_size: f64) -> Self {
        BenchmarkConfig { steps, warmup_steps, log_steps, batch_size }
    }

    /// Upper bound on the loop iterations a hook built from this config needs
    /// to request its stop, when the counter advances by one per step.
    ///
    /// The first step only starts the warm-up, so measuring begins no earlier
    /// than the second. The hook stops on an exact step match only; drivers
    /// pass this as `LoopConfig::max_steps` so a missed match cannot hang them.
    pub fn max_loop_steps(&self) -> u64 {
        self.warmup_steps.max(1).saturating_add(self.steps).saturating_add(1)
    }

    /// Deserializes a `BenchmarkConfig` from a JSON file.
    pub fn load_json(path: &str) -> HookResult<BenchmarkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
