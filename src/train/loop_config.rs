use std::sync::{Arc, atomic::AtomicBool};

/// Configuration for a `run_loop` run.
///
/// # Fields
/// - `max_steps`      — optional cap on iterations; `None` runs until a hook
///                      requests a stop or the stop flag is set
/// - `step_increment` — amount the driver advances the global step after each
///                      step; `0` leaves advancing to the step function
/// - `stop_flag`      — optional atomic flag; when set to `true` from another
///                      thread the loop ends before the next iteration
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub max_steps: Option<u64>,
    pub step_increment: u64,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl LoopConfig {
    /// Creates an uncapped `LoopConfig` that advances the global step by one
    /// per iteration, with no stop flag.
    pub fn new() -> Self {
        LoopConfig {
            max_steps: None,
            step_increment: 1,
            stop_flag: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_step_increment(mut self, step_increment: u64) -> Self {
        self.step_increment = step_increment;
        self
    }

    pub fn with_stop_flag(mut self, stop_flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig::new()
    }
}
