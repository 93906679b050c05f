/// Per-iteration handle a hook uses to talk back to the loop driver.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    stop_requested: bool,
}

impl RunContext {
    pub fn new() -> RunContext {
        RunContext::default()
    }

    /// Asks the driver to stop after the current iteration.
    ///
    /// Advisory: the driver decides when the loop actually ends. Calling it
    /// more than once has no further effect.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}

/// Values a hook asks the driver to fetch for the upcoming step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepArgs {
    pub global_step: bool,
}

impl StepArgs {
    /// Requests nothing.
    pub fn none() -> StepArgs {
        StepArgs::default()
    }

    /// Requests the global step counter value.
    pub fn global_step() -> StepArgs {
        StepArgs { global_step: true }
    }

    /// Union of two requests.
    pub fn merge(self, other: StepArgs) -> StepArgs {
        StepArgs { global_step: self.global_step || other.global_step }
    }
}

/// Values fetched by the driver for a completed step.
///
/// A field is `None` when no hook requested it or the context could not
/// provide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepValues {
    pub global_step: Option<u64>,
}

impl StepValues {
    pub fn with_global_step(value: u64) -> StepValues {
        StepValues { global_step: Some(value) }
    }
}
