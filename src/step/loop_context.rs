use crate::step::global_step::GlobalStep;

/// Execution context a loop runs in.
///
/// Carries the optional global step counter hooks bind to in `begin`. A
/// context built with `new()` has no counter; hooks that need one must fail
/// their `begin`.
#[derive(Debug, Clone, Default)]
pub struct LoopContext {
    global_step: Option<GlobalStep>,
}

impl LoopContext {
    /// Creates a context with no global step.
    pub fn new() -> LoopContext {
        LoopContext::default()
    }

    /// Creates a context around an existing counter.
    pub fn with_global_step(global_step: GlobalStep) -> LoopContext {
        LoopContext { global_step: Some(global_step) }
    }

    /// Returns the context's counter, creating one at 0 if none exists yet.
    pub fn create_global_step(&mut self) -> GlobalStep {
        self.global_step.get_or_insert_with(GlobalStep::default).clone()
    }

    pub fn global_step(&self) -> Option<&GlobalStep> {
        self.global_step.as_ref()
    }
}
