use crate::error::HookResult;
use crate::hooks::run_context::{RunContext, StepArgs, StepValues};
use crate::step::loop_context::LoopContext;

/// Lifecycle callbacks invoked by a step-driven loop.
///
/// The driver calls them in the fixed order
/// `begin → (before_step → step → after_step)* → end`, on a single thread.
/// Every method has a no-op default so a hook only implements what it uses.
pub trait StepHook {
    /// Called once before the first step. An error aborts the loop before
    /// any step runs.
    fn begin(&mut self, _ctx: &LoopContext) -> HookResult<()> {
        Ok(())
    }

    /// Declares which values the driver must fetch for the coming step.
    fn before_step(&mut self) -> StepArgs {
        StepArgs::none()
    }

    /// Called after each step with the values requested in `before_step`.
    fn after_step(&mut self, _run: &mut RunContext, _values: &StepValues) -> HookResult<()> {
        Ok(())
    }

    /// Called once after the last step.
    fn end(&mut self, _ctx: &LoopContext) -> HookResult<()> {
        Ok(())
    }
}
