use std::sync::atomic::Ordering;

use log::{debug, warn};

use crate::error::HookResult;
use crate::hooks::hook::StepHook;
use crate::hooks::run_context::{RunContext, StepArgs, StepValues};
use crate::step::loop_context::LoopContext;
use crate::train::loop_config::LoopConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// How a `run_loop` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    /// Number of steps executed.
    pub iterations: u64,
    /// True when a hook asked the loop to stop.
    pub stop_requested: bool,
    /// Global step value after the last step, if the context has a counter.
    pub final_global_step: Option<u64>,
}

/// Drives `step_fn` through the hook lifecycle until something stops it.
///
/// # Arguments
/// - `ctx`     — execution context; its global step is what hooks observe
/// - `hooks`   — hooks, called in slice order at every lifecycle point
/// - `config`  — step cap, counter increment, optional stop flag
/// - `step_fn` — the work of one step; receives the 0-based iteration index
///
/// # Order of calls
/// `begin` on every hook, then per iteration `before_step` on every hook,
/// the global step is read, `step_fn` runs, the counter is advanced by
/// `config.step_increment`, and `after_step` runs on every hook with the
/// value read before the step. Finally `end` on every hook.
///
/// # Early termination
/// The loop ends after the current iteration if:
/// - any hook called `RunContext::request_stop`, **or**
/// - `config.stop_flag` is set to `true`, **or**
/// - `config.max_steps` iterations have run.
///
/// # Errors
/// A failing `begin` aborts before any other callback runs. Errors from
/// `step_fn`, `after_step` or `end` are returned as-is.
pub fn run_loop<F>(
    ctx: &LoopContext,
    hooks: &mut [&mut dyn StepHook],
    config: &LoopConfig,
    mut step_fn: F,
) -> HookResult<LoopOutcome>
where
    F: FnMut(u64) -> HookResult<()>,
{
    for hook in hooks.iter_mut() {
        hook.begin(ctx)?;
    }

    let mut iterations = 0;
    let mut stop_requested = false;

    loop {
        if config.max_steps.is_some_and(|max| iterations >= max) {
            debug!("reached max_steps after {iterations} iterations");
            break;
        }
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                debug!("stop flag set after {iterations} iterations");
                break;
            }
        }

        let args = hooks
            .iter_mut()
            .fold(StepArgs::none(), |args, hook| args.merge(hook.before_step()));
        let values = fetch(ctx, args);

        step_fn(iterations)?;
        iterations += 1;

        if config.step_increment != 0 {
            if let Some(global_step) = ctx.global_step() {
                global_step.advance(config.step_increment);
            }
        }

        let mut run = RunContext::new();
        for hook in hooks.iter_mut() {
            hook.after_step(&mut run, &values)?;
        }

        if run.stop_requested() {
            debug!("stop requested by a hook after {iterations} iterations");
            stop_requested = true;
            break;
        }
    }

    for hook in hooks.iter_mut() {
        hook.end(ctx)?;
    }

    Ok(LoopOutcome {
        iterations,
        stop_requested,
        final_global_step: ctx.global_step().map(|step| step.value()),
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Reads the values requested for the coming step.
fn fetch(ctx: &LoopContext, args: StepArgs) -> StepValues {
    if !args.global_step {
        return StepValues::default();
    }
    match ctx.global_step() {
        Some(step) => StepValues::with_global_step(step.value()),
        None => {
            warn!("a hook requested the global step but the loop context has none");
            StepValues::default()
        }
    }
}
