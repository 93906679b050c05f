use std::io::Write;
use std::time::Duration;

use log::{debug, info};

use crate::bench::bench_config::BenchmarkConfig;
use crate::bench::summary::BenchmarkSummary;
use crate::clock::{Clock, SystemClock};
use crate::error::{HookError, HookResult};
use crate::hooks::hook::StepHook;
use crate::hooks::run_context::{RunContext, StepArgs, StepValues};
use crate::step::global_step::GlobalStep;
use crate::step::loop_context::LoopContext;

const RULE_WIDTH: usize = 64;

/// Where a `BenchmarkHook` is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No step has been observed yet.
    NotStarted,
    /// Steps are being observed but not measured.
    WarmingUp,
    /// Steps are being measured.
    Benchmarking,
}

/// Measures steady-state throughput of a step loop and stops it after a
/// fixed number of measured steps.
///
/// The first observed global step starts a warm-up of `warmup_steps` steps.
/// Once the counter reaches `start + warmup_steps` the hook starts its
/// timers; from then on it prints an interim speed every `log_steps` steps
/// (if non-zero) and, when exactly `steps` steps have elapsed, prints the
/// total speed and requests a stop.
///
/// The stop check is an exact match on the elapsed step count: a counter
/// that jumps past the target is never stopped by this hook.
pub struct BenchmarkHook {
    steps: u64,
    warmup_steps: u64,
    log_steps: u64,
    batch_size: f64,

    global_step: Option<GlobalStep>,
    start_global_step: Option<u64>,
    benchmark_global_step: Option<u64>,
    start_time: Option<Duration>,
    last_time: Option<Duration>,
    benchmarking: bool,

    summary: Option<BenchmarkSummary>,
    out: Box<dyn Write>,
    clock: Box<dyn Clock>,
}

impl BenchmarkHook {
    /// Creates a hook that prints to stdout and reads the system clock.
    ///
    /// # Arguments
    /// - `steps`        — measured steps before requesting a stop
    /// - `warmup_steps` — steps skipped before measuring
    /// - `log_steps`    — interim reporting interval; `0` disables it
    /// - `batch_size`   — examples per step
    pub fn new(steps: u64, warmup_steps: u64, log_steps: u64, batch_size: f64) -> BenchmarkHook {
        BenchmarkHook {
            steps,
            warmup_steps,
            log_steps,
            batch_size,
            global_step: None,
            start_global_step: None,
            benchmark_global_step: None,
            start_time: None,
            last_time: None,
            benchmarking: false,
            summary: None,
            out: Box::new(std::io::stdout()),
            clock: Box::new(SystemClock::new()),
        }
    }

    pub fn from_config(config: &BenchmarkConfig) -> BenchmarkHook {
        BenchmarkHook::new(config.steps, config.warmup_steps, config.log_steps, config.batch_size)
    }

    /// Redirects the hook's report lines.
    pub fn with_writer(mut self, out: impl Write + 'static) -> BenchmarkHook {
        self.out = Box::new(out);
        self
    }

    /// Replaces the time source used for speed measurements.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> BenchmarkHook {
        self.clock = Box::new(clock);
        self
    }

    pub fn phase(&self) -> Phase {
        match (self.start_global_step, self.benchmarking) {
            (None, _)        => Phase::NotStarted,
            (Some(_), false) => Phase::WarmingUp,
            (Some(_), true)  => Phase::Benchmarking,
        }
    }

    /// Counter handle bound in `begin`, if any.
    pub fn global_step(&self) -> Option<&GlobalStep> {
        self.global_step.as_ref()
    }

    /// Global step at which measuring starts; known after the first step.
    pub fn benchmark_global_step(&self) -> Option<u64> {
        self.benchmark_global_step
    }

    /// Final measurement, available once the hook has requested a stop.
    pub fn summary(&self) -> Option<&BenchmarkSummary> {
        self.summary.as_ref()
    }

    // -----------------------------------------------------------------------
    // Phase handlers
    // -----------------------------------------------------------------------

    fn start_warmup(&mut self, current: u64) -> HookResult<()> {
        let benchmark_step = current.saturating_add(self.warmup_steps);
        self.start_global_step = Some(current);
        self.benchmark_global_step = Some(benchmark_step);
        debug!("warm-up started at global step {current}, measuring from {benchmark_step}");

        writeln!(self.out, "B Starting warm up")?;
        writeln!(self.out, "batch_size = {}", self.batch_size)?;
        Ok(())
    }

    fn finish_warmup(&mut self, current: u64) -> HookResult<()> {
        writeln!(self.out, "B Done warm up")?;
        if self.log_steps != 0 {
            writeln!(self.out, "B Step\tsentence_translations/sec")?;
        }

        let now = self.clock.now();
        self.start_time = Some(now);
        self.last_time = Some(now);
        self.benchmarking = true;
        debug!("warm-up done at global step {current}");
        Ok(())
    }

    fn measure(&mut self, run: &mut RunContext, elapsed_steps: u64, benchmark_step: u64) -> HookResult<()> {
        let now = self.clock.now();

        if self.log_steps != 0 && elapsed_steps % self.log_steps == 0 {
            let since_last = since(now, self.last_time);
            let speed = self.log_steps as f64 * self.batch_size / since_last;
            self.last_time = Some(now);
            writeln!(self.out, "B {}\t{:.2}", elapsed_steps, speed)?;
        }

        if elapsed_steps == self.steps {
            let elapsed_secs = since(now, self.start_time);
            let speed = self.steps as f64 * self.batch_size / elapsed_secs;
            let rule = "-".repeat(RULE_WIDTH);
            writeln!(self.out, "{rule}")?;
            writeln!(self.out, "B total sentence_translations/sec: {:.2}", speed)?;
            writeln!(self.out, "{rule}")?;
            self.out.flush()?;

            self.summary = Some(BenchmarkSummary {
                benchmark_global_step: benchmark_step,
                steps: self.steps,
                batch_size: self.batch_size,
                elapsed_secs,
                examples_per_sec: speed,
            });
            info!("benchmark finished after {} steps: {speed:.2} examples/sec", self.steps);
            run.request_stop();
        }
        Ok(())
    }
}

/// Seconds between an anchor and `now`; a missing anchor counts as `now`.
fn since(now: Duration, anchor: Option<Duration>) -> f64 {
    now.saturating_sub(anchor.unwrap_or(now)).as_secs_f64()
}

impl StepHook for BenchmarkHook {
    fn begin(&mut self, ctx: &LoopContext) -> HookResult<()> {
        let global_step = ctx.global_step().ok_or_else(|| {
            HookError::Configuration("Global step must be created to use BenchmarkHook.".to_string())
        })?;
        self.global_step = Some(global_step.clone());
        Ok(())
    }

    fn before_step(&mut self) -> StepArgs {
        StepArgs::global_step()
    }

    fn after_step(&mut self, run: &mut RunContext, values: &StepValues) -> HookResult<()> {
        let current = values.global_step.ok_or(HookError::MissingFetch("global_step"))?;

        let benchmark_step = match self.benchmark_global_step {
            None => return self.start_warmup(current),
            Some(step) => step,
        };

        if current < benchmark_step {
            return Ok(());
        }

        if !self.benchmarking {
            self.finish_warmup(current)
        } else {
            self.measure(run, current - benchmark_step, benchmark_step)
        }
    }
}
