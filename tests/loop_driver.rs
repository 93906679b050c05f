use std::io;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::time::Duration;

use ferrite_bench::{
    run_loop, BenchmarkConfig, BenchmarkHook, HookError, HookResult, LoopConfig, LoopContext, ManualClock,
    RunContext, StepArgs, StepHook, StepValues,
};

/// Records every callback it receives.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl StepHook for Recorder {
    fn begin(&mut self, _ctx: &LoopContext) -> HookResult<()> {
        self.events.push("begin".to_string());
        Ok(())
    }

    fn before_step(&mut self) -> StepArgs {
        self.events.push("before".to_string());
        StepArgs::global_step()
    }

    fn after_step(&mut self, _run: &mut RunContext, values: &StepValues) -> HookResult<()> {
        self.events.push(format!("after {:?}", values.global_step));
        Ok(())
    }

    fn end(&mut self, _ctx: &LoopContext) -> HookResult<()> {
        self.events.push("end".to_string());
        Ok(())
    }
}

fn quiet_hook(steps: u64, warmup: u64, batch: f64, clock: &ManualClock) -> BenchmarkHook {
    BenchmarkHook::new(steps, warmup, 0, batch)
        .with_writer(io::sink())
        .with_clock(clock.clone())
}

#[test]
fn benchmark_hook_stops_the_loop_after_its_budget() {
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let clock = ManualClock::new();
    let mut hook = quiet_hook(5, 2, 4.0, &clock);

    let ticker = clock.clone();
    let outcome = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut hook];
        run_loop(&ctx, &mut hooks, &LoopConfig::new().with_max_steps(1_000), |_| {
            ticker.advance(Duration::from_secs(1));
            Ok(())
        })
        .unwrap()
    };

    // Observed values run 0, 1, ...; measuring starts at 2 and stops at 7.
    assert!(outcome.stop_requested);
    assert_eq!(outcome.iterations, 8);
    assert_eq!(outcome.final_global_step, Some(8));

    let summary = hook.summary().unwrap();
    assert_eq!(summary.benchmark_global_step, 2);
    assert_eq!(summary.elapsed_secs, 5.0);
    assert_eq!(summary.examples_per_sec, 4.0);
}

#[test]
fn config_step_cap_leaves_room_for_the_benchmark() {
    for (steps, warmup) in [(5, 0), (5, 2), (1, 1), (3, 10)] {
        let config = BenchmarkConfig::new(steps, warmup, 0, 1.0);
        let mut ctx = LoopContext::new();
        ctx.create_global_step();
        let clock = ManualClock::new();
        let mut hook = quiet_hook(steps, warmup, 1.0, &clock);

        let outcome = {
            let mut hooks: [&mut dyn StepHook; 1] = [&mut hook];
            let loop_config = LoopConfig::new().with_max_steps(config.max_loop_steps());
            run_loop(&ctx, &mut hooks, &loop_config, |_| Ok(())).unwrap()
        };

        assert!(outcome.stop_requested, "steps={steps} warmup={warmup}");
        assert!(hook.summary().is_some());
    }
}

#[test]
fn config_step_cap_ends_a_benchmark_that_never_matches() {
    // A zero budget is only reachable on the warm-up transition step, which
    // never measures, so the hook never asks to stop.
    let config = BenchmarkConfig::new(0, 0, 0, 1.0);
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let clock = ManualClock::new();
    let mut hook = quiet_hook(0, 0, 1.0, &clock);

    let outcome = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut hook];
        let loop_config = LoopConfig::new().with_max_steps(config.max_loop_steps());
        run_loop(&ctx, &mut hooks, &loop_config, |_| Ok(())).unwrap()
    };

    assert!(!outcome.stop_requested);
    assert_eq!(outcome.iterations, 2);
    assert!(hook.summary().is_none());
}

#[test]
fn missing_global_step_aborts_before_any_other_callback() {
    let ctx = LoopContext::new();
    let clock = ManualClock::new();
    let mut hook = quiet_hook(5, 0, 1.0, &clock);
    let mut recorder = Recorder::default();
    let mut calls = 0;

    let result = {
        let mut hooks: [&mut dyn StepHook; 2] = [&mut hook, &mut recorder];
        run_loop(&ctx, &mut hooks, &LoopConfig::new(), |_| {
            calls += 1;
            Ok(())
        })
    };

    assert!(matches!(result, Err(HookError::Configuration(_))));
    assert_eq!(calls, 0);
    assert!(recorder.events.is_empty());
}

#[test]
fn counter_advancing_past_budget_runs_until_max_steps() {
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let clock = ManualClock::new();
    let mut hook = quiet_hook(4, 0, 1.0, &clock);

    let config = LoopConfig::new().with_step_increment(3).with_max_steps(20);
    let outcome = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut hook];
        run_loop(&ctx, &mut hooks, &config, |_| Ok(())).unwrap()
    };

    assert!(!outcome.stop_requested);
    assert_eq!(outcome.iterations, 20);
    assert_eq!(outcome.final_global_step, Some(60));
    assert!(hook.summary().is_none());
}

#[test]
fn callbacks_run_in_lifecycle_order() {
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let mut recorder = Recorder::default();

    {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut recorder];
        run_loop(&ctx, &mut hooks, &LoopConfig::new().with_max_steps(2), |_| Ok(())).unwrap();
    }

    assert_eq!(
        recorder.events,
        vec!["begin", "before", "after Some(0)", "before", "after Some(1)", "end"]
    );
}

#[test]
fn hooks_without_global_step_still_run() {
    let ctx = LoopContext::new();
    let mut recorder = Recorder::default();

    let outcome = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut recorder];
        run_loop(&ctx, &mut hooks, &LoopConfig::new().with_max_steps(1), |_| Ok(())).unwrap()
    };

    assert_eq!(outcome.final_global_step, None);
    assert_eq!(recorder.events, vec!["begin", "before", "after None", "end"]);
}

#[test]
fn step_function_may_advance_the_counter_itself() {
    let mut ctx = LoopContext::new();
    let step = ctx.create_global_step();
    let mut recorder = Recorder::default();

    let config = LoopConfig::new().with_step_increment(0).with_max_steps(3);
    {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut recorder];
        run_loop(&ctx, &mut hooks, &config, |i| {
            step.advance(i + 1);
            Ok(())
        })
        .unwrap();
    }

    assert_eq!(step.value(), 6);
    assert!(recorder.events.contains(&"after Some(3)".to_string()));
}

#[test]
fn stop_flag_ends_the_loop_between_iterations() {
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let flag = Arc::new(AtomicBool::new(false));
    let setter = flag.clone();

    let mut hooks: [&mut dyn StepHook; 0] = [];
    let outcome = run_loop(&ctx, &mut hooks, &LoopConfig::new().with_stop_flag(flag), |i| {
        if i == 2 {
            setter.store(true, Ordering::Relaxed);
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(outcome.iterations, 3);
    assert!(!outcome.stop_requested);
}

#[test]
fn step_errors_propagate() {
    let mut ctx = LoopContext::new();
    ctx.create_global_step();
    let mut recorder = Recorder::default();

    let result = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut recorder];
        run_loop(&ctx, &mut hooks, &LoopConfig::new(), |_| {
            Err(HookError::Io(io::Error::other("device lost")))
        })
    };

    assert!(matches!(result, Err(HookError::Io(_))));
    assert_eq!(recorder.events, vec!["begin", "before"]);
}
