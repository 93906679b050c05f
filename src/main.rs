use std::{env, io};

use log::{info, warn};
use rand::Rng;

use ferrite_bench::{run_loop, BenchmarkConfig, BenchmarkHook, LoopConfig, LoopContext, StepHook};

/// Length of the synthetic vectors processed per example.
const FEATURES: usize = 256;

/// Benchmarks a synthetic workload: each step draws a batch of random
/// vectors and reduces them to a dot product.
///
/// Usage: `ferrite-bench [config.json]`. `FERRITE_BENCH_STEPS` and
/// `FERRITE_BENCH_BATCH_SIZE` override the matching config fields.
fn main() -> io::Result<()> {
    env_logger::init();

    let mut config = match env::args().nth(1) {
        Some(path) => BenchmarkConfig::load_json(&path).map_err(io::Error::other)?,
        None => BenchmarkConfig::default(),
    };
    if let Some(steps) = env_override("FERRITE_BENCH_STEPS")? {
        config.steps = steps;
    }
    if let Some(batch_size) = env_override("FERRITE_BENCH_BATCH_SIZE")? {
        config.batch_size = batch_size;
    }
    info!("benchmark config: {config:?}");

    let mut ctx = LoopContext::new();
    ctx.create_global_step();

    let mut hook = BenchmarkHook::from_config(&config);
    let batch_size = config.batch_size.max(1.0) as usize;
    let mut rng = rand::thread_rng();
    let mut checksum = 0.0;

    let max_steps = config.max_loop_steps();
    let loop_config = LoopConfig::new().with_max_steps(max_steps);

    let outcome = {
        let mut hooks: [&mut dyn StepHook; 1] = [&mut hook];
        run_loop(&ctx, &mut hooks, &loop_config, |_| {
            checksum += synthetic_step(&mut rng, batch_size);
            Ok(())
        })
        .map_err(io::Error::other)?
    };

    info!(
        "ran {} iterations (stop requested: {}, checksum {checksum:.3})",
        outcome.iterations, outcome.stop_requested
    );
    if !outcome.stop_requested {
        warn!("loop ended after {max_steps} steps without a completed benchmark");
    }
    if let Some(summary) = hook.summary() {
        let json = serde_json::to_string(summary).map_err(io::Error::other)?;
        info!("summary: {json}");
    }
    Ok(())
}

/// Processes one batch and returns a value depending on all of it, so the
/// work cannot be optimized away.
fn synthetic_step(rng: &mut impl Rng, batch_size: usize) -> f64 {
    (0..batch_size)
        .map(|_| {
            let a: Vec<f64> = (0..FEATURES).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let b: Vec<f64> = (0..FEATURES).map(|_| rng.gen_range(-1.0..1.0)).collect();
            a.iter().zip(&b).map(|(x, y)| x * y).sum::<f64>()
        })
        .sum::<f64>()
        / batch_size as f64
}

fn env_override<T: std::str::FromStr>(name: &str) -> io::Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{name}: {e}"))),
        Err(_) => Ok(None),
    }
}
