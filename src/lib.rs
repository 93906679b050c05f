pub mod bench;
pub mod clock;
pub mod error;
pub mod hooks;
pub mod step;
pub mod train;

// Convenience re-exports
pub use bench::{BenchmarkConfig, BenchmarkSummary};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{HookError, HookResult};
pub use hooks::{BenchmarkHook, Phase, RunContext, StepArgs, StepHook, StepValues};
pub use step::{GlobalStep, LoopContext};
pub use train::{run_loop, LoopConfig, LoopOutcome};
