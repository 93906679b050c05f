pub mod benchmark;
pub mod hook;
pub mod run_context;

pub use benchmark::{BenchmarkHook, Phase};
pub use hook::StepHook;
pub use run_context::{RunContext, StepArgs, StepValues};
