pub mod loop_config;
pub mod loop_fn;

pub use loop_config::LoopConfig;
pub use loop_fn::{run_loop, LoopOutcome};
