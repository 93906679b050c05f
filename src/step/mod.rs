pub mod global_step;
pub mod loop_context;

pub use global_step::GlobalStep;
pub use loop_context::LoopContext;
