use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared, monotonically increasing step counter.
///
/// Cloning yields another handle to the same counter; hooks keep a clone
/// and read it once per iteration while the driver advances it.
#[derive(Debug, Clone, Default)]
pub struct GlobalStep {
    value: Arc<AtomicU64>,
}

impl GlobalStep {
    /// Creates a counter starting at `start`.
    pub fn new(start: u64) -> GlobalStep {
        GlobalStep { value: Arc::new(AtomicU64::new(start)) }
    }

    /// Current counter value.
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Adds `by` to the counter and returns the new value.
    pub fn advance(&self, by: u64) -> u64 {
        self.value.fetch_add(by, Ordering::Relaxed) + by
    }

    /// Shorthand for `advance(1)`.
    pub fn increment(&self) -> u64 {
        self.advance(1)
    }
}
