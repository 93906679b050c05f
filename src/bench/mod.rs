pub mod bench_config;
pub mod summary;

pub use bench_config::BenchmarkConfig;
pub use summary::BenchmarkSummary;
