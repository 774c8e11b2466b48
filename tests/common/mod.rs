// Not every test binary uses every helper.
#![allow(dead_code)]

use schedsim::Outcome;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`. `try_init()` is idempotent: the
/// first call in the process succeeds, later calls are silently ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Flatten the Gantt log into comparable `(pid, start, finish)` tuples.
pub fn intervals(outcome: &Outcome) -> Vec<(i32, u64, u64)> {
    outcome
        .gantt
        .entries()
        .iter()
        .map(|e| (e.pid.0, e.start, e.finish))
        .collect()
}
