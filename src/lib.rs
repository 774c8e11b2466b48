//! schedsim - deterministic discrete-event simulation of classic CPU
//! scheduling algorithms.
//!
//! Given a static workload of processes, the engine produces the timing
//! metrics scheduling theory defines (completion, turnaround, waiting,
//! response) and a coalesced Gantt log of `(pid, start, finish)`
//! intervals suitable for visualization. Eight algorithms share one
//! simulation loop: FCFS, SJF, SRTF, non-preemptive and preemptive
//! priority (both with aging), round-robin, a three-level feedback queue,
//! and a three-queue strict-priority multilevel scheduler.
//!
//! # Architecture
//!
//! - **Engine**: the simulation loop driving arrivals, aging, selection,
//!   and execution to the next preemption point
//! - **Policy**: the per-algorithm selection rule and preemption oracle
//!   as pure functions of the table
//! - **Queues**: ready-set structures holding table indices (RR queue,
//!   MLFQ feedback levels, MLQ static levels)
//! - **Gantt**: the coalescing interval log
//! - **FFI**: the flat-buffer C ABI hosts call through
//!
//! # Usage
//!
//! ```
//! use schedsim::{Algorithm, Simulator, Workload};
//!
//! let workload = Workload::builder().add(0, 5).add(1, 3).add(2, 8).build();
//! let outcome = Simulator::new(Algorithm::Fcfs).run(&workload)?;
//!
//! for p in &outcome.processes {
//!     println!("P{}: waited {:?}", p.pid.0, p.waiting());
//! }
//! for entry in outcome.gantt.entries() {
//!     println!("[{:>3}..{:>3}] P{}", entry.start, entry.finish, entry.pid.0);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod engine;
pub mod ffi;
pub mod gantt;
pub mod policy;
pub mod process;
mod queues;
pub mod types;
pub mod workload;

// Re-export the main public types for convenience.
pub use engine::{Outcome, Simulator};
pub use gantt::{GanttEntry, GanttLog};
pub use policy::Algorithm;
pub use process::{Process, ProcessSpec};
pub use types::{Pid, QueueLevel, Tick};
pub use workload::{Workload, WorkloadBuilder};
