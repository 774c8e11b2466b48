//! Process records: the immutable input definition and the mutable
//! runtime state the engine drives to completion.

use serde::{Deserialize, Serialize};

use crate::types::{Pid, QueueLevel, Tick};

/// Input definition of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub pid: Pid,
    /// Time at which the process becomes eligible to run.
    pub arrival: Tick,
    /// Total CPU demand, in ticks. Must be positive.
    pub burst: Tick,
    /// Base priority; smaller means higher. Under MLQ this designates the
    /// target queue (1, 2, or 3).
    pub priority: i32,
}

/// A process record during and after simulation.
///
/// Created once from a [`ProcessSpec`], mutated only by the engine, and
/// finalized when the remaining burst reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    /// The priority given on input, preserved while aging adjusts
    /// [`current_priority`](Self::current_priority).
    pub base_priority: i32,
    /// The aged priority used for selection. Frozen once the process has
    /// executed at least once.
    pub current_priority: i32,
    /// Remaining burst; the process completes when this reaches zero.
    pub remaining: Tick,
    /// Time of the first dispatch, once dispatched.
    pub first_run: Option<Tick>,
    /// Completion time, once finished.
    pub completion: Option<Tick>,
    /// Queue membership under MLFQ or MLQ.
    pub queue: Option<QueueLevel>,
    /// When the process most recently entered MLFQ Q3; drives starvation
    /// promotion.
    pub q3_entered_at: Option<Tick>,
}

impl Process {
    pub(crate) fn from_spec(spec: &ProcessSpec) -> Self {
        Process {
            pid: spec.pid,
            arrival: spec.arrival,
            burst: spec.burst,
            base_priority: spec.priority,
            current_priority: spec.priority,
            remaining: spec.burst,
            first_run: None,
            completion: None,
            queue: None,
            q3_entered_at: None,
        }
    }

    /// Whether the process is eligible to run at time `now`.
    pub fn is_ready(&self, now: Tick) -> bool {
        self.arrival <= now && self.remaining > 0
    }

    /// Turnaround time (completion minus arrival); defined once completed.
    pub fn turnaround(&self) -> Option<Tick> {
        self.completion.map(|ct| ct - self.arrival)
    }

    /// Waiting time (turnaround minus burst); defined once completed.
    pub fn waiting(&self) -> Option<Tick> {
        self.turnaround().map(|tat| tat - self.burst)
    }

    /// Response time (first dispatch minus arrival); defined once
    /// dispatched.
    pub fn response(&self) -> Option<Tick> {
        self.first_run.map(|fr| fr - self.arrival)
    }
}
