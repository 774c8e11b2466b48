//! Algorithm tags, the selection policy, and the preemption-point oracle.
//!
//! The scan-based algorithms (everything but RR, MLFQ, and MLQ) recompute
//! their candidate set from the table every iteration; selection and the
//! oracle live here as pure functions of `(algorithm, table, now)` so the
//! loop can be tested interval by interval.

use anyhow::{bail, Result};

use crate::process::Process;
use crate::types::Tick;

/// The scheduling algorithm driving a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// First-come first-served, non-preemptive.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    Srtf,
    /// Non-preemptive priority with aging of waiting processes.
    PriorityNp,
    /// Preemptive priority with aging of waiting processes.
    PriorityP,
    /// Round-robin with a caller-supplied quantum.
    RoundRobin { quantum: Tick },
    /// Three-level feedback queue with starvation promotion.
    Mlfq,
    /// Three fixed-assignment queues under strict priority.
    Mlq,
}

impl Algorithm {
    /// Decode the integer tag of the C ABI. `quantum` is consulted only
    /// by round-robin.
    pub fn from_code(code: i32, quantum: i64) -> Result<Self> {
        Ok(match code {
            0 => Algorithm::Fcfs,
            1 => Algorithm::Sjf,
            2 => Algorithm::Srtf,
            3 => Algorithm::PriorityNp,
            4 => Algorithm::PriorityP,
            5 => {
                if quantum <= 0 {
                    bail!("round-robin quantum must be positive, got {quantum}");
                }
                Algorithm::RoundRobin {
                    quantum: quantum as Tick,
                }
            }
            6 => Algorithm::Mlfq,
            7 => Algorithm::Mlq,
            _ => bail!("unknown algorithm code {code}"),
        })
    }

    /// Whether this algorithm ages waiting processes.
    pub(crate) fn ages(self) -> bool {
        matches!(self, Algorithm::PriorityNp | Algorithm::PriorityP)
    }
}

/// Pick the next process for the scan-based algorithms. Returns a table
/// index, or `None` when nothing is ready.
///
/// Ties fall through to earlier arrival, then table order.
pub(crate) fn pick_next(algorithm: Algorithm, table: &[Process], now: Tick) -> Option<usize> {
    let candidates = (0..table.len()).filter(|&i| table[i].is_ready(now));
    match algorithm {
        Algorithm::Fcfs => candidates.min_by_key(|&i| (table[i].arrival, i)),
        Algorithm::Sjf | Algorithm::Srtf => {
            candidates.min_by_key(|&i| (table[i].remaining, table[i].arrival, i))
        }
        Algorithm::PriorityNp | Algorithm::PriorityP => {
            candidates.min_by_key(|&i| (table[i].current_priority, table[i].arrival, i))
        }
        Algorithm::RoundRobin { .. } | Algorithm::Mlfq | Algorithm::Mlq => {
            unreachable!("queue-based algorithms select through their queues")
        }
    }
}

/// Dispatch length for the scan-based algorithms: the time from `now` to
/// the earliest event that must deschedule the running process. Always at
/// least 1.
pub(crate) fn dispatch_len(
    algorithm: Algorithm,
    table: &[Process],
    running: usize,
    now: Tick,
) -> Tick {
    let rem = table[running].remaining;
    match algorithm {
        // Run to completion.
        Algorithm::Fcfs | Algorithm::Sjf | Algorithm::PriorityNp => rem,
        // Stop at the next arrival that would strictly shorten the
        // remaining-time winner.
        Algorithm::Srtf => {
            let mut len = rem;
            for (i, p) in table.iter().enumerate() {
                if i != running && p.remaining > 0 && p.arrival > now && p.burst < rem {
                    len = len.min(p.arrival - now);
                }
            }
            len
        }
        Algorithm::PriorityP => {
            let me = &table[running];
            let mut len = rem;
            for (i, p) in table.iter().enumerate() {
                if i == running || p.remaining == 0 {
                    continue;
                }
                // A waiter outranks the running process either outright or,
                // if it has never run, eventually through aging.
                let can_overtake = p.current_priority < me.current_priority
                    || (p.first_run.is_none() && me.current_priority > 1);
                if !can_overtake {
                    continue;
                }
                if p.arrival > now {
                    len = len.min(p.arrival - now);
                } else {
                    // Already ready and still closing in: re-evaluate next
                    // tick. Coalescing keeps the log identical to an exact
                    // switch-time computation.
                    len = 1;
                }
            }
            len
        }
        Algorithm::RoundRobin { .. } | Algorithm::Mlfq | Algorithm::Mlq => {
            unreachable!("queue-based algorithms slice through their queues")
        }
    }
}

/// Earliest arrival strictly after `now` among unfinished processes
/// matching `pred`.
pub(crate) fn next_arrival<F>(table: &[Process], now: Tick, pred: F) -> Option<Tick>
where
    F: Fn(&Process) -> bool,
{
    table
        .iter()
        .filter(|p| p.remaining > 0 && p.arrival > now && pred(p))
        .map(|p| p.arrival)
        .min()
}
