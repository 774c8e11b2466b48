//! The simulation loop.
//!
//! One loop shape drives all eight algorithms: observe arrivals, age
//! waiters, promote starved MLFQ processes, select, execute to the next
//! preemption point, log, then finalize or re-enqueue. The scan-based
//! algorithms recompute their candidate set from the table every
//! iteration; RR, MLFQ, and MLQ keep explicit queues of table indices.
//!
//! The engine is single-threaded and a pure function of its inputs:
//! identical workloads produce identical tables and logs on every run.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::gantt::GanttLog;
use crate::policy::{self, Algorithm};
use crate::process::Process;
use crate::queues::{self, FeedbackQueues, ReadyQueue, StaticQueues};
use crate::types::{Pid, QueueLevel, Tick, MLQ_Q2_QUANTUM, PRIORITY_AGING_RATE};
use crate::workload::Workload;

/// Result of a completed run: the finalized table and the full Gantt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub processes: Vec<Process>,
    pub gantt: GanttLog,
}

/// The simulator: one algorithm applied to one workload at a time.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    algorithm: Algorithm,
}

impl Simulator {
    pub fn new(algorithm: Algorithm) -> Self {
        Simulator { algorithm }
    }

    /// Run the workload to completion.
    ///
    /// Malformed input is rejected before any simulation state exists; a
    /// well-formed workload always terminates (every iteration either
    /// executes at least one tick of work or logs one tick of idle).
    pub fn run(&self, workload: &Workload) -> Result<Outcome> {
        workload.validate(self.algorithm)?;
        let mut table: Vec<Process> = workload
            .processes()
            .iter()
            .map(Process::from_spec)
            .collect();
        let mut gantt = GanttLog::new();

        match self.algorithm {
            Algorithm::RoundRobin { quantum } => {
                run_round_robin(&mut table, &mut gantt, quantum)
            }
            Algorithm::Mlfq => run_mlfq(&mut table, &mut gantt),
            Algorithm::Mlq => run_mlq(&mut table, &mut gantt),
            alg => run_scan(alg, &mut table, &mut gantt),
        }

        Ok(Outcome {
            processes: table,
            gantt,
        })
    }
}

/// Log one tick of idle and advance the clock.
fn log_idle(gantt: &mut GanttLog, now: Tick) -> Tick {
    debug!(at = now, "IDLE");
    gantt.record(Pid::IDLE, now, now + 1);
    now + 1
}

/// Execute `len` ticks of process `idx` starting at `now`. Records the
/// interval, stamps the first dispatch, and finalizes the process when its
/// burst is exhausted. Returns the new clock.
fn execute(table: &mut [Process], idx: usize, now: Tick, len: Tick, gantt: &mut GanttLog) -> Tick {
    debug_assert!(len > 0, "dispatch must make progress");
    let finish = now + len;
    let p = &mut table[idx];
    if p.first_run.is_none() {
        p.first_run = Some(now);
    }
    p.remaining -= len;
    gantt.record(p.pid, now, finish);
    debug!(pid = p.pid.0, start = now, finish, "DISPATCH");
    if p.remaining == 0 {
        p.completion = Some(finish);
        info!(pid = p.pid.0, completion = finish, "COMPLETED");
    }
    finish
}

/// Aging for the priority algorithms: a ready process that has never run
/// gains one priority step per [`PRIORITY_AGING_RATE`] waited ticks,
/// floored at 1. The first dispatch freezes the aged value.
fn age_waiters(table: &mut [Process], now: Tick) {
    for p in table.iter_mut() {
        if p.first_run.is_none() && p.is_ready(now) {
            let steps = ((now - p.arrival) / PRIORITY_AGING_RATE) as i64;
            let aged = (p.base_priority as i64 - steps).max(1) as i32;
            if aged != p.current_priority {
                debug!(pid = p.pid.0, from = p.current_priority, to = aged, "AGED");
                p.current_priority = aged;
            }
        }
    }
}

/// FCFS, SJF, SRTF, and both priority variants: the ready set is
/// recomputed from the table every iteration.
fn run_scan(algorithm: Algorithm, table: &mut [Process], gantt: &mut GanttLog) {
    let n = table.len();
    let mut now: Tick = 0;
    let mut completed = 0;

    while completed < n {
        if algorithm.ages() {
            age_waiters(table, now);
        }
        let Some(idx) = policy::pick_next(algorithm, table, now) else {
            now = log_idle(gantt, now);
            continue;
        };
        let len = policy::dispatch_len(algorithm, table, idx, now);
        now = execute(table, idx, now, len, gantt);
        if table[idx].remaining == 0 {
            completed += 1;
        }
    }
}

/// Round-robin over a single FIFO queue.
fn run_round_robin(table: &mut [Process], gantt: &mut GanttLog, quantum: Tick) {
    let n = table.len();
    let mut now: Tick = 0;
    let mut completed = 0;
    let mut ready = ReadyQueue::new(n);
    ready.admit_arrivals(table, now);

    while completed < n {
        let Some(idx) = ready.pop() else {
            now = log_idle(gantt, now);
            ready.admit_arrivals(table, now);
            continue;
        };
        let len = table[idx].remaining.min(quantum);
        now = execute(table, idx, now, len, gantt);
        // Arrivals observed during the dispatch join the tail before the
        // running process takes its place there.
        ready.admit_arrivals(table, now);
        if table[idx].remaining == 0 {
            completed += 1;
        } else {
            ready.requeue(idx);
        }
    }
}

/// Three-level feedback queue: quantum 8, then 16, then unsliced FCFS,
/// with demotion on spent quanta and starvation promotion out of Q3.
fn run_mlfq(table: &mut [Process], gantt: &mut GanttLog) {
    let n = table.len();
    let mut now: Tick = 0;
    let mut completed = 0;
    let mut ready = FeedbackQueues::new(n);

    while completed < n {
        ready.admit_arrivals(table, now);
        ready.promote_starved(table, now);
        let Some((level, idx)) = ready.pop_highest() else {
            now = log_idle(gantt, now);
            continue;
        };
        let quantum = queues::mlfq_quantum(level);
        let mut len = match quantum {
            Some(q) => table[idx].remaining.min(q),
            None => table[idx].remaining,
        };
        // Q3 yields to the next arrival: new work enters Q1, which
        // strictly outranks it.
        if level == QueueLevel::Q3 {
            if let Some(at) = policy::next_arrival(table, now, |_| true) {
                len = len.min(at - now);
            }
        }
        let quantum_spent = quantum.is_some_and(|q| len == q);
        now = execute(table, idx, now, len, gantt);
        if table[idx].remaining == 0 {
            completed += 1;
        } else {
            ready.reenter(table, idx, level, quantum_spent, now);
        }
    }
}

/// Three fixed queues under strict priority: Q1 priority-preemptive at
/// one tick per dispatch, Q2 round-robin with quantum 10, Q3 FCFS. Q2 and
/// Q3 dispatches yield to the next arrival of a Q1-assigned process.
fn run_mlq(table: &mut [Process], gantt: &mut GanttLog) {
    let n = table.len();
    let mut now: Tick = 0;
    let mut completed = 0;
    let mut ready = StaticQueues::new(n);

    while completed < n {
        ready.admit_arrivals(table, now);
        let Some((level, idx)) = ready.pop_next(table) else {
            now = log_idle(gantt, now);
            continue;
        };
        let mut len = match level {
            // Re-evaluate Q1 ordering every tick.
            QueueLevel::Q1 => 1,
            QueueLevel::Q2 => table[idx].remaining.min(MLQ_Q2_QUANTUM),
            QueueLevel::Q3 => table[idx].remaining,
        };
        let mut preempted = false;
        if level != QueueLevel::Q1 {
            let to_q1 = |p: &Process| {
                QueueLevel::from_priority(p.base_priority) == Some(QueueLevel::Q1)
            };
            if let Some(at) = policy::next_arrival(table, now, to_q1) {
                if at - now < len {
                    len = at - now;
                    preempted = true;
                }
            }
        }
        let quantum_spent = level == QueueLevel::Q2 && len == MLQ_Q2_QUANTUM && !preempted;
        now = execute(table, idx, now, len, gantt);
        // Same discipline as round-robin: arrivals observed during the
        // dispatch join their queue before the preempted process does.
        ready.admit_arrivals(table, now);
        if table[idx].remaining == 0 {
            completed += 1;
        } else {
            ready.reenter(idx, level, quantum_spent);
        }
    }
}
