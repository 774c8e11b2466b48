//! C ABI entry point.
//!
//! Hosts drive the engine through a single call over flat, mutable
//! buffers: a process table whose timing fields the engine fills in, and
//! a caller-allocated Gantt buffer. Malformed input is answered with a
//! negative count and no output is written.

use std::os::raw::c_int;
use std::slice;

use tracing::warn;

use crate::engine::Simulator;
use crate::policy::Algorithm;
use crate::process::ProcessSpec;
use crate::types::{Pid, Tick};
use crate::workload::Workload;

/// Sentinel returned for input the engine refuses to simulate.
pub const RUN_SCHEDULER_BAD_INPUT: c_int = -1;

/// Process record as exchanged across the C ABI.
///
/// `pid`, `at`, `bt`, and `priority` are read in; the remaining fields
/// are written out after a successful run. `-1` marks a field that was
/// never set (a process that never entered a multi-queue level, for
/// example).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawProcess {
    pub pid: c_int,
    pub at: c_int,
    pub bt: c_int,
    pub priority: c_int,
    pub ct: c_int,
    pub tat: c_int,
    pub wt: c_int,
    pub rem_time: c_int,
    pub first_run: c_int,
    pub current_priority: c_int,
    pub current_queue: c_int,
}

/// One Gantt interval as exchanged across the C ABI. `pid == -1` marks
/// idle time.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawGanttEntry {
    pub pid: c_int,
    pub start: c_int,
    pub finish: c_int,
}

/// Run the scheduling engine over a caller-provided process table.
///
/// Writes at most `max_logs` Gantt entries and returns the number
/// written. A log that did not fit is truncated to the first `max_logs`
/// intervals; the caller can detect truncation by comparing the last
/// returned `finish` against the largest completion time. Returns
/// [`RUN_SCHEDULER_BAD_INPUT`] without touching any output field when the
/// input is malformed (null buffers, negative sizes, duplicate pids,
/// non-positive bursts, an unknown algorithm code, a non-positive
/// round-robin quantum, or an MLQ queue outside 1..=3).
///
/// # Safety
///
/// `procs` must point to `n` valid [`RawProcess`] records and `logs` to
/// `max_logs` writable [`RawGanttEntry`] slots, and both regions must be
/// exclusively borrowed by this call for its duration.
#[no_mangle]
pub unsafe extern "C" fn run_scheduler(
    procs: *mut RawProcess,
    n: c_int,
    algorithm_code: c_int,
    quantum: c_int,
    logs: *mut RawGanttEntry,
    max_logs: c_int,
) -> c_int {
    if procs.is_null() || logs.is_null() || n < 0 || max_logs < 0 {
        return RUN_SCHEDULER_BAD_INPUT;
    }
    let procs = slice::from_raw_parts_mut(procs, n as usize);
    let logs = slice::from_raw_parts_mut(logs, max_logs as usize);

    let algorithm = match Algorithm::from_code(algorithm_code, i64::from(quantum)) {
        Ok(algorithm) => algorithm,
        Err(err) => {
            warn!(%err, "rejecting run");
            return RUN_SCHEDULER_BAD_INPUT;
        }
    };

    let mut builder = Workload::builder();
    for raw in procs.iter() {
        if raw.at < 0 || raw.bt <= 0 {
            warn!(
                pid = raw.pid,
                at = raw.at,
                bt = raw.bt,
                "rejecting run: bad arrival or burst"
            );
            return RUN_SCHEDULER_BAD_INPUT;
        }
        builder = builder.process(ProcessSpec {
            pid: Pid(raw.pid),
            arrival: raw.at as Tick,
            burst: raw.bt as Tick,
            priority: raw.priority,
        });
    }

    let outcome = match Simulator::new(algorithm).run(&builder.build()) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(%err, "rejecting run");
            return RUN_SCHEDULER_BAD_INPUT;
        }
    };

    for (raw, p) in procs.iter_mut().zip(&outcome.processes) {
        raw.ct = p.completion.map_or(-1, |t| t as c_int);
        raw.tat = p.turnaround().map_or(-1, |t| t as c_int);
        raw.wt = p.waiting().map_or(-1, |t| t as c_int);
        raw.rem_time = p.remaining as c_int;
        raw.first_run = p.first_run.map_or(-1, |t| t as c_int);
        raw.current_priority = p.current_priority;
        raw.current_queue = p.queue.map_or(-1, |q| q.as_i32());
    }

    let written = outcome.gantt.len().min(logs.len());
    for (slot, entry) in logs.iter_mut().zip(outcome.gantt.entries()) {
        slot.pid = entry.pid.0;
        slot.start = entry.start as c_int;
        slot.finish = entry.finish as c_int;
    }
    written as c_int
}
