//! Gantt log recording.
//!
//! Every dispatched interval lands here as a `(pid, start, finish)` entry.
//! Appending coalesces: an interval that continues the previous entry for
//! the same pid extends it instead of opening a new one, so the log a host
//! renders is the minimal sequence of bars. Idle time is logged under
//! [`Pid::IDLE`] and coalesces the same way.

use serde::{Deserialize, Serialize};

use crate::types::{Pid, Tick};

/// One CPU-allocation interval. [`Pid::IDLE`] marks idle time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    pub pid: Pid,
    pub start: Tick,
    pub finish: Tick,
}

/// The complete allocation history of a run, in chronological order.
///
/// Entries are contiguous (each `finish` equals the next `start`) and
/// coalesced (no two adjacent entries share a pid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttLog {
    entries: Vec<GanttEntry>,
}

impl GanttLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an interval, extending the last entry when it carries the
    /// same pid and abuts the new start.
    pub(crate) fn record(&mut self, pid: Pid, start: Tick, finish: Tick) {
        debug_assert!(start < finish, "empty interval ({start}, {finish})");
        if let Some(last) = self.entries.last_mut() {
            if last.pid == pid && last.finish == start {
                last.finish = finish;
                return;
            }
        }
        self.entries.push(GanttEntry { pid, start, finish });
    }

    /// All entries in chronological order.
    pub fn entries(&self) -> &[GanttEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total simulated time covered by the log.
    pub fn span(&self) -> Tick {
        self.entries.last().map_or(0, |e| e.finish)
    }

    /// Total non-idle time.
    pub fn busy_time(&self) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.pid != Pid::IDLE)
            .map(|e| e.finish - e.start)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.pid == Pid::IDLE)
            .map(|e| e.finish - e.start)
            .sum()
    }

    /// Total CPU time allocated to one process.
    pub fn runtime_of(&self, pid: Pid) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.pid == pid)
            .map(|e| e.finish - e.start)
            .sum()
    }
}
