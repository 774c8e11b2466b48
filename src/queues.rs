//! Ready-set structures for the queue-based algorithms.
//!
//! Queues hold indices into the process table; the table is the only owner
//! of process state. Each structure tracks which processes it has admitted
//! so an arrival scan never enqueues the same process twice — a running or
//! completed process counts as admitted.

use std::collections::VecDeque;

use tracing::info;

use crate::process::Process;
use crate::types::{QueueLevel, Tick, Q1_QUANTUM, Q2_QUANTUM, Q3_PROMOTION_THRESHOLD};

/// Per-level quantum for MLFQ; Q3 runs unsliced.
pub(crate) fn mlfq_quantum(level: QueueLevel) -> Option<Tick> {
    match level {
        QueueLevel::Q1 => Some(Q1_QUANTUM),
        QueueLevel::Q2 => Some(Q2_QUANTUM),
        QueueLevel::Q3 => None,
    }
}

/// Single FIFO ready queue (round-robin).
#[derive(Debug)]
pub(crate) struct ReadyQueue {
    entries: VecDeque<usize>,
    admitted: Vec<bool>,
}

impl ReadyQueue {
    pub fn new(n: usize) -> Self {
        ReadyQueue {
            entries: VecDeque::new(),
            admitted: vec![false; n],
        }
    }

    /// Append every not-yet-admitted process that has arrived by `now`.
    /// Scans in table order, so simultaneous arrivals join in pid order.
    pub fn admit_arrivals(&mut self, table: &[Process], now: Tick) {
        for (idx, p) in table.iter().enumerate() {
            if !self.admitted[idx] && p.is_ready(now) {
                self.admitted[idx] = true;
                self.entries.push_back(idx);
            }
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_front()
    }

    /// Return a preempted process to the tail.
    pub fn requeue(&mut self, idx: usize) {
        self.entries.push_back(idx);
    }
}

/// The three-level feedback queue (MLFQ).
///
/// All arrivals enter Q1. Spending a full quantum demotes one level;
/// yielding early keeps the level. Waiters stuck in Q3 past the promotion
/// threshold move back up to Q2.
#[derive(Debug)]
pub(crate) struct FeedbackQueues {
    levels: [VecDeque<usize>; 3],
    admitted: Vec<bool>,
}

impl FeedbackQueues {
    pub fn new(n: usize) -> Self {
        FeedbackQueues {
            levels: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
            admitted: vec![false; n],
        }
    }

    /// New arrivals enter Q1 in table order.
    pub fn admit_arrivals(&mut self, table: &mut [Process], now: Tick) {
        for idx in 0..table.len() {
            if !self.admitted[idx] && table[idx].is_ready(now) {
                self.admitted[idx] = true;
                table[idx].queue = Some(QueueLevel::Q1);
                self.levels[0].push_back(idx);
            }
        }
    }

    /// Move Q3 waiters that have starved past the threshold up to Q2,
    /// preserving their relative order.
    pub fn promote_starved(&mut self, table: &mut [Process], now: Tick) {
        let q3 = std::mem::take(&mut self.levels[2]);
        for idx in q3 {
            let starved = table[idx]
                .q3_entered_at
                .is_some_and(|entered| now - entered >= Q3_PROMOTION_THRESHOLD);
            if starved {
                table[idx].q3_entered_at = None;
                table[idx].queue = Some(QueueLevel::Q2);
                info!(pid = table[idx].pid.0, at = now, "PROMOTED");
                self.levels[1].push_back(idx);
            } else {
                self.levels[2].push_back(idx);
            }
        }
    }

    /// Pop the head of the highest non-empty level.
    pub fn pop_highest(&mut self) -> Option<(QueueLevel, usize)> {
        const LEVELS: [QueueLevel; 3] = [QueueLevel::Q1, QueueLevel::Q2, QueueLevel::Q3];
        for level in LEVELS {
            if let Some(idx) = self.levels[level.index()].pop_front() {
                return Some((level, idx));
            }
        }
        None
    }

    /// Re-enqueue after a dispatch that did not finish the process. A
    /// spent quantum demotes one level; an early yield keeps the level.
    pub fn reenter(
        &mut self,
        table: &mut [Process],
        idx: usize,
        level: QueueLevel,
        quantum_spent: bool,
        now: Tick,
    ) {
        let target = if quantum_spent {
            let lower = level.demoted().unwrap_or(level);
            if lower != level {
                info!(
                    pid = table[idx].pid.0,
                    from = level.as_i32(),
                    to = lower.as_i32(),
                    at = now,
                    "DEMOTED"
                );
            }
            lower
        } else {
            level
        };
        table[idx].queue = Some(target);
        if target == QueueLevel::Q3 {
            table[idx].q3_entered_at = Some(now);
        }
        self.levels[target.index()].push_back(idx);
    }
}

/// The three fixed-assignment queues (MLQ). Assignment comes from the
/// input priority and never changes.
#[derive(Debug)]
pub(crate) struct StaticQueues {
    levels: [VecDeque<usize>; 3],
    admitted: Vec<bool>,
}

impl StaticQueues {
    pub fn new(n: usize) -> Self {
        StaticQueues {
            levels: [VecDeque::new(), VecDeque::new(), VecDeque::new()],
            admitted: vec![false; n],
        }
    }

    /// Arrivals join the queue their input priority designates.
    pub fn admit_arrivals(&mut self, table: &mut [Process], now: Tick) {
        for idx in 0..table.len() {
            if !self.admitted[idx] && table[idx].is_ready(now) {
                self.admitted[idx] = true;
                let level = QueueLevel::from_priority(table[idx].base_priority)
                    .expect("queue assignment validated before simulation");
                table[idx].queue = Some(level);
                self.levels[level.index()].push_back(idx);
            }
        }
    }

    /// Strict-priority selection: the best Q1 member by (priority,
    /// arrival, table order), else the Q2 head, else the Q3 head.
    pub fn pop_next(&mut self, table: &[Process]) -> Option<(QueueLevel, usize)> {
        if !self.levels[0].is_empty() {
            let pos = self.levels[0]
                .iter()
                .enumerate()
                .min_by_key(|&(_, &idx)| (table[idx].base_priority, table[idx].arrival, idx))
                .map(|(pos, _)| pos)?;
            let idx = self.levels[0].remove(pos)?;
            return Some((QueueLevel::Q1, idx));
        }
        for level in [QueueLevel::Q2, QueueLevel::Q3] {
            if let Some(idx) = self.levels[level.index()].pop_front() {
                return Some((level, idx));
            }
        }
        None
    }

    /// Re-enqueue: a spent quantum goes to the tail; a dispatch cut short
    /// by a higher-priority arrival keeps its turn at the head.
    pub fn reenter(&mut self, idx: usize, level: QueueLevel, quantum_spent: bool) {
        let queue = &mut self.levels[level.index()];
        if quantum_spent {
            queue.push_back(idx);
        } else {
            queue.push_front(idx);
        }
    }
}
