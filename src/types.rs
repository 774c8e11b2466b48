//! Newtype wrappers, type aliases, and the fixed scheduling constants.
//!
//! Newtypes for identifiers prevent silent type confusion; aliases for
//! quantities keep signatures self-documenting without arithmetic-trait
//! boilerplate.

use serde::{Deserialize, Serialize};

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pid(pub i32);

impl Pid {
    /// Reserved identifier marking idle intervals in the Gantt log.
    pub const IDLE: Pid = Pid(-1);
}

/// Simulated time, in abstract ticks.
pub type Tick = u64;

/// Queue identity for the multi-queue algorithms (MLFQ and MLQ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QueueLevel {
    Q1,
    Q2,
    Q3,
}

impl QueueLevel {
    /// Decode a queue designation from an input priority value (MLQ).
    pub fn from_priority(value: i32) -> Option<Self> {
        match value {
            1 => Some(QueueLevel::Q1),
            2 => Some(QueueLevel::Q2),
            3 => Some(QueueLevel::Q3),
            _ => None,
        }
    }

    /// Queue number as exchanged over the C ABI.
    pub fn as_i32(self) -> i32 {
        match self {
            QueueLevel::Q1 => 1,
            QueueLevel::Q2 => 2,
            QueueLevel::Q3 => 3,
        }
    }

    /// The next level down, if any.
    pub(crate) fn demoted(self) -> Option<Self> {
        match self {
            QueueLevel::Q1 => Some(QueueLevel::Q2),
            QueueLevel::Q2 => Some(QueueLevel::Q3),
            QueueLevel::Q3 => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            QueueLevel::Q1 => 0,
            QueueLevel::Q2 => 1,
            QueueLevel::Q3 => 2,
        }
    }
}

/// Waiting ticks per one step of priority credit under aging.
pub const PRIORITY_AGING_RATE: Tick = 5;

/// MLFQ level-one quantum.
pub const Q1_QUANTUM: Tick = 8;

/// MLFQ level-two quantum.
pub const Q2_QUANTUM: Tick = 16;

/// Waiting time in MLFQ Q3 after which a process is promoted back to Q2.
pub const Q3_PROMOTION_THRESHOLD: Tick = 50;

/// Round-robin quantum of the MLQ middle queue.
pub const MLQ_Q2_QUANTUM: Tick = 10;
