//! Workload definition and builder API.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::policy::Algorithm;
use crate::process::ProcessSpec;
use crate::types::{Pid, QueueLevel, Tick};

/// A static workload: the ordered process table fed to the engine.
///
/// Table order is observable. It is the final tie-break for every
/// selection policy and the order in which simultaneous arrivals join a
/// ready queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn builder() -> WorkloadBuilder {
        WorkloadBuilder {
            processes: Vec::new(),
            next_pid: Pid(1),
        }
    }

    pub fn processes(&self) -> &[ProcessSpec] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Reject malformed input before any simulation state exists.
    pub(crate) fn validate(&self, algorithm: Algorithm) -> Result<()> {
        if let Algorithm::RoundRobin { quantum } = algorithm {
            if quantum == 0 {
                bail!("round-robin quantum must be positive");
            }
        }
        let mut seen = HashSet::new();
        for spec in &self.processes {
            if spec.pid.0 < 0 {
                bail!(
                    "pid {} is reserved (negative pids mark idle intervals)",
                    spec.pid.0
                );
            }
            if !seen.insert(spec.pid) {
                bail!("duplicate pid {}", spec.pid.0);
            }
            if spec.burst == 0 {
                bail!("process {}: burst time must be positive", spec.pid.0);
            }
            if algorithm == Algorithm::Mlq && QueueLevel::from_priority(spec.priority).is_none() {
                bail!(
                    "process {}: MLQ queue must be 1, 2, or 3, got {}",
                    spec.pid.0,
                    spec.priority
                );
            }
        }
        Ok(())
    }
}

/// Builder for constructing workloads.
pub struct WorkloadBuilder {
    processes: Vec<ProcessSpec>,
    next_pid: Pid,
}

impl WorkloadBuilder {
    /// Add a process with a full spec.
    pub fn process(mut self, spec: ProcessSpec) -> Self {
        self.processes.push(spec);
        self
    }

    /// Convenience: add a process with an auto-assigned pid and default
    /// priority.
    pub fn add(self, arrival: Tick, burst: Tick) -> Self {
        self.add_with_priority(arrival, burst, 1)
    }

    /// Convenience: add a process with an auto-assigned pid.
    pub fn add_with_priority(mut self, arrival: Tick, burst: Tick, priority: i32) -> Self {
        let pid = self.next_pid;
        self.next_pid = Pid(pid.0 + 1);
        self.processes.push(ProcessSpec {
            pid,
            arrival,
            burst,
            priority,
        });
        self
    }

    pub fn build(self) -> Workload {
        Workload {
            processes: self.processes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assigns_ascending_pids() {
        let workload = Workload::builder().add(0, 5).add(1, 3).build();
        assert_eq!(workload.processes()[0].pid, Pid(1));
        assert_eq!(workload.processes()[1].pid, Pid(2));
    }

    #[test]
    fn rejects_duplicate_pid() {
        let workload = Workload::builder()
            .process(ProcessSpec {
                pid: Pid(4),
                arrival: 0,
                burst: 1,
                priority: 1,
            })
            .process(ProcessSpec {
                pid: Pid(4),
                arrival: 1,
                burst: 1,
                priority: 1,
            })
            .build();
        assert!(workload.validate(Algorithm::Fcfs).is_err());
    }

    #[test]
    fn rejects_zero_burst() {
        let workload = Workload::builder().add(0, 0).build();
        assert!(workload.validate(Algorithm::Fcfs).is_err());
    }

    #[test]
    fn rejects_reserved_pid() {
        let workload = Workload::builder()
            .process(ProcessSpec {
                pid: Pid(-1),
                arrival: 0,
                burst: 1,
                priority: 1,
            })
            .build();
        assert!(workload.validate(Algorithm::Fcfs).is_err());
    }

    #[test]
    fn rejects_mlq_queue_out_of_range() {
        let workload = Workload::builder().add_with_priority(0, 5, 4).build();
        assert!(workload.validate(Algorithm::Mlq).is_err());
        assert!(workload.validate(Algorithm::Fcfs).is_ok());
    }
}
