//! FCFS, SJF, SRTF, and the two priority variants: the algorithms whose
//! ready set is recomputed from the table every iteration.

use schedsim::*;

mod common;

fn spec(pid: i32, arrival: Tick, burst: Tick, priority: i32) -> ProcessSpec {
    ProcessSpec {
        pid: Pid(pid),
        arrival,
        burst,
        priority,
    }
}

#[test]
fn fcfs_orders_by_arrival() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 5, 1))
        .process(spec(2, 1, 3, 1))
        .process(spec(3, 2, 8, 1))
        .build();
    let outcome = Simulator::new(Algorithm::Fcfs).run(&workload).unwrap();

    assert_eq!(
        common::intervals(&outcome),
        vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]
    );
    let completions: Vec<_> = outcome.processes.iter().map(|p| p.completion).collect();
    assert_eq!(completions, vec![Some(5), Some(8), Some(16)]);
    let turnarounds: Vec<_> = outcome.processes.iter().map(|p| p.turnaround()).collect();
    assert_eq!(turnarounds, vec![Some(5), Some(7), Some(14)]);
    let waits: Vec<_> = outcome.processes.iter().map(|p| p.waiting()).collect();
    assert_eq!(waits, vec![Some(0), Some(4), Some(6)]);
}

#[test]
fn fcfs_breaks_simultaneous_arrivals_by_table_order() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 3, 1))
        .process(spec(2, 0, 2, 1))
        .build();
    let outcome = Simulator::new(Algorithm::Fcfs).run(&workload).unwrap();
    assert_eq!(common::intervals(&outcome), vec![(1, 0, 3), (2, 3, 5)]);
}

#[test]
fn late_first_arrival_logs_one_coalesced_idle_interval() {
    common::setup_test();
    let workload = Workload::builder().process(spec(1, 5, 3, 1)).build();
    let outcome = Simulator::new(Algorithm::Fcfs).run(&workload).unwrap();
    assert_eq!(common::intervals(&outcome), vec![(-1, 0, 5), (1, 5, 8)]);
    assert_eq!(outcome.gantt.idle_time(), 5);
    assert_eq!(outcome.processes[0].first_run, Some(5));
    assert_eq!(outcome.processes[0].response(), Some(0));
}

#[test]
fn sjf_picks_shortest_job_without_preempting() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 8, 1))
        .process(spec(2, 1, 4, 1))
        .process(spec(3, 2, 2, 1))
        .build();
    let outcome = Simulator::new(Algorithm::Sjf).run(&workload).unwrap();
    // P1 holds the CPU to completion; the shorter P3 then beats P2.
    assert_eq!(
        common::intervals(&outcome),
        vec![(1, 0, 8), (3, 8, 10), (2, 10, 14)]
    );
}

#[test]
fn srtf_preempts_on_strictly_shorter_arrivals() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 7, 1))
        .process(spec(2, 2, 4, 1))
        .process(spec(3, 4, 1, 1))
        .process(spec(4, 5, 4, 1))
        .build();
    let outcome = Simulator::new(Algorithm::Srtf).run(&workload).unwrap();

    assert_eq!(
        common::intervals(&outcome),
        vec![
            (1, 0, 2),
            (2, 2, 4),
            (3, 4, 5),
            (2, 5, 7),
            (4, 7, 11),
            (1, 11, 16)
        ]
    );
    let completions: Vec<_> = outcome.processes.iter().map(|p| p.completion).collect();
    assert_eq!(completions, vec![Some(16), Some(7), Some(5), Some(11)]);
    let waits: Vec<_> = outcome.processes.iter().map(|p| p.waiting()).collect();
    assert_eq!(waits, vec![Some(9), Some(1), Some(0), Some(2)]);
}

#[test]
fn srtf_equal_burst_arrival_does_not_preempt() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 5, 1))
        .process(spec(2, 1, 5, 1))
        .build();
    let outcome = Simulator::new(Algorithm::Srtf).run(&workload).unwrap();
    assert_eq!(common::intervals(&outcome), vec![(1, 0, 5), (2, 5, 10)]);
}

#[test]
fn priority_np_aging_lifts_long_waiters() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 20, 1))
        .process(spec(2, 0, 10, 4))
        .process(spec(3, 5, 10, 3))
        .build();
    let outcome = Simulator::new(Algorithm::PriorityNp).run(&workload).unwrap();

    // By t=20 both waiters have aged to priority 1; the earlier arrival
    // wins the tie even though P3's base priority is better.
    assert_eq!(
        common::intervals(&outcome),
        vec![(1, 0, 20), (2, 20, 30), (3, 30, 40)]
    );
    assert_eq!(outcome.processes[1].current_priority, 1);
    assert_eq!(outcome.processes[2].current_priority, 1);
}

#[test]
fn priority_p_aging_freezes_after_first_dispatch() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 10, 3))
        .process(spec(2, 2, 2, 1))
        .build();
    let outcome = Simulator::new(Algorithm::PriorityP).run(&workload).unwrap();

    // P1 executed at t=0, so it no longer ages while preempted; P2 runs
    // its burst and P1 resumes its remaining 8 ticks to completion.
    assert_eq!(
        common::intervals(&outcome),
        vec![(1, 0, 2), (2, 2, 4), (1, 4, 12)]
    );
    assert_eq!(outcome.processes[0].completion, Some(12));
    assert_eq!(outcome.processes[1].completion, Some(4));
    assert_eq!(outcome.processes[0].current_priority, 3);
}

#[test]
fn priority_p_waiter_ages_past_the_running_process() {
    common::setup_test();
    let workload = Workload::builder()
        .process(spec(1, 0, 30, 2))
        .process(spec(2, 1, 4, 5))
        .build();
    let outcome = Simulator::new(Algorithm::PriorityP).run(&workload).unwrap();

    // P2 needs four aging steps to reach priority 1: at t = 1 + 4*5 it
    // overtakes P1 (frozen at 2) and runs its full burst.
    assert_eq!(
        common::intervals(&outcome),
        vec![(1, 0, 21), (2, 21, 25), (1, 25, 34)]
    );
    assert_eq!(outcome.processes[1].current_priority, 1);
    assert_eq!(outcome.processes[1].waiting(), Some(20));
}
