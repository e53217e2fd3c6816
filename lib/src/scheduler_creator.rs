use std::fmt;

use log::info;

use crate::{
    error::SchedulerError,
    metrics::{
        average_turnaround_time, average_waiting_time, calculate_cpu_utilization,
        get_schedule_length,
    },
    non_preemptive_scheduler::NonPreemptiveScheduler,
    preemptive_scheduler::PreemptiveScheduler,
    process::Process,
    round_robin_scheduler::RoundRobinScheduler,
    scheduler::{ExecutionSegment, SchedulerBase, SortKey},
    timeline::{create_timeline, TimelineInterval},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    SjfNonPreemptive,
    Srtf,
    RoundRobin { time_quantum: i32 },
    PriorityPreemptive,
    PriorityNonPreemptive,
}

impl Policy {
    pub fn requires_priority(&self) -> bool {
        matches!(
            self,
            Policy::PriorityPreemptive | Policy::PriorityNonPreemptive
        )
    }

    /// Rejects a parameter the policy cannot run with.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        match self {
            Policy::RoundRobin { time_quantum } if *time_quantum <= 0 => {
                Err(SchedulerError::InvalidTimeQuantum(*time_quantum))
            }
            _ => Ok(()),
        }
    }

    /// Short name usable in file names.
    pub fn slug(&self) -> String {
        match self {
            Policy::Fcfs => "fcfs".to_string(),
            Policy::SjfNonPreemptive => "sjf".to_string(),
            Policy::Srtf => "srtf".to_string(),
            Policy::RoundRobin { time_quantum } => format!("rr_q{}", time_quantum),
            Policy::PriorityPreemptive => "priority_preemptive".to_string(),
            Policy::PriorityNonPreemptive => "priority_non_preemptive".to_string(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "FCFS (First Come First Serve)"),
            Policy::SjfNonPreemptive => write!(f, "SJF (Shortest Job First)"),
            Policy::Srtf => write!(f, "SRTF (Shortest Remaining Time First)"),
            Policy::RoundRobin { time_quantum } => {
                write!(f, "RR (Round Robin) with Time Quantum {}", time_quantum)
            }
            Policy::PriorityPreemptive => write!(f, "Priority Preemptive"),
            Policy::PriorityNonPreemptive => write!(f, "Priority Non Preemptive"),
        }
    }
}

pub fn create_scheduler(policy: Policy, processes: Vec<Process>) -> Box<dyn SchedulerBase> {
    match policy {
        Policy::Fcfs => Box::new(NonPreemptiveScheduler::new(processes, SortKey::ArrivalTime)),
        Policy::SjfNonPreemptive => {
            Box::new(NonPreemptiveScheduler::new(processes, SortKey::BurstTime))
        }
        Policy::Srtf => Box::new(PreemptiveScheduler::new(processes, SortKey::RemainingTime)),
        Policy::RoundRobin { time_quantum } => {
            Box::new(RoundRobinScheduler::new(processes, time_quantum))
        }
        Policy::PriorityPreemptive => {
            Box::new(PreemptiveScheduler::new(processes, SortKey::Priority))
        }
        Policy::PriorityNonPreemptive => {
            Box::new(NonPreemptiveScheduler::new(processes, SortKey::Priority))
        }
    }
}

/// Outcome of one policy run over one batch.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub policy: Policy,
    /// The batch in completion order.
    pub processes: Vec<Process>,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub schedule_length: i32,
    pub cpu_utilization: f64,
    pub timeline: Vec<TimelineInterval>,
    pub execution_segments: Vec<ExecutionSegment>,
}

/// Runs `policy` over `processes` and derives the metrics and the timeline.
///
/// The batch is consumed. To compare several policies on the same input, pass a clone per run.
///
/// # Example
///
/// ```
/// use lib::process::Process;
/// use lib::scheduler_creator::{simulate, Policy};
///
/// let processes = vec![Process::new(1, 0, 4, None), Process::new(2, 1, 3, None)];
/// let result = simulate(Policy::RoundRobin { time_quantum: 2 }, processes).unwrap();
/// assert_eq!(result.processes[0].completion_time(), 6);
/// assert_eq!(result.processes[1].completion_time(), 7);
/// ```
pub fn simulate(policy: Policy, processes: Vec<Process>) -> Result<SimulationResult, SchedulerError> {
    policy.validate()?;
    info!("Simulating {} over {} processes", policy, processes.len());

    let output = create_scheduler(policy, processes).schedule()?;
    let processes = output.processes;

    Ok(SimulationResult {
        policy,
        average_waiting_time: average_waiting_time(&processes),
        average_turnaround_time: average_turnaround_time(&processes),
        schedule_length: get_schedule_length(&processes),
        cpu_utilization: calculate_cpu_utilization(&processes),
        timeline: create_timeline(&processes),
        execution_segments: output.execution_segments,
        processes,
    })
}
