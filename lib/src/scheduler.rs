use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::{
    core::{Core, ProcessResult},
    error::SchedulerError,
    process::Process,
};

/// Ordering key a policy dispatches by. Smaller values are dispatched first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ArrivalTime,
    BurstTime,
    RemainingTime,
    Priority,
}

impl SortKey {
    pub fn requires_priority(&self) -> bool {
        matches!(self, SortKey::Priority)
    }

    /// Primary key of `process`. Ties are broken by arrival time, then by batch order.
    pub fn primary(&self, process: &Process) -> i32 {
        match self {
            SortKey::ArrivalTime => process.arrival_time(),
            SortKey::BurstTime => process.burst_time(),
            SortKey::RemainingTime => process.remaining_time(),
            // The batch is validated before scheduling, so the fallback is never compared.
            SortKey::Priority => process.priority().unwrap_or(i32::MAX),
        }
    }
}

/// A maximal stretch of ticks during which one process held the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSegment {
    pub process_id: i32,
    pub start_time: i32,
    pub finish_time: i32,
}

/// What a scheduler hands back: the batch in completion order and the core occupancy.
#[derive(Debug, Clone, Default)]
pub struct ScheduleOutput {
    pub processes: Vec<Process>,
    pub execution_segments: Vec<ExecutionSegment>,
}

pub trait SchedulerBase {
    /// Runs the policy over the owned batch until every process has finished.
    ///
    /// The batch is moved out of the scheduler, so a second call schedules an empty batch.
    fn schedule(&mut self) -> Result<ScheduleOutput, SchedulerError>;
}

fn schedule_overflow(process: &Process) -> SchedulerError {
    SchedulerError::InvalidProcess {
        process_id: process.process_id(),
        reason: format!("the schedule would end after time {}", i32::MAX),
    }
}

/// Checks every process and that the latest arrival plus the total burst time fits the clock.
pub fn validate_processes(processes: &[Process], sort_key: SortKey) -> Result<(), SchedulerError> {
    let mut total_burst_time: i32 = 0;
    for process in processes {
        process.validate()?;
        if sort_key.requires_priority() {
            process.require_priority()?;
        }
        total_burst_time = total_burst_time
            .checked_add(process.burst_time())
            .ok_or_else(|| schedule_overflow(process))?;
    }
    if let Some(latest) = processes.iter().max_by_key(|process| process.arrival_time()) {
        latest
            .arrival_time()
            .checked_add(total_burst_time)
            .ok_or_else(|| schedule_overflow(latest))?;
    }
    Ok(())
}

/// Clock, core and bookkeeping shared by every policy for one run.
pub(crate) struct SchedulerContext {
    processes: Vec<Process>,
    core: Core,
    current_time: i32,
    running_since: i32,
    completion_order: Vec<usize>,
    execution_segments: Vec<ExecutionSegment>,
}

impl SchedulerContext {
    pub fn new(processes: Vec<Process>) -> Self {
        Self {
            completion_order: Vec::with_capacity(processes.len()),
            processes,
            core: Core::default(),
            current_time: 0,
            running_since: 0,
            execution_segments: Vec::new(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn current_time(&self) -> i32 {
        self.current_time
    }

    pub fn is_all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    /// Earliest arrival time still in the future, if any.
    pub fn next_arrival_time(&self) -> Option<i32> {
        self.processes
            .iter()
            .filter(|process| !process.is_arrived(self.current_time))
            .map(|process| process.arrival_time())
            .min()
    }

    /// Jumps the clock forward over an idle gap. Only valid while the core is idle.
    pub fn idle_until(&mut self, time: i32) {
        if self.core.is_idle() && time > self.current_time {
            self.current_time = time;
        }
    }

    /// Puts the process on the core, preempting whatever else runs there.
    pub fn dispatch(&mut self, index: usize) {
        if self.core.processing_index() == Some(index) {
            return;
        }
        self.preempt();
        if self.core.allocate(index, &self.processes[index]) {
            self.running_since = self.current_time;
        }
    }

    pub fn preempt(&mut self) -> Option<usize> {
        let index = self.core.preempt()?;
        self.record_segment(index);
        Some(index)
    }

    /// Advances the clock by one tick, serving the running process if there is one.
    pub fn tick(&mut self) -> ProcessResult {
        let result = self.core.process(&mut self.processes);
        self.current_time += 1;
        if let ProcessResult::Done(index) = result {
            self.processes[index].finish(self.current_time);
            self.record_segment(index);
            self.completion_order.push(index);
            debug!(
                "Process {} finished at {}",
                self.processes[index].process_id(),
                self.current_time
            );
        }
        result
    }

    pub fn run_to_completion(&mut self, index: usize) {
        self.dispatch(index);
        while let ProcessResult::Continue = self.tick() {}
    }

    fn record_segment(&mut self, index: usize) {
        if self.current_time > self.running_since {
            self.execution_segments.push(ExecutionSegment {
                process_id: self.processes[index].process_id(),
                start_time: self.running_since,
                finish_time: self.current_time,
            });
        }
    }

    pub fn into_output(self) -> ScheduleOutput {
        let mut slots: Vec<Option<Process>> = self.processes.into_iter().map(Some).collect();
        let processes = self
            .completion_order
            .iter()
            .filter_map(|&index| slots[index].take())
            .collect();
        ScheduleOutput {
            processes,
            execution_segments: self.execution_segments,
        }
    }
}
