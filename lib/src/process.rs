//! Process descriptor and its simulation outputs.
use getset::CopyGetters;

use crate::error::SchedulerError;

/// A process of the simulated batch.
///
/// Inputs (`process_id`, `arrival_time`, `burst_time`, `priority`) never change after creation.
/// `remaining_time` is consumed by the scheduler one tick at a time and the outputs
/// (`completion_time`, `turnaround_time`, `waiting_time`) are written once, when it reaches 0.
/// A lower `priority` value means a higher priority.
#[derive(Debug, Clone, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Process {
    process_id: i32,
    arrival_time: i32,
    burst_time: i32,
    priority: Option<i32>,
    remaining_time: i32,
    completion_time: i32,
    turnaround_time: i32,
    waiting_time: i32,
}

impl Process {
    pub fn new(process_id: i32, arrival_time: i32, burst_time: i32, priority: Option<i32>) -> Self {
        Self {
            process_id,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            completion_time: Default::default(),
            turnaround_time: Default::default(),
            waiting_time: Default::default(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    pub fn is_arrived(&self, current_time: i32) -> bool {
        self.arrival_time <= current_time
    }

    /// Arrived and not finished yet.
    pub fn is_eligible(&self, current_time: i32) -> bool {
        self.is_arrived(current_time) && !self.is_finished()
    }

    pub fn require_priority(&self) -> Result<i32, SchedulerError> {
        self.priority.ok_or(SchedulerError::MissingPriority {
            process_id: self.process_id,
        })
    }

    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.arrival_time < 0 {
            return Err(SchedulerError::InvalidProcess {
                process_id: self.process_id,
                reason: format!("negative arrival time {}", self.arrival_time),
            });
        }
        if self.burst_time <= 0 {
            return Err(SchedulerError::InvalidProcess {
                process_id: self.process_id,
                reason: format!("burst time must be positive, got {}", self.burst_time),
            });
        }
        Ok(())
    }

    pub(crate) fn execute_one_tick(&mut self) {
        if self.remaining_time > 0 {
            self.remaining_time -= 1;
        }
    }

    pub(crate) fn finish(&mut self, completion_time: i32) {
        self.completion_time = completion_time;
        self.turnaround_time = completion_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_new_normal() {
        let process = Process::new(1, 2, 5, Some(3));
        assert_eq!(process.process_id(), 1);
        assert_eq!(process.arrival_time(), 2);
        assert_eq!(process.burst_time(), 5);
        assert_eq!(process.priority(), Some(3));
        assert_eq!(process.remaining_time(), 5);
        assert_eq!(process.completion_time(), 0);
        assert_eq!(process.turnaround_time(), 0);
        assert_eq!(process.waiting_time(), 0);
    }

    #[test]
    fn test_process_execute_one_tick_stops_at_zero() {
        let mut process = Process::new(0, 0, 1, None);
        process.execute_one_tick();
        assert!(process.is_finished());
        process.execute_one_tick();
        assert_eq!(process.remaining_time(), 0);
    }

    #[test]
    fn test_process_finish_derives_outputs() {
        let mut process = Process::new(0, 1, 3, None);
        process.finish(8);
        assert_eq!(process.completion_time(), 8);
        assert_eq!(process.turnaround_time(), 7);
        assert_eq!(process.waiting_time(), 4);
    }

    #[test]
    fn test_process_is_eligible() {
        let mut process = Process::new(0, 2, 1, None);
        assert!(!process.is_eligible(1));
        assert!(process.is_eligible(2));
        process.execute_one_tick();
        assert!(!process.is_eligible(3));
    }

    #[test]
    fn test_process_require_priority_missing() {
        let process = Process::new(4, 0, 1, None);
        assert_eq!(
            process.require_priority(),
            Err(SchedulerError::MissingPriority { process_id: 4 })
        );
    }

    #[test]
    fn test_process_validate_non_positive_burst() {
        assert!(Process::new(0, 0, 0, None).validate().is_err());
        assert!(Process::new(0, -1, 2, None).validate().is_err());
        assert!(Process::new(0, 0, 2, None).validate().is_ok());
    }
}
