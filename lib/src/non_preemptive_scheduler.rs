use log::info;

use crate::{
    error::SchedulerError,
    process::Process,
    scheduler::{validate_processes, ScheduleOutput, SchedulerBase, SchedulerContext, SortKey},
};

/// Runs processes one after another in a dispatch order computed once, before the first tick.
///
/// The order is a stable sort of the batch by `(sort_key, arrival_time)`:
///
/// * `SortKey::ArrivalTime` - first-come-first-served.
/// * `SortKey::BurstTime` - shortest-job-first (non-preemptive).
/// * `SortKey::Priority` - priority (non-preemptive), every process must carry a priority.
///
/// The order is not re-evaluated when the core becomes free: a process keeps its slot even if
/// it has not arrived yet, in which case the core idles until its arrival time.
#[derive(Clone)]
pub struct NonPreemptiveScheduler {
    processes: Vec<Process>,
    sort_key: SortKey,
}

impl NonPreemptiveScheduler {
    pub fn new(processes: Vec<Process>, sort_key: SortKey) -> Self {
        Self {
            processes,
            sort_key,
        }
    }

    fn dispatch_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.processes.len()).collect();
        order.sort_by_key(|&index| {
            let process = &self.processes[index];
            (self.sort_key.primary(process), process.arrival_time())
        });
        order
    }
}

impl SchedulerBase for NonPreemptiveScheduler {
    fn schedule(&mut self) -> Result<ScheduleOutput, SchedulerError> {
        validate_processes(&self.processes, self.sort_key)?;
        let order = self.dispatch_order();
        info!(
            "Non-preemptive scheduling of {} processes by {:?}",
            order.len(),
            self.sort_key
        );

        let mut context = SchedulerContext::new(std::mem::take(&mut self.processes));
        for index in order {
            context.idle_until(context.processes()[index].arrival_time());
            context.run_to_completion(index);
        }
        Ok(context.into_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_process(process_id: i32, arrival_time: i32, burst_time: i32) -> Process {
        Process::new(process_id, arrival_time, burst_time, None)
    }

    fn create_process_with_priority(
        process_id: i32,
        arrival_time: i32,
        burst_time: i32,
        priority: i32,
    ) -> Process {
        Process::new(process_id, arrival_time, burst_time, Some(priority))
    }

    fn completion_times(processes: &[Process]) -> Vec<(i32, i32)> {
        processes
            .iter()
            .map(|process| (process.process_id(), process.completion_time()))
            .collect()
    }

    #[test]
    fn test_fcfs_normal() {
        let processes = vec![
            create_process(1, 0, 5),
            create_process(2, 1, 3),
            create_process(3, 2, 8),
        ];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::ArrivalTime);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 5), (2, 8), (3, 16)]);
        let turnaround: Vec<i32> = output.processes.iter().map(|p| p.turnaround_time()).collect();
        let waiting: Vec<i32> = output.processes.iter().map(|p| p.waiting_time()).collect();
        assert_eq!(turnaround, vec![5, 7, 14]);
        assert_eq!(waiting, vec![0, 4, 6]);
    }

    #[test]
    fn test_fcfs_sorts_by_arrival_stably() {
        let processes = vec![
            create_process(1, 4, 2),
            create_process(2, 0, 1),
            create_process(3, 0, 1),
        ];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::ArrivalTime);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(2, 1), (3, 2), (1, 6)]);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let processes = vec![create_process(1, 3, 2), create_process(2, 10, 1)];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::ArrivalTime);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 5), (2, 11)]);
        assert_eq!(output.processes[0].waiting_time(), 0);
        assert_eq!(output.processes[1].waiting_time(), 0);
        assert_eq!(output.execution_segments[1].start_time, 10);
    }

    #[test]
    fn test_sjf_uses_static_burst_order() {
        // P3 is dispatched first although it arrives last.
        let processes = vec![
            create_process(1, 0, 6),
            create_process(2, 1, 4),
            create_process(3, 2, 2),
        ];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::BurstTime);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(3, 4), (2, 8), (1, 14)]);
    }

    #[test]
    fn test_sjf_ties_broken_by_arrival() {
        let processes = vec![create_process(1, 2, 3), create_process(2, 0, 3)];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::BurstTime);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(2, 3), (1, 6)]);
    }

    #[test]
    fn test_priority_non_preemptive_normal() {
        let processes = vec![
            create_process_with_priority(1, 0, 4, 2),
            create_process_with_priority(2, 1, 3, 1),
            create_process_with_priority(3, 2, 1, 2),
        ];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::Priority);
        let output = scheduler.schedule().unwrap();

        // P2 has the best priority but only arrives at 1, the core idles for one tick.
        assert_eq!(completion_times(&output.processes), vec![(2, 4), (1, 8), (3, 9)]);
    }

    #[test]
    fn test_priority_non_preemptive_missing_priority() {
        let processes = vec![
            create_process_with_priority(1, 0, 4, 2),
            create_process(2, 1, 3),
        ];
        let mut scheduler = NonPreemptiveScheduler::new(processes, SortKey::Priority);
        assert_eq!(
            scheduler.schedule().unwrap_err(),
            SchedulerError::MissingPriority { process_id: 2 }
        );
    }

    #[test]
    fn test_non_preemptive_is_idempotent() {
        let processes = vec![
            create_process_with_priority(1, 3, 4, 3),
            create_process_with_priority(2, 0, 2, 1),
            create_process_with_priority(3, 1, 6, 2),
        ];
        for sort_key in [SortKey::ArrivalTime, SortKey::BurstTime, SortKey::Priority] {
            let first = NonPreemptiveScheduler::new(processes.clone(), sort_key)
                .schedule()
                .unwrap();
            let second = NonPreemptiveScheduler::new(processes.clone(), sort_key)
                .schedule()
                .unwrap();
            assert_eq!(
                completion_times(&first.processes),
                completion_times(&second.processes)
            );
        }
    }

    #[test]
    fn test_non_preemptive_empty_batch() {
        let mut scheduler = NonPreemptiveScheduler::new(Vec::new(), SortKey::ArrivalTime);
        let output = scheduler.schedule().unwrap();
        assert!(output.processes.is_empty());
        assert!(output.execution_segments.is_empty());
    }
}
