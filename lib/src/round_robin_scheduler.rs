use std::collections::VecDeque;

use log::info;

use crate::{
    error::SchedulerError,
    process::Process,
    scheduler::{validate_processes, ScheduleOutput, SchedulerBase, SchedulerContext, SortKey},
};

/// Round robin with a fixed time quantum.
///
/// Arrived processes join the tail of the ready queue in arrival order (stable for equal arrival
/// times). The head of the queue runs for at most `time_quantum` ticks. If it still has remaining
/// time afterwards, the processes that arrived during its slice are enqueued first and then the
/// preempted process is put back at the tail.
#[derive(Clone)]
pub struct RoundRobinScheduler {
    processes: Vec<Process>,
    time_quantum: i32,
}

impl RoundRobinScheduler {
    pub fn new(processes: Vec<Process>, time_quantum: i32) -> Self {
        Self {
            processes,
            time_quantum,
        }
    }
}

fn enqueue_arrived_processes(
    not_arrived: &mut VecDeque<usize>,
    ready_queue: &mut VecDeque<usize>,
    processes: &[Process],
    current_time: i32,
) {
    while let Some(&index) = not_arrived.front() {
        if !processes[index].is_arrived(current_time) {
            break;
        }
        ready_queue.push_back(index);
        not_arrived.pop_front();
    }
}

impl SchedulerBase for RoundRobinScheduler {
    fn schedule(&mut self) -> Result<ScheduleOutput, SchedulerError> {
        if self.time_quantum <= 0 {
            return Err(SchedulerError::InvalidTimeQuantum(self.time_quantum));
        }
        validate_processes(&self.processes, SortKey::ArrivalTime)?;
        info!(
            "Round robin scheduling of {} processes with time quantum {}",
            self.processes.len(),
            self.time_quantum
        );

        let mut not_arrived: Vec<usize> = (0..self.processes.len()).collect();
        not_arrived.sort_by_key(|&index| self.processes[index].arrival_time());
        let mut not_arrived = VecDeque::from(not_arrived);
        let mut ready_queue = VecDeque::new();

        let mut context = SchedulerContext::new(std::mem::take(&mut self.processes));
        loop {
            enqueue_arrived_processes(
                &mut not_arrived,
                &mut ready_queue,
                context.processes(),
                context.current_time(),
            );

            let Some(index) = ready_queue.pop_front() else {
                let Some(&next_index) = not_arrived.front() else {
                    break;
                };
                // Nothing has arrived yet.
                context.idle_until(context.processes()[next_index].arrival_time());
                continue;
            };

            let time_slice = context.processes()[index]
                .remaining_time()
                .min(self.time_quantum);
            context.dispatch(index);
            for _ in 0..time_slice {
                context.tick();
            }

            if !context.processes()[index].is_finished() {
                enqueue_arrived_processes(
                    &mut not_arrived,
                    &mut ready_queue,
                    context.processes(),
                    context.current_time(),
                );
                ready_queue.push_back(index);
            }
        }
        Ok(context.into_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{non_preemptive_scheduler::NonPreemptiveScheduler, scheduler::ExecutionSegment};

    fn create_process(process_id: i32, arrival_time: i32, burst_time: i32) -> Process {
        Process::new(process_id, arrival_time, burst_time, None)
    }

    fn completion_times(processes: &[Process]) -> Vec<(i32, i32)> {
        processes
            .iter()
            .map(|process| (process.process_id(), process.completion_time()))
            .collect()
    }

    #[test]
    fn test_round_robin_arrival_enqueued_before_requeue() {
        let processes = vec![create_process(1, 0, 4), create_process(2, 1, 3)];
        let mut scheduler = RoundRobinScheduler::new(processes, 2);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 6), (2, 7)]);
        let segments: Vec<(i32, i32, i32)> = output
            .execution_segments
            .iter()
            .map(|s| (s.process_id, s.start_time, s.finish_time))
            .collect();
        assert_eq!(segments, vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7)]);
    }

    #[test]
    fn test_round_robin_single_process_keeps_core() {
        let processes = vec![create_process(1, 0, 5)];
        let mut scheduler = RoundRobinScheduler::new(processes, 2);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 5)]);
        assert_eq!(
            output.execution_segments,
            vec![ExecutionSegment {
                process_id: 1,
                start_time: 0,
                finish_time: 5
            }]
        );
    }

    #[test]
    fn test_round_robin_idle_until_arrival() {
        let processes = vec![create_process(1, 2, 1), create_process(2, 6, 3)];
        let mut scheduler = RoundRobinScheduler::new(processes, 2);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 3), (2, 9)]);
        assert!(output.processes.iter().all(|p| p.waiting_time() == 0));
    }

    #[test]
    fn test_round_robin_far_arrival_jumps_idle_time() {
        let processes = vec![create_process(1, 2_000_000_000, 3)];
        let mut scheduler = RoundRobinScheduler::new(processes, 2);
        let output = scheduler.schedule().unwrap();

        assert_eq!(completion_times(&output.processes), vec![(1, 2_000_000_003)]);
        assert_eq!(output.execution_segments[0].start_time, 2_000_000_000);
    }

    #[test]
    fn test_round_robin_unsorted_input() {
        let processes = vec![
            create_process(1, 3, 2),
            create_process(2, 0, 3),
            create_process(3, 0, 1),
        ];
        let mut scheduler = RoundRobinScheduler::new(processes, 1);
        let output = scheduler.schedule().unwrap();

        // t0 P2, t1 P3 done, t2 P2, t3 P1 arrives before P2 is requeued.
        assert_eq!(
            completion_times(&output.processes),
            vec![(3, 2), (2, 5), (1, 6)]
        );
    }

    #[test]
    fn test_round_robin_large_quantum_equals_fcfs() {
        let processes = vec![
            create_process(1, 0, 5),
            create_process(2, 1, 3),
            create_process(3, 2, 8),
            create_process(4, 20, 2),
        ];
        let max_burst = processes.iter().map(|p| p.burst_time()).max().unwrap();

        let round_robin = RoundRobinScheduler::new(processes.clone(), max_burst)
            .schedule()
            .unwrap();
        let fcfs = NonPreemptiveScheduler::new(processes, SortKey::ArrivalTime)
            .schedule()
            .unwrap();

        assert_eq!(
            completion_times(&round_robin.processes),
            completion_times(&fcfs.processes)
        );
    }

    #[test]
    fn test_round_robin_invalid_time_quantum() {
        for time_quantum in [0, -3] {
            let mut scheduler =
                RoundRobinScheduler::new(vec![create_process(1, 0, 1)], time_quantum);
            assert_eq!(
                scheduler.schedule().unwrap_err(),
                SchedulerError::InvalidTimeQuantum(time_quantum)
            );
        }
    }

    #[test]
    fn test_round_robin_empty_batch() {
        let mut scheduler = RoundRobinScheduler::new(Vec::new(), 3);
        let output = scheduler.schedule().unwrap();
        assert!(output.processes.is_empty());
    }
}
