use log::info;

use crate::{
    error::SchedulerError,
    process::Process,
    scheduler::{validate_processes, ScheduleOutput, SchedulerBase, SchedulerContext, SortKey},
};

/// Re-decides which process holds the core at every tick.
///
/// Among the processes that have arrived and still have remaining time, the one with the
/// smallest `(sort_key, arrival_time, batch order)` runs for exactly one tick:
///
/// * `SortKey::RemainingTime` - shortest-remaining-time-first.
/// * `SortKey::Priority` - priority (preemptive), every process must carry a priority.
///
/// When no process is eligible the core idles until the next arrival.
#[derive(Clone)]
pub struct PreemptiveScheduler {
    processes: Vec<Process>,
    sort_key: SortKey,
}

impl PreemptiveScheduler {
    pub fn new(processes: Vec<Process>, sort_key: SortKey) -> Self {
        Self {
            processes,
            sort_key,
        }
    }
}

fn select_process(processes: &[Process], sort_key: SortKey, current_time: i32) -> Option<usize> {
    processes
        .iter()
        .enumerate()
        .filter(|(_, process)| process.is_eligible(current_time))
        .min_by_key(|(index, process)| (sort_key.primary(process), process.arrival_time(), *index))
        .map(|(index, _)| index)
}

impl SchedulerBase for PreemptiveScheduler {
    fn schedule(&mut self) -> Result<ScheduleOutput, SchedulerError> {
        validate_processes(&self.processes, self.sort_key)?;
        info!(
            "Preemptive scheduling of {} processes by {:?}",
            self.processes.len(),
            self.sort_key
        );

        let mut context = SchedulerContext::new(std::mem::take(&mut self.processes));
        while !context.is_all_finished() {
            let Some(index) =
                select_process(context.processes(), self.sort_key, context.current_time())
            else {
                if let Some(arrival_time) = context.next_arrival_time() {
                    context.idle_until(arrival_time);
                }
                continue;
            };
            context.dispatch(index);
            context.tick();
        }
        Ok(context.into_output())
    }
}
