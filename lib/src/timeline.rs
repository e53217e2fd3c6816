//! Completion-ordered timeline (Gantt chart) of a scheduled batch.
use serde_derive::{Deserialize, Serialize};

use crate::process::Process;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineInterval {
    pub process_id: i32,
    pub start_time: i32,
    pub end_time: i32,
}

impl TimelineInterval {
    pub fn length(&self) -> i32 {
        self.end_time - self.start_time
    }
}

/// Builds one interval per process, the first one starting at 0 and every next one starting
/// where the previous ended.
///
/// `processes` must be in completion order. Each interval covers the time elapsed since the
/// previous completion, so idle gaps and earlier slices of a preempted process are attributed
/// to the process that completes next.
pub fn create_timeline(processes: &[Process]) -> Vec<TimelineInterval> {
    let mut previous_completion_time = 0;
    processes
        .iter()
        .map(|process| {
            let interval = TimelineInterval {
                process_id: process.process_id(),
                start_time: previous_completion_time,
                end_time: process.completion_time(),
            };
            previous_completion_time = process.completion_time();
            interval
        })
        .collect()
}

/// Renders intervals as ` |-----P1|---P2|`, one `-` per tick.
pub fn render_gantt_chart(timeline: &[TimelineInterval]) -> String {
    if timeline.is_empty() {
        return String::new();
    }
    let mut gantt_chart = String::from(" ");
    for interval in timeline {
        gantt_chart.push('|');
        gantt_chart.push_str(&"-".repeat(interval.length().max(0) as usize));
        gantt_chart.push_str(&format!("P{}", interval.process_id));
    }
    gantt_chart.push('|');
    gantt_chart
}
