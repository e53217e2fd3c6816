//! Aggregate metrics over a scheduled batch. Every metric of an empty batch is 0.
use crate::process::Process;

pub fn average_turnaround_time(processes: &[Process]) -> f64 {
    if processes.is_empty() {
        return 0.0;
    }
    processes
        .iter()
        .map(|process| process.turnaround_time() as f64)
        .sum::<f64>()
        / processes.len() as f64
}

pub fn average_waiting_time(processes: &[Process]) -> f64 {
    if processes.is_empty() {
        return 0.0;
    }
    processes
        .iter()
        .map(|process| process.waiting_time() as f64)
        .sum::<f64>()
        / processes.len() as f64
}

/// Time at which the last process of the batch finished.
pub fn get_schedule_length(processes: &[Process]) -> i32 {
    processes
        .iter()
        .map(|process| process.completion_time())
        .max()
        .unwrap_or(0)
}

/// Share of the schedule length during which the core was busy.
pub fn calculate_cpu_utilization(processes: &[Process]) -> f64 {
    let schedule_length = get_schedule_length(processes);
    if schedule_length == 0 {
        return 0.0;
    }
    let total_burst_time: i32 = processes.iter().map(|process| process.burst_time()).sum();
    total_burst_time as f64 / schedule_length as f64
}
