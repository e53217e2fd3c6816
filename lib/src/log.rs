use serde_derive::{Deserialize, Serialize};
use std::io;

use crate::{
    output_log::append_info_to_yaml,
    process::Process,
    scheduler::ExecutionSegment,
    scheduler_creator::SimulationResult,
    timeline::TimelineInterval,
};

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    pub algorithm: String,
    pub input_file: String,
    pub number_of_processes: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub schedule_length: i32,
    pub cpu_utilization: f64,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProcessLog {
    pub process_id: i32,
    pub arrival_time: i32,
    pub burst_time: i32,
    pub priority: Option<i32>,
    pub completion_time: i32,
    pub turnaround_time: i32,
    pub waiting_time: i32,
}

impl ProcessLog {
    pub fn new(process: &Process) -> Self {
        Self {
            process_id: process.process_id(),
            arrival_time: process.arrival_time(),
            burst_time: process.burst_time(),
            priority: process.priority(),
            completion_time: process.completion_time(),
            turnaround_time: process.turnaround_time(),
            waiting_time: process.waiting_time(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProcessLogs {
    pub process_logs: Vec<ProcessLog>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TimelineLog {
    pub timeline: Vec<TimelineInterval>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ExecutionLog {
    pub execution_segments: Vec<ExecutionSegment>,
}

/// Everything one simulation run leaves behind, dumped section by section into one YAML file.
#[derive(Clone, Default)]
pub struct SimulationLog {
    pub run_info: RunInfo,
    pub process_logs: ProcessLogs,
    pub timeline_log: TimelineLog,
    pub execution_log: ExecutionLog,
}

impl SimulationLog {
    pub fn new(result: &SimulationResult, input_file: &str) -> Self {
        let run_info = RunInfo {
            algorithm: result.policy.to_string(),
            input_file: input_file.to_string(),
            number_of_processes: result.processes.len(),
            average_waiting_time: result.average_waiting_time,
            average_turnaround_time: result.average_turnaround_time,
            schedule_length: result.schedule_length,
            cpu_utilization: result.cpu_utilization,
        };

        Self {
            run_info,
            process_logs: ProcessLogs {
                process_logs: result.processes.iter().map(ProcessLog::new).collect(),
            },
            timeline_log: TimelineLog {
                timeline: result.timeline.clone(),
            },
            execution_log: ExecutionLog {
                execution_segments: result.execution_segments.clone(),
            },
        }
    }

    pub fn dump_log_to_yaml(&self, file_path: &str) -> io::Result<()> {
        self.dump_run_info_to_yaml(file_path)?;
        self.dump_process_logs_to_yaml(file_path)?;
        self.dump_timeline_to_yaml(file_path)?;
        self.dump_execution_log_to_yaml(file_path)
    }

    pub fn dump_run_info_to_yaml(&self, file_path: &str) -> io::Result<()> {
        let yaml =
            serde_yaml::to_string(&self.run_info).expect("Failed to serialize RunInfo to YAML");
        append_info_to_yaml(file_path, &yaml)
    }

    pub fn dump_process_logs_to_yaml(&self, file_path: &str) -> io::Result<()> {
        let yaml = serde_yaml::to_string(&self.process_logs)
            .expect("Failed to serialize ProcessLogs to YAML");
        append_info_to_yaml(file_path, &yaml)
    }

    pub fn dump_timeline_to_yaml(&self, file_path: &str) -> io::Result<()> {
        let yaml = serde_yaml::to_string(&self.timeline_log)
            .expect("Failed to serialize TimelineLog to YAML");
        append_info_to_yaml(file_path, &yaml)
    }

    pub fn dump_execution_log_to_yaml(&self, file_path: &str) -> io::Result<()> {
        let yaml = serde_yaml::to_string(&self.execution_log)
            .expect("Failed to serialize ExecutionLog to YAML");
        append_info_to_yaml(file_path, &yaml)
    }
}
