mod outputs_result;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lib::{
    log::SimulationLog,
    output_log::create_scheduler_log_yaml_file,
    process::Process,
    process_creator::{create_processes_from_file, get_input_paths_from_dir},
    scheduler_creator::{simulate, Policy, SimulationResult},
};
use log::{error, info};
use outputs_result::*;
use std::fs;

const COMPARISON_FILE_NAME: &str = "comparison.yaml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// First come first serve.
    Fcfs,
    /// Shortest job first (non-preemptive).
    Sjf,
    /// Shortest remaining time first (preemptive).
    Srtf,
    /// Round robin, see --time_quantum.
    Rr,
    PriorityPreemptive,
    PriorityNonPreemptive,
}

impl Algorithm {
    fn to_policy(self, time_quantum: i32) -> Policy {
        match self {
            Algorithm::Fcfs => Policy::Fcfs,
            Algorithm::Sjf => Policy::SjfNonPreemptive,
            Algorithm::Srtf => Policy::Srtf,
            Algorithm::Rr => Policy::RoundRobin { time_quantum },
            Algorithm::PriorityPreemptive => Policy::PriorityPreemptive,
            Algorithm::PriorityNonPreemptive => Policy::PriorityNonPreemptive,
        }
    }
}

#[derive(Parser)]
#[clap(
    name = "CPU_Scheduling_Simulator",
    version = "1.0",
    about = "About:
    Simulates CPU scheduling algorithms over a batch of processes.
    Each line of a process file is `process_id arrival_time burst_time [priority]`.
    Passing several algorithms compares them on the same batch."
)]
struct ArgParser {
    ///Path to a process file. If omitted, every *.txt file of the input directory is simulated.
    #[clap(short = 'f', long = "input_file_path")]
    input_file_path: Option<String>,
    ///Path to the directory holding process files.
    #[clap(short = 'd', long = "input_dir_path", default_value = "../inputs")]
    input_dir_path: String,
    ///Scheduling algorithms to run.
    #[clap(short = 'a', long = "algorithm", value_enum, num_args = 1.., required = true)]
    algorithms: Vec<Algorithm>,
    ///Time quantum of round robin.
    #[clap(
        short = 'q',
        long = "time_quantum",
        default_value = "4",
        allow_negative_numbers = true
    )]
    time_quantum: i32,
    ///Path to output directory.
    #[clap(short = 'o', long = "output_dir_path", default_value = "../outputs")]
    output_dir_path: String,
    ///Do not write the YAML run logs and the comparison log.
    #[clap(long = "no_log")]
    no_log: bool,
}

fn run_policy(
    arg: &ArgParser,
    policy: Policy,
    processes: &[Process],
    input_path: &str,
) -> Result<Option<SimulationResult>> {
    if policy.requires_priority() {
        if let Some(process) = processes.iter().find(|process| process.priority().is_none()) {
            error!(
                "{} skipped on {}: process {} has no priority",
                policy,
                input_path,
                process.process_id()
            );
            return Ok(None);
        }
    }
    // Every run gets its own copy, the schedulers consume their batch.
    let result = match simulate(policy, processes.to_vec()) {
        Ok(result) => result,
        Err(err) => {
            error!("{} cannot run on {}: {}", policy, input_path, err);
            return Ok(None);
        }
    };
    println!("{}", format_result_table(&result));

    if !arg.no_log {
        let file_path = create_scheduler_log_yaml_file(&arg.output_dir_path, &policy.slug())
            .with_context(|| format!("Failed to create a log file in {}", arg.output_dir_path))?;
        SimulationLog::new(&result, input_path)
            .dump_log_to_yaml(&file_path)
            .with_context(|| format!("Failed to write to file: {}", file_path))?;
        info!("Run log written to {}", file_path);

        let comparison_file_path = format!("{}/{}", arg.output_dir_path, COMPARISON_FILE_NAME);
        dump_comparison_entry_to_file(
            &comparison_file_path,
            &ComparisonEntry::new(&result, input_path),
        )?;
        sort_comparison_log(&comparison_file_path)?;
    }
    Ok(Some(result))
}

fn main() -> Result<()> {
    env_logger::init();
    let arg: ArgParser = ArgParser::parse();

    let policies: Vec<Policy> = arg
        .algorithms
        .iter()
        .map(|algorithm| algorithm.to_policy(arg.time_quantum))
        .collect();
    for policy in &policies {
        policy
            .validate()
            .with_context(|| format!("Invalid parameter for {}", policy))?;
    }

    let input_paths = match &arg.input_file_path {
        Some(input_file_path) => vec![input_file_path.clone()],
        None => get_input_paths_from_dir(&arg.input_dir_path)?,
    };
    if !arg.no_log {
        fs::create_dir_all(&arg.output_dir_path)
            .with_context(|| format!("Failed to create folder: {}", arg.output_dir_path))?;
    }

    for input_path in &input_paths {
        let processes = create_processes_from_file(input_path)?;
        let mut results = Vec::with_capacity(policies.len());
        for policy in &policies {
            if let Some(result) = run_policy(&arg, *policy, &processes, input_path)? {
                results.push(result);
            }
        }
        if results.len() > 1 {
            println!("{}", format_comparison(input_path, &results));
        }
    }
    Ok(())
}
