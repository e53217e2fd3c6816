use anyhow::{Context, Result};
use lib::{
    output_log::append_info_to_yaml, scheduler_creator::SimulationResult,
    timeline::render_gantt_chart,
};
use serde_derive::{Deserialize, Serialize};
use std::{cmp::Ordering, fs};
use yaml_rust::{Yaml, YamlLoader};

const SEPARATOR: &str =
    "--------------------------------------------------------------------------------------------------";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub algorithm: String,
    pub input_file: String,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
}

impl ComparisonEntry {
    pub fn new(result: &SimulationResult, input_file: &str) -> Self {
        Self {
            algorithm: result.policy.to_string(),
            input_file: input_file.to_string(),
            average_waiting_time: result.average_waiting_time,
            average_turnaround_time: result.average_turnaround_time,
        }
    }

    fn from_yaml(yaml: &Yaml) -> Option<Self> {
        fn as_number(yaml: &Yaml) -> Option<f64> {
            yaml.as_f64().or_else(|| yaml.as_i64().map(|value| value as f64))
        }
        Some(Self {
            algorithm: yaml["algorithm"].as_str()?.to_string(),
            input_file: yaml["input_file"].as_str()?.to_string(),
            average_waiting_time: as_number(&yaml["average_waiting_time"])?,
            average_turnaround_time: as_number(&yaml["average_turnaround_time"])?,
        })
    }
}

pub fn format_result_table(result: &SimulationResult) -> String {
    let mut table = format!("\nResult Table {}:\n", result.policy);
    table.push_str(
        "ProcessID\tArrivalTime\tBurstTime\tPriority\tCompletionTime\tTurnaroundTime\tWaitingTime\n",
    );
    for process in &result.processes {
        let priority = process
            .priority()
            .map_or_else(|| "No Priority".to_string(), |priority| priority.to_string());
        table.push_str(&format!(
            "{}\t\t\t{}\t\t\t{}\t\t\t{}\t\t\t{}\t\t\t\t{}\t\t\t\t{}\n",
            process.process_id(),
            process.arrival_time(),
            process.burst_time(),
            priority,
            process.completion_time(),
            process.turnaround_time(),
            process.waiting_time()
        ));
    }
    table.push_str(&format!(
        "\nAverage Waiting Time: {}\n",
        result.average_waiting_time
    ));
    table.push_str(&format!(
        "Average Turnaround Time: {}\n",
        result.average_turnaround_time
    ));
    table.push_str("\nGantt Chart: \n\n");
    table.push_str(&render_gantt_chart(&result.timeline));
    table.push_str(&format!("\n\n{}\n", SEPARATOR));
    table
}

pub fn format_comparison(input_file: &str, results: &[SimulationResult]) -> String {
    let mut comparison = format!(
        "Comparing {} algorithms for {}:\n",
        results.len(),
        input_file
    );
    for result in results {
        comparison.push_str(&format!(
            "Algorithm: {}\nAverage Waiting Time: {}\nAverage Turnaround Time: {}\n\n",
            result.policy, result.average_waiting_time, result.average_turnaround_time
        ));
    }
    comparison
}

pub fn load_yaml(file_path: &str) -> Result<Vec<Yaml>> {
    let contents =
        fs::read_to_string(file_path).with_context(|| format!("Failed to read {}", file_path))?;
    YamlLoader::load_from_str(&contents).with_context(|| format!("Failed to parse {}", file_path))
}

/// Appends one entry to the comparison log, a YAML sequence of entries.
pub fn dump_comparison_entry_to_file(file_path: &str, entry: &ComparisonEntry) -> Result<()> {
    let yaml = serde_yaml::to_string(&[entry]).context("Failed to serialize comparison entry")?;
    append_info_to_yaml(file_path, &yaml)
        .with_context(|| format!("Failed to write to file: {}", file_path))
}

/// Rewrites the comparison log sorted by ascending average waiting time.
pub fn sort_comparison_log(file_path: &str) -> Result<Vec<ComparisonEntry>> {
    let yaml_docs = load_yaml(file_path)?;
    let Some(yaml_doc) = yaml_docs.first() else {
        return Ok(Vec::new());
    };
    let mut entries = yaml_doc
        .as_vec()
        .with_context(|| format!("{} is not a list of comparison entries", file_path))?
        .iter()
        .map(|yaml| {
            ComparisonEntry::from_yaml(yaml)
                .with_context(|| format!("Malformed comparison entry in {}", file_path))
        })
        .collect::<Result<Vec<ComparisonEntry>>>()?;

    entries.sort_by(|a, b| {
        a.average_waiting_time
            .partial_cmp(&b.average_waiting_time)
            .unwrap_or(Ordering::Equal)
    });

    let yaml = serde_yaml::to_string(&entries).context("Failed to serialize comparison entries")?;
    fs::write(file_path, yaml).with_context(|| format!("Failed to write to file: {}", file_path))?;
    Ok(entries)
}
