//! Create process batches from text files
//!
//! One process per line, whitespace-separated integers:
//! `process_id arrival_time burst_time [priority]`.
use crate::{error::ParseError, process::Process};

use log::{info, warn};
use std::{fs, path::PathBuf};

fn parse_field(line: &str, field: &str) -> Result<i32, ParseError> {
    field.parse::<i32>().map_err(|_| ParseError::InvalidInteger {
        line: line.to_string(),
        field: field.to_string(),
    })
}

/// parse one line and return a process
///
/// # Arguments
///
/// *  `line` - `process_id arrival_time burst_time [priority]`
///
/// # Returns
///
/// *  `Ok(None)` for a blank line, `Ok(Some(process))` for a valid line
///
/// # Example
///
/// ```
/// use lib::process_creator::create_process_from_line;
///
/// let process = create_process_from_line("3 0 5 2").unwrap().unwrap();
/// assert_eq!(process.priority(), Some(2));
/// let process = create_process_from_line("4 1 6").unwrap().unwrap();
/// assert_eq!(process.priority(), None);
/// ```
pub fn create_process_from_line(line: &str) -> Result<Option<Process>, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if fields.len() != 3 && fields.len() != 4 {
        return Err(ParseError::InvalidFieldCount {
            line: line.to_string(),
            field_count: fields.len(),
        });
    }

    let values = fields
        .iter()
        .map(|field| parse_field(line, field))
        .collect::<Result<Vec<i32>, ParseError>>()?;
    let (process_id, arrival_time, burst_time) = (values[0], values[1], values[2]);
    let priority = values.get(3).copied();

    if arrival_time < 0 {
        return Err(ParseError::InvalidValue {
            line: line.to_string(),
            reason: format!("arrival time {} is negative", arrival_time),
        });
    }
    if burst_time <= 0 {
        return Err(ParseError::InvalidValue {
            line: line.to_string(),
            reason: format!("burst time {} is not positive", burst_time),
        });
    }

    Ok(Some(Process::new(
        process_id,
        arrival_time,
        burst_time,
        priority,
    )))
}

/// load a text file and return the process batch in file order
///
/// Malformed lines are logged and skipped.
pub fn create_processes_from_file(file_path: &str) -> Result<Vec<Process>, ParseError> {
    let contents = fs::read_to_string(file_path).map_err(|source| ParseError::Io {
        path: file_path.to_string(),
        source,
    })?;

    let mut processes = Vec::new();
    for line in contents.lines() {
        match create_process_from_line(line) {
            Ok(Some(process)) => processes.push(process),
            Ok(None) => {}
            Err(err) => warn!("Invalid data in {}: {}", file_path, err),
        }
    }
    info!("Loaded {} processes from {}", processes.len(), file_path);
    Ok(processes)
}

/// list the process files (`*.txt`) of a directory, sorted by path
pub fn get_input_paths_from_dir(dir_path: &str) -> Result<Vec<String>, ParseError> {
    let metadata = fs::metadata(dir_path).map_err(|source| ParseError::Io {
        path: dir_path.to_string(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ParseError::InvalidDirectory {
            path: dir_path.to_string(),
            reason: "not a directory".to_string(),
        });
    }

    let read_dir = PathBuf::from(dir_path)
        .read_dir()
        .map_err(|source| ParseError::Io {
            path: dir_path.to_string(),
            source,
        })?;
    let mut file_path_list = Vec::new();
    for dir_entry_result in read_dir {
        let path = dir_entry_result
            .map_err(|source| ParseError::Io {
                path: dir_path.to_string(),
                source,
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|extension| extension == "txt") {
            file_path_list.push(path.to_string_lossy().into_owned());
        }
    }
    if file_path_list.is_empty() {
        return Err(ParseError::InvalidDirectory {
            path: dir_path.to_string(),
            reason: "no process file (*.txt) found".to_string(),
        });
    }
    file_path_list.sort();
    Ok(file_path_list)
}
