//! Error types of the simulator library.
use std::fmt;

/// Errors raised before or while running a scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Round robin was asked to run with a quantum that is not positive.
    InvalidTimeQuantum(i32),
    /// A priority based policy was given a process without priority.
    MissingPriority { process_id: i32 },
    /// The batch holds a process that can never be scheduled correctly.
    InvalidProcess { process_id: i32, reason: String },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::InvalidTimeQuantum(time_quantum) => {
                write!(f, "time quantum must be positive, got {}", time_quantum)
            }
            SchedulerError::MissingPriority { process_id } => write!(
                f,
                "process {} has no priority, which this policy requires",
                process_id
            ),
            SchedulerError::InvalidProcess { process_id, reason } => {
                write!(f, "process {} is invalid: {}", process_id, reason)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Errors raised while reading process descriptors.
#[derive(Debug)]
pub enum ParseError {
    /// A line holds neither three nor four fields.
    InvalidFieldCount { line: String, field_count: usize },
    /// A field is not an integer.
    InvalidInteger { line: String, field: String },
    /// A field is an integer outside its allowed range.
    InvalidValue { line: String, reason: String },
    /// The input path is not a usable directory or holds no input files.
    InvalidDirectory { path: String, reason: String },
    Io { path: String, source: std::io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFieldCount { line, field_count } => write!(
                f,
                "expected 3 or 4 fields but found {} in line: {}",
                field_count, line
            ),
            ParseError::InvalidInteger { line, field } => {
                write!(f, "'{}' is not an integer in line: {}", field, line)
            }
            ParseError::InvalidValue { line, reason } => {
                write!(f, "{} in line: {}", reason, line)
            }
            ParseError::InvalidDirectory { path, reason } => {
                write!(f, "{}: {}", path, reason)
            }
            ParseError::Io { path, source } => write!(f, "failed to read {}: {}", path, source),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
