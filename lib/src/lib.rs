//! library for CPU scheduling simulation.
pub mod core;
pub mod error;
pub mod log;
pub mod metrics;
pub mod non_preemptive_scheduler;
pub mod output_log;
pub mod preemptive_scheduler;
pub mod process;
pub mod process_creator;
pub mod round_robin_scheduler;
pub mod scheduler;
pub mod scheduler_creator;
pub mod timeline;
