//! This module contains the definition of the core and the process result enum
use crate::{core::ProcessResult::*, process::Process};
use log::warn;

///enum to represent three types of states
///execution not possible because not allocate, execution in progress, execution finished
///`Done` carries the batch index of the finished process.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessResult {
    Idle,
    Continue,
    Done(usize),
}

/// The single CPU of the simulation. It refers to processes by their index in the batch.
#[derive(Clone, Default)]
pub struct Core {
    processing_index: Option<usize>,
}

///return bool since "panic!" would terminate
impl Core {
    pub fn is_idle(&self) -> bool {
        self.processing_index.is_none()
    }

    pub fn processing_index(&self) -> Option<usize> {
        self.processing_index
    }

    pub fn allocate(&mut self, process_index: usize, process: &Process) -> bool {
        if !self.is_idle() {
            warn!("Core is already allocated to a process");
            return false;
        }
        if process.is_finished() {
            warn!(
                "Process {} does not have remaining time",
                process.process_id()
            );
            return false;
        }
        self.processing_index = Some(process_index);
        true
    }

    pub fn process(&mut self, processes: &mut [Process]) -> ProcessResult {
        let Some(index) = self.processing_index else {
            return Idle;
        };
        let process = &mut processes[index];
        process.execute_one_tick();
        if process.is_finished() {
            self.processing_index = None;
            return Done(index);
        }
        Continue
    }

    /// Takes the running process off the core and returns its index.
    pub fn preempt(&mut self) -> Option<usize> {
        self.processing_index.take()
    }
}
