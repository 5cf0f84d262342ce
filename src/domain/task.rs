// src/domain/task.rs

use std::time::Duration;

use super::{Resource, Worker, single_symbol};

/// A unit of work owned by exactly one worker.
///
/// Inputs must be produced by other tasks before this one may start; outputs
/// become available to consumers once this task has received all of its
/// working slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub inputs: Vec<Resource>,
    pub outputs: Vec<Resource>,
    pub worker: Worker,
    pub duration: Duration,
    /// Character shown in the per-worker activity grid.
    pub symbol: char,
}

impl Task {
    pub fn new(id: impl Into<String>, worker: Worker, duration: Duration) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            worker,
            duration,
            symbol: '*',
        }
    }

    pub fn with_input(mut self, resource: Resource) -> Self {
        self.inputs.push(resource);
        self
    }

    pub fn with_output(mut self, resource: Resource) -> Self {
        self.outputs.push(resource);
        self
    }

    pub fn with_inputs(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.inputs.extend(resources);
        self
    }

    pub fn with_outputs(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.outputs.extend(resources);
        self
    }

    /// Sets the display symbol; anything but a single character becomes `*`.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = single_symbol(symbol);
        self
    }
}
