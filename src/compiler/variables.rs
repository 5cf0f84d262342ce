// src/compiler/variables.rs

use crate::domain::{TaskIdx, WorkerIdx};
use crate::solver::VarHandle;

/// Handles of the time-indexed decision variables.
///
/// - `work[i,j,k]`: worker i is busy on task j during slot k.
/// - `complete[j,k]`: task j finished strictly before slot k.
///
/// Stored flat, worker-major then task then slot, over the full
/// workers × tasks × slots cube.
#[derive(Debug, Clone)]
pub struct ModelVars {
    workers: usize,
    tasks: usize,
    slots: usize,
    work: Vec<VarHandle>,
    complete: Vec<VarHandle>,
}

impl ModelVars {
    pub(crate) fn new(
        workers: usize,
        tasks: usize,
        slots: usize,
        work: Vec<VarHandle>,
        complete: Vec<VarHandle>,
    ) -> Self {
        debug_assert_eq!(work.len(), workers * tasks * slots);
        debug_assert_eq!(complete.len(), tasks * slots);
        Self {
            workers,
            tasks,
            slots,
            work,
            complete,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn tasks(&self) -> usize {
        self.tasks
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn work(&self, worker: WorkerIdx, task: TaskIdx, slot: usize) -> VarHandle {
        self.work[(worker.0 * self.tasks + task.0) * self.slots + slot]
    }

    pub fn complete(&self, task: TaskIdx, slot: usize) -> VarHandle {
        self.complete[task.0 * self.slots + slot]
    }

    /// Every `(i, j, k, work[i,j,k])`, in storage order.
    pub fn work_cells(&self) -> impl Iterator<Item = (WorkerIdx, TaskIdx, usize, VarHandle)> + '_ {
        self.work.iter().enumerate().map(move |(n, &var)| {
            let slot = n % self.slots;
            let task = (n / self.slots) % self.tasks;
            let worker = n / (self.slots * self.tasks);
            (WorkerIdx(worker), TaskIdx(task), slot, var)
        })
    }
}
