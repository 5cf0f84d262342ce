// src/report.rs

//! Decoding solved variables into activity grids, and rendering them.

use crate::compiler::ModelVars;
use crate::domain::{Project, TaskIdx, WorkerIdx};
use crate::errors::{Result, SlotplanError};
use crate::solver::MipSolver;

/// Solved `work` values read back into two equivalent views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// `task_rows[j][k]`: worker active on task j in slot k.
    task_rows: Vec<Vec<Option<WorkerIdx>>>,
    /// `worker_rows[i][k]`: task worker i is active on in slot k.
    worker_rows: Vec<Vec<Option<TaskIdx>>>,
    horizon: usize,
}

impl Schedule {
    /// Read `work[i,j,k]` values (> 0.5 means active) from a solved model.
    ///
    /// Fails with [`SlotplanError::ProblemNotSolved`] if the solver has no
    /// successful solution.
    pub fn decode(project: &Project, vars: &ModelVars, solver: &dyn MipSolver) -> Result<Self> {
        if !solver.status().is_success() {
            return Err(SlotplanError::ProblemNotSolved);
        }

        let slots = vars.slots();
        let mut task_rows = vec![vec![None; slots]; vars.tasks()];
        let mut worker_rows = vec![vec![None; slots]; vars.workers()];

        for (i, j, k, var) in vars.work_cells() {
            if solver.value_of(var)? > 0.5 {
                task_rows[j.0][k].get_or_insert(i);
                worker_rows[i.0][k].get_or_insert(j);
            }
        }

        debug_assert_eq!(task_rows.len(), project.task_count());
        Ok(Self {
            task_rows,
            worker_rows,
            horizon: slots,
        })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn task_row(&self, task: TaskIdx) -> &[Option<WorkerIdx>] {
        &self.task_rows[task.0]
    }

    pub fn worker_row(&self, worker: WorkerIdx) -> &[Option<TaskIdx>] {
        &self.worker_rows[worker.0]
    }

    /// Slots in which `task` receives work.
    pub fn work_on(&self, task: TaskIdx) -> Vec<usize> {
        self.task_rows[task.0]
            .iter()
            .enumerate()
            .filter_map(|(k, w)| w.map(|_| k))
            .collect()
    }

    /// First slot with work on `task`.
    pub fn first_slot(&self, task: TaskIdx) -> Option<usize> {
        self.task_rows[task.0].iter().position(Option::is_some)
    }

    /// One past the last slot with work on `task`.
    pub fn finish_slot(&self, task: TaskIdx) -> Option<usize> {
        self.task_rows[task.0]
            .iter()
            .rposition(Option::is_some)
            .map(|k| k + 1)
    }

    /// One past the last slot in which anybody works; 0 for an empty schedule.
    pub fn makespan(&self) -> usize {
        (0..self.task_rows.len())
            .filter_map(|j| self.finish_slot(TaskIdx(j)))
            .max()
            .unwrap_or(0)
    }

    /// One line per task: identifier, then the symbol of the worker active in
    /// each slot (space when idle).
    pub fn render_tasks(&self, project: &Project) -> Vec<String> {
        let width = project.identifier_width();
        project
            .task_indices()
            .map(|j| {
                let cells: String = self.task_rows[j.0]
                    .iter()
                    .map(|w| w.map_or(' ', |w| project.worker(w).symbol))
                    .collect();
                format!("{:<width$} {}", project.task(j).id, cells)
            })
            .collect()
    }

    /// One line per worker: identifier, then the symbol of the task it works
    /// on in each slot (space when idle).
    pub fn render_workers(&self, project: &Project) -> Vec<String> {
        let width = project.identifier_width();
        project
            .worker_indices()
            .map(|i| {
                let cells: String = self.worker_rows[i.0]
                    .iter()
                    .map(|t| t.map_or(' ', |t| project.task(t).symbol))
                    .collect();
                format!("{:<width$} {}", project.worker(i).id, cells)
            })
            .collect()
    }
}
