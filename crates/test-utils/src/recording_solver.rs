use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use slotplan::errors::{Result, SlotplanError};
use slotplan::solver::{LinearExpr, MipSolver, Relation, SolveStatus, VarHandle};

/// One `int_var` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedVar {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
}

/// One `add_constraint` call.
#[derive(Debug, Clone)]
pub struct RecordedConstraint {
    pub lhs: LinearExpr,
    pub relation: Relation,
    pub rhs: LinearExpr,
}

/// Everything a `RecordingSolver` was asked to do.
#[derive(Debug, Default)]
pub struct SolverLog {
    pub vars: Vec<RecordedVar>,
    pub constraints: Vec<RecordedConstraint>,
    pub objective: Option<LinearExpr>,
    pub solve_calls: usize,
}

impl SolverLog {
    pub fn var_named(&self, label: &str) -> Option<VarHandle> {
        self.vars.iter().position(|v| v.label == label).map(VarHandle)
    }
}

/// A fake backend that:
/// - records variables, constraints and the objective into a shared log
/// - reports a preset status from `solve`
/// - serves preset values (0.0 for anything not set) once "solved".
pub struct RecordingSolver {
    log: Arc<Mutex<SolverLog>>,
    outcome: SolveStatus,
    status: SolveStatus,
    values: HashMap<String, f64>,
}

impl RecordingSolver {
    /// Reports `Optimal` with all values 0.
    pub fn new() -> Self {
        Self::with_outcome(SolveStatus::Optimal)
    }

    pub fn with_outcome(outcome: SolveStatus) -> Self {
        Self {
            log: Arc::new(Mutex::new(SolverLog::default())),
            outcome,
            status: SolveStatus::NotSolved,
            values: HashMap::new(),
        }
    }

    /// Value served for the variable labelled `label` after solving.
    pub fn with_value(mut self, label: &str, value: f64) -> Self {
        self.values.insert(label.to_string(), value);
        self
    }

    /// Shared handle to the log; stays valid after the solver is boxed.
    pub fn log(&self) -> Arc<Mutex<SolverLog>> {
        Arc::clone(&self.log)
    }
}

impl Default for RecordingSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MipSolver for RecordingSolver {
    fn backend_name(&self) -> &str {
        "recording"
    }

    fn int_var(&mut self, lower: f64, upper: f64, label: &str) -> VarHandle {
        let mut log = self.log.lock().unwrap();
        log.vars.push(RecordedVar {
            lower,
            upper,
            label: label.to_string(),
        });
        VarHandle(log.vars.len() - 1)
    }

    fn add_constraint(&mut self, lhs: LinearExpr, relation: Relation, rhs: LinearExpr) {
        self.log
            .lock()
            .unwrap()
            .constraints
            .push(RecordedConstraint { lhs, relation, rhs });
    }

    fn set_objective_minimize(&mut self, objective: LinearExpr) {
        self.log.lock().unwrap().objective = Some(objective);
    }

    fn solve(&mut self) -> SolveStatus {
        self.log.lock().unwrap().solve_calls += 1;
        self.status = self.outcome;
        self.status
    }

    fn status(&self) -> SolveStatus {
        self.status
    }

    fn value_of(&self, var: VarHandle) -> Result<f64> {
        if !self.status.is_success() {
            return Err(SlotplanError::ProblemNotSolved);
        }
        let log = self.log.lock().unwrap();
        let label = &log.vars[var.0].label;
        Ok(self.values.get(label).copied().unwrap_or(0.0))
    }

    fn num_variables(&self) -> usize {
        self.log.lock().unwrap().vars.len()
    }

    fn num_constraints(&self) -> usize {
        self.log.lock().unwrap().constraints.len()
    }
}
