// src/solver/mod.rs

//! Mixed-integer solver adapter.
//!
//! The compiler and the objective strategies only talk to a [`MipSolver`].
//! This keeps the formulation independent of any particular backend and lets
//! tests swap in a recording fake.
//!
//! - [`expr`] holds variable handles and linear expressions.
//! - [`good_lp_backend`] is the production backend (`good_lp` + `microlp`).

pub mod expr;
pub mod good_lp_backend;

use std::time::Duration;

pub use expr::{LinearExpr, Relation, VarHandle};
pub use good_lp_backend::GoodLpSolver;

use crate::errors::{Result, SlotplanError};

/// Outcome of [`MipSolver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    Error,
    /// Not solved yet, or the solve was abandoned (e.g. time limit).
    NotSolved,
}

impl SolveStatus {
    /// Whether variable values can be read back.
    pub fn is_success(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Knobs passed to a backend when it is created.
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Stop the search after this long. The best assignment found so far is
    /// reported as [`SolveStatus::Feasible`]; without one the status is
    /// [`SolveStatus::NotSolved`].
    pub time_limit: Option<Duration>,
}

/// Generic mixed-integer solver, minimisation only.
///
/// Values are only readable after `solve` returned a successful status.
pub trait MipSolver {
    fn backend_name(&self) -> &str;

    /// Create an integer variable in `[lower, upper]`. `f64::INFINITY` as
    /// `upper` leaves it unbounded above.
    fn int_var(&mut self, lower: f64, upper: f64, label: &str) -> VarHandle;

    /// Create a 0/1 variable.
    fn bool_var(&mut self, label: &str) -> VarHandle {
        self.int_var(0.0, 1.0, label)
    }

    fn add_constraint(&mut self, lhs: LinearExpr, relation: Relation, rhs: LinearExpr);

    fn set_objective_minimize(&mut self, objective: LinearExpr);

    fn solve(&mut self) -> SolveStatus;

    /// Status of the last `solve`, [`SolveStatus::NotSolved`] before that.
    fn status(&self) -> SolveStatus;

    /// Chosen value of `var`; fails with
    /// [`SlotplanError::ProblemNotSolved`] unless the last solve succeeded.
    fn value_of(&self, var: VarHandle) -> Result<f64>;

    fn num_variables(&self) -> usize;

    fn num_constraints(&self) -> usize;
}

/// Instantiate a backend by name.
///
/// Known names (case-insensitive): `microlp`, `default`. Anything else fails
/// with [`SlotplanError::SolverInstantiationFailed`].
pub fn create_solver(backend: &str, options: &SolverOptions) -> Result<Box<dyn MipSolver>> {
    match backend.trim().to_lowercase().as_str() {
        "microlp" | "default" => Ok(Box::new(GoodLpSolver::new(options.clone()))),
        _ => Err(SlotplanError::SolverInstantiationFailed(backend.to_string())),
    }
}
