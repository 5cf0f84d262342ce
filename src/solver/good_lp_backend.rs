// src/solver/good_lp_backend.rs

//! [`MipSolver`] backed by `good_lp` with the pure-Rust `microlp` solver.
//!
//! `good_lp` wants all variables before the objective and all constraints
//! after it, so this adapter buffers everything and assembles the problem
//! only when `solve` is called.

use anyhow::anyhow;
use good_lp::constraint::{eq, geq, leq};
use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolutionStatus,
    SolverModel, Variable, WithTimeLimit, microlp, variable,
};
use tracing::{debug, info, warn};

use crate::errors::{Result, SlotplanError};
use crate::solver::{LinearExpr, MipSolver, Relation, SolveStatus, SolverOptions, VarHandle};

pub struct GoodLpSolver {
    options: SolverOptions,
    /// Taken (and consumed by `good_lp`) on the first solve.
    variables: Option<ProblemVariables>,
    handles: Vec<Variable>,
    constraints: Vec<Constraint>,
    constraint_count: usize,
    objective: Expression,
    status: SolveStatus,
    values: Vec<f64>,
}

impl GoodLpSolver {
    pub fn new(options: SolverOptions) -> Self {
        Self {
            options,
            variables: Some(ProblemVariables::new()),
            handles: Vec::new(),
            constraints: Vec::new(),
            constraint_count: 0,
            objective: Expression::from(0.0),
            status: SolveStatus::NotSolved,
            values: Vec::new(),
        }
    }

    fn to_expression(&self, expr: &LinearExpr) -> Expression {
        let mut out = Expression::from(expr.constant_part());
        for &(var, coef) in expr.terms() {
            out += coef * self.handles[var.0];
        }
        out
    }
}

impl MipSolver for GoodLpSolver {
    fn backend_name(&self) -> &str {
        "microlp"
    }

    fn int_var(&mut self, lower: f64, upper: f64, label: &str) -> VarHandle {
        let mut def = variable().integer().min(lower).name(label);
        if upper.is_finite() {
            def = def.max(upper);
        }
        let vars = self.variables.get_or_insert_with(ProblemVariables::new);
        self.handles.push(vars.add(def));
        VarHandle(self.handles.len() - 1)
    }

    fn add_constraint(&mut self, lhs: LinearExpr, relation: Relation, rhs: LinearExpr) {
        let (lhs, rhs) = (self.to_expression(&lhs), self.to_expression(&rhs));
        let constraint = match relation {
            Relation::Le => leq(lhs, rhs),
            Relation::Ge => geq(lhs, rhs),
            Relation::Eq => eq(lhs, rhs),
        };
        self.constraints.push(constraint);
        self.constraint_count += 1;
    }

    fn set_objective_minimize(&mut self, objective: LinearExpr) {
        self.objective = self.to_expression(&objective);
    }

    fn solve(&mut self) -> SolveStatus {
        let Some(vars) = self.variables.take() else {
            warn!("good_lp problem already consumed by an earlier solve");
            return self.status;
        };

        info!(
            variables = self.handles.len(),
            constraints = self.constraint_count,
            time_limit = ?self.options.time_limit,
            "solving with microlp"
        );

        let objective = std::mem::replace(&mut self.objective, Expression::from(0.0));
        let constraints = std::mem::take(&mut self.constraints);

        let mut problem = vars.minimise(objective).using(microlp);
        if let Some(limit) = self.options.time_limit {
            problem = problem.with_time_limit(limit.as_secs_f64());
        }
        for constraint in constraints {
            problem = problem.with(constraint);
        }

        let (status, values) = match problem.solve() {
            Ok(solution) => {
                let status = match solution.status() {
                    SolutionStatus::Optimal => SolveStatus::Optimal,
                    SolutionStatus::TimeLimit | SolutionStatus::GapLimit => {
                        warn!("microlp stopped early; keeping the best assignment found");
                        SolveStatus::Feasible
                    }
                };
                let values = self.handles.iter().map(|&v| solution.value(v)).collect();
                (status, values)
            }
            Err(ResolutionError::Infeasible) => (SolveStatus::Infeasible, Vec::new()),
            Err(ResolutionError::Unbounded) => (SolveStatus::Unbounded, Vec::new()),
            // microlp reports an interrupted search without any assignment this way
            Err(ResolutionError::Other(reason)) if self.options.time_limit.is_some() => {
                warn!(limit = ?self.options.time_limit, %reason, "time limit reached without a solution");
                (SolveStatus::NotSolved, Vec::new())
            }
            Err(e) => {
                warn!(error = %e, "microlp reported an error");
                (SolveStatus::Error, Vec::new())
            }
        };

        debug!(?status, "microlp finished");
        self.status = status;
        self.values = values;
        status
    }

    fn status(&self) -> SolveStatus {
        self.status
    }

    fn value_of(&self, var: VarHandle) -> Result<f64> {
        if !self.status.is_success() {
            return Err(SlotplanError::ProblemNotSolved);
        }
        self.values
            .get(var.0)
            .copied()
            .ok_or_else(|| SlotplanError::Other(anyhow!("unknown variable handle {}", var.0)))
    }

    fn num_variables(&self) -> usize {
        self.handles.len()
    }

    fn num_constraints(&self) -> usize {
        self.constraint_count
    }
}
