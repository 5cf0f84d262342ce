// src/compiler/objective.rs

//! Objective strategies.
//!
//! Strategies only see the compiler's variable handles and the solver trait.
//! They add variables, constraints and the objective; they never touch
//! constraints added by the compiler.

use crate::compiler::ModelVars;
use crate::solver::{LinearExpr, MipSolver, Relation, VarHandle};
use crate::types::ObjectiveKind;

/// What an applied strategy left behind in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveHandle {
    pub kind: ObjectiveKind,
    /// Auxiliary `y` of the makespan strategy.
    pub makespan: Option<VarHandle>,
    /// Constraints the strategy added.
    pub constraints: usize,
}

impl ObjectiveKind {
    /// Add this objective to `solver`, iterating over exactly the cells the
    /// compiler created.
    pub fn apply(self, vars: &ModelVars, solver: &mut dyn MipSolver) -> ObjectiveHandle {
        match self {
            ObjectiveKind::WeightedSlot => {
                let mut expr = LinearExpr::new();
                for (_, _, k, work) in vars.work_cells() {
                    expr.add_term(work, k as f64);
                }
                solver.set_objective_minimize(expr);
                ObjectiveHandle {
                    kind: self,
                    makespan: None,
                    constraints: 0,
                }
            }
            ObjectiveKind::Makespan => {
                let y = solver.int_var(0.0, f64::INFINITY, "makespan");
                let mut constraints = 0;
                for (_, _, k, work) in vars.work_cells() {
                    solver.add_constraint(y.into(), Relation::Ge, LinearExpr::term(work, k as f64));
                    constraints += 1;
                }
                solver.set_objective_minimize(y.into());
                ObjectiveHandle {
                    kind: self,
                    makespan: Some(y),
                    constraints,
                }
            }
        }
    }
}
