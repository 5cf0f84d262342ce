// src/compiler/mod.rs

//! Time-indexed 0/1 formulation.
//!
//! [`compile`] turns a validated [`Project`] (and optionally its
//! [`DependencyGraph`]) into variables and linear constraints on a
//! [`MipSolver`]:
//!
//! | family     | index      | constraint                                           |
//! |------------|------------|------------------------------------------------------|
//! | owner pin  | i, j, k    | `work[i,j,k] == 0` when i does not own j             |
//! | capacity   | i, k       | `Σ_j work[i,j,k] ≤ 1`                                |
//! | duration   | j          | `Σ_{i,k} work[i,j,k] == d_j`                         |
//! | completion | j, k       | `Σ_{i,kk<k} work[i,j,kk] ≥ d_j · complete[j,k]`      |
//! | precedence | j, k, i    | `Σ_{a∈anc(j)} complete[a,k] ≥ │anc(j)│ · work[i,j,k]` |
//!
//! With [`CompletionEncoding::TwoSided`] each completion row also gets
//! `Σ_{i,kk<k} work[i,j,kk] − complete[j,k] ≤ d_j − 1`.
//!
//! Generation cannot fail; all checks happen in the domain and graph layers.

pub mod objective;
pub mod variables;

pub use objective::ObjectiveHandle;
pub use variables::ModelVars;

use tracing::{debug, info};

use crate::dag::DependencyGraph;
use crate::domain::{Project, TaskIdx, WorkerIdx};
use crate::solver::{LinearExpr, MipSolver, Relation, VarHandle};
use crate::types::CompletionEncoding;

/// Number of variables and constraints per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub work_vars: usize,
    pub completion_vars: usize,
    pub owner_pins: usize,
    pub capacity: usize,
    pub duration: usize,
    pub completion: usize,
    pub completion_upper: usize,
    pub precedence: usize,
}

impl CompileStats {
    pub fn variables(&self) -> usize {
        self.work_vars + self.completion_vars
    }

    pub fn constraints(&self) -> usize {
        self.owner_pins
            + self.capacity
            + self.duration
            + self.completion
            + self.completion_upper
            + self.precedence
    }
}

/// Result of [`compile`].
#[derive(Debug, Clone)]
pub struct CompiledModel {
    pub vars: ModelVars,
    pub stats: CompileStats,
}

/// Generate the formulation for `project` on `solver`.
///
/// Without a `graph`, precedence rows are omitted.
pub fn compile(
    project: &Project,
    graph: Option<&DependencyGraph>,
    solver: &mut dyn MipSolver,
    encoding: CompletionEncoding,
) -> CompiledModel {
    let workers = project.worker_count();
    let tasks = project.task_count();
    let slots = project.horizon();
    let mut stats = CompileStats::default();

    let mut work = Vec::with_capacity(workers * tasks * slots);
    for i in project.worker_indices() {
        for j in project.task_indices() {
            let owns = project.owner_of(j) == i;
            for k in 0..slots {
                let var = solver.bool_var(&format!("work[{},{},{}]", i.0, j.0, k));
                work.push(var);
                if !owns {
                    solver.add_constraint(var.into(), Relation::Eq, LinearExpr::constant(0.0));
                    stats.owner_pins += 1;
                }
            }
        }
    }
    stats.work_vars = work.len();

    let mut complete = Vec::with_capacity(tasks * slots);
    for j in project.task_indices() {
        for k in 0..slots {
            complete.push(solver.bool_var(&format!("complete[{},{}]", j.0, k)));
        }
    }
    stats.completion_vars = complete.len();

    let vars = ModelVars::new(workers, tasks, slots, work, complete);

    for i in project.worker_indices() {
        for k in 0..slots {
            let busy = LinearExpr::sum(project.task_indices().map(|j| vars.work(i, j, k)));
            solver.add_constraint(busy, Relation::Le, LinearExpr::constant(1.0));
            stats.capacity += 1;
        }
    }

    for j in project.task_indices() {
        let d = project.duration_slots(j) as f64;

        let total = LinearExpr::sum(all_work(project, &vars, j, 0..slots));
        solver.add_constraint(total, Relation::Eq, LinearExpr::constant(d));
        stats.duration += 1;

        for k in 0..slots {
            let done = vars.complete(j, k);
            let before = LinearExpr::sum(all_work(project, &vars, j, 0..k));

            solver.add_constraint(before.clone(), Relation::Ge, LinearExpr::term(done, d));
            stats.completion += 1;

            if encoding == CompletionEncoding::TwoSided {
                let mut lhs = before;
                lhs.add_term(done, -1.0);
                solver.add_constraint(lhs, Relation::Le, LinearExpr::constant(d - 1.0));
                stats.completion_upper += 1;
            }
        }
    }

    if let Some(graph) = graph {
        for j in project.task_indices() {
            let ancestors = graph.ancestors(j);
            if ancestors.is_empty() {
                continue;
            }
            debug!(
                task = %project.task(j).id,
                ancestors = ancestors.len(),
                "adding precedence rows"
            );
            let n = ancestors.len() as f64;
            for k in 0..slots {
                for i in project.worker_indices() {
                    let ready = LinearExpr::sum(ancestors.iter().map(|&a| vars.complete(a, k)));
                    solver.add_constraint(ready, Relation::Ge, LinearExpr::term(vars.work(i, j, k), n));
                    stats.precedence += 1;
                }
            }
        }
    }

    info!(
        workers,
        tasks,
        slots,
        variables = stats.variables(),
        constraints = stats.constraints(),
        precedence = stats.precedence,
        ?encoding,
        "model compiled"
    );

    CompiledModel { vars, stats }
}

/// `work[i,j,k]` for every worker i and every slot k in `range`.
fn all_work<'a>(
    project: &'a Project,
    vars: &'a ModelVars,
    task: TaskIdx,
    range: std::ops::Range<usize>,
) -> impl Iterator<Item = VarHandle> + 'a {
    project
        .worker_indices()
        .flat_map(move |i: WorkerIdx| range.clone().map(move |k| vars.work(i, task, k)))
}
