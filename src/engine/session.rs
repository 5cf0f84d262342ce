// src/engine/session.rs

use tracing::{debug, info, warn};

use crate::compiler::{self, CompiledModel, ObjectiveHandle};
use crate::dag::DependencyGraph;
use crate::domain::Project;
use crate::engine::Phase;
use crate::errors::{Result, SlotplanError};
use crate::report::Schedule;
use crate::solver::{MipSolver, SolveStatus, SolverOptions, create_solver};
use crate::types::{CompletionEncoding, ObjectiveKind};

/// Options fixed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub solver: SolverOptions,
    pub completion: CompletionEncoding,
}

/// Owns a project and its model state; enforces the step order.
pub struct ScheduleSession {
    project: Project,
    options: SessionOptions,
    phase: Phase,
    graph: Option<DependencyGraph>,
    solver: Option<Box<dyn MipSolver>>,
    model: Option<CompiledModel>,
    objective: Option<ObjectiveHandle>,
}

impl ScheduleSession {
    pub fn new(project: Project) -> Self {
        Self::with_options(project, SessionOptions::default())
    }

    pub fn with_options(project: Project, options: SessionOptions) -> Self {
        Self {
            project,
            options,
            phase: Phase::Built,
            graph: None,
            solver: None,
            model: None,
            objective: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The precedence graph, once resolved.
    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.graph.as_ref()
    }

    /// The compiled variables and statistics, once initialised.
    pub fn model(&self) -> Option<&CompiledModel> {
        self.model.as_ref()
    }

    pub fn objective(&self) -> Option<ObjectiveHandle> {
        self.objective
    }

    pub fn solver(&self) -> Option<&dyn MipSolver> {
        self.solver.as_deref()
    }

    /// Derive and validate the precedence graph.
    ///
    /// `Built -> DependenciesResolved`.
    pub fn resolve_dependencies(&mut self) -> Result<&DependencyGraph> {
        self.expect_phase("resolve_dependencies", &[Phase::Built])?;

        match DependencyGraph::build(&self.project) {
            Ok(graph) => {
                self.transition(Phase::DependenciesResolved);
                Ok(self.graph.insert(graph))
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Instantiate the named backend, compile the model on it and apply
    /// `objective`.
    ///
    /// `Built | DependenciesResolved -> ModelCompiled`. When dependencies were
    /// not resolved, precedence constraints are omitted.
    pub fn initialize_solver(&mut self, backend: &str, objective: ObjectiveKind) -> Result<()> {
        self.expect_phase(
            "initialize_solver",
            &[Phase::Built, Phase::DependenciesResolved],
        )?;

        match create_solver(backend, &self.options.solver) {
            Ok(solver) => self.initialize_with(solver, objective),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Like [`initialize_solver`](Self::initialize_solver) with a
    /// caller-supplied backend.
    pub fn initialize_with(
        &mut self,
        mut solver: Box<dyn MipSolver>,
        objective: ObjectiveKind,
    ) -> Result<()> {
        self.expect_phase(
            "initialize_with",
            &[Phase::Built, Phase::DependenciesResolved],
        )?;

        if self.graph.is_none() {
            debug!("no dependency graph; precedence constraints omitted");
        }

        let model = compiler::compile(
            &self.project,
            self.graph.as_ref(),
            &mut *solver,
            self.options.completion,
        );
        let handle = objective.apply(&model.vars, &mut *solver);

        info!(
            backend = solver.backend_name(),
            ?objective,
            variables = solver.num_variables(),
            constraints = solver.num_constraints(),
            "solver initialised"
        );

        self.solver = Some(solver);
        self.model = Some(model);
        self.objective = Some(handle);
        self.transition(Phase::ModelCompiled);
        Ok(())
    }

    /// Run the solver.
    ///
    /// `ModelCompiled -> Solved` on an optimal or feasible result. An
    /// infeasible model yields [`SlotplanError::ProblemInfeasible`]; any other
    /// unsuccessful status yields [`SlotplanError::SolveFailed`].
    pub fn solve(&mut self) -> Result<SolveStatus> {
        match self.phase {
            Phase::ModelCompiled => {}
            Phase::Built | Phase::DependenciesResolved => {
                return Err(SlotplanError::SolverNotInitialized);
            }
            phase => {
                return Err(SlotplanError::InvalidPhase {
                    operation: "solve",
                    phase,
                });
            }
        }

        let Some(solver) = self.solver.as_mut() else {
            return Err(SlotplanError::SolverNotInitialized);
        };

        let status = solver.solve();
        match status {
            s if s.is_success() => {
                self.transition(Phase::Solved);
                Ok(status)
            }
            SolveStatus::Infeasible => Err(self.fail(SlotplanError::ProblemInfeasible)),
            other => Err(self.fail(SlotplanError::SolveFailed(other))),
        }
    }

    /// Decode the solved assignment.
    pub fn schedule(&self) -> Result<Schedule> {
        if self.phase != Phase::Solved {
            return Err(SlotplanError::ProblemNotSolved);
        }
        match (self.model.as_ref(), self.solver.as_deref()) {
            (Some(model), Some(solver)) => Schedule::decode(&self.project, &model.vars, solver),
            _ => Err(SlotplanError::ProblemNotSolved),
        }
    }

    /// Per-task activity lines (see [`Schedule::render_tasks`]).
    pub fn tasks_activity(&self) -> Result<Vec<String>> {
        Ok(self.schedule()?.render_tasks(&self.project))
    }

    /// Per-worker activity lines (see [`Schedule::render_workers`]).
    pub fn workers_activity(&self) -> Result<Vec<String>> {
        Ok(self.schedule()?.render_workers(&self.project))
    }

    /// Solved value of the makespan variable, when that objective is in use.
    pub fn makespan_value(&self) -> Result<Option<f64>> {
        if self.phase != Phase::Solved {
            return Err(SlotplanError::ProblemNotSolved);
        }
        match (self.objective.and_then(|o| o.makespan), self.solver.as_deref()) {
            (Some(y), Some(solver)) => solver.value_of(y).map(Some),
            _ => Ok(None),
        }
    }

    fn expect_phase(&self, operation: &'static str, allowed: &[Phase]) -> Result<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SlotplanError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn transition(&mut self, to: Phase) {
        info!(from = ?self.phase, ?to, "session phase change");
        self.phase = to;
    }

    fn fail(&mut self, err: SlotplanError) -> SlotplanError {
        warn!(phase = ?self.phase, error = %err, "session step failed");
        self.phase = Phase::Failed;
        err
    }
}
