// src/config/model.rs

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Project, Task};
use crate::engine::SessionOptions;
use crate::errors::Result;
use crate::solver::SolverOptions;
use crate::types::{CompletionEncoding, DurationPolicy, ObjectiveKind};

/// A project file as read from TOML.
///
/// ```toml
/// [project]
/// time_unit = "1d"
///
/// [solver]
/// backend = "microlp"
/// objective = "weighted-slot"
///
/// [worker.alice]
/// symbol = "a"
///
/// [[task]]
/// id = "design"
/// worker = "alice"
/// duration = "3d"
/// outputs = ["spec"]
/// ```
///
/// Only `[[task]]` is required; everything else has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProjectFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub solver: SolverSection,

    /// Workers keyed by identifier.
    #[serde(default)]
    pub worker: BTreeMap<String, WorkerConfig>,

    /// Optional resource declarations keyed by identifier. Resources that
    /// tasks mention without declaring get an empty kind.
    #[serde(default)]
    pub resource: BTreeMap<String, ResourceConfig>,

    /// Tasks in file order.
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Length of one slot, e.g. `"1d"` or `"4h"`.
    #[serde(default = "default_time_unit")]
    pub time_unit: String,

    #[serde(default)]
    pub duration_policy: DurationPolicy,
}

fn default_time_unit() -> String {
    "1d".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            time_unit: default_time_unit(),
            duration_policy: DurationPolicy::default(),
        }
    }
}

/// `[solver]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverSection {
    #[serde(default = "default_backend")]
    pub backend: String,

    #[serde(default)]
    pub objective: ObjectiveKind,

    #[serde(default)]
    pub completion: CompletionEncoding,

    /// Optional limit such as `"60s"`.
    #[serde(default)]
    pub time_limit: Option<String>,
}

fn default_backend() -> String {
    "microlp".to_string()
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            objective: ObjectiveKind::default(),
            completion: CompletionEncoding::default(),
            time_limit: None,
        }
    }
}

/// `[worker.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub symbol: Option<String>,
}

/// `[resource.<id>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub kind: String,
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub id: String,

    /// Identifier of a `[worker.<id>]`.
    pub worker: String,

    /// Duration string, e.g. `"5d"`.
    pub duration: String,

    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub symbol: Option<String>,
}

/// A project file whose references and durations have been checked.
///
/// Domain rules (unique identifiers, single producers, divisibility) are
/// enforced later by [`ProjectFile::build_project`].
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub time_unit: Duration,
    pub duration_policy: DurationPolicy,
    pub solver: SolverSection,
    pub time_limit: Option<Duration>,
    pub tasks: Vec<Task>,
}

impl ProjectFile {
    pub(crate) fn new_unchecked(
        time_unit: Duration,
        duration_policy: DurationPolicy,
        solver: SolverSection,
        time_limit: Option<Duration>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            time_unit,
            duration_policy,
            solver,
            time_limit,
            tasks,
        }
    }

    /// Validate the tasks into a [`Project`].
    pub fn build_project(&self) -> Result<Project> {
        Project::with_policy(self.tasks.clone(), self.time_unit, self.duration_policy)
    }

    /// Session options derived from `[solver]`.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            solver: SolverOptions {
                time_limit: self.time_limit,
            },
            completion: self.solver.completion,
        }
    }
}
