// src/errors.rs

//! Crate-wide error taxonomy and `Result` alias.

use thiserror::Error;

use crate::engine::Phase;
use crate::solver::SolveStatus;

#[derive(Error, Debug)]
pub enum SlotplanError {
    #[error("more tasks have the same identifier '{0}'")]
    DuplicateTaskId(String),

    #[error("more workers have the same identifier '{0}'")]
    DuplicateWorkerId(String),

    #[error("more resources have the same identifier '{0}'")]
    DuplicateResourceId(String),

    #[error("resource '{resource}' is produced by both '{first}' and '{second}'")]
    CollidingOutputs {
        resource: String,
        first: String,
        second: String,
    },

    #[error("input '{0}' can't be linked to any output")]
    UnlinkedInput(String),

    #[error("found cyclic dependencies involving task '{0}'")]
    CyclicDependency(String),

    #[error("solver '{0}' can't be instantiated")]
    SolverInstantiationFailed(String),

    #[error("scheduling problem is unfeasible")]
    ProblemInfeasible,

    #[error("solver finished without a usable solution (status {0:?})")]
    SolveFailed(SolveStatus),

    #[error("solver hasn't been initialized")]
    SolverNotInitialized,

    #[error("scheduling problem hasn't been solved")]
    ProblemNotSolved,

    #[error("`{operation}` is not allowed in phase {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("time unit must be greater than zero")]
    InvalidTimeUnit,

    #[error("duration of task '{0}' is not a multiple of the time unit")]
    IndivisibleDuration(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SlotplanError>;
