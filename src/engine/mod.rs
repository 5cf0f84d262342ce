// src/engine/mod.rs

//! Phase-guarded orchestration.
//!
//! A [`ScheduleSession`] owns one [`Project`](crate::domain::Project) and walks
//! it through
//!
//! ```text
//! Built -> DependenciesResolved -> ModelCompiled -> Solved
//! Built ---------------------------> ModelCompiled
//! ```
//!
//! (dependency resolution may be skipped). Any failure after construction
//! moves the session to [`Phase::Failed`]; callers rebuild to retry.

pub mod session;

pub use session::{ScheduleSession, SessionOptions};

/// Lifecycle phase of a [`ScheduleSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Project validated; nothing else done yet.
    Built,
    /// Precedence graph derived and checked for cycles.
    DependenciesResolved,
    /// Variables, constraints and objective live in the solver.
    ModelCompiled,
    /// The solver found a usable assignment.
    Solved,
    /// A step failed; the session can no longer advance.
    Failed,
}
