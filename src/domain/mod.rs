// src/domain/mod.rs

//! Immutable project description.
//!
//! - [`resource`], [`worker`] and [`task`] are plain value types supplied by
//!   the caller.
//! - [`project`] validates a flat list of tasks and turns it into an arena
//!   where every task, worker and resource has a stable integer index.

pub mod project;
pub mod resource;
pub mod task;
pub mod worker;

pub use project::{Project, ResourceIdx, TaskIdx, WorkerIdx};
pub use resource::Resource;
pub use task::Task;
pub use worker::Worker;

/// Keep a display symbol only when it is exactly one character.
pub(crate) fn single_symbol(symbol: &str) -> char {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => '*',
    }
}
