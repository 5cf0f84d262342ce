// src/config/mod.rs

//! TOML project files.
//!
//! - [`model`] mirrors the file layout (`RawProjectFile`) and holds the
//!   validated form (`ProjectFile`).
//! - [`loader`] reads and deserialises files.
//! - [`validate`] checks references and parses durations.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_project_path, load_and_validate, load_from_path};
pub use model::{
    ProjectFile, ProjectSection, RawProjectFile, ResourceConfig, SolverSection, TaskConfig,
    WorkerConfig,
};
