// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ProjectFile, RawProjectFile};
use crate::errors::Result;

/// Load a project file from a given path and return the raw `RawProjectFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// reference and duration checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let raw: RawProjectFile = toml::from_str(&contents)?;
    Ok(raw)
}

/// Load a project file and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that every task names a declared worker and that all durations
///   parse.
///
/// The result still has to go through [`ProjectFile::build_project`] for the
/// domain rules.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectFile> {
    let raw = load_from_path(&path)?;
    ProjectFile::try_from(raw)
}

/// `Project.toml` in the current working directory.
pub fn default_project_path() -> PathBuf {
    PathBuf::from("Project.toml")
}
