// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::{ObjectiveKind, ReportView};

/// Command-line arguments for `slotplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "slotplan",
    version,
    about = "Schedule resource-linked tasks as a time-indexed 0/1 program.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the project file (TOML).
    ///
    /// Default: `Project.toml` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub project: Option<String>,

    /// Solver backend; overrides `[solver].backend`.
    #[arg(long, value_name = "NAME")]
    pub backend: Option<String>,

    /// Objective (weighted-slot, makespan); overrides `[solver].objective`.
    #[arg(long, value_name = "KIND")]
    pub objective: Option<ObjectiveKind>,

    /// Which activity grid to print (tasks, workers, both).
    #[arg(long, value_name = "VIEW", default_value = "tasks")]
    pub view: ReportView,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SLOTPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print tasks and dependencies, but don't solve.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
