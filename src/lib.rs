// src/lib.rs

pub mod cli;
pub mod compiler;
pub mod config;
pub mod dag;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod report;
pub mod solver;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::{default_project_path, load_and_validate};
use crate::dag::DependencyGraph;
use crate::domain::Project;
use crate::engine::ScheduleSession;
use crate::types::ReportView;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - project file loading and validation
/// - dependency resolution
/// - model compilation on the selected backend
/// - solving and printing the requested view
pub fn run(args: CliArgs) -> Result<()> {
    let project_path = args
        .project
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(default_project_path);
    let file = load_and_validate(&project_path)
        .with_context(|| format!("loading {}", project_path.display()))?;
    let project = file.build_project()?;

    if args.dry_run {
        let graph = DependencyGraph::build(&project)?;
        print_dry_run(&project, &graph);
        return Ok(());
    }

    let backend = args.backend.as_deref().unwrap_or(&file.solver.backend);
    let objective = args.objective.unwrap_or(file.solver.objective);
    info!(backend, ?objective, path = %project_path.display(), "scheduling project");

    let mut session = ScheduleSession::with_options(project, file.session_options());
    session.resolve_dependencies()?;
    session.initialize_solver(backend, objective)?;
    let status = session.solve()?;
    debug!(?status, "solve finished");

    if matches!(args.view, ReportView::Tasks | ReportView::Both) {
        for line in session.tasks_activity()? {
            println!("{line}");
        }
    }
    if args.view == ReportView::Both {
        println!();
    }
    if matches!(args.view, ReportView::Workers | ReportView::Both) {
        for line in session.workers_activity()? {
            println!("{line}");
        }
    }

    let schedule = session.schedule()?;
    info!(makespan = schedule.makespan(), horizon = schedule.horizon(), "schedule ready");
    Ok(())
}

/// Simple dry-run output: tasks, owners, slot counts and dependencies.
fn print_dry_run(project: &Project, graph: &DependencyGraph) {
    println!("slotplan dry-run");
    println!("  time_unit = {:?}", project.time_unit());
    println!("  duration_policy = {:?}", project.duration_policy());
    println!("  horizon = {} slots", project.horizon());
    println!();

    println!("tasks ({}):", project.task_count());
    for j in graph.topological_order() {
        let task = project.task(*j);
        println!("  - {}", task.id);
        println!("      worker: {}", task.worker.id);
        println!("      slots: {}", project.duration_slots(*j));
        let deps = graph.dependencies_of(*j);
        if !deps.is_empty() {
            let names: Vec<&str> = deps.iter().map(|&d| project.task(d).id.as_str()).collect();
            println!("      after: {:?}", names);
        }
    }

    debug!("dry-run complete (no solve)");
}
