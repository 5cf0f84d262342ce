mod common;
use crate::common::TestResult;

use clap::Parser;
use slotplan::cli::CliArgs;
use slotplan::types::{ObjectiveKind, ReportView};

#[test]
fn bare_invocation_leaves_project_path_to_the_default() -> TestResult {
    let args = CliArgs::try_parse_from(["slotplan"])?;

    assert!(args.project.is_none());
    assert!(args.backend.is_none());
    assert!(args.objective.is_none());
    assert_eq!(args.view, ReportView::Tasks);
    assert!(!args.dry_run);
    Ok(())
}

#[test]
fn flags_override_file_settings() -> TestResult {
    let args = CliArgs::try_parse_from([
        "slotplan",
        "--project",
        "demos/small.toml",
        "--backend",
        "microlp",
        "--objective",
        "makespan",
        "--view",
        "both",
        "--dry-run",
    ])?;

    assert_eq!(args.project.as_deref(), Some("demos/small.toml"));
    assert_eq!(args.backend.as_deref(), Some("microlp"));
    assert_eq!(args.objective, Some(ObjectiveKind::Makespan));
    assert_eq!(args.view, ReportView::Both);
    assert!(args.dry_run);
    Ok(())
}

#[test]
fn unknown_objective_is_rejected() {
    assert!(CliArgs::try_parse_from(["slotplan", "--objective", "fastest"]).is_err());
}
