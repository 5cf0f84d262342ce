mod common;
use crate::common::builders::{TaskBuilder, chain, project_of, reference_project};
use crate::common::recording_solver::RecordingSolver;
use crate::common::{TestResult, init_tracing};

use slotplan::domain::{TaskIdx, WorkerIdx};
use slotplan::engine::{Phase, ScheduleSession};
use slotplan::errors::SlotplanError;
use slotplan::solver::SolveStatus;
use slotplan::types::ObjectiveKind;

#[test]
fn happy_path_walks_every_phase() -> TestResult {
    init_tracing();

    let mut session = ScheduleSession::new(project_of(chain("w", &[1, 1])));
    assert_eq!(session.phase(), Phase::Built);

    session.resolve_dependencies()?;
    assert_eq!(session.phase(), Phase::DependenciesResolved);
    assert!(session.graph().is_some());

    let fake = RecordingSolver::new()
        .with_value("work[0,0,0]", 1.0)
        .with_value("work[0,1,1]", 1.0);
    let log = fake.log();
    session.initialize_with(Box::new(fake), ObjectiveKind::WeightedSlot)?;
    assert_eq!(session.phase(), Phase::ModelCompiled);
    assert!(session.model().is_some());
    assert_eq!(session.solver().map(|s| s.backend_name()), Some("recording"));

    assert_eq!(session.solve()?, SolveStatus::Optimal);
    assert_eq!(session.phase(), Phase::Solved);
    assert_eq!(log.lock().unwrap().solve_calls, 1);

    let schedule = session.schedule()?;
    assert_eq!(schedule.work_on(TaskIdx(0)), [0]);
    assert_eq!(schedule.work_on(TaskIdx(1)), [1]);
    assert_eq!(schedule.worker_row(WorkerIdx(0)), [Some(TaskIdx(0)), Some(TaskIdx(1))]);
    assert_eq!(schedule.makespan(), 2);

    assert_eq!(session.tasks_activity()?, ["t0 * ", "t1  *"]);
    assert_eq!(session.workers_activity()?, ["w  **"]);
    assert_eq!(session.makespan_value()?, None);
    Ok(())
}

#[test]
fn solve_before_initialisation_is_rejected() -> TestResult {
    let mut session = ScheduleSession::new(reference_project());
    assert!(matches!(session.solve(), Err(SlotplanError::SolverNotInitialized)));

    session.resolve_dependencies()?;
    assert!(matches!(session.solve(), Err(SlotplanError::SolverNotInitialized)));

    // a rejected call does not change the phase
    assert_eq!(session.phase(), Phase::DependenciesResolved);
    Ok(())
}

#[test]
fn reports_before_solving_are_rejected() -> TestResult {
    let mut session = ScheduleSession::new(project_of(chain("w", &[1])));
    assert!(matches!(session.schedule(), Err(SlotplanError::ProblemNotSolved)));
    assert!(matches!(session.tasks_activity(), Err(SlotplanError::ProblemNotSolved)));

    session.initialize_with(Box::new(RecordingSolver::new()), ObjectiveKind::WeightedSlot)?;
    assert!(matches!(session.workers_activity(), Err(SlotplanError::ProblemNotSolved)));
    assert!(matches!(session.makespan_value(), Err(SlotplanError::ProblemNotSolved)));
    Ok(())
}

#[test]
fn out_of_order_steps_report_the_phase() -> TestResult {
    let mut session = ScheduleSession::new(project_of(chain("w", &[1])));
    session.initialize_with(Box::new(RecordingSolver::new()), ObjectiveKind::WeightedSlot)?;

    match session.resolve_dependencies() {
        Err(SlotplanError::InvalidPhase { operation, phase }) => {
            assert_eq!(operation, "resolve_dependencies");
            assert_eq!(phase, Phase::ModelCompiled);
        }
        other => panic!("Expected InvalidPhase, got: {:?}", other.map(|_| ())),
    }

    assert!(matches!(
        session.initialize_with(Box::new(RecordingSolver::new()), ObjectiveKind::Makespan),
        Err(SlotplanError::InvalidPhase { .. })
    ));

    session.solve()?;
    assert!(matches!(
        session.solve(),
        Err(SlotplanError::InvalidPhase { operation: "solve", phase: Phase::Solved })
    ));
    Ok(())
}

#[test]
fn skipping_dependency_resolution_omits_precedence() -> TestResult {
    let mut session = ScheduleSession::new(reference_project());
    session.initialize_with(Box::new(RecordingSolver::new()), ObjectiveKind::WeightedSlot)?;

    let model = session.model().ok_or("model missing")?;
    assert_eq!(model.stats.precedence, 0);
    assert!(session.graph().is_none());
    Ok(())
}

#[test]
fn unknown_backend_fails_the_session() -> TestResult {
    let mut session = ScheduleSession::new(reference_project());
    session.resolve_dependencies()?;

    match session.initialize_solver("SCIP", ObjectiveKind::WeightedSlot) {
        Err(SlotplanError::SolverInstantiationFailed(name)) => assert_eq!(name, "SCIP"),
        other => panic!("Expected SolverInstantiationFailed, got: {:?}", other),
    }
    assert_eq!(session.phase(), Phase::Failed);
    assert!(matches!(
        session.initialize_solver("microlp", ObjectiveKind::WeightedSlot),
        Err(SlotplanError::InvalidPhase { phase: Phase::Failed, .. })
    ));
    Ok(())
}

#[test]
fn unresolvable_dependencies_fail_the_session() {
    let project = project_of(vec![TaskBuilder::new("a", "w", 1).input("ghost").build()]);
    let mut session = ScheduleSession::new(project);

    assert!(matches!(
        session.resolve_dependencies(),
        Err(SlotplanError::UnlinkedInput(_))
    ));
    assert_eq!(session.phase(), Phase::Failed);
}

#[test]
fn infeasible_outcome_fails_the_session() -> TestResult {
    let mut session = ScheduleSession::new(project_of(chain("w", &[1, 2])));
    session.resolve_dependencies()?;
    session.initialize_with(
        Box::new(RecordingSolver::with_outcome(SolveStatus::Infeasible)),
        ObjectiveKind::WeightedSlot,
    )?;

    assert!(matches!(session.solve(), Err(SlotplanError::ProblemInfeasible)));
    assert_eq!(session.phase(), Phase::Failed);
    assert!(matches!(session.schedule(), Err(SlotplanError::ProblemNotSolved)));
    Ok(())
}

#[test]
fn abandoned_solve_reports_its_status() -> TestResult {
    let mut session = ScheduleSession::new(project_of(chain("w", &[1])));
    session.initialize_with(
        Box::new(RecordingSolver::with_outcome(SolveStatus::NotSolved)),
        ObjectiveKind::WeightedSlot,
    )?;

    assert!(matches!(
        session.solve(),
        Err(SlotplanError::SolveFailed(SolveStatus::NotSolved))
    ));
    assert_eq!(session.phase(), Phase::Failed);
    Ok(())
}

#[test]
fn makespan_value_is_read_from_the_auxiliary_variable() -> TestResult {
    let mut session = ScheduleSession::new(project_of(chain("w", &[1, 1])));
    session.resolve_dependencies()?;
    session.initialize_with(
        Box::new(RecordingSolver::new().with_value("makespan", 1.0)),
        ObjectiveKind::Makespan,
    )?;
    session.solve()?;

    assert_eq!(session.makespan_value()?, Some(1.0));
    assert_eq!(session.objective().map(|o| o.kind), Some(ObjectiveKind::Makespan));
    Ok(())
}
