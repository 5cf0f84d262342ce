mod common;
use crate::common::builders::{TaskBuilder, project_of, reference_project};
use crate::common::{TestResult, init_tracing};

use std::time::{Duration, Instant};

use slotplan::domain::{Project, TaskIdx, Worker};
use slotplan::engine::{Phase, ScheduleSession, SessionOptions};
use slotplan::report::Schedule;
use slotplan::errors::SlotplanError;
use slotplan::solver::{SolveStatus, SolverOptions};
use slotplan::types::{CompletionEncoding, ObjectiveKind};

/// `a` (w0, 2 slots) and `b` (w1, 2 slots) feed `c` (w0, 1 slot).
fn fan_in() -> Project {
    let w0 = Worker::new("w0", "*");
    let w1 = Worker::new("w1", "-");
    project_of(vec![
        TaskBuilder::new("a", "", 2).worker(w0.clone()).output("ra").build(),
        TaskBuilder::new("b", "", 2).worker(w1).output("rb").build(),
        TaskBuilder::new("c", "", 1)
            .worker(w0)
            .input("ra")
            .input("rb")
            .build(),
    ])
}

fn solve(project: Project, objective: ObjectiveKind, options: SessionOptions) -> TestResult<Schedule> {
    let mut session = ScheduleSession::with_options(project, options);
    session.resolve_dependencies()?;
    session.initialize_solver("microlp", objective)?;
    let status = session.solve()?;
    assert!(status.is_success());
    Ok(session.schedule()?)
}

fn assert_feasible(project: &Project, schedule: &Schedule) {
    for j in project.task_indices() {
        assert_eq!(
            schedule.work_on(j).len(),
            project.duration_slots(j),
            "task {} got the wrong number of slots",
            project.task(j).id
        );
        for k in schedule.work_on(j) {
            assert_eq!(schedule.task_row(j)[k], Some(project.owner_of(j)));
        }
    }
    for i in project.worker_indices() {
        for k in 0..schedule.horizon() {
            let busy = project
                .task_indices()
                .filter(|&j| schedule.task_row(j)[k] == Some(i))
                .count();
            assert!(busy <= 1, "worker {} double-booked in slot {}", project.worker(i).id, k);
        }
    }
}

#[test]
fn fan_in_schedule_is_tight() -> TestResult {
    init_tracing();

    let project = fan_in();
    let schedule = solve(project.clone(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;

    assert_feasible(&project, &schedule);
    assert_eq!(schedule.work_on(TaskIdx(0)), [0, 1]);
    assert_eq!(schedule.work_on(TaskIdx(1)), [0, 1]);
    assert_eq!(schedule.work_on(TaskIdx(2)), [2]);
    assert_eq!(schedule.makespan(), 3);

    let lines = schedule.render_tasks(&project);
    assert_eq!(lines, ["a  **   ", "b  --   ", "c    *  "]);
    Ok(())
}

#[test]
fn shared_worker_runs_tasks_one_at_a_time() -> TestResult {
    let project = project_of(vec![
        TaskBuilder::new("x", "w", 2).build(),
        TaskBuilder::new("y", "w", 1).build(),
    ]);
    let schedule = solve(project.clone(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;

    assert_feasible(&project, &schedule);
    assert_eq!(schedule.makespan(), 3);
    Ok(())
}

#[test]
fn makespan_objective_reports_the_last_busy_slot() -> TestResult {
    let mut session = ScheduleSession::new(fan_in());
    session.resolve_dependencies()?;
    session.initialize_solver("microlp", ObjectiveKind::Makespan)?;
    session.solve()?;

    let y = session.makespan_value()?.ok_or("makespan missing")?;
    assert!((y - 2.0).abs() < 1e-6, "got {y}");

    let schedule = session.schedule()?;
    assert_feasible(session.project(), &schedule);
    assert_eq!(schedule.first_slot(TaskIdx(2)), Some(2));
    Ok(())
}

#[test]
fn two_sided_completion_gives_the_same_tight_schedule() -> TestResult {
    let options = SessionOptions {
        completion: CompletionEncoding::TwoSided,
        ..SessionOptions::default()
    };
    let one = solve(fan_in(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;
    let two = solve(fan_in(), ObjectiveKind::WeightedSlot, options)?;

    assert_eq!(one, two);
    Ok(())
}

#[test]
fn independent_sessions_agree() -> TestResult {
    let first = solve(fan_in(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;
    let second = solve(fan_in(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn generous_time_limit_still_solves() -> TestResult {
    let options = SessionOptions {
        solver: SolverOptions {
            time_limit: Some(Duration::from_secs(60)),
        },
        ..SessionOptions::default()
    };
    let mut session = ScheduleSession::with_options(fan_in(), options);
    session.resolve_dependencies()?;
    session.initialize_solver("default", ObjectiveKind::WeightedSlot)?;

    assert_eq!(session.solve()?, SolveStatus::Optimal);
    Ok(())
}

#[test]
fn tight_time_limit_stops_the_search() -> TestResult {
    init_tracing();

    let options = SessionOptions {
        solver: SolverOptions {
            time_limit: Some(Duration::from_millis(50)),
        },
        ..SessionOptions::default()
    };
    let mut session = ScheduleSession::with_options(reference_project(), options);
    session.resolve_dependencies()?;
    session.initialize_solver("microlp", ObjectiveKind::WeightedSlot)?;

    let started = Instant::now();
    let result = session.solve();
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "solve ignored its time limit ({:?})",
        started.elapsed()
    );

    match result {
        Err(SlotplanError::SolveFailed(SolveStatus::NotSolved)) => {
            assert_eq!(session.phase(), Phase::Failed);
        }
        Ok(SolveStatus::Feasible) | Ok(SolveStatus::Optimal) => {
            let schedule = session.schedule()?;
            assert_feasible(session.project(), &schedule);
        }
        other => panic!("Expected NotSolved or a usable solution, got: {:?}", other),
    }
    Ok(())
}

// Heavy: 56 slots, ~1.3k binaries. Run with `cargo test -- --ignored`.
#[test]
#[ignore]
fn reference_project_respects_precedence() -> TestResult {
    init_tracing();

    let project = reference_project();
    let schedule = solve(project.clone(), ObjectiveKind::WeightedSlot, SessionOptions::default())?;
    assert_feasible(&project, &schedule);

    // task 1 alone takes 24 slots, so does the chain 0 -> 2 -> 3 -> 4
    let t5 = project.task_index("task 5").ok_or("task 5 missing")?;
    assert!(schedule.first_slot(t5) >= Some(24));
    assert!(schedule.makespan() >= 32);

    for (producer, consumer) in [
        ("task 0", "task 2"),
        ("task 2", "task 3"),
        ("task 3", "task 4"),
        ("task 1", "task 5"),
        ("task 4", "task 5"),
    ] {
        let p = project.task_index(producer).ok_or("producer missing")?;
        let c = project.task_index(consumer).ok_or("consumer missing")?;
        assert!(schedule.finish_slot(p) <= schedule.first_slot(c));
    }
    Ok(())
}
