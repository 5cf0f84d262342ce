mod common;
use crate::common::builders::{TaskBuilder, project_of};
use crate::common::recording_solver::RecordingSolver;

use std::collections::BTreeSet;

use proptest::prelude::*;
use slotplan::compiler;
use slotplan::dag::DependencyGraph;
use slotplan::domain::{Project, TaskIdx};
use slotplan::engine::ScheduleSession;
use slotplan::solver::MipSolver;
use slotplan::types::{CompletionEncoding, ObjectiveKind};

// Strategy to generate a valid resource-linked project.
// Acyclic by construction: task N may only consume outputs of tasks 0..N-1.
fn project_strategy(max_tasks: usize, max_workers: usize) -> impl Strategy<Value = Project> {
    (1..=max_tasks).prop_flat_map(move |num_tasks| {
        (
            proptest::collection::vec(0..max_workers, num_tasks),
            proptest::collection::vec(1..=3u64, num_tasks),
            proptest::collection::vec(
                proptest::collection::vec(any::<usize>(), 0..num_tasks),
                num_tasks,
            ),
        )
            .prop_map(move |(workers, durations, raw_inputs)| {
                let tasks = (0..num_tasks)
                    .map(|n| {
                        let mut b = TaskBuilder::new(
                            &format!("task_{n}"),
                            &format!("worker_{}", workers[n]),
                            durations[n],
                        )
                        .output(&format!("out_{n}"));
                        let inputs: BTreeSet<usize> = if n == 0 {
                            BTreeSet::new()
                        } else {
                            raw_inputs[n].iter().map(|r| r % n).collect()
                        };
                        for i in inputs {
                            b = b.input(&format!("out_{i}"));
                        }
                        b.build()
                    })
                    .collect();
                project_of(tasks)
            })
    })
}

proptest! {
    #[test]
    fn ancestors_only_point_backwards(project in project_strategy(12, 3)) {
        let graph = DependencyGraph::build(&project).unwrap();

        for j in project.task_indices() {
            for &a in graph.ancestors(j) {
                prop_assert!(a < j);
            }
            for d in graph.dependencies_of(j) {
                prop_assert!(graph.ancestors(j).contains(&d));
            }
        }
        prop_assert!(graph.roots().contains(&TaskIdx(0)));
    }

    #[test]
    fn model_size_follows_project_shape(project in project_strategy(8, 3)) {
        let graph = DependencyGraph::build(&project).unwrap();
        let mut solver = RecordingSolver::new();
        let model = compiler::compile(&project, Some(&graph), &mut solver, CompletionEncoding::OneSided);

        let (w, t, s) = (project.worker_count(), project.task_count(), project.horizon());
        let with_ancestors = project
            .task_indices()
            .filter(|&j| !graph.ancestors(j).is_empty())
            .count();

        prop_assert_eq!(model.stats.work_vars, w * t * s);
        prop_assert_eq!(model.stats.owner_pins, (w * t - t) * s);
        prop_assert_eq!(model.stats.precedence, with_ancestors * s * w);
        prop_assert_eq!(solver.num_constraints(), model.stats.constraints());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // Heavy: real solves. Run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn solved_schedules_respect_durations_and_precedence(project in project_strategy(4, 2)) {
        let mut session = ScheduleSession::new(project.clone());
        session.resolve_dependencies().unwrap();
        session.initialize_solver("microlp", ObjectiveKind::WeightedSlot).unwrap();
        session.solve().unwrap();
        let schedule = session.schedule().unwrap();
        let graph = session.graph().unwrap();

        for j in project.task_indices() {
            prop_assert_eq!(schedule.work_on(j).len(), project.duration_slots(j));
            for &a in graph.ancestors(j) {
                prop_assert!(schedule.finish_slot(a) <= schedule.first_slot(j));
            }
        }
    }
}
