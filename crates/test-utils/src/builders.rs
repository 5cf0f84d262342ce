#![allow(dead_code)]

use std::time::Duration;

use slotplan::domain::{Project, Resource, Task, Worker};

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

pub fn days(n: u64) -> Duration {
    DAY * n as u32
}

/// Builder for `Task` keyed by plain strings.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    /// A task of `slots` days owned by `worker` (symbol `*`).
    pub fn new(id: &str, worker: &str, slots: u64) -> Self {
        Self {
            task: Task::new(id, Worker::new(worker, "*"), days(slots)),
        }
    }

    pub fn worker(mut self, worker: Worker) -> Self {
        self.task.worker = worker;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.task.duration = duration;
        self
    }

    pub fn input(mut self, id: &str) -> Self {
        self.task = self.task.with_input(Resource::new(id));
        self
    }

    pub fn output(mut self, id: &str) -> Self {
        self.task = self.task.with_output(Resource::new(id));
        self
    }

    pub fn symbol(mut self, symbol: &str) -> Self {
        self.task = self.task.with_symbol(symbol);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Validate `tasks` with a one-day time unit.
pub fn project_of(tasks: Vec<Task>) -> Project {
    Project::new(tasks, DAY).expect("Failed to build valid project from builder")
}

/// `a -> b -> c ...`: each task consumes the previous one's output, all owned
/// by `worker`.
pub fn chain(worker: &str, durations: &[u64]) -> Vec<Task> {
    durations
        .iter()
        .enumerate()
        .map(|(n, &d)| {
            let mut b = TaskBuilder::new(&format!("t{n}"), worker, d).output(&format!("r{n}"));
            if n > 0 {
                b = b.input(&format!("r{}", n - 1));
            }
            b.build()
        })
        .collect()
}

/// Six tasks, three workers, five resources:
///
/// ```text
/// task 0 (w0, 5d) -> r0 -> task 2 (w1, 5d) -> r1 -> task 3 (w0, 5d) -> r2 -> task 4 (w2, 9d) -> r4 -+
/// task 1 (w0, 24d) -> r3 ------------------------------------------------------------------------+-> task 5 (w1, 8d)
/// ```
///
/// Horizon 56 slots; task 5 cannot start before slot 24.
pub fn reference_tasks() -> Vec<Task> {
    let w0 = Worker::new("worker 0", "*");
    let w1 = Worker::new("worker 1", "-");
    let w2 = Worker::new("worker 2", "+");

    vec![
        TaskBuilder::new("task 0", "", 5)
            .worker(w0.clone())
            .output("resource 0")
            .symbol("a")
            .build(),
        TaskBuilder::new("task 1", "", 24)
            .worker(w0.clone())
            .output("resource 3")
            .symbol("b")
            .build(),
        TaskBuilder::new("task 2", "", 5)
            .worker(w1.clone())
            .input("resource 0")
            .output("resource 1")
            .symbol("c")
            .build(),
        TaskBuilder::new("task 3", "", 5)
            .worker(w0)
            .input("resource 1")
            .output("resource 2")
            .symbol("d")
            .build(),
        TaskBuilder::new("task 4", "", 9)
            .worker(w2)
            .input("resource 2")
            .output("resource 4")
            .symbol("e")
            .build(),
        TaskBuilder::new("task 5", "", 8)
            .worker(w1)
            .input("resource 3")
            .input("resource 4")
            .symbol("f")
            .build(),
    ]
}

pub fn reference_project() -> Project {
    project_of(reference_tasks())
}
