// src/domain/project.rs

//! Validated project arena.
//!
//! [`Project::new`] walks the task list once, assigning stable indices to
//! tasks, workers and resources in first-seen order and failing on the first
//! rule violation. Everything downstream (dependency graph, compiler,
//! decoder) works on these indices instead of the caller's values.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Resource, Task, Worker};
use crate::errors::{Result, SlotplanError};
use crate::types::DurationPolicy;

/// Position of a task in [`Project::tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskIdx(pub usize);

/// Position of a worker in [`Project::workers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerIdx(pub usize);

/// Position of a resource in [`Project::resources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceIdx(pub usize);

#[derive(Debug, Clone)]
struct TaskEntry {
    task: Task,
    owner: WorkerIdx,
    inputs: Vec<ResourceIdx>,
    outputs: Vec<ResourceIdx>,
    slots: usize,
}

/// A validated, immutable set of tasks together with the workers and
/// resources they reference.
#[derive(Debug, Clone)]
pub struct Project {
    tasks: Vec<TaskEntry>,
    workers: Vec<Worker>,
    resources: Vec<Resource>,
    /// resource -> the single task listing it as an output
    producers: HashMap<ResourceIdx, TaskIdx>,
    time_unit: Duration,
    duration_policy: DurationPolicy,
    horizon: usize,
    identifier_width: usize,
}

/// Incremental state used while validating the task list.
#[derive(Default)]
struct Registry {
    tasks: Vec<TaskEntry>,
    task_ids: HashMap<String, TaskIdx>,
    workers: Vec<Worker>,
    worker_ids: HashMap<String, WorkerIdx>,
    resources: Vec<Resource>,
    resource_ids: HashMap<String, ResourceIdx>,
    producers: HashMap<ResourceIdx, TaskIdx>,
}

impl Registry {
    fn worker(&mut self, worker: &Worker) -> Result<WorkerIdx> {
        if let Some(&idx) = self.worker_ids.get(&worker.id) {
            if self.workers[idx.0] == *worker {
                return Ok(idx);
            }
            return Err(SlotplanError::DuplicateWorkerId(worker.id.clone()));
        }
        let idx = WorkerIdx(self.workers.len());
        self.workers.push(worker.clone());
        self.worker_ids.insert(worker.id.clone(), idx);
        Ok(idx)
    }

    fn resource(&mut self, resource: &Resource) -> Result<ResourceIdx> {
        if let Some(&idx) = self.resource_ids.get(&resource.id) {
            if self.resources[idx.0] == *resource {
                return Ok(idx);
            }
            return Err(SlotplanError::DuplicateResourceId(resource.id.clone()));
        }
        let idx = ResourceIdx(self.resources.len());
        self.resources.push(resource.clone());
        self.resource_ids.insert(resource.id.clone(), idx);
        Ok(idx)
    }

    fn task_id(&self, idx: TaskIdx, pending: &Task) -> String {
        self.tasks
            .get(idx.0)
            .map(|e| e.task.id.clone())
            .unwrap_or_else(|| pending.id.clone())
    }

    fn add_task(
        &mut self,
        task: Task,
        time_unit: Duration,
        policy: DurationPolicy,
    ) -> Result<()> {
        if let Some(&existing) = self.task_ids.get(&task.id) {
            if self.tasks[existing.0].task == task {
                debug!(task = %task.id, "identical task listed twice; ignoring repeat");
                return Ok(());
            }
            return Err(SlotplanError::DuplicateTaskId(task.id));
        }

        let owner = self.worker(&task.worker)?;
        let inputs = task
            .inputs
            .iter()
            .map(|r| self.resource(r))
            .collect::<Result<Vec<_>>>()?;
        let outputs = task
            .outputs
            .iter()
            .map(|r| self.resource(r))
            .collect::<Result<Vec<_>>>()?;

        let idx = TaskIdx(self.tasks.len());
        for &resource in &outputs {
            if let Some(&first) = self.producers.get(&resource) {
                return Err(SlotplanError::CollidingOutputs {
                    resource: self.resources[resource.0].id.clone(),
                    first: self.task_id(first, &task),
                    second: task.id.clone(),
                });
            }
            self.producers.insert(resource, idx);
        }

        let slots = policy
            .slots(task.duration, time_unit)
            .ok_or_else(|| SlotplanError::IndivisibleDuration(task.id.clone()))?;

        debug!(
            task = %task.id,
            worker = %task.worker.id,
            slots,
            "registered task"
        );

        self.task_ids.insert(task.id.clone(), idx);
        self.tasks.push(TaskEntry {
            task,
            owner,
            inputs,
            outputs,
            slots,
        });
        Ok(())
    }
}

impl Project {
    /// Validate `tasks` with the default [`DurationPolicy`] (exact division).
    pub fn new(tasks: impl IntoIterator<Item = Task>, time_unit: Duration) -> Result<Self> {
        Self::with_policy(tasks, time_unit, DurationPolicy::default())
    }

    /// Validate `tasks`, converting durations to slots with `policy`.
    ///
    /// Fails on the first violation: a reused task, worker or resource
    /// identifier, a resource produced twice, a zero time unit or (with
    /// [`DurationPolicy::Exact`]) a duration that is not a whole number of
    /// slots.
    pub fn with_policy(
        tasks: impl IntoIterator<Item = Task>,
        time_unit: Duration,
        policy: DurationPolicy,
    ) -> Result<Self> {
        if time_unit.is_zero() {
            return Err(SlotplanError::InvalidTimeUnit);
        }

        let mut reg = Registry::default();
        for task in tasks {
            reg.add_task(task, time_unit, policy)?;
        }

        let horizon = reg.tasks.iter().map(|e| e.slots).sum();
        let identifier_width = reg
            .tasks
            .iter()
            .map(|e| e.task.id.as_str())
            .chain(reg.workers.iter().map(|w| w.id.as_str()))
            .chain(reg.resources.iter().map(|r| r.id.as_str()))
            .map(|id| id.chars().count())
            .max()
            .unwrap_or(0);

        debug!(
            tasks = reg.tasks.len(),
            workers = reg.workers.len(),
            resources = reg.resources.len(),
            horizon,
            "project validated"
        );

        Ok(Self {
            tasks: reg.tasks,
            workers: reg.workers,
            resources: reg.resources,
            producers: reg.producers,
            time_unit,
            duration_policy: policy,
            horizon,
            identifier_width,
        })
    }

    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }

    pub fn duration_policy(&self) -> DurationPolicy {
        self.duration_policy
    }

    /// Total number of slots in the timeline: the sum of all task durations
    /// in slots. A serial schedule always fits.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Longest identifier (in characters) over tasks, workers and resources.
    pub fn identifier_width(&self) -> usize {
        self.identifier_width
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn task_indices(&self) -> impl Iterator<Item = TaskIdx> + '_ {
        (0..self.tasks.len()).map(TaskIdx)
    }

    pub fn worker_indices(&self) -> impl Iterator<Item = WorkerIdx> + '_ {
        (0..self.workers.len()).map(WorkerIdx)
    }

    pub fn task(&self, idx: TaskIdx) -> &Task {
        &self.tasks[idx.0].task
    }

    pub fn worker(&self, idx: WorkerIdx) -> &Worker {
        &self.workers[idx.0]
    }

    pub fn resource(&self, idx: ResourceIdx) -> &Resource {
        &self.resources[idx.0]
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().map(|e| &e.task)
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn owner_of(&self, task: TaskIdx) -> WorkerIdx {
        self.tasks[task.0].owner
    }

    pub fn inputs_of(&self, task: TaskIdx) -> &[ResourceIdx] {
        &self.tasks[task.0].inputs
    }

    pub fn outputs_of(&self, task: TaskIdx) -> &[ResourceIdx] {
        &self.tasks[task.0].outputs
    }

    /// Required working slots for `task`.
    pub fn duration_slots(&self, task: TaskIdx) -> usize {
        self.tasks[task.0].slots
    }

    pub fn producer_of(&self, resource: ResourceIdx) -> Option<TaskIdx> {
        self.producers.get(&resource).copied()
    }

    pub fn task_index(&self, id: &str) -> Option<TaskIdx> {
        self.tasks.iter().position(|e| e.task.id == id).map(TaskIdx)
    }

    pub fn worker_index(&self, id: &str) -> Option<WorkerIdx> {
        self.workers.iter().position(|w| w.id == id).map(WorkerIdx)
    }

    pub fn resource_index(&self, id: &str) -> Option<ResourceIdx> {
        self.resources.iter().position(|r| r.id == id).map(ResourceIdx)
    }
}
