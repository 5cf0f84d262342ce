// src/dag/graph.rs

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use tracing::debug;

use crate::domain::{Project, ResourceIdx, TaskIdx};
use crate::errors::{Result, SlotplanError};

/// Directed acyclic graph over tasks.
///
/// Edge direction: producer -> consumer. For
///   task B with input `r`, task A with output `r`
/// we add edge A -> B, labelled with the first resource linking them.
///
/// Node `n` always holds task `TaskIdx(n)`; every task is a node, including
/// tasks without inputs or consumers.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<TaskIdx, ResourceIdx>,
    task_ids: Vec<String>,
    /// Transitive predecessors per task, sorted by index.
    ancestors: Vec<Vec<TaskIdx>>,
    linked: Vec<ResourceIdx>,
    order: Vec<TaskIdx>,
}

impl DependencyGraph {
    /// Derive the precedence graph of a validated [`Project`].
    ///
    /// Fails with [`SlotplanError::UnlinkedInput`] when a consumed resource has
    /// no producer, and with [`SlotplanError::CyclicDependency`] when the
    /// resulting graph is not acyclic. No partial graph is returned.
    pub fn build(project: &Project) -> Result<Self> {
        let mut graph: DiGraph<TaskIdx, ResourceIdx> =
            DiGraph::with_capacity(project.task_count(), 0);
        for task in project.task_indices() {
            graph.add_node(task);
        }

        let mut linked: Vec<ResourceIdx> = Vec::new();

        for consumer in project.task_indices() {
            for &input in project.inputs_of(consumer) {
                let producer = project.producer_of(input).ok_or_else(|| {
                    SlotplanError::UnlinkedInput(project.resource(input).id.clone())
                })?;

                let (from, to) = (node(producer), node(consumer));
                if graph.find_edge(from, to).is_none() {
                    graph.add_edge(from, to, input);
                }
                if !linked.contains(&input) {
                    linked.push(input);
                }
            }
        }

        let order = match toposort(&graph, None) {
            Ok(order) => order.into_iter().map(|n| graph[n]).collect::<Vec<_>>(),
            Err(cycle) => {
                let task = graph[cycle.node_id()];
                return Err(SlotplanError::CyclicDependency(
                    project.task(task).id.clone(),
                ));
            }
        };

        let ancestors = project
            .task_indices()
            .map(|task| collect_ancestors(&graph, task))
            .collect::<Vec<_>>();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            linked = linked.len(),
            "dependency graph built"
        );

        Ok(Self {
            graph,
            task_ids: project.tasks().map(|t| t.id.clone()).collect(),
            ancestors,
            linked,
            order,
        })
    }

    /// Every task that must complete before `task` may start (transitively).
    pub fn ancestors(&self, task: TaskIdx) -> &[TaskIdx] {
        self.ancestors
            .get(task.0)
            .map(|a| a.as_slice())
            .unwrap_or(&[])
    }

    /// Ancestor lookup by task identifier. Returns `None` for unknown tasks.
    pub fn ancestors_of(&self, task_id: &str) -> Option<Vec<&str>> {
        let idx = self.task_ids.iter().position(|id| id == task_id)?;
        Some(
            self.ancestors[idx]
                .iter()
                .map(|a| self.task_ids[a.0].as_str())
                .collect(),
        )
    }

    /// Immediate producers of `task`'s inputs.
    pub fn dependencies_of(&self, task: TaskIdx) -> Vec<TaskIdx> {
        self.neighbours(task, Direction::Incoming)
    }

    /// Immediate consumers of `task`'s outputs.
    pub fn dependents_of(&self, task: TaskIdx) -> Vec<TaskIdx> {
        self.neighbours(task, Direction::Outgoing)
    }

    /// Tasks without any dependency.
    pub fn roots(&self) -> Vec<TaskIdx> {
        (0..self.graph.node_count())
            .map(TaskIdx)
            .filter(|&t| self.ancestors(t).is_empty())
            .collect()
    }

    /// A topological order of all tasks.
    pub fn topological_order(&self) -> &[TaskIdx] {
        &self.order
    }

    /// Resources that link a producer to at least one consumer, in the order
    /// they were first linked.
    pub fn linked_resources(&self) -> &[ResourceIdx] {
        &self.linked
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbours(&self, task: TaskIdx, dir: Direction) -> Vec<TaskIdx> {
        if task.0 >= self.graph.node_count() {
            return Vec::new();
        }
        let mut out: Vec<TaskIdx> = self
            .graph
            .neighbors_directed(node(task), dir)
            .map(|n| self.graph[n])
            .collect();
        out.sort();
        out
    }
}

fn node(task: TaskIdx) -> NodeIndex {
    NodeIndex::new(task.0)
}

fn collect_ancestors(graph: &DiGraph<TaskIdx, ResourceIdx>, task: TaskIdx) -> Vec<TaskIdx> {
    let reversed = Reversed(graph);
    let start = node(task);
    let mut dfs = Dfs::new(reversed, start);
    let mut out = Vec::new();
    while let Some(n) = dfs.next(reversed) {
        if n != start {
            out.push(graph[n]);
        }
    }
    out.sort();
    out
}
