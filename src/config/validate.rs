// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ProjectFile, RawProjectFile, TaskConfig};
use crate::domain::{Resource, Task, Worker};
use crate::errors::{Result, SlotplanError};
use crate::types::parse_duration;

impl TryFrom<RawProjectFile> for ProjectFile {
    type Error = SlotplanError;

    fn try_from(raw: RawProjectFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        let time_unit = parse_field("[project].time_unit", &raw.project.time_unit)?;
        if time_unit.is_zero() {
            return Err(SlotplanError::ConfigError(
                "[project].time_unit must be greater than zero".to_string(),
            ));
        }
        let time_limit = raw
            .solver
            .time_limit
            .as_deref()
            .map(|s| parse_field("[solver].time_limit", s))
            .transpose()?;

        let tasks = raw
            .task
            .iter()
            .map(|t| build_task(&raw, t))
            .collect::<Result<Vec<_>>>()?;

        Ok(ProjectFile::new_unchecked(
            time_unit,
            raw.project.duration_policy,
            raw.solver,
            time_limit,
            tasks,
        ))
    }
}

fn ensure_has_tasks(raw: &RawProjectFile) -> Result<()> {
    if raw.task.is_empty() {
        return Err(SlotplanError::ConfigError(
            "project must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn parse_field(field: &str, value: &str) -> Result<Duration> {
    parse_duration(value).map_err(|e| SlotplanError::ConfigError(format!("{field}: {e}")))
}

fn build_task(raw: &RawProjectFile, cfg: &TaskConfig) -> Result<Task> {
    if cfg.id.trim().is_empty() {
        return Err(SlotplanError::ConfigError(
            "task with an empty `id`".to_string(),
        ));
    }

    let worker_cfg = raw.worker.get(&cfg.worker).ok_or_else(|| {
        SlotplanError::ConfigError(format!(
            "task '{}' is assigned to unknown worker '{}'",
            cfg.id, cfg.worker
        ))
    })?;
    let worker = Worker::new(cfg.worker.clone(), worker_cfg.symbol.as_deref().unwrap_or("*"));

    let duration = parse_field(&format!("task '{}' duration", cfg.id), &cfg.duration)?;

    let resource = |id: &String| {
        let kind = raw.resource.get(id).map(|r| r.kind.clone()).unwrap_or_default();
        Resource::new(id.clone()).with_kind(kind)
    };

    let mut task = Task::new(cfg.id.clone(), worker, duration)
        .with_inputs(cfg.inputs.iter().map(resource))
        .with_outputs(cfg.outputs.iter().map(resource));
    if let Some(symbol) = cfg.symbol.as_deref() {
        task = task.with_symbol(symbol);
    }
    Ok(task)
}
