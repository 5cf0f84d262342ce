// src/types.rs

//! Small enums shared by the config file, the CLI and the compiler.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Goal function added on top of the compiled constraints.
///
/// - `WeightedSlot`: minimise `Σ k · work[i,j,k]`. Pushes work towards early
///   slots in aggregate; a proxy for finishing early, not a makespan bound.
/// - `Makespan`: minimise an auxiliary `y` with `y ≥ k · work[i,j,k]`, i.e. the
///   latest slot in which any work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectiveKind {
    #[default]
    WeightedSlot,
    Makespan,
}

impl FromStr for ObjectiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weighted-slot" | "weighted_slot" => Ok(ObjectiveKind::WeightedSlot),
            "makespan" => Ok(ObjectiveKind::Makespan),
            other => Err(format!(
                "invalid objective: {other} (expected \"weighted-slot\" or \"makespan\")"
            )),
        }
    }
}

/// How the completion indicator `complete[j,k]` is tied to accumulated work.
///
/// - `OneSided`: `complete[j,k]` may only be 1 once task j has all its work
///   before slot k. Nothing forces it to 1, so the solver may leave it at 0
///   and start successors later than the true completion.
/// - `TwoSided`: additionally forces `complete[j,k] = 1` once the work is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompletionEncoding {
    #[default]
    OneSided,
    TwoSided,
}

impl FromStr for CompletionEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one-sided" => Ok(CompletionEncoding::OneSided),
            "two-sided" => Ok(CompletionEncoding::TwoSided),
            other => Err(format!(
                "invalid completion encoding: {other} (expected \"one-sided\" or \"two-sided\")"
            )),
        }
    }
}

/// Conversion of a task duration into a whole number of slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPolicy {
    /// Reject durations that are not a multiple of the time unit.
    #[default]
    Exact,
    /// Integer division; the remainder is dropped.
    Truncate,
    /// Round up to the next whole slot.
    Ceil,
}

impl DurationPolicy {
    /// Number of slots for `duration` given `time_unit`.
    ///
    /// Returns `None` when the policy is `Exact` and the division leaves a
    /// remainder. `time_unit` must be non-zero.
    pub fn slots(self, duration: Duration, time_unit: Duration) -> Option<usize> {
        let d = duration.as_nanos();
        let u = time_unit.as_nanos();
        let (q, r) = (d / u, d % u);
        let slots = match self {
            DurationPolicy::Exact if r != 0 => return None,
            DurationPolicy::Exact | DurationPolicy::Truncate => q,
            DurationPolicy::Ceil => q + u128::from(r != 0),
        };
        usize::try_from(slots).ok()
    }
}

impl FromStr for DurationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(DurationPolicy::Exact),
            "truncate" => Ok(DurationPolicy::Truncate),
            "ceil" => Ok(DurationPolicy::Ceil),
            other => Err(format!(
                "invalid duration policy: {other} (expected \"exact\", \"truncate\" or \"ceil\")"
            )),
        }
    }
}

/// Which activity grid(s) the CLI prints after solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    #[default]
    Tasks,
    Workers,
    Both,
}

impl FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tasks" => Ok(ReportView::Tasks),
            "workers" => Ok(ReportView::Workers),
            "both" => Ok(ReportView::Both),
            other => Err(format!(
                "invalid view: {other} (expected \"tasks\", \"workers\" or \"both\")"
            )),
        }
    }
}

/// Parse a duration string like `"5d"`, `"3h"`, `"90m"`, `"30s"`, `"250ms"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, h or d",
                unit
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{s}' is too large"))
}
