// src/domain/worker.rs

use super::single_symbol;

/// Someone (or something) that performs tasks, one slot at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Worker {
    pub id: String,
    /// Character shown in the per-task activity grid.
    pub symbol: char,
}

impl Worker {
    /// Create a worker. `symbol` must be a single character, otherwise `*`
    /// is used.
    pub fn new(id: impl Into<String>, symbol: &str) -> Self {
        Self {
            id: id.into(),
            symbol: single_symbol(symbol),
        }
    }
}
