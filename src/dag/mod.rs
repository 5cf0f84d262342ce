// src/dag/mod.rs

//! Task precedence derived from resource links.
//!
//! - [`graph`] builds the producer → consumer DAG with `petgraph`, rejects
//!   unlinked inputs and cycles, and answers ancestor queries used by the
//!   precedence constraints.

pub mod graph;

pub use graph::DependencyGraph;
