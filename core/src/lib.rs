//! CORDON computational core
//!
//! Maximum-weight closure computation over weighted dependency graphs.
//! The crate reduces closure selection to a minimum-cut problem on a
//! capacitated flow network, solves it with Dinic's algorithm, and layers a
//! deterministic penalty bisection on top for size-targeted selection.
//!
//! # Architecture
//! - [`data_structures`] holds the input graph model and its lenient JSON
//!   codec.
//! - [`algorithm`] holds the flow network, the closure reduction, the
//!   size-targeted search, and the size-limit enforcement pass.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use crate::algorithm::closure::{build_closure, maximum_weight_closure, ClosureResult};
pub use crate::algorithm::max_flow::FlowNetwork;
pub use crate::algorithm::size_limit::enforce_size_limit;
pub use crate::algorithm::size_search::solve_closure_by_size;
pub use crate::data_structures::graph::{Chunk, ChunkGraph, DependencyEdge, GraphError, Weight};
