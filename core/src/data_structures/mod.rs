//! CORDON data structure layer
//! Graph model backing the closure solver
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;

pub use self::graph::*;
