//! Weighted dependency graph with a lenient JSON codec
//!
//! This module implements the input model for closure computation: a mapping
//! from chunk identifier to weighted chunk, plus an ordered list of directed
//! "requires" edges. Chunks are stored in a `BTreeMap` so iteration order is
//! deterministic regardless of the key order of the serialized input; every
//! downstream structure (arc insertion order in the flow network, emitted
//! closure order) inherits that determinism.
//!
//! # Decoding Policy
//! The wire format is deliberately permissive: a chunk with an absent or
//! non-numeric `weight` decodes as weight zero, edge entries missing either
//! endpoint field are dropped, and missing top-level keys decode as empty
//! collections. Only a malformed document is an error.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Chunk weight type shared across the solver stack
pub type Weight = f64;

/// Errors arising while loading a graph from its wire representation
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unreadable graph input: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("malformed graph input: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single selectable unit with a signed benefit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Benefit (positive) or cost (negative) of selecting this chunk.
    /// Absent or non-numeric weights decode as zero.
    #[serde(default, deserialize_with = "lenient_weight")]
    pub weight: Weight,
}

impl Chunk {
    /// Create a chunk with the given weight
    pub fn new(weight: Weight) -> Self {
        Self { weight }
    }
}

/// Directed requires-relationship: `from` requires `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// The dependent chunk
    pub from: String,
    /// The chunk it requires
    pub to: String,
}

/// Weighted dependency graph: chunk map plus requires-edges
///
/// Edges whose endpoints never appear in the chunk map are retained here
/// (the size-limit pass consumes the raw edge list) and skipped by the
/// closure reduction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkGraph {
    #[serde(default)]
    chunks: BTreeMap<String, Chunk>,

    #[serde(default, deserialize_with = "lenient_edges")]
    edges: Vec<DependencyEdge>,
}

impl ChunkGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a graph from a JSON string
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a graph from an arbitrary reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, GraphError> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        Self::from_json(&buffer)
    }

    /// Insert or replace a chunk under the given identifier
    pub fn insert_chunk(&mut self, id: impl Into<String>, weight: Weight) {
        self.chunks.insert(id.into(), Chunk::new(weight));
    }

    /// Append a requires-edge (`from` requires `to`)
    pub fn add_dependency(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.push(DependencyEdge {
            from: from.into(),
            to: to.into(),
        });
    }

    /// Number of chunks in the graph
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the graph has no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Whether the graph contains a chunk under the given identifier
    pub fn contains(&self, id: &str) -> bool {
        self.chunks.contains_key(id)
    }

    /// Weight of the given chunk, if present
    pub fn weight_of(&self, id: &str) -> Option<Weight> {
        self.chunks.get(id).map(|chunk| chunk.weight)
    }

    /// Chunks in deterministic (sorted identifier) order
    pub fn chunks(&self) -> impl Iterator<Item = (&str, &Chunk)> {
        self.chunks.iter().map(|(id, chunk)| (id.as_str(), chunk))
    }

    /// Chunk weights in deterministic order
    pub fn weights(&self) -> impl Iterator<Item = Weight> + '_ {
        self.chunks.values().map(|chunk| chunk.weight)
    }

    /// Raw requires-edges in input order
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}

/// Decode a weight, mapping any non-numeric value to zero
fn lenient_weight<'de, D>(deserializer: D) -> Result<Weight, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(0.0))
}

/// Decode an edge list, dropping entries without both endpoint fields
fn lenient_edges<'de, D>(deserializer: D) -> Result<Vec<DependencyEdge>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| {
            let from = entry.get("from")?.as_str()?.to_owned();
            let to = entry.get("to")?.as_str()?.to_owned();
            Some(DependencyEdge { from, to })
        })
        .collect())
}
