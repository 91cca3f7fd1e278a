//! Dependency-Aware Size Trimming
//!
//! Post-processing pass that shrinks an over-sized closure down to a target
//! cardinality. Chunks are discarded cheapest-first, but a chunk is only
//! removable while no kept chunk still requires it, so the surviving set
//! stays closed under the requires relation. When every remaining chunk is
//! pinned by some other kept chunk (a mutual-dependency deadlock), the pass
//! falls back to keeping the heaviest chunks outright and reports the loss
//! of the closure invariant through its `exact` flag.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::data_structures::graph::ChunkGraph;

/// Trim a closure to at most `limit` chunks
///
/// Returns the kept identifiers in their original order and an `exact`
/// indicator: true while the kept set is still closed under the requires
/// relation, false when the top-weight fallback had to discard it.
pub fn enforce_size_limit(
    graph: &ChunkGraph,
    closure_ids: &[String],
    limit: usize,
) -> (Vec<String>, bool) {
    if closure_ids.len() <= limit {
        return (closure_ids.to_vec(), true);
    }

    // Dependents per chunk, over the raw edge list. Dependents outside the
    // closure can never block a removal because only kept chunks are
    // consulted below.
    let mut dependents: HashMap<&str, HashSet<&str>> = HashMap::new();
    for edge in graph.edges() {
        dependents
            .entry(edge.to.as_str())
            .or_default()
            .insert(edge.from.as_str());
    }

    let weight_of = |id: &str| graph.weight_of(id).unwrap_or(0.0);

    let mut cheapest_first: Vec<&str> = closure_ids.iter().map(String::as_str).collect();
    cheapest_first.sort_by(|a, b| {
        weight_of(a)
            .partial_cmp(&weight_of(b))
            .unwrap_or(Ordering::Equal)
    });

    let mut keep: HashSet<&str> = closure_ids.iter().map(String::as_str).collect();
    for &id in &cheapest_first {
        if keep.len() <= limit {
            break;
        }
        let pinned = dependents
            .get(id)
            .is_some_and(|required_by| required_by.iter().any(|from| keep.contains(from)));
        if !pinned {
            keep.remove(id);
        }
    }

    let mut exact = true;
    if keep.len() > limit {
        // Mutual-dependency deadlock: keep the heaviest chunks and give up
        // on the closure invariant.
        let mut heaviest_first: Vec<&str> = closure_ids.iter().map(String::as_str).collect();
        heaviest_first.sort_by(|a, b| {
            weight_of(b)
                .partial_cmp(&weight_of(a))
                .unwrap_or(Ordering::Equal)
        });
        keep = heaviest_first.into_iter().take(limit).collect();
        exact = false;
    }

    let kept = closure_ids
        .iter()
        .filter(|id| keep.contains(id.as_str()))
        .cloned()
        .collect();
    (kept, exact)
}
