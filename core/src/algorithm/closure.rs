//! Maximum-Weight Closure via Minimum-Cut Reduction
//!
//! This module reduces closure selection to a minimum cut on a flow
//! network. A closure (closed subgraph) is a chunk subset in which every
//! selected chunk's requires-targets are also selected; the classical
//! reduction finds the closure of maximum total weight.
//!
//! # Theoretical Foundation
//!
//! Build a network with a virtual source, a virtual sink, and one node per
//! chunk. A chunk whose (penalty-adjusted) weight is non-negative attaches
//! to the source with capacity equal to that weight; a negative chunk
//! attaches to the sink with the weight's magnitude. Every requires-edge
//! becomes an arc whose capacity exceeds the total absolute weight, so no
//! minimum cut can afford to sever it: the cut can never separate a
//! selected chunk from a chunk it requires. The source side of a minimum
//! cut is then exactly a maximum-weight closure.
//!
//! The uniform penalty subtracted from every weight before classification
//! controls the size/weight tradeoff exploited by the size-targeted search:
//! at penalty zero the reduction yields the unconstrained optimum.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::algorithm::max_flow::{Capacity, FlowNetwork};
use crate::data_structures::graph::ChunkGraph;

/// Virtual source node index in the reduction network
const SOURCE: usize = 0;

/// Virtual sink node index in the reduction network
const SINK: usize = 1;

/// First chunk node index; chunk `i` maps to node `OFFSET + i`
const OFFSET: usize = 2;

/// A selected closure together with its aggregate properties
///
/// Produced fresh by each solver call and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureResult {
    /// Selected chunk identifiers in graph (sorted identifier) order
    pub closure: Vec<String>,
    /// Sum of the original, unpenalized weights of the selected chunks
    pub total_weight: f64,
    /// Number of selected chunks
    pub size: usize,
    /// Penalty value that produced this selection (0 for unconstrained)
    pub penalty: f64,
    /// False only when the size-limit fallback discarded the closure
    /// invariant; every other path preserves it
    pub exact: bool,
}

impl ClosureResult {
    /// The empty closure at the given penalty
    pub(crate) fn empty(penalty: f64) -> Self {
        Self {
            closure: Vec::new(),
            total_weight: 0.0,
            size: 0,
            penalty,
            exact: true,
        }
    }
}

/// Sum of absolute adjusted weights plus one: large enough that a
/// requires-arc can never sit on a minimum cut
fn saturation_capacity(graph: &ChunkGraph, penalty: f64) -> Capacity {
    graph.weights().map(|w| (w - penalty).abs()).sum::<f64>() + 1.0
}

/// Compute the maximum-weight closure under a uniform weight penalty
///
/// Edges referencing identifiers absent from the chunk map are skipped.
/// The reported total weight sums original weights, not adjusted ones.
pub fn build_closure(graph: &ChunkGraph, penalty: f64) -> ClosureResult {
    let chunk_count = graph.chunk_count();
    if chunk_count == 0 {
        return ClosureResult::empty(penalty);
    }

    let infinite = saturation_capacity(graph, penalty);
    let mut network = FlowNetwork::new(chunk_count + OFFSET);
    let mut node_of: HashMap<&str, usize> = HashMap::with_capacity(chunk_count);

    for (index, (id, chunk)) in graph.chunks().enumerate() {
        let node = OFFSET + index;
        node_of.insert(id, node);
        let adjusted = chunk.weight - penalty;
        if adjusted >= 0.0 {
            network.add_edge(SOURCE, node, adjusted);
        } else {
            network.add_edge(node, SINK, -adjusted);
        }
    }

    for edge in graph.edges() {
        let (Some(&from), Some(&to)) = (
            node_of.get(edge.from.as_str()),
            node_of.get(edge.to.as_str()),
        ) else {
            continue;
        };
        network.add_edge(from, to, infinite);
    }

    network.max_flow(SOURCE, SINK);
    let reachable = network.reachable(SOURCE);

    let mut closure = Vec::new();
    let mut total_weight = 0.0;
    for (index, (id, chunk)) in graph.chunks().enumerate() {
        if reachable[OFFSET + index] {
            closure.push(id.to_owned());
            total_weight += chunk.weight;
        }
    }

    let size = closure.len();
    ClosureResult {
        closure,
        total_weight,
        size,
        penalty,
        exact: true,
    }
}

/// The unconstrained maximum-weight closure (penalty zero)
pub fn maximum_weight_closure(graph: &ChunkGraph) -> ClosureResult {
    build_closure(graph, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    /// Exhaustive maximum over all subsets satisfying the closure
    /// invariant; only usable for small graphs.
    fn brute_force_best_weight(graph: &ChunkGraph) -> f64 {
        let ids: Vec<&str> = graph.chunks().map(|(id, _)| id).collect();
        let n = ids.len();
        assert!(n <= 12, "brute force is exponential");

        let index_of: HashMap<&str, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let mut best = f64::NEG_INFINITY;
        for mask in 0u32..(1 << n) {
            let selected = |i: usize| mask & (1 << i) != 0;
            let closed = graph.edges().iter().all(|edge| {
                match (
                    index_of.get(edge.from.as_str()),
                    index_of.get(edge.to.as_str()),
                ) {
                    (Some(&from), Some(&to)) => !selected(from) || selected(to),
                    _ => true,
                }
            });
            if !closed {
                continue;
            }
            let weight: f64 = (0..n)
                .filter(|&i| selected(i))
                .map(|i| graph.weight_of(ids[i]).unwrap())
                .sum();
            best = best.max(weight);
        }
        best
    }

    fn is_closed(graph: &ChunkGraph, closure: &[String]) -> bool {
        let selected: std::collections::HashSet<&str> =
            closure.iter().map(String::as_str).collect();
        graph.edges().iter().all(|edge| {
            !graph.contains(edge.from.as_str())
                || !graph.contains(edge.to.as_str())
                || !selected.contains(edge.from.as_str())
                || selected.contains(edge.to.as_str())
        })
    }

    #[test]
    fn empty_graph_yields_empty_closure() {
        let graph = ChunkGraph::new();
        let result = maximum_weight_closure(&graph);
        assert!(result.closure.is_empty());
        assert_eq!(result.size, 0);
        assert!(close(result.total_weight, 0.0));
        assert!(close(result.penalty, 0.0));
        assert!(result.exact);
    }

    #[test]
    fn positive_chunk_with_negative_requirement_is_worth_taking() {
        // A (5) requires B (-3): selecting both nets 2, beating both the
        // empty set and the invalid {A}.
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("a", 5.0);
        graph.insert_chunk("b", -3.0);
        graph.add_dependency("a", "b");

        let result = maximum_weight_closure(&graph);
        assert_eq!(result.closure, vec!["a".to_string(), "b".to_string()]);
        assert!(close(result.total_weight, 2.0));
        assert_eq!(result.size, 2);
    }

    #[test]
    fn unprofitable_dependency_chain_is_left_out() {
        // A (1) requires B (-4): taking both nets -3, worse than nothing.
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("a", 1.0);
        graph.insert_chunk("b", -4.0);
        graph.add_dependency("a", "b");

        let result = maximum_weight_closure(&graph);
        assert!(result.closure.is_empty());
        assert!(close(result.total_weight, 0.0));
    }

    #[test]
    fn independent_chunks_split_by_sign() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("gain", 2.0);
        graph.insert_chunk("loss", -1.0);

        let result = maximum_weight_closure(&graph);
        assert_eq!(result.closure, vec!["gain".to_string()]);
        assert!(close(result.total_weight, 2.0));
    }

    #[test]
    fn closure_invariant_holds_on_layered_graph() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("app", 10.0);
        graph.insert_chunk("lib", -2.0);
        graph.insert_chunk("rt", -3.0);
        graph.insert_chunk("extra", 1.0);
        graph.insert_chunk("dead", -7.0);
        graph.add_dependency("app", "lib");
        graph.add_dependency("lib", "rt");
        graph.add_dependency("extra", "rt");
        graph.add_dependency("dead", "rt");

        let result = maximum_weight_closure(&graph);
        assert!(is_closed(&graph, &result.closure));
        assert!(result.closure.contains(&"app".to_string()));
        assert!(!result.closure.contains(&"dead".to_string()));
    }

    #[test]
    fn matches_brute_force_on_small_graphs() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("a", 4.0);
        graph.insert_chunk("b", -2.0);
        graph.insert_chunk("c", 3.5);
        graph.insert_chunk("d", -1.0);
        graph.insert_chunk("e", -5.0);
        graph.insert_chunk("f", 0.5);
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "c");
        graph.add_dependency("c", "d");
        graph.add_dependency("d", "e");
        graph.add_dependency("f", "b");
        // Cycle between b and f.
        graph.add_dependency("b", "f");

        let result = maximum_weight_closure(&graph);
        assert!(is_closed(&graph, &result.closure));
        assert!(close(result.total_weight, brute_force_best_weight(&graph)));
    }

    #[test]
    fn matches_brute_force_on_all_negative_graph() {
        let mut graph = ChunkGraph::new();
        for (id, weight) in [("x", -1.0), ("y", -2.0), ("z", -3.0)] {
            graph.insert_chunk(id, weight);
        }
        graph.add_dependency("x", "y");

        let result = maximum_weight_closure(&graph);
        assert!(close(result.total_weight, brute_force_best_weight(&graph)));
        assert!(result.closure.is_empty());
    }

    #[test]
    fn edges_with_unknown_endpoints_do_not_affect_selection() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("a", 5.0);
        graph.add_dependency("a", "ghost");
        graph.add_dependency("phantom", "a");

        let result = maximum_weight_closure(&graph);
        assert_eq!(result.closure, vec!["a".to_string()]);
        assert!(close(result.total_weight, 5.0));
    }

    #[test]
    fn penalty_monotonically_shrinks_the_closure() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("small", 1.0);
        graph.insert_chunk("mid", 2.0);
        graph.insert_chunk("large", 3.0);

        let mut previous = usize::MAX;
        for penalty in [0.0, 1.5, 2.5, 3.5] {
            let result = build_closure(&graph, penalty);
            assert!(result.size <= previous);
            previous = result.size;
        }
    }

    #[test]
    fn penalized_result_reports_original_weights() {
        let mut graph = ChunkGraph::new();
        graph.insert_chunk("a", 4.0);
        graph.insert_chunk("b", 1.0);

        let result = build_closure(&graph, 2.0);
        assert_eq!(result.closure, vec!["a".to_string()]);
        // Original weight 4, not the adjusted 2.
        assert!(close(result.total_weight, 4.0));
        assert!(close(result.penalty, 2.0));
    }
}
