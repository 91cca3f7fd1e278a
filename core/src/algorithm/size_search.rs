//! Size-Targeted Closure Search via Penalty Bisection
//!
//! Raising the uniform penalty makes every chunk less attractive, so the
//! optimal closure can only shrink or hold steady as the penalty grows.
//! This module exploits that monotonicity with a fixed-iteration bisection
//! over the penalty, steering the closure's cardinality toward a requested
//! target. The iteration count is fixed rather than tolerance-driven, which
//! keeps runtime and precision deterministic regardless of the input's
//! weight magnitudes.
//!
//! The best candidate across all iterations may still exceed the target;
//! it is handed to the size-limit enforcement pass before being returned.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;

use crate::algorithm::closure::{build_closure, maximum_weight_closure, ClosureResult};
use crate::algorithm::size_limit::enforce_size_limit;
use crate::data_structures::graph::ChunkGraph;

/// Fixed bisection depth; each iteration builds one fresh flow network
const BISECTION_ITERATIONS: usize = 36;

/// Padding on the initial bracket so it spans from "everything included"
/// to "everything excluded" even for degenerate weight ranges
const BRACKET_PADDING: f64 = 5.0;

/// Find a closure whose size is as close as possible to `target`
///
/// Degenerate targets resolve immediately: non-positive targets (or an
/// empty graph) yield the empty closure, and a target at or above the
/// chunk count delegates to the unconstrained optimum. Candidates are
/// ranked by distance to the target, ties broken by strictly greater
/// total weight. The winning candidate is trimmed by
/// [`enforce_size_limit`] when it still exceeds the target.
pub fn solve_closure_by_size(graph: &ChunkGraph, target: i64) -> ClosureResult {
    if target <= 0 || graph.is_empty() {
        return ClosureResult::empty(0.0);
    }
    let chunk_count = graph.chunk_count();
    if target as usize >= chunk_count {
        return maximum_weight_closure(graph);
    }
    let target_size = target as usize;

    let mut min_weight = f64::INFINITY;
    let mut max_weight = f64::NEG_INFINITY;
    for weight in graph.weights() {
        min_weight = min_weight.min(weight);
        max_weight = max_weight.max(weight);
    }
    let mut low = min_weight - min_weight.abs() - BRACKET_PADDING;
    let mut high = max_weight + max_weight.abs() + BRACKET_PADDING;

    let mut best: Option<ClosureResult> = None;
    for iteration in 0..BISECTION_ITERATIONS {
        let penalty = (low + high) / 2.0;
        let candidate = build_closure(graph, penalty);
        debug!(
            "bisection {iteration}: penalty {penalty:.6} -> size {}, weight {:.6}",
            candidate.size, candidate.total_weight
        );

        let better = match &best {
            None => true,
            Some(current) => {
                let candidate_distance = candidate.size.abs_diff(target_size);
                let current_distance = current.size.abs_diff(target_size);
                candidate_distance < current_distance
                    || (candidate_distance == current_distance
                        && candidate.total_weight > current.total_weight)
            }
        };

        if candidate.size > target_size {
            low = penalty;
        } else {
            high = penalty;
        }
        if better {
            best = Some(candidate);
        }
    }

    let best = best.unwrap_or_else(|| maximum_weight_closure(graph));
    let (closure, exact) = enforce_size_limit(graph, &best.closure, target_size);
    let total_weight: f64 = closure
        .iter()
        .filter_map(|id| graph.weight_of(id))
        .sum();
    let size = closure.len();

    ClosureResult {
        closure,
        total_weight,
        size,
        penalty: best.penalty,
        exact,
    }
}
