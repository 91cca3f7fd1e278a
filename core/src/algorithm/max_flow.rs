//! Maximum Flow via Dinic's Algorithm
//!
//! This module implements a directed capacitated flow network with paired
//! residual arcs and a Dinic-style maximum-flow computation. After the flow
//! has been driven to its maximum, the set of nodes reachable from the
//! source through arcs with positive residual capacity is exactly the
//! source side of a minimum cut, which is what the closure reduction reads
//! back.
//!
//! # Theoretical Foundation
//!
//! Dinic's algorithm alternates between two phases: a breadth-first pass
//! assigns each node its distance from the source in the residual graph
//! (the level graph), and a blocking-flow pass saturates augmenting paths
//! that advance exactly one level per arc. Each phase strictly increases
//! the source-sink distance, bounding the number of phases by the node
//! count.
//!
//! ## Residual Invariant
//!
//! Every forward arc is created together with a zero-capacity reverse arc;
//! a push of `f` units decreases the forward residual and increases the
//! paired reverse residual by the same amount, so their sum is conserved at
//! the original capacity for the lifetime of the network.
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V^2 * E) in the worst case
//! - **Space Complexity**: O(V + E)
//!
//! The blocking-flow pass keeps a per-node "next arc" cursor so successive
//! path searches resume scanning where the previous one stopped; dropping
//! the cursor would remain correct but forfeit the complexity bound. The
//! traversal is iterative with an explicit path stack, so deep networks
//! cannot exhaust the call stack.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::VecDeque;

/// Flow capacity type with algebraic properties
pub type Capacity = f64;

/// Flow value type supporting arithmetic operations
pub type Flow = f64;

/// Residual tolerance against floating-point round-off
pub const RESIDUAL_EPSILON: f64 = 1e-9;

/// Directed arc with residual capacity tracking
#[derive(Debug, Clone)]
struct FlowArc {
    /// Target node index
    to: usize,
    /// Remaining capacity; driven toward (never below) zero by pushes
    capacity: Capacity,
    /// Index of the paired reverse arc in the target's adjacency list
    reverse: usize,
}

/// Directed capacitated graph with Dinic-style maximum flow
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    /// Per-node adjacency lists; every forward arc is paired with a
    /// zero-capacity reverse arc in the target's list
    adjacency: Vec<Vec<FlowArc>>,
}

impl FlowNetwork {
    /// Create a network with the given number of nodes and no arcs
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Number of nodes in the network
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Add a forward arc `from -> to` with the given capacity and its
    /// paired zero-capacity reverse arc
    ///
    /// Capacity must be non-negative; node indices must be in bounds.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity) {
        debug_assert!(capacity >= 0.0, "arc capacity cannot be negative");

        let forward_index = self.adjacency[from].len();
        // A self-loop's reverse arc lands directly after the forward arc.
        let reverse_index = if from == to {
            forward_index + 1
        } else {
            self.adjacency[to].len()
        };

        self.adjacency[from].push(FlowArc {
            to,
            capacity,
            reverse: reverse_index,
        });
        self.adjacency[to].push(FlowArc {
            to: from,
            capacity: 0.0,
            reverse: forward_index,
        });
    }

    /// Compute the maximum flow from `source` to `sink`
    ///
    /// Residual capacities are mutated in place; call [`reachable`] on the
    /// saturated network to read the minimum cut.
    ///
    /// [`reachable`]: FlowNetwork::reachable
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Flow {
        if source == sink {
            return 0.0;
        }

        let mut total = 0.0;
        loop {
            let level = self.level_graph(source);
            if level[sink] < 0 {
                break;
            }
            let mut next_arc = vec![0usize; self.adjacency.len()];
            loop {
                let pushed = self.augment(source, sink, &level, &mut next_arc);
                if pushed <= 0.0 {
                    break;
                }
                total += pushed;
            }
        }
        total
    }

    /// Nodes reachable from `source` through arcs with positive residual
    /// capacity
    ///
    /// After [`max_flow`] has run to completion, the true entries form the
    /// source side of a minimum cut.
    ///
    /// [`max_flow`]: FlowNetwork::max_flow
    pub fn reachable(&self, source: usize) -> Vec<bool> {
        let mut seen = vec![false; self.adjacency.len()];
        let mut stack = vec![source];
        seen[source] = true;
        while let Some(node) = stack.pop() {
            for arc in &self.adjacency[node] {
                if arc.capacity > RESIDUAL_EPSILON && !seen[arc.to] {
                    seen[arc.to] = true;
                    stack.push(arc.to);
                }
            }
        }
        seen
    }

    /// Breadth-first level assignment over residual arcs; -1 marks nodes
    /// unreachable from the source
    fn level_graph(&self, source: usize) -> Vec<i32> {
        let mut level = vec![-1; self.adjacency.len()];
        let mut queue = VecDeque::new();
        level[source] = 0;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            for arc in &self.adjacency[node] {
                if arc.capacity > RESIDUAL_EPSILON && level[arc.to] < 0 {
                    level[arc.to] = level[node] + 1;
                    queue.push_back(arc.to);
                }
            }
        }
        level
    }

    /// Push one augmenting path within the current level graph
    ///
    /// Iterative depth-first search carrying the shared next-arc cursors;
    /// returns the amount pushed, or 0 when no path remains.
    fn augment(
        &mut self,
        source: usize,
        sink: usize,
        level: &[i32],
        next_arc: &mut [usize],
    ) -> Flow {
        let mut path: Vec<(usize, usize)> = Vec::new();
        let mut node = source;
        loop {
            if node == sink {
                let mut pushed = Flow::INFINITY;
                for &(from, arc) in &path {
                    pushed = pushed.min(self.adjacency[from][arc].capacity);
                }
                for &(from, arc) in &path {
                    let (to, reverse) = {
                        let forward = &self.adjacency[from][arc];
                        (forward.to, forward.reverse)
                    };
                    self.adjacency[from][arc].capacity -= pushed;
                    self.adjacency[to][reverse].capacity += pushed;
                }
                return pushed;
            }

            let mut advanced = false;
            while next_arc[node] < self.adjacency[node].len() {
                let arc = &self.adjacency[node][next_arc[node]];
                if arc.capacity > RESIDUAL_EPSILON && level[arc.to] == level[node] + 1 {
                    path.push((node, next_arc[node]));
                    node = arc.to;
                    advanced = true;
                    break;
                }
                next_arc[node] += 1;
            }
            if advanced {
                continue;
            }

            // Dead end: retire the arc that led here and back up one step.
            match path.pop() {
                Some((previous, _)) => {
                    next_arc[previous] += 1;
                    node = previous;
                }
                None => return 0.0,
            }
        }
    }
}
