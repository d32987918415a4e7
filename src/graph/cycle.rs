// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cycle detection.
//!
//! Depth-first search over every vertex, keeping the set of visited
//! vertices and the set of vertices on the current DFS path. Meeting a
//! vertex that is on the path closes a cycle. The DFS uses an explicit
//! stack of neighbor iterators, so deep chains do not overflow the call
//! stack, and the detector keeps its vertex sets between calls.
//!
//! Any `petgraph` graph reference can be checked, as well as
//! [`RealizationGraph`](super::RealizationGraph).

use petgraph::visit::{GraphBase, IntoNeighbors, IntoNodeIdentifiers};
use std::collections::HashSet;
use std::hash::Hash;

/// Reusable DFS cycle detector.
#[derive(Debug)]
pub struct CycleDetector<V> {
    visited: HashSet<V>,
    on_stack: HashSet<V>,
}

impl<V: Copy + Eq + Hash> CycleDetector<V> {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
            on_stack: HashSet::new(),
        }
    }

    /// True if the graph contains a directed cycle.
    pub fn has_cycle<G>(&mut self, graph: G) -> bool
    where
        G: IntoNodeIdentifiers + IntoNeighbors + GraphBase<NodeId = V>,
    {
        self.visited.clear();
        self.on_stack.clear();

        let mut stack: Vec<(V, G::Neighbors)> = Vec::new();
        for root in graph.node_identifiers() {
            if !self.visited.insert(root) {
                continue;
            }
            self.on_stack.insert(root);
            stack.push((root, graph.neighbors(root)));

            while let Some((vertex, successors)) = stack.last_mut() {
                let vertex = *vertex;
                match successors.next() {
                    Some(target) => {
                        if self.on_stack.contains(&target) {
                            return true;
                        }
                        if self.visited.insert(target) {
                            self.on_stack.insert(target);
                            stack.push((target, graph.neighbors(target)));
                        }
                    }
                    None => {
                        self.on_stack.remove(&vertex);
                        stack.pop();
                    }
                }
            }
        }
        false
    }
}

impl<V: Copy + Eq + Hash> Default for CycleDetector<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot cycle check.
pub fn contains_cycle<G>(graph: G) -> bool
where
    G: IntoNodeIdentifiers + IntoNeighbors,
    G::NodeId: Eq + Hash,
{
    CycleDetector::new().has_cycle(graph)
}
