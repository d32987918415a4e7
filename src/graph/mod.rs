// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Realization graphs.
//!
//! A [`RealizationGraph`] is a directed graph whose vertices are
//! [`SwapEvent`]s and whose edges say "must happen before". Each triplet
//! realization is a chain; a global realization is the union of one chain
//! per triplet, and is valid when that union is acyclic.
//!
//! Storage is a `petgraph` [`DiGraph`] plus an index from event to node.
//! Vertices and edges are only ever appended, so the search can undo a
//! union by popping them off again in reverse order (see [`crate::trail`]);
//! removing the last node or edge of a `DiGraph` leaves every other index
//! unchanged.

pub mod cycle;

pub use cycle::{contains_cycle, CycleDetector};

use crate::model::{SwapEvent, UnorderedSwap};
use crate::trail::{Trail, TrailEntry};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex, NodeIndices};
use petgraph::visit::{GraphBase, IntoNeighbors, IntoNodeIdentifiers, Visitable};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Index of a vertex in a [`RealizationGraph`].
pub type VertexId = NodeIndex;

/// Directed graph over swap events.
#[derive(Debug, Clone, Default)]
pub struct RealizationGraph {
    graph: DiGraph<SwapEvent, ()>,
    index: HashMap<SwapEvent, VertexId>,
}

/// Sorted adjacency used for structural comparison.
pub(crate) type StructureKey = Vec<(SwapEvent, Vec<SwapEvent>)>;

impl RealizationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A path through the given events, in order.
    ///
    /// # Panics
    ///
    /// Panics if an event occurs twice.
    pub fn chain<I>(events: I) -> Self
    where
        I: IntoIterator<Item = SwapEvent>,
    {
        let mut graph = Self::new();
        let mut previous: Option<VertexId> = None;
        for event in events {
            let (id, added) = graph.add_event(event);
            assert!(added, "Event {} occurs twice in a chain", event);
            if let Some(prev) = previous {
                graph.add_edge(prev, id);
            }
            previous = Some(id);
        }
        graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_event(&self, event: SwapEvent) -> bool {
        self.index.contains_key(&event)
    }

    pub fn vertex(&self, event: SwapEvent) -> Option<VertexId> {
        self.index.get(&event).copied()
    }

    pub fn event(&self, id: VertexId) -> SwapEvent {
        self.graph[id]
    }

    /// All events, in insertion order.
    pub fn events(&self) -> impl Iterator<Item = SwapEvent> + '_ {
        self.graph.raw_nodes().iter().map(|node| node.weight)
    }

    pub fn vertex_ids(&self) -> NodeIndices {
        self.graph.node_indices()
    }

    pub fn successors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    pub fn predecessors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    /// All edges as `(from, to)` pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| (edge.source(), edge.target()))
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.contains_edge(from, to)
    }

    /// The underlying `petgraph` graph, for running its algorithms.
    pub fn digraph(&self) -> &DiGraph<SwapEvent, ()> {
        &self.graph
    }

    /// The events of one pair of lines, in the order they were added.
    pub fn events_of_pair(&self, pair: UnorderedSwap) -> impl Iterator<Item = SwapEvent> + '_ {
        self.events().filter(move |event| event.unordered() == pair)
    }

    /// Add an event, returning its id and whether it was new.
    pub fn add_event(&mut self, event: SwapEvent) -> (VertexId, bool) {
        if let Some(&id) = self.index.get(&event) {
            return (id, false);
        }
        let id = self.graph.add_node(event);
        self.index.insert(event, id);
        (id, true)
    }

    /// Add the edge `from → to` unless `from` is already a direct
    /// predecessor of `to`. Returns whether the edge was added.
    ///
    /// # Panics
    ///
    /// Panics on a self-loop.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        assert_ne!(from, to, "Self-loop on {}", self.event(from));
        if self.has_edge(from, to) {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    /// Remove the most recently added vertex.
    pub(crate) fn pop_vertex(&mut self, id: VertexId) {
        assert_eq!(
            id.index() + 1,
            self.graph.node_count(),
            "Vertices must be removed in reverse order"
        );
        assert!(
            self.graph.neighbors_undirected(id).next().is_none(),
            "Vertex {} still has edges",
            self.graph[id]
        );
        if let Some(event) = self.graph.remove_node(id) {
            self.index.remove(&event);
        }
    }

    /// Remove the most recently added edge.
    pub(crate) fn pop_edge(&mut self, from: VertexId, to: VertexId) {
        let last = self.graph.edge_count().checked_sub(1).map(EdgeIndex::new);
        let endpoints = last.and_then(|edge| self.graph.edge_endpoints(edge));
        assert!(
            endpoints == Some((from, to)),
            "Edges must be removed in reverse order"
        );
        if let Some(edge) = last {
            self.graph.remove_edge(edge);
        }
    }

    /// Union of two graphs: all vertices of both, and the edges of both with
    /// repeated edges skipped. Acyclicity is not checked.
    pub fn combine(&self, other: &RealizationGraph) -> RealizationGraph {
        let mut result = self.clone();
        result.union_with(other, None);
        result
    }

    /// Add `other` into this graph, recording every new vertex and edge on
    /// the trail. Returns the number of edges added.
    pub fn absorb(&mut self, other: &RealizationGraph, trail: &mut Trail) -> usize {
        self.union_with(other, Some(trail))
    }

    fn union_with(&mut self, other: &RealizationGraph, mut trail: Option<&mut Trail>) -> usize {
        let mut mapping = Vec::with_capacity(other.vertex_count());
        for event in other.events() {
            let (id, added) = self.add_event(event);
            if added {
                if let Some(trail) = trail.as_deref_mut() {
                    trail.record(TrailEntry::Vertex(id));
                }
            }
            mapping.push(id);
        }

        let mut added_edges = 0;
        for (from, to) in other.edges() {
            let (from, to) = (mapping[from.index()], mapping[to.index()]);
            if self.add_edge(from, to) {
                added_edges += 1;
                if let Some(trail) = trail.as_deref_mut() {
                    trail.record(TrailEntry::Edge(from, to));
                }
            }
        }
        added_edges
    }

    /// Adjacency by event identity, sorted, independent of insertion order.
    pub(crate) fn structure_key(&self) -> StructureKey {
        let mut key: StructureKey = self
            .vertex_ids()
            .map(|u| {
                let mut targets: Vec<SwapEvent> = self.successors(u).map(|v| self.event(v)).collect();
                targets.sort_unstable();
                (self.event(u), targets)
            })
            .collect();
        key.sort_unstable();
        key
    }
}

/// Free-function form of [`RealizationGraph::combine`].
pub fn combine(first: &RealizationGraph, second: &RealizationGraph) -> RealizationGraph {
    first.combine(second)
}

impl GraphBase for RealizationGraph {
    type NodeId = VertexId;
    type EdgeId = EdgeIndex;
}

impl<'a> IntoNeighbors for &'a RealizationGraph {
    type Neighbors = petgraph::graph::Neighbors<'a, ()>;

    fn neighbors(self, vertex: VertexId) -> Self::Neighbors {
        self.graph.neighbors(vertex)
    }
}

impl IntoNodeIdentifiers for &RealizationGraph {
    type NodeIdentifiers = NodeIndices;

    fn node_identifiers(self) -> NodeIndices {
        self.graph.node_indices()
    }
}

impl Visitable for RealizationGraph {
    type Map = HashSet<VertexId>;

    fn visit_map(&self) -> HashSet<VertexId> {
        HashSet::with_capacity(self.vertex_count())
    }

    fn reset_map(&self, map: &mut HashSet<VertexId>) {
        map.clear();
    }
}

impl PartialEq for RealizationGraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count()
            && self.edge_count() == other.edge_count()
            && self.structure_key() == other.structure_key()
    }
}

impl Eq for RealizationGraph {}

impl fmt::Display for RealizationGraph {
    /// One line per vertex: "event -> successor, successor".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (event, targets) in self.structure_key() {
            let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
            writeln!(f, "{} -> {}", event, targets.join(", "))?;
        }
        Ok(())
    }
}
