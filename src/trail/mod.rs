// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the realization search.
//!
//! The search grows one [`RealizationGraph`] by absorbing triplet chains.
//! Every vertex and edge that an absorb adds is recorded here, so that
//! backtracking can remove exactly those additions, newest first, instead
//! of rebuilding the graph from the accepted choices.

use crate::graph::{RealizationGraph, VertexId};

/// A single addition to the search graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailEntry {
    Vertex(VertexId),
    Edge(VertexId, VertexId),
}

/// Undo journal for the search graph.
///
/// # Memory Model
///
/// - DYNAMIC: the trail changes during search, together with the graph it
///   journals
/// - Each SearchContext owns its own trail
///
/// A checkpoint is a position in the journal. The engine stores one per
/// stack entry and rewinds to it before each attempt.
#[derive(Debug, Default)]
pub struct Trail {
    /// All additions recorded so far, oldest first.
    entries: Vec<TrailEntry>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current position, to rewind to later.
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Record an addition to the graph.
    pub fn record(&mut self, entry: TrailEntry) {
        self.entries.push(entry);
    }

    /// Undo every addition after `checkpoint`, newest first.
    pub fn rewind_to(&mut self, checkpoint: usize, graph: &mut RealizationGraph) {
        while self.entries.len() > checkpoint {
            match self.entries.pop() {
                Some(TrailEntry::Edge(from, to)) => graph.pop_edge(from, to),
                Some(TrailEntry::Vertex(id)) => graph.pop_vertex(id),
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
