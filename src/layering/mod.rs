// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Layering of realization graphs into diagrams.
//!
//! Events are visited in topological order and each lands one layer below
//! its deepest predecessor, so a vertex is in layer `d` exactly when the
//! longest path reaching it from a source has `d` edges. This is the layering
//! Kahn's algorithm produces when it peels off the events with no remaining
//! predecessors one layer at a time. Each layer is an antichain, so its swaps
//! can be drawn side by side, and the number of layers is the height of the
//! diagram.

use crate::graph::RealizationGraph;
use crate::matrix::SwapMatrix;
use crate::model::{Line, SwapEvent};
use petgraph::algo::toposort;
use serde::{Deserialize, Serialize};
use std::fmt;

impl RealizationGraph {
    /// Layer index of every vertex, indexed by vertex id.
    ///
    /// # Panics
    ///
    /// Panics if the graph has a cycle.
    fn levels(&self) -> Vec<usize> {
        let order = match toposort(self.digraph(), None) {
            Ok(order) => order,
            Err(cycle) => panic!(
                "Layering requires an acyclic graph; {} is on a cycle",
                self.event(cycle.node_id())
            ),
        };
        let mut level = vec![0usize; self.vertex_count()];
        for u in order {
            let next = level[u.index()] + 1;
            for v in self.successors(u) {
                level[v.index()] = level[v.index()].max(next);
            }
        }
        level
    }

    /// Events grouped into layers; within a layer events are sorted.
    pub fn layers(&self) -> Vec<Vec<SwapEvent>> {
        let levels = self.levels();
        let mut layers: Vec<Vec<SwapEvent>> = vec![Vec::new(); layer_count(&levels)];
        for v in self.vertex_ids() {
            layers[levels[v.index()]].push(self.event(v));
        }
        for layer in &mut layers {
            layer.sort_unstable();
        }
        layers
    }

    /// Number of layers (0 for the empty graph).
    pub fn height(&self) -> usize {
        layer_count(&self.levels())
    }
}

fn layer_count(levels: &[usize]) -> usize {
    levels.iter().max().map_or(0, |&deepest| deepest + 1)
}

/// A layered realization together with where each line ends up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagram {
    line_count: usize,
    layers: Vec<Vec<SwapEvent>>,
    final_permutation: Vec<Line>,
}

impl Diagram {
    pub fn new(line_count: usize, layers: Vec<Vec<SwapEvent>>, final_permutation: Vec<Line>) -> Self {
        Self {
            line_count,
            layers,
            final_permutation,
        }
    }

    /// Layer an acyclic realization of `matrix`.
    ///
    /// Returns `None` when the matrix has no consistent final permutation.
    pub fn from_graph(graph: &RealizationGraph, matrix: &SwapMatrix) -> Option<Self> {
        let final_permutation = matrix.final_permutation()?;
        Some(Self::new(matrix.line_count(), graph.layers(), final_permutation))
    }

    pub fn height(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Vec<SwapEvent>] {
        &self.layers
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn final_permutation(&self) -> &[Line] {
        &self.final_permutation
    }

    /// Plain data for an external renderer.
    pub fn render_data(&self) -> RenderData {
        RenderData {
            h: self.height(),
            s: self
                .layers
                .iter()
                .map(|layer| {
                    layer
                        .iter()
                        .map(|event| {
                            let pair = event.unordered();
                            [pair.low().index(), pair.high().index()]
                        })
                        .collect()
                })
                .collect(),
            p: self.final_permutation.iter().map(|line| line.index()).collect(),
        }
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.render_data(), f)
    }
}

/// Renderer input: height, per-layer unordered line pairs, and the line at
/// each final position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderData {
    pub h: usize,
    pub s: Vec<Vec<[usize; 2]>>,
    pub p: Vec<usize>,
}

impl fmt::Display for RenderData {
    /// The compact JSON form, `{"h":2,"s":[[[1,2]],[[1,2]]],"p":[0,1,2,3]}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
