// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line triplets.
//!
//! A triplet is the smallest sub-system in which swaps constrain each other:
//! any two swaps that share a line belong to a common triplet, and the order
//! of the swaps within a triplet is one of the sequences enumerated by the
//! [`TripletRegistry`].

use crate::error::{InputError, Result};
use crate::graph::RealizationGraph;
use crate::memo::{TripletRegistry, TripletSwap};
use crate::model::{Line, OrderedSwap, SwapEvent, UnorderedSwap};
use serde::{Deserialize, Serialize};
use strum::EnumCount;

/// Three distinct lines, sorted ascending, with their pairwise swap counts.
///
/// Counts are stored as `(c01, c02, c12)` relative to the sorted lines.
/// Deserialized triplets are sorted the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TripletRepr")]
pub struct LineTriplet {
    lines: [Line; 3],
    counts: [u32; 3],
}

/// Serialized form of [`LineTriplet`]: counts follow the order of `lines`.
#[derive(Deserialize)]
struct TripletRepr {
    lines: [Line; 3],
    counts: [u32; 3],
}

impl TryFrom<TripletRepr> for LineTriplet {
    type Error = InputError;

    fn try_from(repr: TripletRepr) -> Result<Self> {
        let [a, b, c] = repr.lines;
        UnorderedSwap::try_new(a, b)?;
        UnorderedSwap::try_new(a, c)?;
        UnorderedSwap::try_new(b, c)?;
        let [ab, ac, bc] = repr.counts;
        Ok(Self::new(a, b, c, ab, ac, bc))
    }
}

impl LineTriplet {
    /// Create a triplet from three lines in any order and the counts of the
    /// pairs `(a, b)`, `(a, c)` and `(b, c)`.
    ///
    /// # Panics
    ///
    /// Panics if two of the lines coincide.
    pub fn new(a: Line, b: Line, c: Line, count_ab: u32, count_ac: u32, count_bc: u32) -> Self {
        let given = [
            (UnorderedSwap::new(a, b), count_ab),
            (UnorderedSwap::new(a, c), count_ac),
            (UnorderedSwap::new(b, c), count_bc),
        ];
        let mut lines = [a, b, c];
        lines.sort_unstable();

        let count_of = |x: Line, y: Line| {
            let pair = UnorderedSwap::new(x, y);
            given
                .iter()
                .find(|(p, _)| *p == pair)
                .map(|(_, count)| *count)
                .unwrap_or_else(|| unreachable!("pair {} is one of the three given pairs", pair))
        };

        let counts = [
            count_of(lines[0], lines[1]),
            count_of(lines[0], lines[2]),
            count_of(lines[1], lines[2]),
        ];
        Self { lines, counts }
    }

    /// The lines in ascending order.
    pub fn lines(&self) -> [Line; 3] {
        self.lines
    }

    /// The counts `(c01, c02, c12)` relative to the sorted lines.
    pub fn counts(&self) -> (u32, u32, u32) {
        (self.counts[0], self.counts[1], self.counts[2])
    }

    /// The count of one of the three pairs, or `None` for a foreign pair.
    pub fn count(&self, pair: UnorderedSwap) -> Option<u32> {
        let [l0, l1, l2] = self.lines;
        [
            (UnorderedSwap::new(l0, l1), self.counts[0]),
            (UnorderedSwap::new(l0, l2), self.counts[1]),
            (UnorderedSwap::new(l1, l2), self.counts[2]),
        ]
        .into_iter()
        .find(|(p, _)| *p == pair)
        .map(|(_, count)| count)
    }

    /// True if none of the three pairs swap.
    pub fn is_trivial(&self) -> bool {
        self.counts == [0, 0, 0]
    }

    /// Translate a role-level sequence into concrete swap events.
    ///
    /// Occurrence indices are counted separately for each of the six
    /// directed pairs.
    pub fn event_chain(&self, sequence: &[TripletSwap]) -> Vec<SwapEvent> {
        let mut occurrences = [0usize; TripletSwap::COUNT];
        sequence
            .iter()
            .map(|&step| {
                let (from, to) = step.roles();
                let counter = &mut occurrences[step as usize];
                let event = SwapEvent::new(OrderedSwap::new(self.lines[from], self.lines[to]), *counter);
                *counter += 1;
                event
            })
            .collect()
    }

    /// Every local realization of this triplet as a chain graph.
    ///
    /// The order follows the registry's enumeration order.
    pub fn realization_graphs(&self, registry: &TripletRegistry) -> Vec<RealizationGraph> {
        let (c01, c02, c12) = self.counts();
        registry
            .realizations(c01, c02, c12)
            .iter()
            .map(|sequence| RealizationGraph::chain(self.event_chain(sequence)))
            .collect()
    }
}
