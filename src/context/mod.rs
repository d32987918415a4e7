// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! - Tier 1 (MEMO): a [`SearchPlan`], the immutable list of triplets with
//!   their candidate chains, built once per matrix
//! - Tier 2 (DYNAMIC): the graph under construction, its trail and the
//!   search counters, owned by one [`SearchContext`]
//!
//! Several contexts can borrow the same plan, for example one per height
//! bound during height minimization.

use crate::graph::{CycleDetector, RealizationGraph, VertexId};
use crate::matrix::SwapMatrix;
use crate::memo::TripletRegistry;
use crate::model::{Line, LineTriplet, UnorderedSwap};
use crate::state::Statistics;
use crate::trail::Trail;

/// One triplet and its local realizations.
#[derive(Debug, Clone)]
pub struct PlannedTriplet {
    pub triplet: LineTriplet,
    pub candidates: Vec<RealizationGraph>,
}

/// Immutable search data (Tier 1: MEMO).
///
/// Triplets are ordered by candidate count, fewest first, keeping the
/// enumeration order among equals. Triplets without swaps are left out.
#[derive(Debug, Clone, Default)]
pub struct SearchPlan {
    base: RealizationGraph,
    triplets: Vec<PlannedTriplet>,
}

impl SearchPlan {
    /// Plan the search for `matrix`.
    ///
    /// With exactly two lines there are no triplets; the single pair's
    /// alternating chain becomes the base graph instead.
    pub fn new(matrix: &SwapMatrix, registry: &TripletRegistry) -> Self {
        let base = if matrix.line_count() == 2 {
            let pair = UnorderedSwap::new(Line::new(0), Line::new(1));
            RealizationGraph::chain(pair.events(matrix.count(0, 1)))
        } else {
            RealizationGraph::new()
        };

        let mut skipped = 0usize;
        let mut triplets: Vec<PlannedTriplet> = matrix
            .triplets()
            .filter(|triplet| {
                let trivial = triplet.is_trivial();
                skipped += usize::from(trivial);
                !trivial
            })
            .map(|triplet| PlannedTriplet {
                candidates: triplet.realization_graphs(registry),
                triplet,
            })
            .collect();
        triplets.sort_by_key(|planned| planned.candidates.len());

        tracing::debug!(
            lines = matrix.line_count(),
            triplets = triplets.len(),
            skipped,
            memo_size = registry.len(),
            "search plan built"
        );
        Self { base, triplets }
    }

    /// The graph every realization starts from.
    pub fn base(&self) -> &RealizationGraph {
        &self.base
    }

    /// Number of triplets to decide.
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }

    pub fn triplet(&self, round: usize) -> &PlannedTriplet {
        &self.triplets[round]
    }

    pub fn triplets(&self) -> &[PlannedTriplet] {
        &self.triplets
    }

    /// True if some triplet has no local realization, so the search must fail.
    pub fn has_dead_triplet(&self) -> bool {
        self.triplets.iter().any(|planned| planned.candidates.is_empty())
    }
}

/// Search context combining MEMO and DYNAMIC state.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     plan: &SearchPlan,         // Tier 1: Immutable, shared
///     graph: RealizationGraph,   // Tier 2: Mutable, owned
///     trail: Trail,              // Tier 2: Mutable, owned
///     statistics: Statistics,    // Tier 2: Mutable, owned
/// }
/// ```
///
/// Every change to `graph` made during search goes through
/// [`RealizationGraph::absorb`] with `trail`, so rewinding the trail
/// restores the graph.
#[derive(Debug)]
pub struct SearchContext<'p> {
    /// Immutable triplet data (Tier 1)
    pub plan: &'p SearchPlan,
    /// Graph built from the choices so far (Tier 2)
    pub graph: RealizationGraph,
    /// Undo journal for `graph` (Tier 2)
    pub trail: Trail,
    /// Height bound, if any
    pub max_height: Option<usize>,
    /// Search counters (Tier 2)
    pub statistics: Statistics,
    pub(crate) detector: CycleDetector<VertexId>,
}

impl<'p> SearchContext<'p> {
    /// Create a context starting from the plan's base graph.
    pub fn new(plan: &'p SearchPlan, max_height: Option<usize>) -> Self {
        Self {
            plan,
            graph: plan.base().clone(),
            trail: Trail::new(),
            max_height,
            statistics: Statistics::new(),
            detector: CycleDetector::new(),
        }
    }

    /// Undo every graph change recorded after `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.graph);
    }

    /// True if the current graph contains a cycle.
    pub fn has_cycle(&mut self) -> bool {
        self.detector.has_cycle(&self.graph)
    }

    /// Take the graph out of the context.
    pub fn into_graph(self) -> RealizationGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_skips_trivial_triplets_and_sorts() {
        let registry = TripletRegistry::new();
        // (0,1,2) has counts (1,1,1) and two candidates; the triplets with
        // line 3 have counts (1,0,0) and one candidate each.
        let matrix =
            SwapMatrix::from_pair_counts(4, &[(0, 1, 1), (0, 2, 1), (1, 2, 1)]).unwrap();
        let plan = SearchPlan::new(&matrix, &registry);
        let sizes: Vec<usize> = plan.triplets().iter().map(|p| p.candidates.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 2]);
        assert_eq!(plan.len(), 4);
        assert!(!plan.has_dead_triplet());
        assert!(plan.base().is_empty());
    }

    #[test]
    fn test_plan_for_two_lines_uses_pair_chain() {
        let registry = TripletRegistry::new();
        let matrix = SwapMatrix::from_pair_counts(2, &[(0, 1, 3)]).unwrap();
        let plan = SearchPlan::new(&matrix, &registry);
        assert!(plan.is_empty());
        assert_eq!(plan.base().vertex_count(), 3);
        assert_eq!(plan.base().height(), 3);
    }

    #[test]
    fn test_plan_detects_dead_triplet() {
        let registry = TripletRegistry::new();
        let matrix = SwapMatrix::from_pair_counts(3, &[(0, 2, 1)]).unwrap();
        let plan = SearchPlan::new(&matrix, &registry);
        assert_eq!(plan.len(), 1);
        assert!(plan.has_dead_triplet());
    }

    #[test]
    fn test_context_rewind_restores_graph() {
        let registry = TripletRegistry::new();
        let matrix = SwapMatrix::from_pair_counts(3, &[(0, 1, 1), (0, 2, 1), (1, 2, 1)]).unwrap();
        let plan = SearchPlan::new(&matrix, &registry);
        let mut ctx = SearchContext::new(&plan, None);
        let checkpoint = ctx.trail.checkpoint();
        let candidate = &plan.triplet(0).candidates[0];
        ctx.graph.absorb(candidate, &mut ctx.trail);
        assert_eq!(ctx.graph.vertex_count(), 3);
        assert!(!ctx.has_cycle());
        ctx.rewind_to(checkpoint);
        assert!(ctx.graph.is_empty());
    }
}
