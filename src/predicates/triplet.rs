// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! TripletPredicate - chooses one local realization per triplet.
//!
//! Round `r` decides triplet `r` of the [`SearchPlan`](crate::context::SearchPlan).
//! Each choice absorbs one candidate chain into the search graph; the choice
//! is rejected if the graph becomes cyclic or, under a height bound, too
//! tall. Once every triplet has been decided the graph is a realization.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::state::Counters;

/// Chooses a candidate chain for each planned triplet in turn.
///
/// # Choices
///
/// For triplet `r` with `k` candidates, choice `i` is candidate `i` in the
/// order produced by the triplet registry. A triplet with no candidates
/// fails at once.
#[derive(Debug, Default)]
pub struct TripletPredicate;

impl Predicate for TripletPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
        let plan = ctx.plan;
        if round == plan.len() {
            // Only a plan without triplets reaches here with an unchecked graph.
            if let Some(bound) = ctx.max_height {
                if ctx.graph.height() > bound {
                    ctx.statistics.increment(Counters::RejectedHeight);
                    return PredicateResult::Failure;
                }
            }
            tracing::trace!(
                vertices = ctx.graph.vertex_count(),
                edges = ctx.graph.edge_count(),
                "all triplets decided"
            );
            return PredicateResult::Success;
        }

        match plan.triplet(round).candidates.len() {
            0 => {
                tracing::trace!(round, "triplet has no realization");
                PredicateResult::Failure
            }
            n => PredicateResult::Choices(n),
        }
    }

    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        let plan = ctx.plan;
        let planned = plan.triplet(round);
        let added = ctx.graph.absorb(&planned.candidates[choice], &mut ctx.trail);

        if added > 0 && ctx.has_cycle() {
            ctx.statistics.increment(Counters::RejectedCycle);
            tracing::trace!(round, choice, lines = ?planned.triplet.lines(), "candidate closes a cycle");
            return PredicateResult::Failure;
        }

        if let Some(bound) = ctx.max_height {
            let height = ctx.graph.height();
            if height > bound {
                ctx.statistics.increment(Counters::RejectedHeight);
                tracing::trace!(round, choice, height, bound, "candidate exceeds height bound");
                return PredicateResult::Failure;
            }
        }

        ctx.statistics.increment(Counters::Accepted);
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "Triplet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchPlan;
    use crate::engine::EngineBuilder;
    use crate::graph::contains_cycle;
    use crate::matrix::SwapMatrix;
    use crate::memo::TripletRegistry;
    use crate::predicates::{FailPredicate, SuspendPredicate};

    fn plan_for(line_count: usize, entries: &[(usize, usize, u32)]) -> SearchPlan {
        let registry = TripletRegistry::new();
        let matrix = SwapMatrix::from_pair_counts(line_count, entries).unwrap();
        SearchPlan::new(&matrix, &registry)
    }

    #[test]
    fn test_finds_realization_of_reversal() {
        let plan = plan_for(3, &[(0, 1, 1), (0, 2, 1), (1, 2, 1)]);
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(TripletPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build();

        assert!(engine.search(&mut ctx).is_some());
        assert_eq!(ctx.graph.vertex_count(), 3);
        assert!(!contains_cycle(&ctx.graph));
        assert_eq!(ctx.statistics.get(Counters::Accepted), 1);
    }

    #[test]
    fn test_dead_triplet_fails() {
        let plan = plan_for(3, &[(0, 2, 1)]);
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(TripletPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_height_bound_rejects_candidates() {
        // Reversal of three lines needs three layers.
        let plan = plan_for(3, &[(0, 1, 1), (0, 2, 1), (1, 2, 1)]);
        let mut ctx = SearchContext::new(&plan, Some(2));
        let engine = EngineBuilder::new()
            .add(Box::new(TripletPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_none());
        assert_eq!(ctx.statistics.get(Counters::RejectedHeight), 2);
        assert!(ctx.graph.is_empty());
    }

    #[test]
    fn test_exhaustive_run_restores_graph() {
        let plan = plan_for(4, &[(0, 1, 1), (0, 2, 1), (1, 2, 1), (2, 3, 2)]);
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(TripletPredicate))
            .terminal(Box::new(FailPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_none());
        assert!(ctx.graph.is_empty());
        assert!(ctx.trail.is_empty());
        assert!(ctx.statistics.get(Counters::Accepted) > 0);
    }
}
