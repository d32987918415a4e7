// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Breadth-first enumeration of realizations.
//!
//! [`ExhaustiveCombiner`] combines every candidate of every triplet with
//! every partial result, level by level, instead of backtracking. Partial
//! results that are cyclic are dropped as soon as they appear (adding more
//! chains never removes a cycle), and structurally equal partial results are
//! kept once. It is exponential in memory and serves as a reference for the
//! backtracking search on small inputs.

use crate::context::SearchPlan;
use crate::graph::{CycleDetector, RealizationGraph};
use std::collections::HashSet;

/// Enumerates all distinct acyclic combinations of one candidate per triplet.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveCombiner<'p> {
    plan: &'p SearchPlan,
}

impl<'p> ExhaustiveCombiner<'p> {
    pub fn new(plan: &'p SearchPlan) -> Self {
        Self { plan }
    }

    /// Every distinct realization.
    pub fn combine_all(&self) -> Vec<RealizationGraph> {
        let mut detector = CycleDetector::new();
        let mut current = vec![self.plan.base().clone()];

        for (level, planned) in self.plan.triplets().iter().enumerate() {
            let mut seen = HashSet::new();
            let mut next = Vec::new();
            for partial in &current {
                for candidate in &planned.candidates {
                    let combined = partial.combine(candidate);
                    if detector.has_cycle(&combined) {
                        continue;
                    }
                    if seen.insert(combined.structure_key()) {
                        next.push(combined);
                    }
                }
            }
            tracing::trace!(level, partials = next.len(), "triplet combined");
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }
}
