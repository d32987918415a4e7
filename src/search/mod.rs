// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Public search driver.
//!
//! [`TangleEngine`] wraps a validated [`SwapMatrix`] and a shared
//! [`TripletRegistry`], and answers the questions asked of a matrix:
//! is it realizable, what is one realization (optionally within a height
//! bound), what is a minimum-height realization, and what are all the
//! distinct realizations.
//!
//! Every operation checks the final permutation first: inconsistent parities
//! mean no realization exists and no search is run.
//!
//! ```
//! use tangle_search::search::TangleEngine;
//!
//! let engine = TangleEngine::from_rows(vec![
//!     vec![0, 1, 1],
//!     vec![1, 0, 1],
//!     vec![1, 1, 0],
//! ])
//! .unwrap();
//! let graph = engine.compute_one_realization(None).unwrap();
//! assert_eq!(graph.height(), 3);
//! ```

use crate::context::{SearchContext, SearchPlan};
use crate::engine::{EngineBuilder, SearchEngine};
use crate::error::Result;
use crate::exhaustive::ExhaustiveCombiner;
use crate::graph::RealizationGraph;
use crate::layering::Diagram;
use crate::matrix::SwapMatrix;
use crate::memo::TripletRegistry;
use crate::model::Line;
use crate::predicates::{SuspendPredicate, TripletPredicate};
use crate::state::Statistics;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Reject realizations with more layers than this.
    pub max_height: Option<usize>,
}

impl SearchOptions {
    pub fn with_max_height(max_height: usize) -> Self {
        Self {
            max_height: Some(max_height),
        }
    }
}

/// Outcome of one search with its counters.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub realization: Option<RealizationGraph>,
    pub statistics: Statistics,
    /// Engine `(try_pred, retry_pred)` call counts.
    pub engine_calls: (u64, u64),
}

/// Outcome of height minimization.
#[derive(Debug, Clone, Default)]
pub struct HeightSearch {
    /// The last realization found, of minimum height.
    pub realization: Option<RealizationGraph>,
    /// Heights of the successive realizations, strictly decreasing.
    pub heights: Vec<usize>,
}

/// Realization search over one swap matrix.
#[derive(Debug, Clone)]
pub struct TangleEngine {
    matrix: SwapMatrix,
    registry: Arc<TripletRegistry>,
}

impl TangleEngine {
    /// Create an engine with its own triplet registry.
    pub fn build(matrix: SwapMatrix) -> Self {
        Self::with_registry(matrix, Arc::new(TripletRegistry::new()))
    }

    /// Create an engine sharing an existing triplet registry.
    pub fn with_registry(matrix: SwapMatrix, registry: Arc<TripletRegistry>) -> Self {
        Self { matrix, registry }
    }

    /// Validate signed rows and create an engine.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        Ok(Self::build(SwapMatrix::from_rows(rows)?))
    }

    pub fn matrix(&self) -> &SwapMatrix {
        &self.matrix
    }

    pub fn registry(&self) -> &Arc<TripletRegistry> {
        &self.registry
    }

    /// The line at each final position, if the parities are consistent.
    pub fn final_permutation(&self) -> Option<Vec<Line>> {
        self.matrix.final_permutation()
    }

    fn plan(&self) -> Option<SearchPlan> {
        if self.final_permutation().is_none() {
            debug!("inconsistent final permutation, no search");
            return None;
        }
        let plan = SearchPlan::new(&self.matrix, &self.registry);
        if plan.has_dead_triplet() {
            debug!("a triplet has no local realization, no search");
            return None;
        }
        Some(plan)
    }

    fn engine() -> SearchEngine {
        EngineBuilder::new()
            .add(Box::new(TripletPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build()
    }

    /// Run one search over a prepared plan.
    fn run(plan: &SearchPlan, options: SearchOptions) -> SearchReport {
        let mut ctx = SearchContext::new(plan, options.max_height);
        let mut engine = Self::engine();
        let found = engine.run(&mut ctx);
        let engine_calls = engine.statistics();
        debug!(
            found,
            max_height = ?options.max_height,
            tries = engine_calls.0,
            retries = engine_calls.1,
            "search finished"
        );
        let statistics = ctx.statistics.clone();
        SearchReport {
            realization: found.then(|| ctx.into_graph()),
            statistics,
            engine_calls,
        }
    }

    /// Search with the given options, reporting counters as well as the
    /// result.
    pub fn search(&self, options: SearchOptions) -> SearchReport {
        match self.plan() {
            Some(plan) => Self::run(&plan, options),
            None => SearchReport {
                realization: None,
                statistics: Statistics::new(),
                engine_calls: (0, 0),
            },
        }
    }

    /// True if some realization exists.
    pub fn has_realization(&self) -> bool {
        self.compute_one_realization(None).is_some()
    }

    /// One realization, with at most `max_height` layers if given.
    ///
    /// With a bound the search is complete: `None` means no realization of
    /// that height exists.
    pub fn compute_one_realization(&self, max_height: Option<usize>) -> Option<RealizationGraph> {
        self.search(SearchOptions { max_height }).realization
    }

    /// A realization of minimum height.
    pub fn compute_min_height_realization(&self) -> Option<RealizationGraph> {
        self.min_height_search().realization
    }

    /// Repeatedly search with a bound one below the last height found.
    pub fn min_height_search(&self) -> HeightSearch {
        let mut result = HeightSearch::default();
        let Some(plan) = self.plan() else {
            return result;
        };

        let mut options = SearchOptions::default();
        while let Some(graph) = Self::run(&plan, options).realization {
            let height = graph.height();
            info!(height, "realization found");
            result.heights.push(height);
            result.realization = Some(graph);
            if height == 0 {
                break;
            }
            options = SearchOptions::with_max_height(height - 1);
        }
        result
    }

    /// Every structurally distinct realization.
    ///
    /// Exponential in memory; meant for small matrices.
    pub fn compute_all_realizations(&self) -> Vec<RealizationGraph> {
        let Some(plan) = self.plan() else {
            return Vec::new();
        };
        let found = ExhaustiveCombiner::new(&plan).combine_all();
        debug!(count = found.len(), "all realizations enumerated");
        found
    }

    /// Layer a realization of this engine's matrix.
    pub fn diagram(&self, graph: &RealizationGraph) -> Option<Diagram> {
        Diagram::from_graph(graph, &self.matrix)
    }
}
