// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! # Organization
//!
//! - `triplet`: TripletPredicate, one round per planned triplet
//! - Built-in terminal predicates: `FailPredicate`, `SuspendPredicate`

pub mod triplet;

pub use triplet::TripletPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// Ending a program with `FailPredicate` forces the engine to explore every
/// alternative; results are observed through side effects on the context.
///
/// # Example
///
/// ```
/// use tangle_search::context::{SearchContext, SearchPlan};
/// use tangle_search::engine::EngineBuilder;
/// use tangle_search::predicates::{FailPredicate, TripletPredicate};
///
/// let plan = SearchPlan::default();
/// let mut ctx = SearchContext::new(&plan, None);
/// let engine = EngineBuilder::new()
///     .add(Box::new(TripletPredicate))
///     .terminal(Box::new(FailPredicate))
///     .build();
///
/// let result = engine.search(&mut ctx);
/// assert!(result.is_none()); // Failed - engine consumed
/// ```
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate: hands a completed path back to the caller.
///
/// The context holds the result while the engine is suspended; resuming the
/// engine backtracks to look for the next one.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}
