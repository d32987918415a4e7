// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, offer choices, or suspend the search.
//!
//! # Example
//!
//! ```
//! use tangle_search::engine::{Predicate, PredicateResult};
//! use tangle_search::context::SearchContext;
//!
//! #[derive(Debug)]
//! struct SimplePredicate;
//!
//! impl Predicate for SimplePredicate {
//!     fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
//!         // Return Choices(2) to try two alternatives
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize, choice: usize) -> PredicateResult {
//!         if choice < 2 {
//!             PredicateResult::Success
//!         } else {
//!             PredicateResult::Failure
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Simple"
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Allows a single predicate to execute multiple times (e.g., once per triplet).
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack to previous predicate.
    Failure,

    /// Predicate has multiple choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A terminal predicate that ends a predicate program.
///
/// Terminal predicates fail or suspend; they never return Success.
/// [`EngineBuilder`](super::EngineBuilder) only builds an engine once a
/// terminal predicate has been added, so every program ends properly.
pub trait TerminalPredicate: Predicate {}

/// Trait for search predicates in the non-deterministic engine.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first encountering the predicate
/// 2. If Success: engine advances to next predicate
/// 3. If Failure: engine backtracks to previous predicate
/// 4. If Choices(n): engine calls `retry_pred` for each choice in turn,
///    backtracking between them
///
/// # Trail Integration
///
/// Predicates change the search graph only through the trail. Before each
/// `try_pred` or `retry_pred` the engine rewinds the trail to the entry's
/// checkpoint, so a retried choice always starts from the state before the
/// previous choice.
pub trait Predicate: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    /// Cannot return Choices or Suspend.
    #[allow(unused)]
    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext<'_>,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Get a name for this predicate (for debugging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
