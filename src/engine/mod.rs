// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail to restore the search
//! graph on backtracking.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! Execution follows a WAM-like model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to previous stack entry
//! 6. If Suspend: pause and return control to caller
//!
//! A deterministic success leaves no choice point behind: backtracking into
//! it goes straight on to the entry below.
//!
//! # Example
//!
//! ```
//! use tangle_search::context::{SearchContext, SearchPlan};
//! use tangle_search::engine::{EngineBuilder, Predicate, PredicateResult};
//! use tangle_search::predicates::SuspendPredicate;
//!
//! #[derive(Debug)]
//! struct SimplePredicate;
//!
//! impl Predicate for SimplePredicate {
//!     fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
//!         PredicateResult::Success
//!     }
//! }
//!
//! let plan = SearchPlan::default();
//! let mut ctx = SearchContext::new(&plan, None);
//! let engine = EngineBuilder::new()
//!     .add(Box::new(SimplePredicate))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Engine is consumed, returns Some(engine) if suspended
//! if let Some(engine) = engine.search(&mut ctx) {
//!     // Resuming backtracks from the suspension point
//!     assert!(engine.search(&mut ctx).is_none());
//! }
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::SearchContext;

/// Initial capacity of the predicate stack.
const STACK_CAPACITY: usize = 1000;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }

    /// Turn a deterministic success into an exhausted choice point.
    fn close(&mut self) {
        self.in_choice_mode = true;
        self.current_choice = 0;
        self.num_choices = 0;
    }
}

/// Search engine that coordinates predicate execution and backtracking.
#[derive(Debug)]
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,

    /// Set once the search has backtracked past the first predicate.
    exhausted: bool,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which guarantees the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(STACK_CAPACITY),
            try_count: 0,
            retry_count: 0,
            exhausted: false,
        }
    }

    /// Run the search until it suspends or is exhausted.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended; calling `search` again on it resumes
    ///   by backtracking from the suspension point
    /// - `None` if exhausted (backtracked past the first predicate)
    ///
    /// The result of a successful path is left in `ctx`. Use
    /// [`run`](Self::run) to keep the engine, and its counters, after
    /// exhaustion.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence is invalid (reaches the end without
    /// failing or suspending), or if `retry_pred` returns Choices or Suspend.
    pub fn search(mut self, ctx: &mut SearchContext<'_>) -> Option<Self> {
        if self.run(ctx) {
            Some(self)
        } else {
            None
        }
    }

    /// Run the search in place: true if suspended, false once exhausted.
    ///
    /// After the first `false` every further call returns `false` at once.
    pub fn run(&mut self, ctx: &mut SearchContext<'_>) -> bool {
        if self.exhausted || self.predicates.is_empty() {
            self.exhausted = true;
            return false;
        }

        if self.stack.is_empty() {
            self.stack.push(StackEntry::new(0, 0, ctx.trail.checkpoint()));
        } else {
            // Resuming: the suspending entry has no alternatives.
            self.stack.pop();
        }

        loop {
            let Some(entry) = self.stack.last_mut() else {
                tracing::trace!(
                    tries = self.try_count,
                    retries = self.retry_count,
                    "search exhausted"
                );
                self.exhausted = true;
                return false;
            };

            ctx.rewind_to(entry.trail_checkpoint);

            if !entry.in_choice_mode {
                let pred_idx = entry.predicate_index;
                let round = entry.round;
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.close_top();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.close_top();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = ctx.trail.checkpoint();
                        }
                    }
                    PredicateResult::Suspend => {
                        return true;
                    }
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let pred_idx = entry.predicate_index;
                let round = entry.round;
                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => {
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    fn close_top(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.close();
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    ///
    /// Panics if we've reached the end of the predicate sequence, as this indicates
    /// an invalid program (all valid programs must end with a terminal predicate).
    fn push_next_predicate(&mut self, ctx: &SearchContext<'_>) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let next_index = current.predicate_index + 1;

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 All programs must terminate with a terminal predicate."
            );
        }

        self.stack
            .push(StackEntry::new(next_index, 0, ctx.trail.checkpoint()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &SearchContext<'_>) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let entry = StackEntry::new(current.predicate_index, current.round + 1, ctx.trail.checkpoint());
        self.stack.push(entry);
    }

    /// Returns (try_count, retry_count) showing how many times predicates
    /// were tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builder for predicate programs.
///
/// `build` is only available after [`terminal`](EngineBuilder::terminal),
/// so a program without a terminal predicate does not compile.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate, ending the program.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> TerminatedBuilder {
        self.predicates.push(predicate);
        TerminatedBuilder {
            predicates: self.predicates,
        }
    }
}

/// A predicate program that ends with a terminal predicate.
#[derive(Debug)]
pub struct TerminatedBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedBuilder {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SearchPlan;
    use crate::predicates::{FailPredicate, SuspendPredicate};

    /// Test predicate that always succeeds.
    #[derive(Debug)]
    struct AlwaysSucceed;

    impl Predicate for AlwaysSucceed {
        fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
            PredicateResult::Success
        }
    }

    /// Test predicate that always fails.
    #[derive(Debug)]
    struct AlwaysFail;

    impl Predicate for AlwaysFail {
        fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, _round: usize) -> PredicateResult {
            PredicateResult::Failure
        }
    }

    /// Offers `n` choices per round for `rounds` rounds.
    #[derive(Debug)]
    struct Grid {
        rounds: usize,
        n: usize,
    }

    impl Predicate for Grid {
        fn try_pred(&mut self, _ctx: &mut SearchContext<'_>, round: usize) -> PredicateResult {
            if round == self.rounds {
                PredicateResult::Success
            } else {
                PredicateResult::Choices(self.n)
            }
        }

        fn retry_pred(
            &mut self,
            _ctx: &mut SearchContext<'_>,
            _round: usize,
            _choice: usize,
        ) -> PredicateResult {
            PredicateResult::SuccessSamePredicate
        }
    }

    #[test]
    fn test_simple_success_with_suspend() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let engine = engine.search(&mut ctx).unwrap();
        assert_eq!(engine.statistics(), (2, 0));
    }

    #[test]
    fn test_resume_after_deterministic_success_is_exhausted() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(AlwaysSucceed))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let engine = engine.search(&mut ctx).unwrap();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_resume_enumerates_every_choice() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let mut engine = EngineBuilder::new()
            .add(Box::new(Grid { rounds: 2, n: 3 }))
            .terminal(Box::new(SuspendPredicate))
            .build();

        let mut solutions = 0;
        while let Some(next) = engine.search(&mut ctx) {
            solutions += 1;
            engine = next;
        }
        assert_eq!(solutions, 9);
    }

    #[test]
    fn test_run_keeps_counters_after_exhaustion() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let mut engine = EngineBuilder::new()
            .add(Box::new(Grid { rounds: 1, n: 2 }))
            .terminal(Box::new(FailPredicate))
            .build();

        assert!(!engine.run(&mut ctx));
        // Round 0 is tried once; round 1 and the terminal once per choice.
        assert_eq!(engine.statistics(), (5, 2));
        assert!(!engine.run(&mut ctx));
        assert_eq!(engine.statistics(), (5, 2));
    }

    #[test]
    fn test_fail_predicate_exhausts_choices() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = EngineBuilder::new()
            .add(Box::new(Grid { rounds: 2, n: 3 }))
            .terminal(Box::new(FailPredicate))
            .build();
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_immediate_failure() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = SearchEngine::new(vec![Box::new(AlwaysFail)]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    fn test_empty_predicates() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = SearchEngine::new(vec![]);
        assert!(engine.search(&mut ctx).is_none());
    }

    #[test]
    #[should_panic(expected = "Invalid predicate sequence")]
    fn test_invalid_program_without_terminal() {
        let plan = SearchPlan::default();
        let mut ctx = SearchContext::new(&plan, None);
        let engine = SearchEngine::new(vec![Box::new(AlwaysSucceed)]);
        let _ = engine.search(&mut ctx);
    }
}
