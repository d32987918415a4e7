// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search for tangles: realizations of pairwise swap counts between
//! parallel lines.
//!
//! Given `n` lines and, for every pair, the number of times the two lines
//! must swap (as adjacent neighbours), decide whether some sequence of swaps
//! has exactly those counts, and if so construct one, optionally of minimum
//! height (number of parallel layers).
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! - The [`TripletRegistry`]: for every triple of counts, the local swap
//!   sequences of three lines realizing them, computed on first use
//! - The [`SearchPlan`](context::SearchPlan): the triplets of one matrix with
//!   their candidate chains, fewest candidates first
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! - The [`RealizationGraph`] under construction
//! - The [`Trail`] recording its additions for backtracking
//!
//! # Search Algorithm
//!
//! 1. **Final permutation**: parities alone fix the end order of the lines;
//!    an inconsistency rules out any realization
//! 2. **TripletPredicate**: choose one candidate chain per triplet, rejecting
//!    choices that close a cycle or exceed a height bound
//! 3. **Layering**: Kahn layers of the resulting graph form the [`Diagram`]
//!
//! Height minimization repeats step 2 with the bound one below the last
//! height found until the search fails.

pub mod context;
pub mod engine;
pub mod error;
pub mod exhaustive;
pub mod graph;
pub mod layering;
pub mod matrix;
pub mod memo;
pub mod model;
pub mod predicates;
pub mod search;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use context::SearchContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::InputError;
pub use exhaustive::ExhaustiveCombiner;
pub use graph::{combine, contains_cycle, CycleDetector, RealizationGraph};
pub use layering::{Diagram, RenderData};
pub use matrix::SwapMatrix;
pub use memo::{TripletRegistry, TripletSwap};
pub use model::{Line, LineTriplet, OrderedSwap, SwapEvent, UnorderedSwap};
pub use search::{HeightSearch, SearchOptions, SearchReport, TangleEngine};
pub use trail::Trail;
