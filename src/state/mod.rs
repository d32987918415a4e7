// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 2: DYNAMIC state bookkeeping.
//!
//! The search graph and its trail live on the
//! [`SearchContext`](crate::context::SearchContext); this module holds the
//! counters that record how the search went.

pub mod statistics;

pub use statistics::{Counters, Statistics};
