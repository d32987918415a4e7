// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 1: MEMO data (immutable once computed).
//!
//! This module contains the triplet lookup tables:
//! - The local swap sequences realizing each triple of pairwise counts
//! - Whether a triple of counts is realizable at all
//!
//! Entries are added on first use and never change afterwards, so a
//! [`TripletRegistry`] can be shared between searches and threads.

pub mod triplets;

pub use triplets::{Realizations, TripletRegistry, TripletSwap};
