// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Value types for lines, swaps and swap events.
//!
//! This module contains the identities the rest of the crate is built from:
//! - Line: one of the n parallel tracks, identified by its starting position
//! - UnorderedSwap: a pair of distinct lines, smaller index first
//! - OrderedSwap: a pair with a direction (which line passes which)
//! - SwapEvent: the k-th occurrence of an ordered swap
//! - LineTriplet: three lines with their three pairwise swap counts

pub mod line;
pub mod swap;
pub mod triplet;

pub use line::Line;
pub use swap::{OrderedSwap, SwapEvent, UnorderedSwap};
pub use triplet::LineTriplet;
