// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Triplet realizations.
//!
//! Three lines in roles 0, 1, 2 (left to right) must swap `a` times for the
//! pair (0,1), `b` times for (0,2) and `c` times for (1,2). Only adjacent
//! lines can swap, so the first move is either between the lines at
//! positions 0 and 1 or between those at positions 1 and 2:
//!
//! - `Swap01` leaves `(a-1, c, b)` to do, with roles 0 and 1 exchanged
//! - `Swap12` leaves `(b, a, c-1)` to do, with roles 1 and 2 exchanged
//!
//! The remainder is realized in positional terms and then relabeled back to
//! the original roles. The empty problem has exactly one realization, the
//! empty sequence. Every move lowers the total count by one, so the memo is
//! filled children first from an explicit stack of pending counts, and long
//! runs of swaps need no call-stack depth.
//!
//! # Example
//!
//! ```
//! use tangle_search::memo::{TripletRegistry, TripletSwap::*};
//!
//! let registry = TripletRegistry::new();
//! assert_eq!(*registry.realizations(1, 1, 0), vec![vec![Swap01, Swap02]]);
//! assert!(!registry.is_realizable(0, 1, 0));
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use strum_macros::EnumCount as EnumCountMacro;

/// A local move within a triplet: the line in the first role passes the
/// line in the second role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumCountMacro, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum TripletSwap {
    Swap01,
    Swap02,
    Swap12,
    Swap10,
    Swap20,
    Swap21,
}

impl TripletSwap {
    /// The `(from, to)` roles of this move.
    pub const fn roles(self) -> (usize, usize) {
        match self {
            TripletSwap::Swap01 => (0, 1),
            TripletSwap::Swap02 => (0, 2),
            TripletSwap::Swap12 => (1, 2),
            TripletSwap::Swap10 => (1, 0),
            TripletSwap::Swap20 => (2, 0),
            TripletSwap::Swap21 => (2, 1),
        }
    }

    /// The move with the given roles.
    ///
    /// # Panics
    ///
    /// Panics if the roles coincide or are not in `0..3`.
    pub fn from_roles(from: usize, to: usize) -> Self {
        match (from, to) {
            (0, 1) => TripletSwap::Swap01,
            (0, 2) => TripletSwap::Swap02,
            (1, 2) => TripletSwap::Swap12,
            (1, 0) => TripletSwap::Swap10,
            (2, 0) => TripletSwap::Swap20,
            (2, 1) => TripletSwap::Swap21,
            _ => panic!("Invalid triplet roles: ({}, {})", from, to),
        }
    }

    /// The same move after roles `x` and `y` have been exchanged.
    pub fn exchange_roles(self, x: usize, y: usize) -> Self {
        let swap_role = |r: usize| {
            if r == x {
                y
            } else if r == y {
                x
            } else {
                r
            }
        };
        let (from, to) = self.roles();
        TripletSwap::from_roles(swap_role(from), swap_role(to))
    }
}

impl fmt::Display for TripletSwap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.roles();
        write!(f, "{}>{}", from, to)
    }
}

/// Shared list of local realizations for one triple of counts.
pub type Realizations = Arc<Vec<Vec<TripletSwap>>>;

type Key = (u32, u32, u32);

/// Memoized triplet realizer.
///
/// Both tables are append-only. Each lock is held while the missing entries
/// for one query are filled in.
#[derive(Debug, Default)]
pub struct TripletRegistry {
    realizations: Mutex<HashMap<Key, Realizations>>,
    realizable: Mutex<HashMap<Key, bool>>,
}

impl TripletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All local realizations of the counts `(a, b, c)`.
    ///
    /// Sequences starting with `Swap01` come before those starting with
    /// `Swap12`. The list is empty when the counts cannot be realized.
    pub fn realizations(&self, a: u32, b: u32, c: u32) -> Realizations {
        let key = (a, b, c);
        let mut memo = self.realizations.lock();
        fill(&mut memo, key, |(a, b, c), [after01, after12]| {
            let mut result: Vec<Vec<TripletSwap>> = Vec::new();
            if (a, b, c) == (0, 0, 0) {
                result.push(Vec::new());
            }
            for rest in after01.into_iter().flat_map(|r| r.iter()) {
                result.push(prefixed(TripletSwap::Swap01, rest, 0, 1));
            }
            for rest in after12.into_iter().flat_map(|r| r.iter()) {
                result.push(prefixed(TripletSwap::Swap12, rest, 1, 2));
            }
            tracing::trace!(a, b, c, count = result.len(), "triplet realizations computed");
            Arc::new(result)
        });
        memo.get(&key).cloned().unwrap_or_default()
    }

    /// Whether the counts `(a, b, c)` have at least one local realization.
    ///
    /// Follows the same reductions as [`realizations`](Self::realizations)
    /// without building any sequence.
    pub fn is_realizable(&self, a: u32, b: u32, c: u32) -> bool {
        let key = (a, b, c);
        let mut memo = self.realizable.lock();
        fill(&mut memo, key, |counts, [after01, after12]| {
            counts == (0, 0, 0) || after01 == Some(&true) || after12 == Some(&true)
        });
        memo.get(&key).copied().unwrap_or(false)
    }

    /// Number of memoized realization lists.
    pub fn len(&self) -> usize {
        self.realizations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.realizations.lock().is_empty()
    }
}

/// The counts left after a first `Swap01` and after a first `Swap12`.
fn reductions((a, b, c): Key) -> [Option<Key>; 2] {
    [
        (a > 0).then(|| (a - 1, c, b)),
        (c > 0).then(|| (b, a, c - 1)),
    ]
}

/// Memoize `key` and everything it reduces to, reductions first.
///
/// `compute` receives the counts and the memoized values of its two
/// reductions, `None` where a move is not possible.
fn fill<V>(memo: &mut HashMap<Key, V>, key: Key, compute: impl Fn(Key, [Option<&V>; 2]) -> V) {
    let mut pending = vec![key];
    while let Some(&top) = pending.last() {
        if memo.contains_key(&top) {
            pending.pop();
            continue;
        }
        let next = reductions(top);
        let missing: Vec<Key> = next
            .iter()
            .flatten()
            .filter(|k| !memo.contains_key(k))
            .copied()
            .collect();
        if missing.is_empty() {
            let value = compute(top, next.map(|k| k.and_then(|k| memo.get(&k))));
            memo.insert(top, value);
            pending.pop();
        } else {
            pending.extend(missing);
        }
    }
}

/// `first` followed by `rest` with roles `x` and `y` exchanged.
fn prefixed(first: TripletSwap, rest: &[TripletSwap], x: usize, y: usize) -> Vec<TripletSwap> {
    let mut sequence = Vec::with_capacity(rest.len() + 1);
    sequence.push(first);
    sequence.extend(rest.iter().map(|step| step.exchange_roles(x, y)));
    sequence
}
