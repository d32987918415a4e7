// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Swap types: unordered pairs, ordered pairs and concrete swap events.
//!
//! # Event numbering
//!
//! Two lines `i < j` start with `i` to the left of `j`, so their swaps
//! alternate direction: the first is `i→j`, the second `j→i`, and so on.
//! Events are numbered densely from 0 per direction, which makes the k-th
//! `i→j` event the same vertex in every triplet containing `i` and `j`.
//!
//! ```
//! use tangle_search::model::{Line, UnorderedSwap};
//!
//! let pair = UnorderedSwap::new(Line::new(3), Line::new(1));
//! let events: Vec<String> = pair.events(3).map(|e| e.to_string()).collect();
//! assert_eq!(events, vec!["1>3#0", "3>1#0", "1>3#1"]);
//! ```

use crate::error::{InputError, Result};
use crate::model::Line;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pair of distinct lines, stored with the smaller index first.
///
/// Equality and hashing are order-independent because construction
/// normalizes the order. Deserialization goes through the same
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PairRepr")]
pub struct UnorderedSwap {
    low: Line,
    high: Line,
}

/// Serialized form of [`UnorderedSwap`], in either order.
#[derive(Deserialize)]
struct PairRepr {
    low: Line,
    high: Line,
}

impl TryFrom<PairRepr> for UnorderedSwap {
    type Error = InputError;

    fn try_from(repr: PairRepr) -> Result<Self> {
        Self::try_new(repr.low, repr.high)
    }
}

impl UnorderedSwap {
    /// Create a pair from two lines in any order.
    ///
    /// # Panics
    ///
    /// Panics if both lines are the same.
    pub fn new(a: Line, b: Line) -> Self {
        assert_ne!(a, b, "A line cannot swap with itself: {}", a);
        if a < b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Create a pair, rejecting a line paired with itself.
    pub fn try_new(a: Line, b: Line) -> Result<Self> {
        if a == b {
            return Err(InputError::SelfSwap { line: a.index() });
        }
        Ok(Self::new(a, b))
    }

    /// The line with the smaller index.
    pub fn low(self) -> Line {
        self.low
    }

    /// The line with the greater index.
    pub fn high(self) -> Line {
        self.high
    }

    /// Check whether the pair involves the given line.
    pub fn contains(self, line: Line) -> bool {
        self.low == line || self.high == line
    }

    /// Check whether two pairs have a line in common.
    pub fn shares_line(self, other: UnorderedSwap) -> bool {
        self.contains(other.low) || self.contains(other.high)
    }

    /// The ordered swap performed first by this pair (`low` passes `high`).
    pub fn first_direction(self) -> OrderedSwap {
        OrderedSwap::new(self.low, self.high)
    }

    /// The `count` swap events of this pair in time order.
    pub fn events(self, count: u32) -> impl Iterator<Item = SwapEvent> {
        let forward = self.first_direction();
        (0..count as usize).map(move |t| {
            if t % 2 == 0 {
                SwapEvent::new(forward, t / 2)
            } else {
                SwapEvent::new(forward.inverse(), t / 2)
            }
        })
    }
}

impl fmt::Display for UnorderedSwap {
    /// Format as "[low, high]".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// A swap with a direction: line `from` moves past line `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DirectionRepr")]
pub struct OrderedSwap {
    from: Line,
    to: Line,
}

#[derive(Deserialize)]
struct DirectionRepr {
    from: Line,
    to: Line,
}

impl TryFrom<DirectionRepr> for OrderedSwap {
    type Error = InputError;

    fn try_from(repr: DirectionRepr) -> Result<Self> {
        if repr.from == repr.to {
            return Err(InputError::SelfSwap {
                line: repr.from.index(),
            });
        }
        Ok(Self::new(repr.from, repr.to))
    }
}

impl OrderedSwap {
    /// Create an ordered swap.
    ///
    /// # Panics
    ///
    /// Panics if both lines are the same.
    pub fn new(from: Line, to: Line) -> Self {
        assert_ne!(from, to, "A line cannot swap with itself: {}", from);
        Self { from, to }
    }

    pub fn from(self) -> Line {
        self.from
    }

    pub fn to(self) -> Line {
        self.to
    }

    /// The same pair in the opposite direction.
    pub fn inverse(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// Forget the direction.
    pub fn unordered(self) -> UnorderedSwap {
        UnorderedSwap::new(self.from, self.to)
    }
}

impl fmt::Display for OrderedSwap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.from, self.to)
    }
}

/// One concrete swap: an ordered swap plus its occurrence index.
///
/// Vertex identity in a [`RealizationGraph`](crate::graph::RealizationGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SwapEvent {
    swap: OrderedSwap,
    occurrence: usize,
}

impl SwapEvent {
    pub fn new(swap: OrderedSwap, occurrence: usize) -> Self {
        Self { swap, occurrence }
    }

    pub fn swap(self) -> OrderedSwap {
        self.swap
    }

    pub fn occurrence(self) -> usize {
        self.occurrence
    }

    /// The pair of lines involved, without direction.
    pub fn unordered(self) -> UnorderedSwap {
        self.swap.unordered()
    }
}

impl fmt::Display for SwapEvent {
    /// Format as "from>to#occurrence".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.swap, self.occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(i: usize) -> Line {
        Line::new(i)
    }

    #[test]
    fn test_unordered_swap_normalizes_order() {
        let a = UnorderedSwap::new(line(2), line(0));
        let b = UnorderedSwap::new(line(0), line(2));
        assert_eq!(a, b);
        assert_eq!(a.low(), line(0));
        assert_eq!(a.high(), line(2));
        assert_eq!(a.to_string(), "[0, 2]");
    }

    #[test]
    #[should_panic(expected = "cannot swap with itself")]
    fn test_unordered_swap_rejects_same_line() {
        UnorderedSwap::new(line(1), line(1));
    }

    #[test]
    fn test_shares_line() {
        let a = UnorderedSwap::new(line(0), line(1));
        assert!(a.shares_line(UnorderedSwap::new(line(1), line(2))));
        assert!(!a.shares_line(UnorderedSwap::new(line(2), line(3))));
    }

    #[test]
    fn test_ordered_swap_inverse() {
        let s = OrderedSwap::new(line(1), line(3));
        assert_eq!(s.inverse(), OrderedSwap::new(line(3), line(1)));
        assert_eq!(s.inverse().unordered(), s.unordered());
        assert_eq!(s.to_string(), "1>3");
    }

    #[test]
    fn test_pair_events_alternate_direction() {
        let pair = UnorderedSwap::new(line(0), line(1));
        let events: Vec<SwapEvent> = pair.events(4).collect();
        let forward = OrderedSwap::new(line(0), line(1));
        assert_eq!(
            events,
            vec![
                SwapEvent::new(forward, 0),
                SwapEvent::new(forward.inverse(), 0),
                SwapEvent::new(forward, 1),
                SwapEvent::new(forward.inverse(), 1),
            ]
        );
        assert_eq!(pair.events(0).count(), 0);
    }

    #[test]
    fn test_try_new_rejects_same_line() {
        assert_eq!(
            UnorderedSwap::try_new(line(4), line(4)),
            Err(InputError::SelfSwap { line: 4 })
        );
        assert_eq!(
            UnorderedSwap::try_new(line(4), line(2)),
            Ok(UnorderedSwap::new(line(2), line(4)))
        );
    }

    #[test]
    fn test_deserialized_pair_is_normalized() {
        let pair: UnorderedSwap = serde_json::from_str(r#"{"low":3,"high":1}"#).unwrap();
        assert_eq!(pair, UnorderedSwap::new(line(1), line(3)));
        assert_eq!(pair.low(), line(1));
        assert_eq!(serde_json::to_string(&pair).unwrap(), r#"{"low":1,"high":3}"#);
        assert!(serde_json::from_str::<UnorderedSwap>(r#"{"low":2,"high":2}"#).is_err());
    }

    #[test]
    fn test_deserialized_event_rejects_self_swap() {
        let event = SwapEvent::new(OrderedSwap::new(line(2), line(0)), 1);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(serde_json::from_str::<SwapEvent>(&json).unwrap(), event);
        let bad = r#"{"swap":{"from":1,"to":1},"occurrence":0}"#;
        let err = serde_json::from_str::<SwapEvent>(bad).unwrap_err();
        assert!(err.to_string().contains("cannot swap with itself"), "{}", err);
    }
}
