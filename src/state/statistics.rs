// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context, and are incremented by the triplet
//! predicate as it accepts or rejects candidates.

use serde::Serialize;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    /// A candidate chain was absorbed and kept.
    Accepted,
    /// A candidate chain closed a cycle.
    RejectedCycle,
    /// A candidate chain pushed the height over the bound.
    RejectedHeight,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Total number of candidates examined.
    pub fn candidates(&self) -> u64 {
        self.stats.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = Statistics::new();
        stats.increment(Counters::Accepted);
        stats.increment(Counters::RejectedCycle);
        stats.increment(Counters::RejectedCycle);
        assert_eq!(stats.get(Counters::Accepted), 1);
        assert_eq!(stats.get(Counters::RejectedCycle), 2);
        assert_eq!(stats.get(Counters::RejectedHeight), 0);
        assert_eq!(stats.candidates(), 3);
    }
}
