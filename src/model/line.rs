// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line (wire), identified by its starting position.
///
/// This is a newtype wrapper to avoid mixing line indices with swap counts
/// or positions in a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line(usize);

impl Line {
    /// Create a line from its index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Line {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
