// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Input validation errors.
//!
//! Infeasible inputs are not errors: a matrix that cannot be realized is
//! reported as `None`, `false` or an empty list by the search operations.

use thiserror::Error;

/// Result type for matrix construction.
pub type Result<T> = std::result::Result<T, InputError>;

/// A swap-count table that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("swap counts for lines {i} and {j} differ")]
    Asymmetric { i: usize, j: usize },

    #[error("swap count for lines {i} and {j} exceeds {}", crate::matrix::MAX_PAIR_COUNT)]
    CountTooLarge { i: usize, j: usize },

    #[error("matrix has {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },

    #[error("line {line} out of range for {line_count} lines")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("line {line} cannot swap with itself")]
    SelfSwap { line: usize },
}
