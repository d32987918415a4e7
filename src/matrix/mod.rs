// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Validated swap-count matrices.
//!
//! A [`SwapMatrix`] records, for every pair of lines, how many times the two
//! lines must swap. Only absolute values are meaningful, the diagonal is
//! ignored, and the table must be symmetric.
//!
//! The parity of the counts alone fixes where each line ends up: every swap
//! of an odd-count pair moves the two lines past each other for good.
//!
//! A pair may swap at most [`MAX_PAIR_COUNT`] times. Local realizations of a
//! triplet are sequences as long as its three counts together, and their
//! memo table grows with the square of that length.
//!
//! ```
//! use tangle_search::matrix::SwapMatrix;
//! use tangle_search::model::Line;
//!
//! let m = SwapMatrix::from_pair_counts(3, &[(0, 1, 1), (0, 2, 1)]).unwrap();
//! let p = m.final_permutation().unwrap();
//! assert_eq!(p, vec![Line::new(1), Line::new(2), Line::new(0)]);
//! ```

use crate::error::{InputError, Result};
use crate::model::{Line, LineTriplet, UnorderedSwap};
use serde::{Deserialize, Serialize};

/// Largest accepted swap count for one pair of lines.
pub const MAX_PAIR_COUNT: u32 = 4096;

/// Symmetric table of pairwise swap counts over `line_count` lines.
///
/// Deserialization applies the same checks as [`SwapMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr")]
pub struct SwapMatrix {
    line_count: usize,
    /// Row-major, symmetric, zero diagonal.
    counts: Vec<u32>,
}

/// Serialized form of [`SwapMatrix`]: row-major cells.
#[derive(Deserialize)]
struct MatrixRepr {
    line_count: usize,
    counts: Vec<u32>,
}

impl TryFrom<MatrixRepr> for SwapMatrix {
    type Error = InputError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        let MatrixRepr { line_count, counts } = repr;
        let expected = line_count.checked_mul(line_count);
        if expected != Some(counts.len()) {
            return Err(InputError::CellCount {
                expected: expected.unwrap_or(usize::MAX),
                found: counts.len(),
            });
        }
        let rows = if line_count == 0 {
            Vec::new()
        } else {
            counts
                .chunks(line_count)
                .map(|row| row.iter().map(|&count| i64::from(count)).collect())
                .collect()
        };
        Self::from_rows(rows)
    }
}

/// `count` as a pair count, if within [`MAX_PAIR_COUNT`].
fn pair_count(i: usize, j: usize, count: u64) -> Result<u32> {
    u32::try_from(count)
        .ok()
        .filter(|&count| count <= MAX_PAIR_COUNT)
        .ok_or(InputError::CountTooLarge { i, j })
}

impl SwapMatrix {
    /// A matrix with no swaps.
    pub fn empty(line_count: usize) -> Self {
        Self {
            line_count,
            counts: vec![0; line_count * line_count],
        }
    }

    /// Build a matrix from signed rows.
    ///
    /// Symmetry is checked on absolute values; the diagonal is not read.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let line_count = rows.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != line_count {
                return Err(InputError::NotSquare {
                    row,
                    expected: line_count,
                    found: values.len(),
                });
            }
        }

        let mut matrix = Self::empty(line_count);
        for i in 0..line_count {
            for j in (i + 1)..line_count {
                let upper = rows[i][j].unsigned_abs();
                let lower = rows[j][i].unsigned_abs();
                if upper != lower {
                    return Err(InputError::Asymmetric { i, j });
                }
                matrix.set(i, j, pair_count(i, j, upper)?);
            }
        }
        Ok(matrix)
    }

    /// Build a matrix from `(i, j, count)` entries.
    ///
    /// Repeated pairs accumulate.
    pub fn from_pair_counts(line_count: usize, entries: &[(usize, usize, u32)]) -> Result<Self> {
        let mut matrix = Self::empty(line_count);
        for &(i, j, count) in entries {
            matrix.check_pair(i, j)?;
            let total = u64::from(matrix.count(i, j)) + u64::from(count);
            matrix.set(i, j, pair_count(i, j, total)?);
        }
        Ok(matrix)
    }

    /// Build a matrix from a list of swaps, each occurrence counting once.
    pub fn from_swaps<I>(line_count: usize, swaps: I) -> Result<Self>
    where
        I: IntoIterator<Item = UnorderedSwap>,
    {
        let mut matrix = Self::empty(line_count);
        for swap in swaps {
            let (i, j) = (swap.low().index(), swap.high().index());
            matrix.check_pair(i, j)?;
            let total = u64::from(matrix.count(i, j)) + 1;
            matrix.set(i, j, pair_count(i, j, total)?);
        }
        Ok(matrix)
    }

    fn check_pair(&self, i: usize, j: usize) -> Result<()> {
        for line in [i, j] {
            if line >= self.line_count {
                return Err(InputError::LineOutOfRange {
                    line,
                    line_count: self.line_count,
                });
            }
        }
        if i == j {
            return Err(InputError::SelfSwap { line: i });
        }
        Ok(())
    }

    fn set(&mut self, i: usize, j: usize, count: u32) {
        self.counts[i * self.line_count + j] = count;
        self.counts[j * self.line_count + i] = count;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Swap count between lines `i` and `j` (0 on the diagonal).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn count(&self, i: usize, j: usize) -> u32 {
        assert!(
            i < self.line_count && j < self.line_count,
            "Line index out of range: ({}, {}) for {} lines",
            i,
            j,
            self.line_count
        );
        self.counts[i * self.line_count + j]
    }

    pub fn count_of(&self, pair: UnorderedSwap) -> u32 {
        self.count(pair.low().index(), pair.high().index())
    }

    /// Total number of swap events over all pairs.
    pub fn total_swaps(&self) -> u64 {
        self.pairs().map(|(_, count)| u64::from(count)).sum()
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> {
        (0..self.line_count).map(Line::new)
    }

    /// Every pair `i < j` with a positive count.
    pub fn pairs(&self) -> impl Iterator<Item = (UnorderedSwap, u32)> + '_ {
        let n = self.line_count;
        (0..n).flat_map(move |i| {
            ((i + 1)..n).filter_map(move |j| {
                let count = self.count(i, j);
                (count > 0).then(|| (UnorderedSwap::new(Line::new(i), Line::new(j)), count))
            })
        })
    }

    /// Every triplet `i < j < k`, including those without swaps.
    pub fn triplets(&self) -> impl Iterator<Item = LineTriplet> + '_ {
        let n = self.line_count;
        (0..n).flat_map(move |i| {
            ((i + 1)..n).flat_map(move |j| {
                ((j + 1)..n).map(move |k| {
                    LineTriplet::new(
                        Line::new(i),
                        Line::new(j),
                        Line::new(k),
                        self.count(i, j),
                        self.count(i, k),
                        self.count(j, k),
                    )
                })
            })
        })
    }

    /// The line at each final position, or `None` when the parities are
    /// inconsistent.
    ///
    /// Line `i` ends at `i - #{j < i: odd} + #{j > i: odd}`; two lines
    /// landing on the same position means no realization exists.
    pub fn final_permutation(&self) -> Option<Vec<Line>> {
        let n = self.line_count;
        let mut by_position: Vec<Option<Line>> = vec![None; n];
        for i in 0..n {
            let before = (0..i).filter(|&j| self.count(i, j) % 2 == 1).count();
            let after = ((i + 1)..n).filter(|&j| self.count(i, j) % 2 == 1).count();
            let position = i + after - before;
            let slot = &mut by_position[position];
            if slot.is_some() {
                return None;
            }
            *slot = Some(Line::new(i));
        }
        by_position.into_iter().collect()
    }

    /// True if no positive pair can be split off: for every positive pair
    /// `(i, j)` and every `k` strictly between them, `k` swaps with `i` or
    /// with `j`.
    pub fn is_non_separable(&self) -> bool {
        self.pairs().all(|(pair, _)| {
            let (i, j) = (pair.low().index(), pair.high().index());
            ((i + 1)..j).all(|k| self.count(i, k) > 0 || self.count(k, j) > 0)
        })
    }

    /// True if every off-diagonal count is 0 or 2.
    pub fn is_zero_two_list(&self) -> bool {
        self.pairs().all(|(_, count)| count == 2)
    }
}
