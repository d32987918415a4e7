// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Property tests of the search on small random matrices.

mod common;

use common::{
    assert_event_counts, assert_layers_line_disjoint, enumerate_by_search, feasible_by_simulation,
};
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;
use tangle_search::{contains_cycle, SwapMatrix, TangleEngine};

/// Up to four lines, each pair swapping at most twice.
fn small_matrix() -> impl Strategy<Value = SwapMatrix> {
    (0usize..=4, proptest::collection::vec(0u32..=2, 6)).prop_map(|(n, counts)| {
        let mut entries = Vec::new();
        let mut next = counts.into_iter();
        for i in 0..n {
            for j in (i + 1)..n {
                entries.push((i, j, next.next().unwrap_or(0)));
            }
        }
        SwapMatrix::from_pair_counts(n, &entries).unwrap()
    })
}

/// Signed rows of a small matrix: each pair's count with independent signs
/// above and below the diagonal, and arbitrary diagonal entries.
fn signed_rows() -> impl Strategy<Value = Vec<Vec<i64>>> {
    (0usize..=4)
        .prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((0i64..=2, any::<bool>(), any::<bool>()), n * n),
            )
        })
        .prop_map(|(n, cells)| {
            let mut rows = vec![vec![0i64; n]; n];
            for i in 0..n {
                for j in i..n {
                    let (count, upper_negative, lower_negative) = cells[i * n + j];
                    rows[i][j] = if upper_negative { -count } else { count };
                    rows[j][i] = if lower_negative { -count } else { count };
                }
            }
            rows
        })
}

fn transposed(rows: &[Vec<i64>]) -> Vec<Vec<i64>> {
    (0..rows.len())
        .map(|j| rows.iter().map(|row| row[j]).collect())
        .collect()
}

/// The same matrix with line `i` renamed to `n - 1 - i`.
fn mirrored(matrix: &SwapMatrix) -> SwapMatrix {
    let n = matrix.line_count();
    let mut entries = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            entries.push((n - 1 - i, n - 1 - j, matrix.count(i, j)));
        }
    }
    SwapMatrix::from_pair_counts(n, &entries).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_realization_is_well_formed(matrix in small_matrix()) {
        let engine = TangleEngine::build(matrix);
        if let Some(graph) = engine.compute_one_realization(None) {
            prop_assert!(!contains_cycle(&graph));
            assert_event_counts(&graph, engine.matrix());
            assert_layers_line_disjoint(&graph);
            prop_assert!(engine.final_permutation().is_some());
            let diagram = engine.diagram(&graph).unwrap();
            prop_assert_eq!(diagram.height(), graph.height());
        }
    }

    #[test]
    fn prop_simulation_feasible_implies_realization(matrix in small_matrix()) {
        let feasible = feasible_by_simulation(&matrix);
        let engine = TangleEngine::build(matrix);
        if feasible {
            prop_assert!(engine.has_realization());
        }
    }

    #[test]
    fn prop_mirror_image_is_equally_realizable(matrix in small_matrix()) {
        let mirror = mirrored(&matrix);
        prop_assert_eq!(
            TangleEngine::build(matrix).has_realization(),
            TangleEngine::build(mirror).has_realization()
        );
    }

    #[test]
    fn prop_min_height_is_minimum_over_all_realizations(matrix in small_matrix()) {
        let engine = TangleEngine::build(matrix);
        let all = engine.compute_all_realizations();
        let search = engine.min_height_search();
        prop_assert!(search.heights.windows(2).all(|w| w[0] > w[1]));
        match search.realization {
            Some(best) => {
                let minimum = all.iter().map(|g| g.height()).min();
                prop_assert_eq!(Some(best.height()), minimum);
                prop_assert_eq!(search.heights.last().copied(), minimum);
            }
            None => prop_assert!(all.is_empty()),
        }
    }

    #[test]
    fn prop_exhaustive_combiner_matches_search(matrix in small_matrix()) {
        let engine = TangleEngine::build(matrix);
        let combined = engine.compute_all_realizations();
        let searched = enumerate_by_search(&engine);
        prop_assert_eq!(combined.len(), searched.len());
        for graph in &combined {
            prop_assert!(searched.contains(graph));
        }
    }

    #[test]
    fn prop_transposed_rows_are_equally_realizable(rows in signed_rows()) {
        let matrix = SwapMatrix::from_rows(rows.clone()).unwrap();
        let transpose = SwapMatrix::from_rows(transposed(&rows)).unwrap();
        prop_assert_eq!(&matrix, &transpose);
        prop_assert_eq!(
            TangleEngine::build(matrix).has_realization(),
            TangleEngine::build(transpose).has_realization()
        );
    }

    #[test]
    fn prop_cycle_detector_matches_petgraph(
        edges in proptest::collection::vec((0..12u32, 0..12u32), 0..30)
    ) {
        let oracle: DiGraphMap<u32, ()> = DiGraphMap::from_edges(&edges);
        prop_assert_eq!(
            contains_cycle(&oracle),
            petgraph::algo::is_cyclic_directed(&oracle)
        );
    }
}
