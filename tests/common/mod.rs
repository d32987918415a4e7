// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use tangle_search::context::{SearchContext, SearchPlan};
use tangle_search::engine::EngineBuilder;
use tangle_search::predicates::{SuspendPredicate, TripletPredicate};
use tangle_search::{Line, RealizationGraph, SwapMatrix, TangleEngine, UnorderedSwap};

/// Install a subscriber honouring `RUST_LOG`; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn matrix(line_count: usize, entries: &[(usize, usize, u32)]) -> SwapMatrix {
    SwapMatrix::from_pair_counts(line_count, entries).expect("valid test matrix")
}

/// `2^m` lines; pair `i < j` swaps `k` times unless the bits of `i` are a
/// subset of the bits of `j`.
pub fn bitwise_or_instance(m: u32, k: u32) -> SwapMatrix {
    let n = 1usize << m;
    let mut entries = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if i | j != j {
                entries.push((i, j, k));
            }
        }
    }
    matrix(n, &entries)
}

/// Every distinct realization, found by resuming the backtracking search
/// after each success.
pub fn enumerate_by_search(engine: &TangleEngine) -> Vec<RealizationGraph> {
    if engine.final_permutation().is_none() {
        return Vec::new();
    }
    let plan = SearchPlan::new(engine.matrix(), engine.registry());
    let mut ctx = SearchContext::new(&plan, None);
    let mut search = EngineBuilder::new()
        .add(Box::new(TripletPredicate))
        .terminal(Box::new(SuspendPredicate))
        .build();
    let mut found: Vec<RealizationGraph> = Vec::new();
    while search.run(&mut ctx) {
        if !found.contains(&ctx.graph) {
            found.push(ctx.graph.clone());
        }
    }
    found
}

/// Brute-force check: is there a sequence of adjacent swaps, one at a time,
/// using each pair exactly as often as the matrix says?
pub fn feasible_by_simulation(matrix: &SwapMatrix) -> bool {
    let n = matrix.line_count();
    let order: Vec<usize> = (0..n).collect();
    let mut remaining = vec![vec![0u32; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                remaining[i][j] = matrix.count(i, j);
            }
        }
    }
    let mut visited = HashSet::new();
    simulate(order, remaining, &mut visited)
}

fn simulate(
    order: Vec<usize>,
    remaining: Vec<Vec<u32>>,
    visited: &mut HashSet<(Vec<usize>, Vec<Vec<u32>>)>,
) -> bool {
    if remaining.iter().flatten().all(|&c| c == 0) {
        return true;
    }
    if !visited.insert((order.clone(), remaining.clone())) {
        return false;
    }
    for p in 0..order.len().saturating_sub(1) {
        let (a, b) = (order[p], order[p + 1]);
        if remaining[a][b] == 0 {
            continue;
        }
        let mut next_order = order.clone();
        next_order.swap(p, p + 1);
        let mut next_remaining = remaining.clone();
        next_remaining[a][b] -= 1;
        next_remaining[b][a] -= 1;
        if simulate(next_order, next_remaining, visited) {
            return true;
        }
    }
    false
}

/// Every pair has exactly as many events as the matrix requires.
pub fn assert_event_counts(graph: &RealizationGraph, matrix: &SwapMatrix) {
    let n = matrix.line_count();
    for i in 0..n {
        for j in (i + 1)..n {
            let pair = UnorderedSwap::new(Line::new(i), Line::new(j));
            assert_eq!(
                graph.events_of_pair(pair).count(),
                matrix.count(i, j) as usize,
                "event count for {}",
                pair
            );
        }
    }
    assert_eq!(graph.vertex_count() as u64, matrix.total_swaps());
}

/// No line takes part in two swaps of the same layer.
pub fn assert_layers_line_disjoint(graph: &RealizationGraph) {
    for (index, layer) in graph.layers().iter().enumerate() {
        let mut lines = HashSet::new();
        for event in layer {
            let pair = event.unordered();
            assert!(lines.insert(pair.low()), "line {} twice in layer {}", pair.low(), index);
            assert!(lines.insert(pair.high()), "line {} twice in layer {}", pair.high(), index);
        }
    }
}
