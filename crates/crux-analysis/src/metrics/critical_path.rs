//! Critical-chain ("keystone") scores.
//!
//! # Overview
//!
//! The keystone score of a node is the length of the longest dependency
//! chain passing through it: upstream depth + downstream depth + 1, in
//! steps where each item contributes one step. Items on the project's
//! longest chain score highest — delaying any of them delays the earliest
//! possible finish.
//!
//! # Algorithm
//!
//! Two DP passes over a Kahn topological order: a forward pass computes the
//! longest distance from any source, a backward pass the longest distance
//! to any sink. The score only makes sense on an acyclic graph; when the
//! topological sort cannot consume every node the graph has cycles and
//! `None` is returned (the caller reports the metric as unavailable rather
//! than guessing).

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::dense::CachedAdjacency;

/// Longest-chain score per dense index, or `None` when the graph is cyclic.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn critical_path_scores(adj: &CachedAdjacency) -> Option<Vec<f64>> {
    let n = adj.node_count();
    if n == 0 {
        return Some(Vec::new());
    }

    let order = topological_order(adj)?;

    // Forward: longest distance from any source.
    let mut up = vec![0_usize; n];
    for &v in &order {
        for &u in &adj.incoming[v] {
            up[v] = up[v].max(up[u] + 1);
        }
    }

    // Backward: longest distance to any sink.
    let mut down = vec![0_usize; n];
    for &v in order.iter().rev() {
        for &w in &adj.outgoing[v] {
            down[v] = down[v].max(down[w] + 1);
        }
    }

    Some(
        (0..n)
            .map(|v| (up[v] + down[v] + 1) as f64)
            .collect(),
    )
}

/// Kahn topological order; `None` if a cycle prevents completion.
fn topological_order(adj: &CachedAdjacency) -> Option<Vec<usize>> {
    let n = adj.node_count();
    let mut in_degree: Vec<usize> = adj.incoming.iter().map(Vec::len).collect();

    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for &w in &adj.outgoing[v] {
            in_degree[w] -= 1;
            if in_degree[w] == 0 {
                queue.push_back(w);
            }
        }
    }

    (order.len() == n).then_some(order)
}
