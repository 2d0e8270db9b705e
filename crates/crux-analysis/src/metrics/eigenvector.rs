//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! A node is central if its neighbors are central: the score vector is the
//! dominant eigenvector of the adjacency matrix. On a directed acyclic
//! dependency graph the directed variant converges to zero everywhere, so
//! this implementation iterates over the **undirected** view (each edge
//! counted regardless of direction), which keeps the scores meaningful for
//! DAGs — the common shape of a dependency snapshot.

#![allow(clippy::module_name_repetitions)]

use tracing::instrument;

use crate::graph::dense::CachedAdjacency;

/// Dense eigenvector scores plus convergence metadata.
#[derive(Debug, Clone)]
pub struct EigenvectorScores {
    /// Score per dense index; unit L2 norm.
    pub scores: Vec<f64>,
    /// Iterations actually performed.
    pub iterations: usize,
    /// Whether the tolerance was reached within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality over the undirected view of `adj`.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.node_count()))]
pub fn eigenvector_centrality(
    adj: &CachedAdjacency,
    max_iter: usize,
    tolerance: f64,
) -> EigenvectorScores {
    let n = adj.node_count();
    if n == 0 {
        return EigenvectorScores {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    // Undirected neighbor lists: union of outgoing and incoming, so a
    // reciprocal edge pair still counts once.
    let undirected: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            let mut merged: Vec<usize> =
                Vec::with_capacity(adj.outgoing[v].len() + adj.incoming[v].len());
            merged.extend_from_slice(&adj.outgoing[v]);
            merged.extend_from_slice(&adj.incoming[v]);
            merged.sort_unstable();
            merged.dedup();
            merged
        })
        .collect();

    let mut scores = vec![1.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iter {
        iterations += 1;

        let mut next = vec![0.0_f64; n];
        for (v, slot) in next.iter_mut().enumerate() {
            for &u in &undirected[v] {
                *slot += scores[u];
            }
        }

        let norm: f64 = next.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut next {
                *v /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();

        scores = next;
        if diff < tolerance {
            converged = true;
            break;
        }
    }

    EigenvectorScores {
        scores,
        iterations,
        converged,
    }
}
