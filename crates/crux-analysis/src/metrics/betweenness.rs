//! Betweenness centrality via Brandes' algorithm, exact or sampled.
//!
//! # Overview
//!
//! Betweenness measures how often a node lies on shortest paths between
//! other pairs of nodes. High-betweenness items are "bridges" or
//! "bottlenecks" — the things everyone is implicitly waiting on.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs: one BFS per source node
//! counts shortest paths, then a reverse-order pass accumulates dependency
//! scores. Exact computation runs every node as a source, O(V·E). For
//! large graphs the driver instead samples `k` pivot sources and
//! extrapolates by `n / k` — the standard unbiased estimator under uniform
//! pivot sampling, with ranking error O(1/√k):
//!
//! - k = 50 → ~14% error
//! - k = 100 → ~10% error
//! - k = 200 → ~7% error
//!
//! Good enough for relative ranking, not for absolute magnitude.
//!
//! Pivots run in parallel on the rayon pool (bounded to available
//! processors); each worker traverses into pooled buffers and merges its
//! contribution into a shared dense accumulator under a mutex, touching
//! only the nodes it actually reached.
//!
//! References: "A Faster Algorithm for Betweenness Centrality" (Brandes,
//! 2001); "Approximating Betweenness Centrality" (Bader et al., 2007).

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::dense::{CachedAdjacency, DenseIndex};
use crate::graph::source::DependencyGraph;
use crate::pool::{BufferPool, TraversalBuffers};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// How a betweenness result was (or was not) computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BetweennessMode {
    /// Every node ran as a source. O(V·E).
    Exact,
    /// Sampled pivot sources with `n / k` extrapolation. O(k·E).
    Approximate,
    /// Deliberately not computed; see the configured skip reason.
    #[default]
    Skipped,
}

/// Betweenness scores plus computation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct BetweennessResult {
    /// Node identifier → centrality score. Zero-valued entries are omitted.
    pub scores: HashMap<i64, f64>,
    /// How the result was computed.
    pub mode: BetweennessMode,
    /// Number of pivot sources used.
    pub sample_size: usize,
    /// Total node count in the snapshot.
    pub total_nodes: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// `true` if the wall-clock budget ran out before all pivots started.
    ///
    /// Advisory: in-flight pivots finish and their contributions are kept,
    /// so the scores are a partial (still usably ranked) estimate.
    pub timed_out: bool,
}

impl BetweennessResult {
    fn empty(mode: BetweennessMode, elapsed: Duration) -> Self {
        Self {
            scores: HashMap::new(),
            mode,
            sample_size: 0,
            total_nodes: 0,
            elapsed,
            timed_out: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Single-source kernel
// ---------------------------------------------------------------------------

/// One Brandes pass from `source`, writing into `buf`.
///
/// Post-conditions: `buf.bc[v]` holds this source's contribution to every
/// node's betweenness, and `buf.stack` lists exactly the nodes reachable
/// from `source` — callers merge `bc` restricted to `stack` so unreached
/// indices are never touched.
pub(crate) fn single_source(adj: &CachedAdjacency, source: usize, buf: &mut TraversalBuffers) {
    let n = adj.node_count();
    if n == 0 {
        return;
    }

    buf.reset(n);
    buf.sigma[source] = 1.0;
    buf.dist[source] = 0;
    buf.queue.push_back(source);

    // BFS phase: path discovery and path counting.
    while let Some(v) = buf.queue.pop_front() {
        buf.stack.push(v);
        let next_dist = buf.dist[v] + 1;

        for &w in &adj.outgoing[v] {
            if buf.dist[w] < 0 {
                buf.dist[w] = next_dist;
                buf.queue.push_back(w);
            }
            if buf.dist[w] == next_dist {
                // Union, not replacement: every predecessor at the same
                // shortest distance counts.
                let sigma_v = buf.sigma[v];
                buf.sigma[w] += sigma_v;
                buf.pred[w].push(v);
            }
        }
    }

    // Accumulation phase, reverse visitation order.
    for i in (0..buf.stack.len()).rev() {
        let w = buf.stack[i];
        if w == source {
            continue;
        }

        // sigma_w > 0 holds for every visited node; the guard is against
        // zero-division on corrupt input.
        let sigma_w = buf.sigma[w];
        if sigma_w > 0.0 {
            let delta_w = buf.delta[w];
            for &v in &buf.pred[w] {
                buf.delta[v] += (buf.sigma[v] / sigma_w) * (1.0 + delta_w);
            }
        }

        buf.bc[w] += buf.delta[w];
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Compute betweenness centrality for `graph`.
///
/// With `sample_size >= n` (node count) this is exhaustive and reported as
/// [`BetweennessMode::Exact`]; otherwise `sample_size` pivots are drawn
/// without replacement using a Fisher–Yates partial shuffle seeded with
/// `seed`, so a fixed seed and node count reproduce the same selection.
/// `sample_size` is clamped to at least 1.
///
/// `budget` is an advisory wall-clock limit: once exceeded, no further
/// pivots start, in-flight pivots finish, and the result is flagged
/// `timed_out`.
#[must_use]
#[instrument(skip(graph, pool))]
pub fn compute<G: DependencyGraph + ?Sized>(
    graph: &G,
    pool: &BufferPool,
    sample_size: usize,
    seed: u64,
    budget: Option<Duration>,
) -> BetweennessResult {
    let start = Instant::now();

    // Deterministic source ordering before indexing and sampling; callers
    // may enumerate nodes in hash order.
    let mut ids = graph.node_ids();
    ids.sort_unstable();

    let index = DenseIndex::build(&ids);
    let adj = CachedAdjacency::build(graph, &index);
    // The forward map is done its job; keep only the reverse array.
    let idx_to_id = index.into_reverse();

    compute_dense(&adj, &idx_to_id, pool, sample_size, seed, budget, start)
}

/// Driver core over a prebuilt adjacency. The engine calls this directly
/// so one snapshot's adjacency serves every metric.
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub(crate) fn compute_dense(
    adj: &CachedAdjacency,
    idx_to_id: &[i64],
    pool: &BufferPool,
    sample_size: usize,
    seed: u64,
    budget: Option<Duration>,
    start: Instant,
) -> BetweennessResult {
    let n = adj.node_count();
    if n == 0 {
        return BetweennessResult::empty(BetweennessMode::Exact, start.elapsed());
    }

    let sample_size = sample_size.max(1);
    let (pivots, mode) = if sample_size >= n {
        ((0..n).collect::<Vec<_>>(), BetweennessMode::Exact)
    } else {
        (sample_indices(n, sample_size, seed), BetweennessMode::Approximate)
    };
    let k = pivots.len();

    let accumulator = Mutex::new(vec![0.0_f64; n]);
    let timed_out = AtomicBool::new(false);

    // One task per pivot; rayon bounds concurrency to available processors.
    pivots.par_iter().for_each(|&source| {
        if budget.is_some_and(|b| start.elapsed() > b) {
            timed_out.store(true, Ordering::Relaxed);
            return;
        }

        let mut buf = pool.acquire();
        single_source(adj, source, &mut buf);

        // Merge only the reached nodes; the critical section is
        // O(reached), independent of total node count.
        {
            let mut acc = accumulator
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            for &w in &buf.stack {
                acc[w] += buf.bc[w];
            }
        }

        pool.release(buf);
    });

    // Extrapolate from the sample to the full graph. Exact runs have
    // k == n, so the factor is 1.
    let scale = n as f64 / k as f64;
    let partial = accumulator
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    let mut scores = HashMap::with_capacity(n);
    for (i, &value) in partial.iter().enumerate() {
        if value != 0.0 {
            scores.insert(idx_to_id[i], value * scale);
        }
    }

    let result = BetweennessResult {
        scores,
        mode,
        sample_size: k,
        total_nodes: n,
        elapsed: start.elapsed(),
        timed_out: timed_out.into_inner(),
    };
    debug!(
        mode = ?result.mode,
        pivots = result.sample_size,
        nodes = result.total_nodes,
        timed_out = result.timed_out,
        "betweenness finished"
    );
    result
}

/// Draw `k` distinct indices from `[0, n)` with a seeded Fisher–Yates
/// partial shuffle. Uniform sampling probability is load-bearing: the
/// `n / k` extrapolation in the driver assumes it.
fn sample_indices(n: usize, k: usize, seed: u64) -> Vec<usize> {
    let mut all: Vec<usize> = (0..n).collect();
    if k >= n {
        return all;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..k {
        let j = i + rng.gen_range(0..n - i);
        all.swap(i, j);
    }
    all.truncate(k);
    all
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
