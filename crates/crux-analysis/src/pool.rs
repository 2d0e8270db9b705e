//! Pooled scratch state for single-source betweenness traversals.
//!
//! # Overview
//!
//! One Brandes traversal needs seven pieces of scratch state (path counts,
//! distances, dependency accumulators, predecessor lists, BFS queue,
//! visitation stack, per-source contributions). Allocating them per call
//! dominates runtime on repeated traversals, so the engine keeps them in a
//! [`BufferPool`]: a concurrent free-list whose allocator can always
//! manufacture a fresh buffer set on demand.
//!
//! # Memory policy
//!
//! `reset(n)` must leave the buffers observably identical to a freshly
//! allocated set sized for `n` nodes, whatever they held before.
//!
//! - Fixed-size arrays (`sigma`/`dist`/`delta`/`bc`/`queue`/`stack`) are
//!   reallocated only when capacity is insufficient for `n` or exceeds
//!   `2n`. The shrink bound caps long-tail retention after one very large
//!   snapshot has passed through the pool.
//! - Per-node predecessor lists keep their previously-grown capacity
//!   across resets (cleared, not reallocated): predecessor fan-in is
//!   graph-dependent and expensive to regrow on every traversal.

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

// ---------------------------------------------------------------------------
// TraversalBuffers
// ---------------------------------------------------------------------------

/// Scratch state for one single-source traversal.
///
/// Owned by exactly one worker at a time. Contents are undefined between
/// [`BufferPool::release`] and the next [`TraversalBuffers::reset`] — never
/// read before resetting.
#[derive(Debug, Default)]
pub struct TraversalBuffers {
    /// σ_s(v): number of shortest paths from the source to `v`.
    pub(crate) sigma: Vec<f64>,
    /// d_s(v): BFS distance from the source, `-1` = unvisited.
    pub(crate) dist: Vec<i64>,
    /// δ_s(v): dependency accumulation.
    pub(crate) delta: Vec<f64>,
    /// P_s(v): predecessors of `v` on shortest paths, as dense indices.
    pub(crate) pred: Vec<Vec<usize>>,
    /// BFS frontier.
    pub(crate) queue: VecDeque<usize>,
    /// Nodes in visitation order; drained LIFO during back-propagation.
    /// After a traversal this holds exactly the nodes reached from the
    /// source.
    pub(crate) stack: Vec<usize>,
    /// This source's contribution to each node's betweenness.
    pub(crate) bc: Vec<f64>,
}

impl TraversalBuffers {
    /// Create an empty buffer set. Arrays are sized lazily by `reset`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the buffers for a traversal over `node_count` nodes.
    ///
    /// Post-state: all `sigma`/`delta`/`bc` zero, all `dist` `-1`, every
    /// predecessor list empty, queue and stack empty. The kernel sets
    /// `sigma[source]` and `dist[source]` itself.
    pub fn reset(&mut self, node_count: usize) {
        // `sigma` stands in for all fixed-size arrays: they grow and shrink
        // together, so one capacity check covers them.
        let cap = self.sigma.capacity();
        if cap < node_count || cap > node_count.saturating_mul(2) {
            self.sigma = Vec::with_capacity(node_count);
            self.dist = Vec::with_capacity(node_count);
            self.delta = Vec::with_capacity(node_count);
            self.bc = Vec::with_capacity(node_count);
            self.queue = VecDeque::with_capacity(node_count);
            self.stack = Vec::with_capacity(node_count);
            self.pred = Vec::with_capacity(node_count);
        }

        self.sigma.clear();
        self.sigma.resize(node_count, 0.0);

        self.dist.clear();
        self.dist.resize(node_count, -1);

        self.delta.clear();
        self.delta.resize(node_count, 0.0);

        self.bc.clear();
        self.bc.resize(node_count, 0.0);

        // Predecessor lists: truncate the outer vec, clear each inner list
        // in place so its capacity survives.
        if self.pred.len() < node_count {
            self.pred.resize_with(node_count, Vec::new);
        } else {
            self.pred.truncate(node_count);
        }
        for list in &mut self.pred {
            list.clear();
        }

        self.queue.clear();
        self.stack.clear();
    }
}

// ---------------------------------------------------------------------------
// BufferPool
// ---------------------------------------------------------------------------

/// Concurrency-safe free-list of [`TraversalBuffers`].
///
/// `acquire` pops a recycled buffer set or allocates a fresh one; `release`
/// returns a set for reuse. Both are safe under arbitrary concurrent
/// access. Dropping a buffer instead of releasing it is always correct —
/// the pool never depends on a particular entry coming back.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Mutex<Vec<TraversalBuffers>>,
}

impl BufferPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a buffer set out of the pool, allocating if none is free.
    ///
    /// The returned buffers hold arbitrary stale state; call
    /// [`TraversalBuffers::reset`] before use.
    #[must_use]
    pub fn acquire(&self) -> TraversalBuffers {
        self.lock_free().pop().unwrap_or_default()
    }

    /// Return a buffer set to the pool for reuse.
    pub fn release(&self, buffers: TraversalBuffers) {
        self.lock_free().push(buffers);
    }

    /// Number of idle buffer sets currently pooled.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.lock_free().len()
    }

    fn lock_free(&self) -> std::sync::MutexGuard<'_, Vec<TraversalBuffers>> {
        // A poisoned lock only means another worker panicked mid-push/pop;
        // the free-list itself is still a valid Vec and every buffer is
        // reset before use.
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
