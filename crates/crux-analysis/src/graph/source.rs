//! Graph capability trait consumed by the analysis engine.
//!
//! # Overview
//!
//! The engine never sees a concrete graph type. It works against
//! [`DependencyGraph`], a two-operation contract: enumerate node
//! identifiers, and enumerate the successors of one node. Identifiers are
//! opaque 64-bit integers owned by the external issue/dependency model —
//! sparse, not necessarily contiguous, and zero is a valid identifier.
//!
//! Successor enumeration is consumed exactly once per node, during
//! [`crate::graph::dense::CachedAdjacency`] construction. After that point
//! every algorithm runs on the cached dense adjacency and the source graph
//! is never queried again.
//!
//! Two implementations ship with the crate:
//!
//! - [`PetgraphSource`] wraps a `petgraph::graph::DiGraph<i64, ()>` whose
//!   node weights are the external identifiers.
//! - [`EdgeList`] is a plain node/edge container for embedders (and tests)
//!   that do not keep a petgraph structure around.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

/// A directed dependency graph snapshot.
///
/// An edge `a → b` means "a blocks b". Implementations may return
/// successors that are not part of the node set — such edges reference
/// items outside the current snapshot and are silently dropped during
/// adjacency construction.
pub trait DependencyGraph {
    /// Enumerate every node identifier in the snapshot.
    fn node_ids(&self) -> Vec<i64>;

    /// Enumerate the successors of `id`.
    ///
    /// Unknown identifiers yield an empty list.
    fn successors(&self, id: i64) -> Vec<i64>;
}

// ---------------------------------------------------------------------------
// PetgraphSource
// ---------------------------------------------------------------------------

/// Adapter exposing a `DiGraph<i64, ()>` as a [`DependencyGraph`].
///
/// Node weights are the external identifiers. The adapter builds an
/// id → `NodeIndex` lookup once so successor queries stay O(degree).
#[derive(Debug)]
pub struct PetgraphSource<'a> {
    graph: &'a DiGraph<i64, ()>,
    by_id: HashMap<i64, NodeIndex>,
}

impl<'a> PetgraphSource<'a> {
    /// Wrap `graph`, indexing node weights for identifier lookup.
    ///
    /// If two nodes carry the same weight, the later one wins the lookup
    /// slot; duplicate identifiers in a snapshot are a modeling error
    /// upstream and are not detected here.
    #[must_use]
    pub fn new(graph: &'a DiGraph<i64, ()>) -> Self {
        let by_id = graph
            .node_indices()
            .map(|idx| (graph[idx], idx))
            .collect();
        Self { graph, by_id }
    }
}

impl DependencyGraph for PetgraphSource<'_> {
    fn node_ids(&self) -> Vec<i64> {
        self.graph.node_weights().copied().collect()
    }

    fn successors(&self, id: i64) -> Vec<i64> {
        self.by_id.get(&id).map_or_else(Vec::new, |&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|w| self.graph[w])
                .collect()
        })
    }
}

// ---------------------------------------------------------------------------
// EdgeList
// ---------------------------------------------------------------------------

/// A minimal owned graph: explicit node set plus an edge list.
///
/// Nodes referenced only by edges are *not* added to the node set; this is
/// how callers model stale edges pointing outside the snapshot.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    nodes: Vec<i64>,
    succ: HashMap<i64, Vec<i64>>,
}

impl EdgeList {
    /// Build from an explicit node set and `(from, to)` edge pairs.
    #[must_use]
    pub fn new(nodes: &[i64], edges: &[(i64, i64)]) -> Self {
        let mut succ: HashMap<i64, Vec<i64>> = HashMap::with_capacity(nodes.len());
        for &(from, to) in edges {
            succ.entry(from).or_default().push(to);
        }
        Self {
            nodes: nodes.to_vec(),
            succ,
        }
    }
}

impl DependencyGraph for EdgeList {
    fn node_ids(&self) -> Vec<i64> {
        self.nodes.clone()
    }

    fn successors(&self, id: i64) -> Vec<i64> {
        self.succ.get(&id).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
