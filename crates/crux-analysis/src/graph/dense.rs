//! Dense re-indexing of sparse node identifiers and cached adjacency.
//!
//! # Overview
//!
//! External node identifiers are sparse 64-bit integers. Every algorithm in
//! this crate wants array indexing instead: [`DenseIndex`] assigns each
//! identifier a compact index in `[0, n)`, and [`CachedAdjacency`] holds
//! sorted outgoing/incoming neighbor lists addressed by that index.
//!
//! Both structures are built once per graph snapshot and are immutable
//! afterwards, so concurrent workers share them without locking.
//!
//! ## Stale edges
//!
//! A successor whose identifier is absent from the index references an item
//! outside the current snapshot (deleted, filtered, or not yet loaded).
//! That is an expected steady-state condition, not an error: the edge is
//! dropped during construction and never reported.
//!
//! ## Determinism
//!
//! Neighbor lists are sorted in both directions. BFS tie-breaking therefore
//! follows a fixed order, which makes every accumulated score reproducible
//! for a fixed graph.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use crate::graph::source::DependencyGraph;

// ---------------------------------------------------------------------------
// DenseIndex
// ---------------------------------------------------------------------------

/// Bijection between sparse identifiers and compact `[0, n)` indices.
///
/// Invariant: `id_of(index_of(id)) == id` for every node in the snapshot.
#[derive(Debug, Clone)]
pub struct DenseIndex {
    id_to_idx: HashMap<i64, usize>,
    idx_to_id: Vec<i64>,
}

impl DenseIndex {
    /// Assign each identifier an index in enumeration order.
    #[must_use]
    pub fn build(ids: &[i64]) -> Self {
        let mut id_to_idx = HashMap::with_capacity(ids.len());
        let mut idx_to_id = Vec::with_capacity(ids.len());
        for &id in ids {
            id_to_idx.insert(id, idx_to_id.len());
            idx_to_id.push(id);
        }
        Self {
            id_to_idx,
            idx_to_id,
        }
    }

    /// Number of indexed nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.idx_to_id.len()
    }

    /// `true` if the index holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idx_to_id.is_empty()
    }

    /// Dense index for `id`, or `None` if the identifier is outside the
    /// snapshot.
    #[must_use]
    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.id_to_idx.get(&id).copied()
    }

    /// Identifier for a dense index. Panics on out-of-range input in debug
    /// builds, like any slice access.
    #[must_use]
    pub fn id_of(&self, idx: usize) -> i64 {
        self.idx_to_id[idx]
    }

    /// Consume the index, keeping only the reverse array.
    ///
    /// The forward map is only needed while the adjacency is being built;
    /// after that, score re-keying needs the reverse direction alone.
    #[must_use]
    pub fn into_reverse(self) -> Vec<i64> {
        self.idx_to_id
    }
}

// ---------------------------------------------------------------------------
// CachedAdjacency
// ---------------------------------------------------------------------------

/// Precomputed neighbor lists addressed by dense index.
///
/// `outgoing[v]` and `incoming[v]` are sorted and duplicate-free. The
/// incoming lists are derived by inverting the outgoing lists; the source
/// graph is queried exactly once per node.
#[derive(Debug, Clone)]
pub struct CachedAdjacency {
    pub outgoing: Vec<Vec<usize>>,
    pub incoming: Vec<Vec<usize>>,
}

impl CachedAdjacency {
    /// Build the adjacency for every node in `index`.
    ///
    /// Successors absent from `index` are dropped.
    #[must_use]
    pub fn build<G: DependencyGraph + ?Sized>(graph: &G, index: &DenseIndex) -> Self {
        let n = index.len();
        let mut outgoing: Vec<Vec<usize>> = Vec::with_capacity(n);

        for v in 0..n {
            let mut neighbors: Vec<usize> = graph
                .successors(index.id_of(v))
                .into_iter()
                .filter_map(|id| index.index_of(id))
                .collect();
            neighbors.sort_unstable();
            neighbors.dedup();
            outgoing.push(neighbors);
        }

        // Invert the outgoing lists instead of re-querying the graph.
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (v, neighbors) in outgoing.iter().enumerate() {
            for &w in neighbors {
                incoming[w].push(v);
            }
        }
        for list in &mut incoming {
            list.sort_unstable();
        }

        Self { outgoing, incoming }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of directed edges after stale-edge dropping and deduplication.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(Vec::len).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::source::EdgeList;

    #[test]
    fn index_round_trips_every_id() {
        let ids = [42, 0, -7, 1_000_000_000_000];
        let index = DenseIndex::build(&ids);

        assert_eq!(index.len(), 4);
        for &id in &ids {
            let idx = index.index_of(id).expect("indexed");
            assert_eq!(index.id_of(idx), id);
        }
        assert_eq!(index.index_of(99), None);
    }

    #[test]
    fn into_reverse_preserves_order() {
        let index = DenseIndex::build(&[5, 3, 9]);
        assert_eq!(index.into_reverse(), vec![5, 3, 9]);
    }

    #[test]
    fn adjacency_is_sorted_and_deduplicated() {
        // 1 → {3, 2, 3} with nodes enumerated as [1, 2, 3].
        let g = EdgeList::new(&[1, 2, 3], &[(1, 3), (1, 2), (1, 3)]);
        let index = DenseIndex::build(&g.node_ids());
        let adj = CachedAdjacency::build(&g, &index);

        assert_eq!(adj.outgoing[0], vec![1, 2]);
        assert_eq!(adj.edge_count(), 2);
    }

    #[test]
    fn dangling_edges_dropped_silently() {
        let g = EdgeList::new(&[1, 2], &[(1, 2), (1, 99), (2, 77)]);
        let index = DenseIndex::build(&g.node_ids());
        let adj = CachedAdjacency::build(&g, &index);

        assert_eq!(adj.outgoing[0], vec![1]);
        assert!(adj.outgoing[1].is_empty());
        assert_eq!(adj.edge_count(), 1);
    }

    #[test]
    fn incoming_is_inverse_of_outgoing() {
        // 0→1, 0→2, 2→1 over nodes [10, 11, 12].
        let g = EdgeList::new(&[10, 11, 12], &[(10, 11), (10, 12), (12, 11)]);
        let index = DenseIndex::build(&g.node_ids());
        let adj = CachedAdjacency::build(&g, &index);

        assert_eq!(adj.incoming[0], Vec::<usize>::new());
        assert_eq!(adj.incoming[1], vec![0, 2]);
        assert_eq!(adj.incoming[2], vec![0]);
    }

    #[test]
    fn empty_graph_builds_empty_adjacency() {
        let g = EdgeList::new(&[], &[]);
        let index = DenseIndex::build(&g.node_ids());
        let adj = CachedAdjacency::build(&g, &index);
        assert_eq!(adj.node_count(), 0);
        assert_eq!(adj.edge_count(), 0);
    }
}
