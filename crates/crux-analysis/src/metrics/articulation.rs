//! Articulation point (cut vertex) detection.
//!
//! # Overview
//!
//! An articulation point is a node whose removal increases the number of
//! connected components — a single point of failure in the dependency
//! structure. Detection runs over an explicit **undirected** view of the
//! graph: each directed edge unioned with its reverse.
//!
//! # Algorithm
//!
//! Single-pass DFS discovery/low-link numbering (Hopcroft–Tarjan). A
//! non-root node `v` is an articulation point if some DFS child `w` has
//! `low[w] >= disc[v]` — nothing in `w`'s subtree reaches above `v`. The
//! DFS root is an articulation point iff it has two or more DFS subtrees.
//!
//! The DFS is iterative; recursion depth would otherwise be bounded by the
//! longest chain in the graph.
//!
//! "No parent" is tracked as `Option`, never as a sentinel identifier, so
//! node id 0 is handled as a first-class identifier.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeSet;

use tracing::instrument;

use crate::graph::dense::{CachedAdjacency, DenseIndex};
use crate::graph::source::DependencyGraph;

// ---------------------------------------------------------------------------
// UndirectedAdjacency
// ---------------------------------------------------------------------------

/// Undirected neighbor lists over dense indices, plus the identifier table
/// for re-keying results.
#[derive(Debug, Clone)]
pub struct UndirectedAdjacency {
    ids: Vec<i64>,
    neighbors: Vec<Vec<usize>>,
}

impl UndirectedAdjacency {
    /// Build from a graph snapshot: every directed edge contributes both
    /// directions. Stale edges (targets outside the snapshot) are dropped.
    #[must_use]
    pub fn from_graph<G: DependencyGraph + ?Sized>(graph: &G) -> Self {
        let mut ids = graph.node_ids();
        ids.sort_unstable();
        let index = DenseIndex::build(&ids);
        let adj = CachedAdjacency::build(graph, &index);
        Self::from_cached(&adj, index.into_reverse())
    }

    /// Build from an already-cached directed adjacency.
    #[must_use]
    pub fn from_cached(adj: &CachedAdjacency, ids: Vec<i64>) -> Self {
        let n = adj.node_count();
        let mut neighbors: Vec<Vec<usize>> = Vec::with_capacity(n);

        for v in 0..n {
            // outgoing and incoming are each sorted; merge and dedup.
            let mut merged: Vec<usize> =
                Vec::with_capacity(adj.outgoing[v].len() + adj.incoming[v].len());
            merged.extend_from_slice(&adj.outgoing[v]);
            merged.extend_from_slice(&adj.incoming[v]);
            merged.sort_unstable();
            merged.dedup();
            // A self-loop contributes nothing to connectivity.
            merged.retain(|&w| w != v);
            neighbors.push(merged);
        }

        Self { ids, neighbors }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Find every articulation point, returned as an ordered identifier set.
#[must_use]
#[instrument(skip(adj), fields(nodes = adj.node_count()))]
pub fn find_articulation_points(adj: &UndirectedAdjacency) -> BTreeSet<i64> {
    const UNVISITED: usize = usize::MAX;

    let n = adj.node_count();

    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0_usize; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut is_cut = vec![false; n];
    let mut timer = 0_usize;

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }

        disc[root] = timer;
        low[root] = timer;
        timer += 1;

        let mut root_children = 0_usize;
        // (node, cursor into its neighbor list)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            if frame.1 < adj.neighbors[v].len() {
                let w = adj.neighbors[v][frame.1];
                frame.1 += 1;

                if disc[w] == UNVISITED {
                    parent[w] = Some(v);
                    if v == root {
                        root_children += 1;
                    }
                    disc[w] = timer;
                    low[w] = timer;
                    timer += 1;
                    stack.push((w, 0));
                } else if parent[v] != Some(w) {
                    // Back edge (the tree edge to the parent is skipped).
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                stack.pop();
                if let Some(&(p, _)) = stack.last() {
                    low[p] = low[p].min(low[v]);
                    // Non-root articulation condition: child subtree cannot
                    // climb above p.
                    if parent[p].is_some() && low[v] >= disc[p] {
                        is_cut[p] = true;
                    }
                }
            }
        }

        // Root special case: two or more DFS subtrees.
        if root_children >= 2 {
            is_cut[root] = true;
        }
    }

    (0..n).filter(|&v| is_cut[v]).map(|v| adj.ids[v]).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::source::EdgeList;

    fn points(nodes: &[i64], edges: &[(i64, i64)]) -> BTreeSet<i64> {
        let g = EdgeList::new(nodes, edges);
        let adj = UndirectedAdjacency::from_graph(&g);
        find_articulation_points(&adj)
    }

    #[test]
    fn chain_middle_is_sole_cut_vertex() {
        // 0 - 1 - 2: removing 1 disconnects the endpoints. Also exercises
        // id 0 as a first-class identifier.
        let cuts = points(&[0, 1, 2], &[(0, 1), (1, 2)]);
        assert_eq!(cuts, BTreeSet::from([1]));
    }

    #[test]
    fn triangle_has_no_cut_vertices() {
        let cuts = points(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);
        assert!(cuts.is_empty());
    }

    #[test]
    fn zero_id_root_with_two_subtrees_is_cut() {
        // 1 - 0 - 2 with 0 enumerated first, so the DFS roots at id 0.
        let cuts = points(&[0, 1, 2], &[(0, 1), (0, 2)]);
        assert_eq!(cuts, BTreeSet::from([0]));
    }

    #[test]
    fn bridge_between_triangles() {
        // Triangle {1,2,3} - bridge 3-4 - triangle {4,5,6}.
        let cuts = points(
            &[1, 2, 3, 4, 5, 6],
            &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 4)],
        );
        assert_eq!(cuts, BTreeSet::from([3, 4]));
    }

    #[test]
    fn direction_is_irrelevant() {
        // Directed chain and its reversal give the same undirected cuts.
        let forward = points(&[7, 8, 9], &[(7, 8), (8, 9)]);
        let backward = points(&[7, 8, 9], &[(9, 8), (8, 7)]);
        assert_eq!(forward, backward);
        assert_eq!(forward, BTreeSet::from([8]));
    }

    #[test]
    fn disconnected_components_analyzed_independently() {
        // Chain 1-2-3 plus isolated pair 10-11.
        let cuts = points(&[1, 2, 3, 10, 11], &[(1, 2), (2, 3), (10, 11)]);
        assert_eq!(cuts, BTreeSet::from([2]));
    }

    #[test]
    fn self_loop_does_not_create_cut() {
        let cuts = points(&[1, 2], &[(1, 1), (1, 2)]);
        assert!(cuts.is_empty());
    }

    #[test]
    fn empty_graph() {
        assert!(points(&[], &[]).is_empty());
    }
}
