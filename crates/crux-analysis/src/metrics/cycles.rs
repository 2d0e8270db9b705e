//! Dependency cycle detection via strongly connected components.
//!
//! # Overview
//!
//! A cycle in the blocking graph is a set of items that transitively block
//! each other — none of them can start until the knot is cut. Cycles are
//! reported as their SCC member sets: every SCC with more than one member,
//! plus single nodes with a self-loop.
//!
//! Exhaustive *simple-cycle* enumeration is unbounded in the worst case,
//! which is why adaptive configuration disables this metric entirely on XL
//! graphs; SCC detection itself is linear, but the report is still capped
//! by `max_cycles` so a pathological graph cannot balloon the result.
//!
//! # Algorithm
//!
//! Iterative Tarjan SCC (explicit stack; recursion depth would otherwise
//! track the longest path). Member lists and the outer list are sorted for
//! deterministic output.

#![allow(clippy::module_name_repetitions)]

use tracing::instrument;

use crate::graph::dense::CachedAdjacency;

/// Find dependency cycles, re-keyed to identifiers via `ids`.
///
/// Each entry is the sorted member set of one cyclic SCC; the outer list is
/// sorted and truncated to `max_cycles`.
#[must_use]
#[instrument(skip(adj, ids), fields(nodes = adj.node_count()))]
pub fn find_cycles(adj: &CachedAdjacency, ids: &[i64], max_cycles: usize) -> Vec<Vec<i64>> {
    let mut cycles: Vec<Vec<i64>> = strongly_connected_components(adj)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&v| adj.outgoing[v].binary_search(&v).is_ok())
        })
        .map(|component| {
            let mut members: Vec<i64> = component.into_iter().map(|v| ids[v]).collect();
            members.sort_unstable();
            members
        })
        .collect();

    cycles.sort_unstable();
    cycles.truncate(max_cycles);
    cycles
}

/// Iterative Tarjan over the outgoing adjacency.
fn strongly_connected_components(adj: &CachedAdjacency) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;

    let n = adj.node_count();

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0_usize; n];
    let mut on_stack = vec![false; n];
    let mut scc_stack: Vec<usize> = Vec::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut next_index = 0_usize;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        // (node, cursor into its successor list)
        let mut call_stack: Vec<(usize, usize)> = vec![(root, 0)];
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        scc_stack.push(root);
        on_stack[root] = true;

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.0;
            if frame.1 < adj.outgoing[v].len() {
                let w = adj.outgoing[v][frame.1];
                frame.1 += 1;

                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    scc_stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
            } else {
                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }

                if lowlink[v] == index[v] {
                    // v is an SCC root: pop its component.
                    let mut component = Vec::new();
                    while let Some(w) = scc_stack.pop() {
                        on_stack[w] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::dense::DenseIndex;
    use crate::graph::source::{DependencyGraph, EdgeList};

    fn cycles(nodes: &[i64], edges: &[(i64, i64)], cap: usize) -> Vec<Vec<i64>> {
        let g = EdgeList::new(nodes, edges);
        let index = DenseIndex::build(&g.node_ids());
        let adj = CachedAdjacency::build(&g, &index);
        find_cycles(&adj, nodes, cap)
    }

    #[test]
    fn acyclic_graph_reports_nothing() {
        assert!(cycles(&[1, 2, 3], &[(1, 2), (2, 3)], 100).is_empty());
    }

    #[test]
    fn two_node_cycle_detected() {
        let found = cycles(&[1, 2, 3], &[(1, 2), (2, 1), (2, 3)], 100);
        assert_eq!(found, vec![vec![1, 2]]);
    }

    #[test]
    fn self_loop_is_a_one_element_cycle() {
        let found = cycles(&[1, 2], &[(1, 1), (1, 2)], 100);
        assert_eq!(found, vec![vec![1]]);
    }

    #[test]
    fn disjoint_cycles_sorted_deterministically() {
        let found = cycles(
            &[1, 2, 5, 6],
            &[(5, 6), (6, 5), (1, 2), (2, 1)],
            100,
        );
        assert_eq!(found, vec![vec![1, 2], vec![5, 6]]);
    }

    #[test]
    fn cap_truncates_the_report() {
        let found = cycles(
            &[1, 2, 5, 6],
            &[(5, 6), (6, 5), (1, 2), (2, 1)],
            1,
        );
        assert_eq!(found, vec![vec![1, 2]]);
    }

    #[test]
    fn three_node_scc_reported_whole() {
        let found = cycles(&[7, 8, 9], &[(7, 8), (8, 9), (9, 7)], 100);
        assert_eq!(found, vec![vec![7, 8, 9]]);
    }
}
