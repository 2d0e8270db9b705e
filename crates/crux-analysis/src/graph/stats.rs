//! Analysis snapshot: every computed metric in one serializable value.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use serde::Serialize;

use crate::config::SkippedMetric;
use crate::metrics::betweenness::BetweennessMode;

/// Everything one analysis pass produced for a snapshot.
///
/// Metric maps are keyed by node identifier. A metric that was skipped or
/// failed to apply (e.g. critical path on a cyclic graph) leaves its map
/// empty and shows up in `skipped`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Directed density: `e / (n * (n - 1))`.
    pub density: f64,

    /// Outgoing edge count per node, every node present.
    pub out_degree: HashMap<i64, usize>,

    /// Betweenness centrality; zero-valued nodes are omitted.
    pub betweenness: HashMap<i64, f64>,
    pub betweenness_mode: BetweennessMode,
    /// Pivot count behind `betweenness` (equals `node_count` when exact).
    pub betweenness_sample_size: usize,
    pub betweenness_timed_out: bool,

    pub pagerank: HashMap<i64, f64>,
    pub hubs: HashMap<i64, f64>,
    pub authorities: HashMap<i64, f64>,
    pub eigenvector: HashMap<i64, f64>,
    /// Longest-chain score; empty when the graph is cyclic.
    pub critical_path: HashMap<i64, f64>,

    /// Cut vertices of the undirected view.
    pub articulation_points: BTreeSet<i64>,
    /// Cyclic SCC member sets, sorted, capped by configuration.
    pub cycles: Vec<Vec<i64>>,

    /// Metrics deliberately not computed, with reasons.
    pub skipped: Vec<SkippedMetric>,
    /// Wall-clock time for the whole pass.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

impl GraphStats {
    /// Directed density for `n` nodes and `e` edges; 0 below two nodes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn directed_density(node_count: usize, edge_count: usize) -> f64 {
        if node_count < 2 {
            return 0.0;
        }
        edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::Serializer;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u128(d.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_of_tiny_graphs_is_zero() {
        assert_eq!(GraphStats::directed_density(0, 0), 0.0);
        assert_eq!(GraphStats::directed_density(1, 0), 0.0);
    }

    #[test]
    fn complete_digraph_density_is_one() {
        // 3 nodes, 6 directed edges.
        let d = GraphStats::directed_density(3, 6);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn default_stats_serialize() {
        let stats = GraphStats::default();
        let json = serde_json::to_value(&stats).expect("serializable");
        assert_eq!(json["node_count"], 0);
        assert_eq!(json["betweenness_mode"], "skipped");
    }
}
