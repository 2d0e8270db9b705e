//! Analysis engine: one snapshot in, a [`GraphStats`] out.
//!
//! The engine owns the traversal buffer pool, so repeated `analyze` calls
//! on similarly sized snapshots reuse allocations instead of re-growing
//! them. It builds the dense index and cached adjacency once per call and
//! feeds the same adjacency to every enabled metric.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::config::{AnalysisConfig, SkippedMetric};
use crate::graph::dense::{CachedAdjacency, DenseIndex};
use crate::graph::source::DependencyGraph;
use crate::graph::stats::GraphStats;
use crate::metrics::articulation::{find_articulation_points, UndirectedAdjacency};
use crate::metrics::betweenness::{self, BetweennessResult};
use crate::metrics::critical_path::critical_path_scores;
use crate::metrics::cycles::find_cycles;
use crate::metrics::eigenvector::eigenvector_centrality;
use crate::metrics::hits::hits;
use crate::metrics::pagerank::{pagerank, PageRankConfig};
use crate::pool::BufferPool;

/// Fixed pivot-sampling seed: the same snapshot always yields the same
/// sampled betweenness result.
const PIVOT_SEED: u64 = 0x6372_7578;

const ITERATION_CAP: usize = 100;
const ITERATION_TOLERANCE: f64 = 1e-8;

/// Stateful analysis driver. Cheap to construct; reuse one per process to
/// get buffer pooling across snapshots.
#[derive(Debug, Default)]
pub struct AnalysisEngine {
    pool: BufferPool,
}

impl AnalysisEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Betweenness only, with explicit sampling controls. See
    /// [`betweenness::compute`].
    #[must_use]
    pub fn betweenness<G: DependencyGraph + ?Sized>(
        &self,
        graph: &G,
        sample_size: usize,
        seed: u64,
        budget: Option<std::time::Duration>,
    ) -> BetweennessResult {
        betweenness::compute(graph, &self.pool, sample_size, seed, budget)
    }

    /// Run every metric `config` enables and assemble the snapshot.
    ///
    /// Articulation points and degree stats always run; they are linear
    /// and every consumer wants them.
    #[must_use]
    #[instrument(skip(self, graph, config))]
    pub fn analyze<G: DependencyGraph + ?Sized>(
        &self,
        graph: &G,
        config: &AnalysisConfig,
    ) -> GraphStats {
        let start = Instant::now();

        let mut ids = graph.node_ids();
        ids.sort_unstable();
        let index = DenseIndex::build(&ids);
        let adj = CachedAdjacency::build(graph, &index);
        let ids = index.into_reverse();

        let n = adj.node_count();
        let mut stats = GraphStats {
            node_count: n,
            edge_count: adj.edge_count(),
            density: GraphStats::directed_density(n, adj.edge_count()),
            out_degree: (0..n).map(|v| (ids[v], adj.outgoing[v].len())).collect(),
            skipped: config.skipped_metrics(),
            ..GraphStats::default()
        };

        if config.compute_betweenness {
            let sample_size = if config.betweenness_sample_size == 0 {
                n.max(1)
            } else {
                config.betweenness_sample_size
            };
            let result = betweenness::compute_dense(
                &adj,
                &ids,
                &self.pool,
                sample_size,
                PIVOT_SEED,
                Some(config.betweenness_timeout),
                Instant::now(),
            );
            stats.betweenness = result.scores;
            stats.betweenness_mode = result.mode;
            stats.betweenness_sample_size = result.sample_size;
            stats.betweenness_timed_out = result.timed_out;
        }

        if config.compute_pagerank {
            let result = pagerank(&adj, &PageRankConfig::default());
            stats.pagerank = rekey(&ids, &result.scores);
        }

        if config.compute_hits {
            let result = hits(&adj, ITERATION_CAP, ITERATION_TOLERANCE);
            stats.hubs = rekey(&ids, &result.hubs);
            stats.authorities = rekey(&ids, &result.authorities);
        }

        if config.compute_eigenvector {
            let result = eigenvector_centrality(&adj, ITERATION_CAP, ITERATION_TOLERANCE);
            stats.eigenvector = rekey(&ids, &result.scores);
        }

        if config.compute_critical_path {
            match critical_path_scores(&adj) {
                Some(scores) => stats.critical_path = rekey(&ids, &scores),
                None => stats.skipped.push(SkippedMetric {
                    name: "CriticalPath",
                    reason: "graph contains cycles".to_owned(),
                }),
            }
        }

        if config.compute_cycles {
            stats.cycles = find_cycles(&adj, &ids, config.max_cycles_to_store);
        }

        let undirected = UndirectedAdjacency::from_cached(&adj, ids);
        stats.articulation_points = find_articulation_points(&undirected);

        stats.elapsed = start.elapsed();
        debug!(
            nodes = stats.node_count,
            edges = stats.edge_count,
            skipped = stats.skipped.len(),
            elapsed = ?stats.elapsed,
            "analysis finished"
        );
        stats
    }
}

fn rekey(ids: &[i64], dense: &[f64]) -> HashMap<i64, f64> {
    dense.iter().enumerate().map(|(v, &s)| (ids[v], s)).collect()
}
