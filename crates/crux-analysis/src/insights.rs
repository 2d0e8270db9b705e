//! Ranked, bounded insight lists for presentation.
//!
//! Raw metric maps are unordered and unbounded; consumers want "the top N
//! bottlenecks", deterministically. Every list here is sorted by value
//! descending with ties broken by ascending identifier, so two runs over
//! the same snapshot always render identically.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;

use crate::graph::stats::GraphStats;

/// One ranked entry: a node and its metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightItem {
    pub id: i64,
    pub value: f64,
}

/// High-level summary of one analysis pass.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    /// Top betweenness: the items everyone is implicitly waiting on.
    pub bottlenecks: Vec<InsightItem>,
    /// Top longest-chain scores: delaying these delays the finish.
    pub keystones: Vec<InsightItem>,
    /// Top eigenvector centrality: well-connected to the well-connected.
    pub influencers: Vec<InsightItem>,
    /// Strong dependency aggregators (HITS hubs).
    pub hubs: Vec<InsightItem>,
    /// Strong prerequisite providers (HITS authorities).
    pub authorities: Vec<InsightItem>,
    /// Cut vertices whose removal disconnects the graph.
    pub articulation: Vec<i64>,
    /// Nodes with no outgoing dependencies, ascending identifier order.
    pub orphans: Vec<i64>,
    /// Cyclic SCC member sets, as computed.
    pub cycles: Vec<Vec<i64>>,
    pub cluster_density: f64,
    /// Full underlying statistics, for calculation explanations.
    pub stats: GraphStats,
}

impl GraphStats {
    /// Build the insight summary, each list capped at `limit` entries.
    ///
    /// `limit == 0` means "no explicit limit": it resolves to the size of
    /// the largest metric map, or the node count when every map is empty —
    /// never to an unbounded sequence.
    #[must_use]
    pub fn insights(&self, limit: usize) -> Insights {
        let limit = if limit == 0 {
            [
                self.pagerank.len(),
                self.betweenness.len(),
                self.critical_path.len(),
                self.eigenvector.len(),
                self.hubs.len(),
                self.authorities.len(),
            ]
            .into_iter()
            .max()
            .filter(|&m| m > 0)
            .unwrap_or(self.node_count)
        } else {
            limit
        };

        let mut orphans: Vec<i64> = self
            .out_degree
            .iter()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(&id, _)| id)
            .collect();
        orphans.sort_unstable();
        orphans.truncate(limit);

        Insights {
            bottlenecks: top_items(&self.betweenness, limit),
            keystones: top_items(&self.critical_path, limit),
            influencers: top_items(&self.eigenvector, limit),
            hubs: top_items(&self.hubs, limit),
            authorities: top_items(&self.authorities, limit),
            articulation: self.articulation_points.iter().take(limit).copied().collect(),
            orphans,
            cycles: self.cycles.clone(),
            cluster_density: self.density,
            stats: self.clone(),
        }
    }
}

/// Rank a metric map: value descending, ties by ascending identifier.
fn top_items(metric: &std::collections::HashMap<i64, f64>, limit: usize) -> Vec<InsightItem> {
    let mut items: Vec<InsightItem> = metric
        .iter()
        .map(|(&id, &value)| InsightItem { id, value })
        .collect();

    items.sort_unstable_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.id.cmp(&b.id))
    });
    items.truncate(limit);
    items
}
