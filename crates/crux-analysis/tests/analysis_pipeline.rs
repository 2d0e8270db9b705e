//! End-to-end pipeline tests: adaptive configuration → engine → insights.

use std::time::Duration;

use crux_analysis::metrics::betweenness::BetweennessMode;
use crux_analysis::{AnalysisConfig, AnalysisEngine, EdgeList, EnvOverrides};

fn chain(n: i64) -> EdgeList {
    let nodes: Vec<i64> = (0..n).collect();
    let edges: Vec<(i64, i64)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    EdgeList::new(&nodes, &edges)
}

// ---------------------------------------------------------------------------
// Adaptive configuration boundaries
// ---------------------------------------------------------------------------

#[test]
fn config_small_graph_is_generous() {
    let cfg = AnalysisConfig::for_size(50, 100);
    assert!(cfg.compute_betweenness);
    assert_eq!(cfg.betweenness_mode, BetweennessMode::Exact);
    assert!(cfg.betweenness_timeout >= Duration::from_secs(1));
    assert!(cfg.skipped_metrics().is_empty());
}

#[test]
fn config_dense_large_graph_drops_betweenness_keeps_pagerank() {
    let cfg = AnalysisConfig::for_size(1000, 15_000);
    assert!(!cfg.compute_betweenness);
    assert!(cfg
        .betweenness_skip_reason
        .as_deref()
        .is_some_and(|r| !r.is_empty()));
    assert!(cfg.compute_pagerank);
}

#[test]
fn config_xl_graph_samples_betweenness_and_drops_cycles() {
    let cfg = AnalysisConfig::for_size(3000, 10_000);
    assert_eq!(cfg.betweenness_mode, BetweennessMode::Approximate);
    assert!(cfg.betweenness_sample_size > 0);
    assert!(!cfg.compute_cycles);
    assert!(cfg.cycles_skip_reason.is_some());
}

#[test]
fn config_xl_density_gates_hits() {
    assert!(!AnalysisConfig::for_size(3000, 30_000).compute_hits);
    assert!(AnalysisConfig::for_size(5000, 3000).compute_hits);
}

// ---------------------------------------------------------------------------
// Environment overrides (parsed values, no process env mutation)
// ---------------------------------------------------------------------------

#[test]
fn skip_override_empties_the_whole_pass() {
    let overrides = EnvOverrides::parse(Some("1"), None);
    let cfg = AnalysisConfig::for_size(10, 10).with_overrides(&overrides);

    let engine = AnalysisEngine::new();
    let stats = engine.analyze(&chain(10), &cfg);

    assert!(stats.betweenness.is_empty());
    assert!(stats.pagerank.is_empty());
    assert!(stats.hubs.is_empty());
    assert!(stats.critical_path.is_empty());
    assert_eq!(stats.skipped.len(), 6);
    // Structural stats still come back.
    assert_eq!(stats.node_count, 10);
    assert!(!stats.articulation_points.is_empty());
}

#[test]
fn timeout_override_reaches_the_config() {
    let overrides = EnvOverrides::parse(None, Some("3"));
    let cfg = AnalysisConfig::for_size(10, 10).with_overrides(&overrides);
    assert_eq!(cfg.betweenness_timeout, Duration::from_secs(3));
    assert_eq!(cfg.cycles_timeout, Duration::from_secs(3));
}

#[test]
fn garbage_overrides_are_inert() {
    let overrides = EnvOverrides::parse(Some("maybe"), Some("forever"));
    assert!(!overrides.skip_phase_two);
    assert_eq!(overrides.phase_two_timeout, None);
}

// ---------------------------------------------------------------------------
// Engine → insights
// ---------------------------------------------------------------------------

#[test]
fn full_pipeline_on_a_small_project() {
    // 0 blocks everything; 1 → 2 → 3 is the long chain; 4 is a leaf.
    let g = EdgeList::new(
        &[0, 1, 2, 3, 4],
        &[(0, 1), (0, 4), (1, 2), (2, 3)],
    );
    let cfg = AnalysisConfig::for_size(5, 4);
    let engine = AnalysisEngine::new();

    let stats = engine.analyze(&g, &cfg);
    let insights = stats.insights(3);

    // Nodes 1 and 2 bridge the chain; node 1 carries more pairs.
    assert_eq!(insights.bottlenecks[0].id, 1);
    // Keystones follow the longest chain 0→1→2→3.
    assert!((insights.keystones[0].value - 4.0).abs() < 1e-12);
    assert!(insights.keystones.iter().any(|i| i.id == 0));
    // 3 and 4 block nothing.
    assert_eq!(insights.orphans, vec![3, 4]);
    assert!(insights.cycles.is_empty());
    assert_eq!(insights.stats.node_count, 5);
    assert!(insights.bottlenecks.len() <= 3);
}

#[test]
fn insight_ties_rank_by_ascending_identifier() {
    // Symmetric diamond: both arms score identically on every metric.
    let g = EdgeList::new(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let engine = AnalysisEngine::new();
    let stats = engine.analyze(&g, &AnalysisConfig::default());
    let insights = stats.insights(10);

    let arm_positions: Vec<i64> = insights
        .bottlenecks
        .iter()
        .map(|i| i.id)
        .filter(|id| [2, 3].contains(id))
        .collect();
    assert_eq!(arm_positions, vec![2, 3], "tied arms order by identifier");
}

#[test]
fn repeated_pipeline_runs_are_identical() {
    let g = chain(30);
    let cfg = AnalysisConfig::for_size(30, 29);
    let engine = AnalysisEngine::new();

    let a = engine.analyze(&g, &cfg);
    let b = engine.analyze(&g, &cfg);

    assert_eq!(a.betweenness, b.betweenness);
    assert_eq!(a.articulation_points, b.articulation_points);
    assert_eq!(
        a.insights(5).bottlenecks,
        b.insights(5).bottlenecks
    );
}

#[test]
fn stats_serialize_to_json() {
    let engine = AnalysisEngine::new();
    let stats = engine.analyze(&chain(4), &AnalysisConfig::default());
    let json = serde_json::to_value(&stats).expect("stats are serializable");

    assert_eq!(json["node_count"], 4);
    assert_eq!(json["betweenness_mode"], "exact");
    assert!(json["betweenness"].is_object());
}
