//! Size- and density-adaptive analysis configuration.
//!
//! # Overview
//!
//! Not every metric is worth its cost at every scale. [`AnalysisConfig`]
//! is a deterministic decision table over node count and edge count:
//!
//! | Scale | Betweenness | Cycles | HITS |
//! |---|---|---|---|
//! | < 100 nodes | exact, generous timeouts | on | on |
//! | 100–2000 | exact, unless density > 0.01 (skip) | on | on |
//! | > 2000 ("XL") | approximate, fixed sample | skip | skip if density > 0.001 |
//!
//! Density here is `edge_count / node_count²`. Exact betweenness cost
//! scales with edges, so a dense large graph pays disproportionately;
//! exhaustive cycle enumeration is unbounded in the worst case; HITS
//! iteration cost is edge-dominated.
//!
//! Every disabled metric records a human-readable skip reason, surfaced
//! through [`AnalysisConfig::skipped_metrics`] so the operator can see what
//! was deliberately not computed and why.
//!
//! # Environment overrides
//!
//! The core never reads the environment itself: [`EnvOverrides`] is the
//! thin boundary that parses the two supported variables and is applied
//! explicitly via [`AnalysisConfig::with_overrides`]. Invalid values are
//! ignored (with a warning), never an error.

#![allow(clippy::module_name_repetitions)]

use std::env;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::metrics::betweenness::BetweennessMode;

/// Disable every non-essential ("phase two") metric when set truthy.
pub const ENV_SKIP_PHASE2: &str = "CRUX_SKIP_PHASE2";

/// Override every phase-two timeout with one value, in whole seconds.
pub const ENV_PHASE2_TIMEOUT_SECS: &str = "CRUX_PHASE2_TIMEOUT_SECS";

/// Fixed pivot count for approximate betweenness on XL graphs.
///
/// Independent of further graph growth so the worst case stays bounded;
/// ~7% ranking error per the O(1/√k) estimate.
pub const XL_BETWEENNESS_SAMPLE: usize = 200;

const DENSE_LARGE_THRESHOLD: f64 = 0.01;
const DENSE_XL_THRESHOLD: f64 = 0.001;

const STANDARD_TIMEOUT: Duration = Duration::from_millis(500);
const GENEROUS_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// AnalysisConfig
// ---------------------------------------------------------------------------

/// A metric that was deliberately not computed, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMetric {
    pub name: &'static str,
    pub reason: String,
}

/// Per-snapshot analysis plan: which metrics run, at what fidelity, and
/// under which timeouts. Immutable once derived.
#[derive(Debug, Clone, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnalysisConfig {
    pub compute_betweenness: bool,
    pub betweenness_mode: BetweennessMode,
    /// Pivot count for approximate mode; ignored for exact.
    pub betweenness_sample_size: usize,
    pub betweenness_timeout: Duration,
    pub betweenness_skip_reason: Option<String>,

    pub compute_pagerank: bool,
    pub pagerank_timeout: Duration,
    pub pagerank_skip_reason: Option<String>,

    pub compute_hits: bool,
    pub hits_timeout: Duration,
    pub hits_skip_reason: Option<String>,

    pub compute_eigenvector: bool,
    pub eigenvector_skip_reason: Option<String>,

    pub compute_critical_path: bool,
    pub critical_path_skip_reason: Option<String>,

    pub compute_cycles: bool,
    pub cycles_timeout: Duration,
    pub cycles_skip_reason: Option<String>,
    /// Cap on the number of reported cycles.
    pub max_cycles_to_store: usize,
}

impl Default for AnalysisConfig {
    /// Everything enabled, exact betweenness, standard timeouts.
    fn default() -> Self {
        Self {
            compute_betweenness: true,
            betweenness_mode: BetweennessMode::Exact,
            betweenness_sample_size: 0,
            betweenness_timeout: STANDARD_TIMEOUT,
            betweenness_skip_reason: None,
            compute_pagerank: true,
            pagerank_timeout: STANDARD_TIMEOUT,
            pagerank_skip_reason: None,
            compute_hits: true,
            hits_timeout: STANDARD_TIMEOUT,
            hits_skip_reason: None,
            compute_eigenvector: true,
            eigenvector_skip_reason: None,
            compute_critical_path: true,
            critical_path_skip_reason: None,
            compute_cycles: true,
            cycles_timeout: STANDARD_TIMEOUT,
            cycles_skip_reason: None,
            max_cycles_to_store: 100,
        }
    }
}

impl AnalysisConfig {
    /// Everything enabled with generous timeouts and a high cycle cap, for
    /// offline or operator-requested full analysis.
    #[must_use]
    pub fn full() -> Self {
        Self {
            betweenness_timeout: Duration::from_secs(30),
            pagerank_timeout: Duration::from_secs(30),
            hits_timeout: Duration::from_secs(30),
            cycles_timeout: Duration::from_secs(30),
            max_cycles_to_store: 10_000,
            ..Self::default()
        }
    }

    /// Derive the plan for a snapshot of `node_count` nodes and
    /// `edge_count` edges. Pure: same inputs, same plan.
    #[must_use]
    pub fn for_size(node_count: usize, edge_count: usize) -> Self {
        let density = density(node_count, edge_count);
        let mut cfg = Self::default();

        if node_count < 100 {
            // Small graph: everything exact, generous budgets.
            cfg.betweenness_timeout = GENEROUS_TIMEOUT;
            cfg.pagerank_timeout = GENEROUS_TIMEOUT;
            cfg.hits_timeout = GENEROUS_TIMEOUT;
            cfg.cycles_timeout = GENEROUS_TIMEOUT;
            return cfg;
        }

        if node_count <= 2000 {
            // Medium/large: standard timeouts; exact betweenness becomes
            // disproportionate once the graph is dense.
            if density > DENSE_LARGE_THRESHOLD {
                cfg.disable_betweenness(format!(
                    "graph too dense for exact betweenness \
                     ({node_count} nodes, {edge_count} edges, density {density:.4})"
                ));
            }
            return cfg;
        }

        // XL: betweenness degrades to sampling, cycles are off entirely,
        // HITS survives only while the edge count stays modest.
        cfg.betweenness_mode = BetweennessMode::Approximate;
        cfg.betweenness_sample_size = XL_BETWEENNESS_SAMPLE;

        cfg.compute_cycles = false;
        cfg.cycles_skip_reason = Some(format!(
            "cycle enumeration unbounded on large graphs ({node_count} nodes)"
        ));

        if density > DENSE_XL_THRESHOLD {
            cfg.compute_hits = false;
            cfg.hits_skip_reason = Some(format!(
                "HITS iteration cost is edge-dominated \
                 ({edge_count} edges, density {density:.5})"
            ));
        }

        cfg
    }

    /// Apply resolved environment overrides. Consumes and returns the
    /// config so call sites read as one expression.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if overrides.skip_phase_two {
            let reason = || format!("phase-two metrics disabled via {ENV_SKIP_PHASE2}");
            self.disable_betweenness(reason());
            self.compute_pagerank = false;
            self.pagerank_skip_reason = Some(reason());
            self.compute_hits = false;
            self.hits_skip_reason = Some(reason());
            self.compute_eigenvector = false;
            self.eigenvector_skip_reason = Some(reason());
            self.compute_critical_path = false;
            self.critical_path_skip_reason = Some(reason());
            self.compute_cycles = false;
            self.cycles_skip_reason = Some(reason());
        }

        if let Some(timeout) = overrides.phase_two_timeout {
            self.betweenness_timeout = timeout;
            self.pagerank_timeout = timeout;
            self.hits_timeout = timeout;
            self.cycles_timeout = timeout;
        }

        self
    }

    /// Ordered list of every disabled metric with its reason.
    #[must_use]
    pub fn skipped_metrics(&self) -> Vec<SkippedMetric> {
        let mut skipped = Vec::new();
        let mut record = |enabled: bool, name: &'static str, reason: &Option<String>| {
            if !enabled {
                skipped.push(SkippedMetric {
                    name,
                    reason: reason.clone().unwrap_or_default(),
                });
            }
        };

        record(
            self.compute_betweenness,
            "Betweenness",
            &self.betweenness_skip_reason,
        );
        record(self.compute_pagerank, "PageRank", &self.pagerank_skip_reason);
        record(self.compute_hits, "HITS", &self.hits_skip_reason);
        record(
            self.compute_eigenvector,
            "Eigenvector",
            &self.eigenvector_skip_reason,
        );
        record(
            self.compute_critical_path,
            "CriticalPath",
            &self.critical_path_skip_reason,
        );
        record(self.compute_cycles, "Cycles", &self.cycles_skip_reason);

        skipped
    }

    fn disable_betweenness(&mut self, reason: String) {
        self.compute_betweenness = false;
        self.betweenness_mode = BetweennessMode::Skipped;
        self.betweenness_skip_reason = Some(reason);
    }
}

#[allow(clippy::cast_precision_loss)]
fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0;
    }
    edge_count as f64 / (node_count as f64 * node_count as f64)
}

// ---------------------------------------------------------------------------
// EnvOverrides
// ---------------------------------------------------------------------------

/// Resolved process-wide overrides.
///
/// Parsing lives here, at the boundary; the core only ever sees the
/// resolved values. Construct with [`EnvOverrides::from_env`] or fill the
/// fields directly in tests and embedders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Disable every phase-two metric in one step.
    pub skip_phase_two: bool,
    /// Replace every phase-two timeout with this value.
    pub phase_two_timeout: Option<Duration>,
}

impl EnvOverrides {
    /// Read and parse the two supported environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse(
            env::var(ENV_SKIP_PHASE2).ok().as_deref(),
            env::var(ENV_PHASE2_TIMEOUT_SECS).ok().as_deref(),
        )
    }

    /// Parse raw variable values. Non-positive or unparsable timeout
    /// overrides are ignored and the defaults retained; this never fails.
    #[must_use]
    pub fn parse(skip: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let skip_phase_two = skip.is_some_and(|v| matches!(v, "1" | "true" | "yes"));

        let phase_two_timeout = timeout_secs.and_then(|raw| match raw.parse::<i64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs.unsigned_abs())),
            _ => {
                warn!(
                    value = raw,
                    var = ENV_PHASE2_TIMEOUT_SECS,
                    "ignoring invalid timeout override"
                );
                None
            }
        });

        Self {
            skip_phase_two,
            phase_two_timeout,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
