#![forbid(unsafe_code)]
//! Centrality analysis core for directed work-item dependency graphs.
//!
//! # Overview
//!
//! Given a snapshot of a blocking graph ("item A cannot start until item B
//! is done"), this crate computes which items matter most: betweenness
//! bottlenecks, PageRank influence, HITS hubs and authorities, eigenvector
//! centrality, longest-chain keystones, articulation points, and dependency
//! cycles — then folds them into ranked [`Insights`] for presentation.
//!
//! Single process, single snapshot, in memory. Persistence and transport
//! belong to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crux_analysis::{AnalysisConfig, AnalysisEngine, EdgeList, EnvOverrides};
//!
//! let graph = EdgeList::new(&nodes, &edges);
//! let config = AnalysisConfig::for_size(nodes.len(), edges.len())
//!     .with_overrides(&EnvOverrides::from_env());
//!
//! let engine = AnalysisEngine::new();
//! let stats = engine.analyze(&graph, &config);
//! let insights = stats.insights(10);
//! ```
//!
//! # Conventions
//!
//! - **Logging**: `tracing` macros; hot kernels stay silent, drivers emit
//!   one `debug!` summary per run.
//! - **Errors**: metric computation is infallible by design — degraded
//!   inputs degrade the output (skip reasons, empty maps, timeout flags)
//!   instead of failing the pass.

pub mod config;
pub mod engine;
pub mod graph;
pub mod insights;
pub mod metrics;
pub mod pool;

pub use config::{AnalysisConfig, EnvOverrides, SkippedMetric};
pub use engine::AnalysisEngine;
pub use graph::source::{DependencyGraph, EdgeList, PetgraphSource};
pub use graph::stats::GraphStats;
pub use insights::{InsightItem, Insights};
pub use metrics::betweenness::{BetweennessMode, BetweennessResult};
pub use pool::BufferPool;
