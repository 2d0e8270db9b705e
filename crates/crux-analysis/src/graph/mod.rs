//! Graph snapshot plumbing.
//!
//! # Overview
//!
//! Everything between "the caller has a dependency graph somewhere" and
//! "metrics can iterate cheap dense arrays":
//!
//! ```text
//! DependencyGraph (caller-owned, sparse i64 identifiers)
//!        ↓  dense::DenseIndex::build()
//! DenseIndex (identifier ⇄ [0, n) mapping)
//!        ↓  dense::CachedAdjacency::build()
//! CachedAdjacency (sorted outgoing + incoming dense lists, built once)
//!        ↓  metrics, engine
//! GraphStats (the assembled snapshot result)
//! ```
//!
//! The adjacency is immutable after construction: every metric of one
//! analysis pass reads the same arrays.

pub mod dense;
pub mod source;
pub mod stats;
