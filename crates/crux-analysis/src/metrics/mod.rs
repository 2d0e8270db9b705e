//! Centrality and structure metrics over the cached adjacency.
//!
//! # Overview
//!
//! Each metric answers a different question about item importance:
//!
//! - **Betweenness centrality** (`betweenness`): Which items act as bridges
//!   or bottlenecks? Exact or pivot-sampled, parallel.
//! - **PageRank** (`pagerank`): Which items do significant chains of work
//!   funnel into?
//! - **HITS** (`hits`): Which items aggregate many dependencies (hubs) vs
//!   serve as prerequisites for many (authorities)?
//! - **Eigenvector centrality** (`eigenvector`): Which items are connected
//!   to other high-centrality items?
//! - **Critical path** (`critical_path`): Which items sit on the longest
//!   dependency chains?
//! - **Articulation points** (`articulation`): Which single items would
//!   disconnect the graph if removed?
//! - **Cycles** (`cycles`): Which items transitively block each other?
//!
//! # Usage
//!
//! All metrics read a [`crate::graph::dense::CachedAdjacency`] and return
//! scores per dense index; the engine re-keys them to node identifiers.
//! Betweenness additionally takes the buffer pool and re-keys internally,
//! since it is also exposed as a standalone entry point.

pub mod articulation;
pub mod betweenness;
pub mod critical_path;
pub mod cycles;
pub mod eigenvector;
pub mod hits;
pub mod pagerank;
