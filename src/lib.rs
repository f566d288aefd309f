//! # sociogram
//!
//! Structural analysis of one attributed, possibly signed, social graph.
//!
//! The caller loads a [`GraphModel`] and asks it questions; every analysis
//! borrows the graph read-only and returns an owned result:
//!
//! | Question | Entry point | Result |
//! |----------|-------------|--------|
//! | How does it split into `k` communities? | [`partition`] | [`Partition`] |
//! | Is the signed graph balanced? | [`verify_balance`] | [`BalanceVerdict`] |
//! | Do linked nodes share an attribute? | [`verify_homophily`] | [`HomophilyVerdict`] |
//! | How similar are adjacent neighborhoods? | [`edge_overlap`] | score per edge |
//! | How clustered is each node's circle? | [`clustering_coefficients`] | score per node |
//! | What does the graph look like from node `r`? | [`build_tree`] | [`TraversalTree`] |
//!
//! Loading graph files, drawing, and command-line handling live outside this
//! crate. Operations log through `tracing` and never print.
//!
//! Optional features: `serde` (serializable results), `parallel` (rayon
//! betweenness passes).

pub mod balance;
pub mod community;
/// Error types used across `sociogram`.
pub mod error;
pub mod graph;
pub mod homophily;
pub mod scale;
pub mod similarity;
pub mod traversal;

#[cfg(test)]
mod property_tests;

pub use error::{Error, Result};
pub use graph::{AttrValue, EdgeData, EdgeKey, GraphModel, Node, NodeId, Sign};

pub use balance::{verify_balance, BalanceVerdict, BalanceWitness};
pub use community::{edge_betweenness, partition, GirvanNewman, Partition, RemovedEdge};
pub use homophily::{
    detect_attribute, verify_homophily, HomophilyVerdict, Strength, DEFAULT_HOMOPHILY_THRESHOLD,
};
pub use similarity::{
    average_clustering, clustering_coefficient, clustering_coefficients, edge_overlap, overlap,
};
pub use traversal::{build_tree, TraversalTree};
