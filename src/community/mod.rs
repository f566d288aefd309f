//! Community partitioning by edge removal.
//!
//! Given a graph and a target count `k`, split it into `k` connected
//! components by cutting the edges that hold communities together.
//!
//! ## Edge Betweenness
//!
//! The betweenness of an edge is the number of shortest paths between node
//! pairs that run through it (a pair with several shortest paths contributes
//! fractionally):
//!
//! ```text
//! B(e) = Σ_{s<t} σ_st(e) / σ_st
//! ```
//!
//! **Intuition**: communities are densely connected inside and sparsely
//! connected to each other, so the few edges between communities funnel most
//! of the inter-community paths and score highest.
//!
//! ## Algorithm
//!
//! [`GirvanNewman`] deletes the top-scoring edge, recounts components, and
//! repeats. It never reconnects edges, so the component count only grows.
//! Ties are broken toward the lexicographically smallest `(u, v)` pair,
//! which makes every run on the same graph remove the same edges.
//!
//! Unlike modularity optimizers (Louvain, Leiden), the caller chooses the
//! number of communities directly.
//!
//! ## Usage
//!
//! ```rust
//! use sociogram::community::partition;
//! use sociogram::graph::{EdgeData, GraphModel};
//!
//! let mut g = GraphModel::new();
//! for id in ["a", "b", "c", "x", "y", "z"] {
//!     g.add_plain_node(id).unwrap();
//! }
//! for (u, v) in [("a", "b"), ("b", "c"), ("a", "c"), ("x", "y"), ("y", "z"), ("x", "z"), ("c", "x")] {
//!     g.add_edge(u, v, EdgeData::default()).unwrap();
//! }
//!
//! let p = partition(&g, 2).unwrap();
//! assert_eq!(p.removed_edges().len(), 1);
//! assert_ne!(p.label("a"), p.label("z"));
//! ```
//!
//! ## References
//!
//! - Girvan & Newman (2002). "Community structure in social and biological networks."
//! - Brandes (2001). "A faster algorithm for betweenness centrality."

mod betweenness;
mod girvan_newman;

pub use betweenness::edge_betweenness;
pub use girvan_newman::{partition, GirvanNewman, Partition, RemovedEdge};
