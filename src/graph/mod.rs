//! The attributed, optionally signed, undirected graph every analysis reads.
//!
//! A [`GraphModel`] is a thin owner around a `petgraph` [`UnGraph`](petgraph::graph::UnGraph)
//! plus an identifier index. Nodes carry a string-keyed attribute map of
//! tagged scalar values ([`AttrValue`]); edges carry an optional [`Sign`] and
//! an optional numeric weight ([`EdgeData`]).
//!
//! Invariants held by construction:
//!
//! - node identifiers are unique
//! - edge endpoints always reference existing nodes
//! - no self-loops, no parallel edges
//! - `(u, v)` and `(v, u)` name the same edge ([`EdgeKey`] normalizes them)
//!
//! The caller owns the model and mutates it only through
//! [`GraphModel::add_node`] / [`GraphModel::add_edge`]; analyses borrow it
//! read-only and hand back value results.
//!
//! ```rust
//! use sociogram::graph::{AttrValue, EdgeData, GraphModel, Sign};
//!
//! let mut g = GraphModel::new();
//! g.add_node("alice", [("club", AttrValue::from("north"))]).unwrap();
//! g.add_node("bob", [("club", AttrValue::from("south"))]).unwrap();
//! g.add_edge("alice", "bob", EdgeData::signed(Sign::Negative)).unwrap();
//!
//! assert_eq!(g.degree("alice").unwrap(), 1);
//! assert!(g.add_edge("bob", "alice", EdgeData::default()).is_err());
//! ```

mod model;
mod types;

pub use model::GraphModel;
pub use types::{AttrValue, EdgeData, EdgeKey, Node, NodeId, Sign};
