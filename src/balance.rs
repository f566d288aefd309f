//! Structural balance of signed graphs (Heider; Cartwright & Harary 1956).
//!
//! A signed graph is balanced iff its nodes split into two factions with
//! every positive edge inside a faction and every negative edge between
//! factions. Equivalently, every cycle has a positive sign product.
//!
//! The check is a bipartiteness test with a parity per edge: a breadth-first
//! sweep gives the root faction 0 and each newly reached neighbor
//!
//! ```text
//! faction(w) = faction(v) XOR (sign(v, w) == -)
//! ```
//!
//! A non-tree edge whose endpoints disagree with that rule closes a cycle
//! with a negative product: the two tree paths up to the endpoints' common
//! ancestor plus the edge itself. That cycle is returned as the witness.
//!
//! Edges without a sign count as positive. O(V + E).

use crate::graph::{EdgeKey, GraphModel, NodeId, Sign};
use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of [`verify_balance`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BalanceVerdict {
    /// Balanced, with the two factions proving it (either may be empty).
    Balanced {
        /// Faction 0 and faction 1, each in node insertion order.
        factions: [Vec<NodeId>; 2],
    },
    /// Not balanced; the witness is a cycle with negative sign product.
    Unbalanced {
        /// The offending cycle.
        witness: BalanceWitness,
    },
}

impl BalanceVerdict {
    /// Whether the graph is balanced.
    pub fn is_balanced(&self) -> bool {
        matches!(self, BalanceVerdict::Balanced { .. })
    }

    /// The negative cycle, if unbalanced.
    pub fn witness(&self) -> Option<&BalanceWitness> {
        match self {
            BalanceVerdict::Unbalanced { witness } => Some(witness),
            BalanceVerdict::Balanced { .. } => None,
        }
    }

    /// The two factions, if balanced.
    pub fn factions(&self) -> Option<&[Vec<NodeId>; 2]> {
        match self {
            BalanceVerdict::Balanced { factions } => Some(factions),
            BalanceVerdict::Unbalanced { .. } => None,
        }
    }
}

/// A cycle whose sign product is negative.
///
/// `nodes[i]` and `nodes[(i + 1) % len]` are the endpoints of `edges[i]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BalanceWitness {
    nodes: Vec<NodeId>,
    edges: Vec<(EdgeKey, Sign)>,
}

impl BalanceWitness {
    /// Cycle nodes in walk order (the first node is not repeated).
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Cycle edges in walk order, with their signs.
    pub fn edges(&self) -> &[(EdgeKey, Sign)] {
        &self.edges
    }

    /// Number of edges on the cycle.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the cycle is empty (never true for a returned witness).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Product of the edge signs.
    pub fn sign_product(&self) -> Sign {
        self.edges
            .iter()
            .fold(Sign::Positive, |acc, &(_, s)| acc.times(s))
    }
}

/// Decide whether `graph` is structurally balanced.
///
/// Every component is checked; the first contradiction found stops the
/// sweep.
pub fn verify_balance(graph: &GraphModel) -> BalanceVerdict {
    let inner = graph.inner();
    let n = inner.node_count();
    let mut faction: Vec<Option<bool>> = vec![None; n];
    let mut parent: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; n];
    let mut depth = vec![0usize; n];

    for start in inner.node_indices() {
        if faction[start.index()].is_some() {
            continue;
        }
        faction[start.index()] = Some(false);
        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            let fv = faction[v.index()].unwrap_or(false);
            for (w, e) in graph.ordered_neighbors(v) {
                let expected = fv ^ inner[e].effective_sign().is_negative();
                match faction[w.index()] {
                    None => {
                        faction[w.index()] = Some(expected);
                        parent[w.index()] = Some((v, e));
                        depth[w.index()] = depth[v.index()] + 1;
                        queue.push_back(w);
                    }
                    Some(actual) if actual != expected => {
                        let witness = close_cycle(graph, &parent, &depth, v, w, e);
                        tracing::debug!(
                            edge = %EdgeKey::new(graph.id_of(v).clone(), graph.id_of(w).clone()),
                            cycle_len = witness.len(),
                            "balance violated"
                        );
                        return BalanceVerdict::Unbalanced { witness };
                    }
                    Some(_) => {}
                }
            }
        }
    }

    let mut factions = [Vec::new(), Vec::new()];
    for idx in inner.node_indices() {
        let side = usize::from(faction[idx.index()].unwrap_or(false));
        factions[side].push(graph.id_of(idx).clone());
    }
    BalanceVerdict::Balanced { factions }
}

/// Cycle `v -> ... -> lca -> ... -> w -> v` from BFS tree paths plus the
/// closing edge `e = (v, w)`.
fn close_cycle(
    graph: &GraphModel,
    parent: &[Option<(NodeIndex, EdgeIndex)>],
    depth: &[usize],
    v: NodeIndex,
    w: NodeIndex,
    e: EdgeIndex,
) -> BalanceWitness {
    let mut up_nodes = vec![v];
    let mut up_edges = Vec::new();
    let mut down_nodes = vec![w];
    let mut down_edges = Vec::new();
    let (mut a, mut b) = (v, w);

    while a != b {
        // Climb the deeper side first; at equal depth climb both.
        let climb_a = depth[a.index()] >= depth[b.index()];
        let climb_b = depth[b.index()] >= depth[a.index()];
        if climb_a {
            let Some((p, pe)) = parent[a.index()] else { break };
            up_edges.push(pe);
            a = p;
            up_nodes.push(a);
        }
        if climb_b && a != b {
            let Some((p, pe)) = parent[b.index()] else { break };
            down_edges.push(pe);
            b = p;
            down_nodes.push(b);
        }
    }

    // `up_nodes` ends at the common ancestor; `down_nodes` repeats it.
    down_nodes.pop();
    let nodes = up_nodes
        .into_iter()
        .chain(down_nodes.into_iter().rev())
        .map(|idx| graph.id_of(idx).clone())
        .collect();

    let signed = |edge: EdgeIndex| {
        let key = graph
            .key_of(edge)
            .unwrap_or_else(|| EdgeKey::new(graph.id_of(v).clone(), graph.id_of(w).clone()));
        (key, graph.inner()[edge].effective_sign())
    };
    let edges = up_edges
        .into_iter()
        .chain(down_edges.into_iter().rev())
        .chain(std::iter::once(e))
        .map(signed)
        .collect();

    BalanceWitness { nodes, edges }
}
