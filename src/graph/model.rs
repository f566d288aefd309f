//! The graph container.

use super::types::{AttrValue, EdgeData, EdgeKey, Node, NodeId};
use crate::error::{Error, Result};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// An undirected graph with attributed nodes and optionally signed / weighted edges.
///
/// Node and edge insertion order is preserved and is the enumeration order of
/// [`nodes`](Self::nodes), [`edges`](Self::edges) and [`neighbors`](Self::neighbors).
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    graph: UnGraph<Node, EdgeData>,
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphModel {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            index: HashMap::new(),
        }
    }

    /// Add a node with its attributes.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if a node with the same identifier exists.
    pub fn add_node<I, K, V>(&mut self, id: impl Into<NodeId>, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::invalid(format!("duplicate node '{id}'")));
        }
        let attributes: BTreeMap<String, AttrValue> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let idx = self.graph.add_node(Node {
            id: id.clone(),
            attributes,
        });
        self.index.insert(id, idx);
        Ok(())
    }

    /// Add a node without attributes.
    pub fn add_plain_node(&mut self, id: impl Into<NodeId>) -> Result<()> {
        self.add_node(id, std::iter::empty::<(String, AttrValue)>())
    }

    /// Add an undirected edge.
    ///
    /// # Errors
    ///
    /// - `NotFound` if either endpoint is missing
    /// - `InvalidRequest` for a self-loop or an edge that already exists (in either direction)
    pub fn add_edge(&mut self, u: &str, v: &str, data: EdgeData) -> Result<()> {
        let a = self.require(u)?;
        let b = self.require(v)?;
        if a == b {
            return Err(Error::invalid(format!("self-loop on '{u}'")));
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(Error::invalid(format!("duplicate edge {}", EdgeKey::new(u, v))));
        }
        self.graph.add_edge(a, b, data);
        Ok(())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether `id` is a node.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Node identifiers in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes().map(|n| &n.id)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeData)> + '_ {
        self.graph.edge_references().map(move |e| {
            let key = EdgeKey::new(self.id_of(e.source()).clone(), self.id_of(e.target()).clone());
            (key, e.weight())
        })
    }

    /// Data of the edge between `u` and `v`, in either direction.
    pub fn edge(&self, u: &str, v: &str) -> Option<&EdgeData> {
        let a = *self.index.get(u)?;
        let b = *self.index.get(v)?;
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Whether an edge joins `u` and `v`.
    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.edge(u, v).is_some()
    }

    /// Neighbors of `id` in edge insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not a node.
    pub fn neighbors(&self, id: &str) -> Result<Vec<&NodeId>> {
        let idx = self.require(id)?;
        Ok(self
            .ordered_neighbors(idx)
            .into_iter()
            .map(|(n, _)| &self.graph[n].id)
            .collect())
    }

    /// Degree of `id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if `id` is not a node.
    pub fn degree(&self, id: &str) -> Result<usize> {
        let idx = self.require(id)?;
        Ok(self.graph.edges(idx).count())
    }

    /// Attribute `name` of node `id`, if both exist.
    pub fn attribute(&self, id: &str, name: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.attribute(name))
    }

    /// Connected components, each listed in node insertion order; components
    /// are ordered by their first node.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let n = self.graph.node_count();
        let mut seen = vec![false; n];
        let mut components = Vec::new();

        for start in self.graph.node_indices() {
            if seen[start.index()] {
                continue;
            }
            seen[start.index()] = true;
            let mut members = vec![start.index()];
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                for neighbor in self.graph.neighbors(node) {
                    if !seen[neighbor.index()] {
                        seen[neighbor.index()] = true;
                        members.push(neighbor.index());
                        queue.push_back(neighbor);
                    }
                }
            }
            members.sort_unstable();
            components.push(
                members
                    .into_iter()
                    .map(|i| self.graph[NodeIndex::new(i)].id.clone())
                    .collect(),
            );
        }

        components
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Number of independent cycles (`E - V + C`).
    pub fn cycle_rank(&self) -> usize {
        (self.edge_count() + self.component_count()).saturating_sub(self.node_count())
    }

    /// A copy of this graph without the given edges. Keys that name no edge
    /// are ignored.
    pub fn without_edges<'a, I>(&self, removed: I) -> GraphModel
    where
        I: IntoIterator<Item = &'a EdgeKey>,
    {
        let removed: HashSet<&EdgeKey> = removed.into_iter().collect();
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        for idx in self.graph.node_indices() {
            graph.add_node(self.graph[idx].clone());
        }
        for e in self.graph.edge_references() {
            let key = EdgeKey::new(self.id_of(e.source()).clone(), self.id_of(e.target()).clone());
            if !removed.contains(&key) {
                graph.add_edge(e.source(), e.target(), *e.weight());
            }
        }
        GraphModel {
            graph,
            index: self.index.clone(),
        }
    }

    // Crate-internal access for the analyses.

    pub(crate) fn inner(&self) -> &UnGraph<Node, EdgeData> {
        &self.graph
    }

    pub(crate) fn require(&self, id: &str) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::node_not_found(id))
    }

    pub(crate) fn id_of(&self, idx: NodeIndex) -> &NodeId {
        &self.graph[idx].id
    }

    /// Neighbors of `idx` with the joining edge, in edge insertion order.
    pub(crate) fn ordered_neighbors(&self, idx: NodeIndex) -> Vec<(NodeIndex, EdgeIndex)> {
        let mut out: Vec<(NodeIndex, EdgeIndex)> = self
            .graph
            .edges(idx)
            .map(|e| {
                let other = if e.source() == idx { e.target() } else { e.source() };
                (other, e.id())
            })
            .collect();
        out.sort_unstable_by_key(|&(_, e)| e);
        out
    }

    /// Normalized key of edge `e`.
    pub(crate) fn key_of(&self, e: EdgeIndex) -> Option<EdgeKey> {
        self.graph
            .edge_endpoints(e)
            .map(|(a, b)| EdgeKey::new(self.id_of(a).clone(), self.id_of(b).clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Sign;

    fn path(ids: &[&str]) -> GraphModel {
        let mut g = GraphModel::new();
        for id in ids {
            g.add_plain_node(*id).unwrap();
        }
        for w in ids.windows(2) {
            g.add_edge(w[0], w[1], EdgeData::default()).unwrap();
        }
        g
    }

    #[test]
    fn test_graph_model_rejects_duplicates_and_self_loops() {
        let mut g = path(&["a", "b"]);
        assert!(matches!(g.add_plain_node("a"), Err(Error::InvalidRequest(_))));
        assert!(matches!(
            g.add_edge("b", "a", EdgeData::default()),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            g.add_edge("a", "a", EdgeData::default()),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            g.add_edge("a", "zz", EdgeData::default()),
            Err(Error::NotFound(_))
        ));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_graph_model_edge_lookup_is_symmetric() {
        let mut g = path(&["a", "b"]);
        g.add_plain_node("c").unwrap();
        g.add_edge("c", "b", EdgeData::signed(Sign::Negative)).unwrap();

        assert!(g.has_edge("b", "c"));
        assert_eq!(g.edge("b", "c").unwrap().sign, Some(Sign::Negative));
        assert!(!g.has_edge("a", "c"));

        let keys: Vec<EdgeKey> = g.edges().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![EdgeKey::new("a", "b"), EdgeKey::new("b", "c")]);
    }

    #[test]
    fn test_graph_model_neighbors_follow_insertion_order() {
        let mut g = GraphModel::new();
        for id in ["hub", "z", "y", "x"] {
            g.add_plain_node(id).unwrap();
        }
        g.add_edge("hub", "z", EdgeData::default()).unwrap();
        g.add_edge("y", "hub", EdgeData::default()).unwrap();
        g.add_edge("hub", "x", EdgeData::default()).unwrap();

        let n: Vec<&str> = g.neighbors("hub").unwrap().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(n, vec!["z", "y", "x"]);
        assert_eq!(g.degree("hub").unwrap(), 3);
        assert!(g.neighbors("nobody").is_err());
    }

    #[test]
    fn test_graph_model_components_and_cycle_rank() {
        let mut g = path(&["a", "b", "c"]);
        g.add_edge("a", "c", EdgeData::default()).unwrap();
        g.add_plain_node("lonely").unwrap();

        let comps = g.connected_components();
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].len(), 3);
        assert_eq!(comps[1], vec![NodeId::from("lonely")]);
        assert_eq!(g.component_count(), 2);
        assert_eq!(g.cycle_rank(), 1);
    }

    #[test]
    fn test_graph_model_without_edges_leaves_original_intact() {
        let g = path(&["a", "b", "c"]);
        let cut = g.without_edges(&[EdgeKey::new("c", "b")]);
        assert_eq!(cut.edge_count(), 1);
        assert_eq!(cut.component_count(), 2);
        assert_eq!(g.edge_count(), 2);
        assert!(cut.contains("c"));
    }
}
