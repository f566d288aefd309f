//! Local similarity scores: neighborhood overlap of edges and clustering of
//! nodes.
//!
//! | Score | Of | Range | Meaning |
//! |-------|----|-------|---------|
//! | [`edge_overlap`] | edge (u, v) | [0, 1] | Jaccard similarity of the endpoints' other neighbors |
//! | [`clustering_coefficients`] | node v | [0, 1] | fraction of v's neighbor pairs that are linked |
//!
//! Overlap for edge `(u, v)`, with each endpoint removed from the other's
//! neighborhood:
//!
//! ```text
//! O(u, v) = |N(u)\{v} ∩ N(v)\{u}| / |N(u)\{v} ∪ N(v)\{u}|      (0 if the union is empty)
//! ```
//!
//! Local clustering for node `v` of degree `d`:
//!
//! ```text
//! C(v) = 2 · links among N(v) / (d · (d − 1))      (0 if d < 2)
//! ```
//!
//! A low-overlap edge is a "local bridge" between otherwise separate circles;
//! a high-clustering node sits inside a tight one.

use crate::error::{Error, Result};
use crate::graph::{EdgeData, EdgeKey, GraphModel, Node, NodeId};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeMap, HashSet};

/// Neighborhood overlap of every edge.
pub fn edge_overlap(graph: &GraphModel) -> BTreeMap<EdgeKey, f64> {
    let inner = graph.inner();
    let sets: Vec<HashSet<usize>> = inner
        .node_indices()
        .map(|v| neighbor_set(inner, v))
        .collect();
    inner
        .edge_indices()
        .filter_map(|e| {
            let (a, b) = inner.edge_endpoints(e)?;
            let score = jaccard_excluding(&sets[a.index()], &sets[b.index()], a, b);
            Some((graph.key_of(e)?, score))
        })
        .collect()
}

/// Neighborhood overlap of the edge `(u, v)`.
///
/// # Errors
///
/// `NotFound` if either node or the edge between them is missing.
pub fn overlap(graph: &GraphModel, u: &str, v: &str) -> Result<f64> {
    let a = graph.require(u)?;
    let b = graph.require(v)?;
    if !graph.has_edge(u, v) {
        return Err(Error::NotFound(format!("edge {}", EdgeKey::new(u, v))));
    }
    let inner = graph.inner();
    Ok(jaccard_excluding(&neighbor_set(inner, a), &neighbor_set(inner, b), a, b))
}

/// Local clustering coefficient of every node.
pub fn clustering_coefficients(graph: &GraphModel) -> BTreeMap<NodeId, f64> {
    let inner = graph.inner();
    inner
        .node_indices()
        .map(|v| (graph.id_of(v).clone(), local_clustering(inner, v)))
        .collect()
}

/// Local clustering coefficient of one node.
///
/// # Errors
///
/// `NotFound` if `id` is not a node.
pub fn clustering_coefficient(graph: &GraphModel, id: &str) -> Result<f64> {
    let v = graph.require(id)?;
    Ok(local_clustering(graph.inner(), v))
}

/// Mean local clustering coefficient (0 for an empty graph).
pub fn average_clustering(graph: &GraphModel) -> f64 {
    let scores = clustering_coefficients(graph);
    if scores.is_empty() {
        return 0.0;
    }
    scores.values().sum::<f64>() / scores.len() as f64
}

fn neighbor_set(inner: &UnGraph<Node, EdgeData>, v: NodeIndex) -> HashSet<usize> {
    inner.neighbors(v).map(|w| w.index()).collect()
}

fn jaccard_excluding(
    na: &HashSet<usize>,
    nb: &HashSet<usize>,
    a: NodeIndex,
    b: NodeIndex,
) -> f64 {
    let (a, b) = (a.index(), b.index());
    let shared = na.iter().filter(|&&x| x != b && nb.contains(&x)).count();
    let only_a = na.iter().filter(|&&x| x != b).count();
    let only_b = nb.iter().filter(|&&x| x != a).count();
    let union = only_a + only_b - shared;
    if union == 0 {
        0.0
    } else {
        shared as f64 / union as f64
    }
}

/// Touches only `v`, its neighbors and their adjacency lists.
fn local_clustering(inner: &UnGraph<Node, EdgeData>, v: NodeIndex) -> f64 {
    let neighbors = neighbor_set(inner, v);
    let d = neighbors.len();
    if d < 2 {
        return 0.0;
    }
    // Each link among neighbors is seen from both ends.
    let twice_links: usize = inner
        .neighbors(v)
        .map(|a| {
            inner
                .neighbors(a)
                .filter(|b| neighbors.contains(&b.index()))
                .count()
        })
        .sum();
    twice_links as f64 / (d * (d - 1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> GraphModel {
        let mut g = GraphModel::new();
        for n in nodes {
            g.add_plain_node(*n).unwrap();
        }
        for (u, v) in edges {
            g.add_edge(u, v, EdgeData::default()).unwrap();
        }
        g
    }

    #[test]
    fn test_similarity_complete_graph_scores_one() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("a", "d"), ("b", "c"), ("b", "d"), ("c", "d")],
        );
        for c in clustering_coefficients(&g).values() {
            assert!((c - 1.0).abs() < 1e-12);
        }
        // K4: each edge's endpoints share both remaining nodes.
        for o in edge_overlap(&g).values() {
            assert!((o - 1.0).abs() < 1e-12);
        }
        assert!((average_clustering(&g) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_star_center_has_zero_clustering() {
        let g = graph(
            &["hub", "a", "b", "c"],
            &[("hub", "a"), ("hub", "b"), ("hub", "c")],
        );
        let cc = clustering_coefficients(&g);
        assert_eq!(cc["hub"], 0.0);
        assert_eq!(cc["a"], 0.0);
        // Leaf edges: N(leaf)\{hub} is empty, N(hub)\{leaf} has two others.
        assert_eq!(overlap(&g, "a", "hub").unwrap(), 0.0);
    }

    #[test]
    fn test_similarity_partial_triangle_closure() {
        // a's neighbors b, c, d; only b-c linked: 1 of 3 pairs.
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("a", "d"), ("b", "c")],
        );
        assert!((clustering_coefficient(&g, "a").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(clustering_coefficient(&g, "b").unwrap(), 1.0);
        assert_eq!(clustering_coefficient(&g, "d").unwrap(), 0.0);

        // Edge (a, b): N(a)\{b} = {c, d}, N(b)\{a} = {c}: 1 / 2.
        assert!((overlap(&g, "b", "a").unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_isolated_edge_overlap_is_zero() {
        let g = graph(&["a", "b"], &[("a", "b")]);
        assert_eq!(edge_overlap(&g)[&EdgeKey::new("a", "b")], 0.0);
    }

    #[test]
    fn test_similarity_identical_neighborhoods_overlap_fully() {
        // a and b both see exactly x and y (besides each other).
        let g = graph(
            &["a", "b", "x", "y"],
            &[("a", "b"), ("a", "x"), ("a", "y"), ("b", "x"), ("b", "y")],
        );
        assert_eq!(overlap(&g, "a", "b").unwrap(), 1.0);
    }

    #[test]
    fn test_similarity_single_queries_match_bulk() {
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "d"), ("d", "e"), ("b", "d")],
        );
        let cc = clustering_coefficients(&g);
        for (id, score) in &cc {
            assert_eq!(clustering_coefficient(&g, id.as_str()).unwrap(), *score);
        }
        for (key, score) in edge_overlap(&g) {
            let single = overlap(&g, key.u().as_str(), key.v().as_str()).unwrap();
            assert_eq!(single, score, "{key}");
        }
        // c: neighbors a, b, d with links a-b and b-d: 2 of 3 pairs.
        assert!((cc["c"] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_missing_items_are_not_found() {
        let g = graph(&["a", "b", "c"], &[("a", "b")]);
        assert!(matches!(overlap(&g, "a", "c"), Err(Error::NotFound(_))));
        assert!(matches!(overlap(&g, "a", "zz"), Err(Error::NotFound(_))));
        assert!(matches!(clustering_coefficient(&g, "zz"), Err(Error::NotFound(_))));
        assert_eq!(average_clustering(&GraphModel::new()), 0.0);
    }
}
