//! Visual encodings of the similarity scores.
//!
//! Renderers draw overlap as edge width, clustering as node size, and degree
//! as color intensity. This module only computes the numbers; drawing is the
//! caller's business.
//!
//! All scales are min-max: the smallest score maps to the low end of the
//! range, the largest to the high end. When every score is equal there is
//! nothing to contrast and everything maps to the low end.

use crate::graph::{EdgeKey, GraphModel, NodeId};
use std::collections::BTreeMap;

/// Edge width range for overlap.
pub const EDGE_WIDTH_RANGE: (f64, f64) = (2.0, 10.0);

/// Node size range for clustering.
pub const NODE_SIZE_RANGE: (f64, f64) = (100.0, 1000.0);

/// Min-max rescale `values` into `[lo, hi]`.
pub fn rescale<K: Ord + Clone>(
    values: &BTreeMap<K, f64>,
    (lo, hi): (f64, f64),
) -> BTreeMap<K, f64> {
    let min = values.values().copied().fold(f64::INFINITY, f64::min);
    let max = values.values().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .map(|(k, &v)| {
            let scaled = if max > min {
                lo + (hi - lo) * (v - min) / (max - min)
            } else {
                lo
            };
            (k.clone(), scaled)
        })
        .collect()
}

/// Edge widths from neighborhood overlap (see [`crate::similarity::edge_overlap`]).
pub fn edge_widths(overlap: &BTreeMap<EdgeKey, f64>) -> BTreeMap<EdgeKey, f64> {
    rescale(overlap, EDGE_WIDTH_RANGE)
}

/// Node sizes from clustering (see [`crate::similarity::clustering_coefficients`]).
pub fn node_sizes(clustering: &BTreeMap<NodeId, f64>) -> BTreeMap<NodeId, f64> {
    rescale(clustering, NODE_SIZE_RANGE)
}

/// Degree relative to the highest degree, in `[0, 1]` (all 0 without edges).
pub fn degree_shades(graph: &GraphModel) -> BTreeMap<NodeId, f64> {
    let inner = graph.inner();
    let degrees: Vec<(NodeId, usize)> = inner
        .node_indices()
        .map(|v| (graph.id_of(v).clone(), inner.neighbors(v).count()))
        .collect();
    let peak = degrees.iter().map(|&(_, d)| d).max().unwrap_or(0);
    degrees
        .into_iter()
        .map(|(id, d)| {
            let shade = if peak == 0 { 0.0 } else { d as f64 / peak as f64 };
            (id, shade)
        })
        .collect()
}
