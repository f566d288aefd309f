//! Edge betweenness centrality (Brandes 2001, edge variant).
//!
//! For every source `s` a single-source shortest-path pass (BFS, or Dijkstra
//! when edge weights are read as lengths) counts shortest paths `σ`, then a
//! reverse sweep accumulates dependencies:
//!
//! ```text
//! c(v, w) = σ(v) / σ(w) × (1 + δ(w))      for each predecessor v of w
//! ```
//!
//! `c(v, w)` is credited to edge `(v, w)`. Summing over all sources counts
//! each unordered pair twice, so the total is halved.
//!
//! Cost: O(V·E) unweighted, O(V·E·log V) weighted.

use crate::error::{Error, Result};
use crate::graph::{EdgeKey, GraphModel};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores within this relative distance of the maximum are treated as tied.
/// Weighted path lengths use the same slack when counting equal-length routes.
pub(crate) const TIE_TOLERANCE: f64 = 1e-9;

/// Betweenness of every edge: the sum, over unordered node pairs, of the
/// fraction of their shortest paths that traverse the edge.
///
/// With `weighted = true` the edge `weight` is a path length (missing weight
/// counts as 1). Route lengths within a relative 1e-9 of each
/// other count as equally short.
///
/// # Errors
///
/// `InvalidRequest` if `weighted` and some weight is non-positive or not finite.
pub fn edge_betweenness(graph: &GraphModel, weighted: bool) -> Result<BTreeMap<EdgeKey, f64>> {
    let work = WorkingGraph::from_model(graph, weighted)?;
    let scores = work.edge_betweenness();
    Ok(work
        .keys
        .iter()
        .cloned()
        .zip(scores)
        .collect())
}

/// Scratch copy of the edge set that the divisive partitioner removes edges from.
pub(crate) struct WorkingGraph {
    n: usize,
    /// Adjacency: node -> [(neighbor, edge slot)], in edge insertion order.
    adj: Vec<Vec<(usize, usize)>>,
    /// Edge slot -> path length.
    lengths: Vec<f64>,
    /// Edge slot -> normalized key.
    pub(crate) keys: Vec<EdgeKey>,
    alive: Vec<bool>,
    weighted: bool,
}

impl WorkingGraph {
    pub(crate) fn from_model(graph: &GraphModel, weighted: bool) -> Result<Self> {
        let inner = graph.inner();
        let n = inner.node_count();
        let m = inner.edge_count();
        let mut adj = vec![Vec::new(); n];
        let mut lengths = Vec::with_capacity(m);
        let mut keys = Vec::with_capacity(m);

        for e in inner.edge_indices() {
            let Some((a, b)) = inner.edge_endpoints(e) else {
                continue;
            };
            let Some(key) = graph.key_of(e) else {
                continue;
            };
            let length = if weighted {
                let w = inner[e].weight.unwrap_or(1.0);
                if !w.is_finite() || w <= 0.0 {
                    return Err(Error::invalid(format!(
                        "edge {key} has weight {w}; weighted betweenness needs positive finite lengths"
                    )));
                }
                w
            } else {
                1.0
            };
            let slot = keys.len();
            adj[a.index()].push((b.index(), slot));
            adj[b.index()].push((a.index(), slot));
            lengths.push(length);
            keys.push(key);
        }

        Ok(Self {
            n,
            adj,
            alive: vec![true; keys.len()],
            lengths,
            keys,
            weighted,
        })
    }

    pub(crate) fn live_edge_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    pub(crate) fn remove(&mut self, slot: usize) {
        if !self.alive[slot] {
            return;
        }
        self.alive[slot] = false;
        for list in &mut self.adj {
            list.retain(|&(_, s)| s != slot);
        }
    }

    /// Component label per node, numbered from 0 in order of each component's
    /// first node. Returns `(labels, component_count)`.
    pub(crate) fn component_labels(&self) -> (Vec<usize>, usize) {
        let mut labels = vec![usize::MAX; self.n];
        let mut next = 0;
        for start in 0..self.n {
            if labels[start] != usize::MAX {
                continue;
            }
            labels[start] = next;
            let mut queue = VecDeque::from([start]);
            while let Some(v) = queue.pop_front() {
                for &(w, _) in &self.adj[v] {
                    if labels[w] == usize::MAX {
                        labels[w] = next;
                        queue.push_back(w);
                    }
                }
            }
            next += 1;
        }
        (labels, next)
    }

    /// Betweenness per edge slot (removed slots score 0).
    pub(crate) fn edge_betweenness(&self) -> Vec<f64> {
        let m = self.keys.len();

        #[cfg(feature = "parallel")]
        let mut scores = (0..self.n)
            .into_par_iter()
            .map(|s| {
                let mut local = vec![0.0; m];
                self.accumulate_from(s, &mut local);
                local
            })
            .reduce(
                || vec![0.0; m],
                |mut acc, local| {
                    for (a, l) in acc.iter_mut().zip(local) {
                        *a += l;
                    }
                    acc
                },
            );

        #[cfg(not(feature = "parallel"))]
        let mut scores = {
            let mut scores = vec![0.0; m];
            for s in 0..self.n {
                self.accumulate_from(s, &mut scores);
            }
            scores
        };

        for score in &mut scores {
            *score *= 0.5;
        }
        scores
    }

    /// The live edge with the highest betweenness; near-ties go to the
    /// smallest key.
    pub(crate) fn most_between(&self, scores: &[f64]) -> Option<usize> {
        let best = (0..self.keys.len())
            .filter(|&e| self.alive[e])
            .map(|e| scores[e])
            .fold(f64::NEG_INFINITY, f64::max);
        if best == f64::NEG_INFINITY {
            return None;
        }
        let floor = best - TIE_TOLERANCE * best.abs().max(1.0);
        (0..self.keys.len())
            .filter(|&e| self.alive[e] && scores[e] >= floor)
            .min_by(|&a, &b| self.keys[a].cmp(&self.keys[b]))
    }

    /// Add source `s`'s dependency contributions to `scores`.
    fn accumulate_from(&self, s: usize, scores: &mut [f64]) {
        let sp = if self.weighted {
            self.dijkstra(s)
        } else {
            self.bfs(s)
        };
        tracing::trace!(source = s, reached = sp.order.len(), "betweenness pass");

        let mut delta = vec![0.0; self.n];
        for &w in sp.order.iter().rev() {
            for &(v, slot) in &sp.preds[w] {
                let c = sp.sigma[v] / sp.sigma[w] * (1.0 + delta[w]);
                scores[slot] += c;
                delta[v] += c;
            }
        }
    }

    fn bfs(&self, s: usize) -> ShortestPaths {
        let mut sp = ShortestPaths::new(self.n, s);
        let mut dist = vec![usize::MAX; self.n];
        dist[s] = 0;
        let mut queue = VecDeque::from([s]);

        while let Some(v) = queue.pop_front() {
            sp.order.push(v);
            for &(w, slot) in &self.adj[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sp.sigma[w] += sp.sigma[v];
                    sp.preds[w].push((v, slot));
                }
            }
        }
        sp
    }

    fn dijkstra(&self, s: usize) -> ShortestPaths {
        let mut sp = ShortestPaths::new(self.n, s);
        let mut dist = vec![f64::INFINITY; self.n];
        let mut done = vec![false; self.n];
        dist[s] = 0.0;
        let mut heap = BinaryHeap::from([Reverse((Length(0.0), s))]);

        while let Some(Reverse((Length(d), v))) = heap.pop() {
            if done[v] || d > dist[v] {
                continue;
            }
            done[v] = true;
            sp.order.push(v);
            for &(w, slot) in &self.adj[v] {
                let candidate = d + self.lengths[slot];
                // Float sums along different routes rarely match exactly.
                let slack = TIE_TOLERANCE * candidate.max(1.0);
                if candidate < dist[w] - slack {
                    dist[w] = candidate;
                    sp.sigma[w] = sp.sigma[v];
                    sp.preds[w].clear();
                    sp.preds[w].push((v, slot));
                    heap.push(Reverse((Length(candidate), w)));
                } else if (candidate - dist[w]).abs() <= slack && !done[w] {
                    sp.sigma[w] += sp.sigma[v];
                    sp.preds[w].push((v, slot));
                }
            }
        }
        sp
    }
}

/// Single-source shortest-path DAG.
struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source.
    order: Vec<usize>,
    /// Number of shortest paths from the source.
    sigma: Vec<f64>,
    /// Predecessors on shortest paths, with the edge slot used.
    preds: Vec<Vec<(usize, usize)>>,
}

impl ShortestPaths {
    fn new(n: usize, source: usize) -> Self {
        let mut sigma = vec![0.0; n];
        sigma[source] = 1.0;
        Self {
            order: Vec::with_capacity(n),
            sigma,
            preds: vec![Vec::new(); n],
        }
    }
}

/// Path length with a total order for the heap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Length(f64);

impl Eq for Length {}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Length {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
