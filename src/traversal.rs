//! Breadth-first traversal trees.
//!
//! [`build_tree`] answers "what does the graph look like from here?": the
//! BFS tree rooted at a chosen node, spanning exactly that node's connected
//! component. Each reached node keeps the neighbor it was first discovered
//! from as its parent, so its depth is its hop distance from the root.
//!
//! Neighbors are explored in edge insertion order, which fixes the tree for
//! a given graph. Trees are built fresh per call and own their data.

use crate::error::Result;
use crate::graph::{GraphModel, NodeId};
use std::collections::{BTreeMap, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rooted BFS tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraversalTree {
    /// Nodes in discovery order; `order[0]` is the root.
    order: Vec<NodeId>,
    /// Child -> parent (root absent).
    parents: BTreeMap<NodeId, NodeId>,
    /// Node -> hop distance from the root.
    depths: BTreeMap<NodeId, usize>,
}

impl TraversalTree {
    /// The root.
    pub fn root(&self) -> &NodeId {
        &self.order[0]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` was reached.
    pub fn contains(&self, id: &str) -> bool {
        self.depths.contains_key(id)
    }

    /// Nodes in discovery order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Parent of `id` (`None` for the root or an unreached node).
    pub fn parent(&self, id: &str) -> Option<&NodeId> {
        self.parents.get(id)
    }

    /// Hop distance of `id` from the root.
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    /// Greatest depth in the tree.
    pub fn height(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }

    /// Children of `id` in discovery order.
    pub fn children(&self, id: &str) -> Vec<&NodeId> {
        self.order
            .iter()
            .filter(|c| self.parents.get(c.as_str()).is_some_and(|p| p.as_str() == id))
            .collect()
    }

    /// Tree edges `(parent, child)` in discovery order of the child.
    pub fn edges(&self) -> Vec<(&NodeId, &NodeId)> {
        self.order
            .iter()
            .filter_map(|c| self.parents.get(c.as_str()).map(|p| (p, c)))
            .collect()
    }

    /// Nodes grouped by depth.
    pub fn levels(&self) -> Vec<Vec<&NodeId>> {
        let mut levels = vec![Vec::new(); self.height() + 1];
        for id in &self.order {
            if let Some(&d) = self.depths.get(id.as_str()) {
                levels[d].push(id);
            }
        }
        levels
    }

    /// Path from `id` up to the root, both included.
    pub fn path_to_root(&self, id: &str) -> Option<Vec<&NodeId>> {
        let (mut current, _) = self.depths.get_key_value(id)?;
        let mut path = vec![current];
        while let Some(p) = self.parents.get(current.as_str()) {
            path.push(p);
            current = p;
        }
        Some(path)
    }
}

/// Build the BFS tree of `graph` rooted at `root`.
///
/// # Errors
///
/// `NotFound` if `root` is not a node.
pub fn build_tree(graph: &GraphModel, root: &str) -> Result<TraversalTree> {
    let start = graph.require(root)?;
    let mut depth = vec![usize::MAX; graph.node_count()];
    depth[start.index()] = 0;

    let root_id = graph.id_of(start).clone();
    let mut order = vec![root_id.clone()];
    let mut parents = BTreeMap::new();
    let mut depths = BTreeMap::from([(root_id, 0)]);
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        for (w, _) in graph.ordered_neighbors(v) {
            if depth[w.index()] != usize::MAX {
                continue;
            }
            let d = depth[v.index()] + 1;
            depth[w.index()] = d;
            let id = graph.id_of(w).clone();
            parents.insert(id.clone(), graph.id_of(v).clone());
            depths.insert(id.clone(), d);
            order.push(id);
            queue.push_back(w);
        }
    }

    Ok(TraversalTree {
        order,
        parents,
        depths,
    })
}
