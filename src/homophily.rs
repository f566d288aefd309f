//! Attribute homophily: do connected nodes share attribute values?
//!
//! Each edge is homophilous when both endpoints carry the same value for the
//! chosen attribute. The homophily ratio is
//!
//! ```text
//! h = homophilous edges / all edges
//! ```
//!
//! and the graph counts as homophilous when `h >= threshold`. An edgeless
//! graph is vacuously homophilous (`h = 1`); the verdict reports
//! `edge_count = 0` so callers can say so.
//!
//! An edge with an endpoint lacking the attribute is heterophilous and is
//! also counted in `unattributed_edges`.

use crate::error::{Error, Result};
use crate::graph::GraphModel;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Threshold used when the caller has no preference.
pub const DEFAULT_HOMOPHILY_THRESHOLD: f64 = 0.5;

/// How the ratio compares with the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strength {
    /// Ratio above the threshold.
    Strong,
    /// Ratio exactly at the threshold.
    Neutral,
    /// Ratio below the threshold.
    Weak,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Strong => f.write_str("strong"),
            Strength::Neutral => f.write_str("neutral"),
            Strength::Weak => f.write_str("weak"),
        }
    }
}

/// Outcome of [`verify_homophily`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomophilyVerdict {
    /// Attribute compared.
    pub attribute: String,
    /// Edges whose endpoints share the attribute value.
    pub homophilous_edges: usize,
    /// All edges.
    pub edge_count: usize,
    /// Edges with at least one endpoint lacking the attribute.
    pub unattributed_edges: usize,
    /// `homophilous_edges / edge_count`, or 1 for an edgeless graph.
    pub ratio: f64,
    /// Threshold the ratio was compared to.
    pub threshold: f64,
    /// `ratio >= threshold`.
    pub is_homophilous: bool,
}

impl HomophilyVerdict {
    /// Three-way comparison of ratio and threshold.
    pub fn strength(&self) -> Strength {
        match self.ratio.partial_cmp(&self.threshold) {
            Some(Ordering::Greater) => Strength::Strong,
            Some(Ordering::Equal) => Strength::Neutral,
            _ => Strength::Weak,
        }
    }
}

/// Measure homophily of `graph` on `attribute`.
///
/// # Errors
///
/// - `InvalidRequest` if `attribute` is blank or `threshold` is not in `[0, 1]`
/// - `NotFound` if the graph has edges but no node carries `attribute`
pub fn verify_homophily(
    graph: &GraphModel,
    attribute: &str,
    threshold: f64,
) -> Result<HomophilyVerdict> {
    if attribute.trim().is_empty() {
        return Err(Error::invalid("attribute name must not be blank"));
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::invalid(format!(
            "homophily threshold must be in [0, 1], got {threshold}"
        )));
    }
    // Edgeless graphs are vacuously homophilous whatever the attribute.
    if graph.edge_count() > 0 && !graph.nodes().any(|n| n.attribute(attribute).is_some()) {
        return Err(Error::NotFound(format!("attribute '{attribute}' on any node")));
    }

    let mut homophilous = 0;
    let mut unattributed = 0;
    let mut total = 0;
    for (key, _) in graph.edges() {
        total += 1;
        match (
            graph.attribute(key.u().as_str(), attribute),
            graph.attribute(key.v().as_str(), attribute),
        ) {
            (Some(a), Some(b)) if a == b => homophilous += 1,
            (Some(_), Some(_)) => {}
            _ => unattributed += 1,
        }
    }

    let ratio = if total == 0 {
        1.0
    } else {
        homophilous as f64 / total as f64
    };
    tracing::debug!(attribute, ratio, edges = total, "homophily measured");

    Ok(HomophilyVerdict {
        attribute: attribute.to_owned(),
        homophilous_edges: homophilous,
        edge_count: total,
        unattributed_edges: unattributed,
        ratio,
        threshold,
        is_homophilous: ratio >= threshold,
    })
}

/// First name in `candidates` carried by at least one node.
///
/// Graph files label group membership differently (`club`, `color`, ...);
/// this picks whichever the loaded graph uses.
///
/// # Errors
///
/// `NotFound` if no candidate appears on any node.
pub fn detect_attribute<'a>(graph: &GraphModel, candidates: &[&'a str]) -> Result<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| graph.nodes().any(|n| n.attribute(name).is_some()))
        .ok_or_else(|| Error::NotFound(format!("any of the attributes {candidates:?}")))
}
