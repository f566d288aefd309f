//! Value types stored on nodes and edges.

use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node identifier. Ordered lexicographically, which is the order used for
/// every deterministic tie-break in the crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Create an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<usize> for NodeId {
    fn from(n: usize) -> Self {
        Self(n.to_string())
    }
}

// Hash/Eq of `NodeId` are those of the inner `String`, which agree with `str`.
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A node attribute value.
///
/// Values compare equal only within the same variant: `Number(1.0)` never
/// equals `Text("1")`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttrValue {
    /// Numeric value (integers are widened to `f64`).
    Number(f64),
    /// Text value, e.g. a category label.
    Text(String),
    /// Boolean flag.
    Bool(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Number(v as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Number(f64::from(v))
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

/// A node: identifier plus attribute map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Attribute name -> value.
    pub attributes: BTreeMap<String, AttrValue>,
}

impl Node {
    /// Look up one attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }
}

/// Sign of a relationship in a signed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    /// Friendly / trusting tie.
    Positive,
    /// Hostile / distrusting tie.
    Negative,
}

impl Sign {
    /// `+1.0` or `-1.0`.
    pub fn as_f64(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    /// Whether this is [`Sign::Negative`].
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    /// Product of two signs.
    pub fn times(self, other: Sign) -> Sign {
        if self == other {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

impl TryFrom<f64> for Sign {
    type Error = Error;

    fn try_from(v: f64) -> Result<Self> {
        if v > 0.0 {
            Ok(Sign::Positive)
        } else if v < 0.0 {
            Ok(Sign::Negative)
        } else {
            Err(Error::invalid(format!("edge sign must be non-zero, got {v}")))
        }
    }
}

impl FromStr for Sign {
    type Err = Error;

    /// Accepts `+`/`-` symbols and signed numbers (`1`, `-1`, `+1`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(Sign::Positive),
            "-" => Ok(Sign::Negative),
            other => other
                .parse::<f64>()
                .map_err(|_| Error::invalid(format!("unexpected sign value '{other}'")))
                .and_then(Sign::try_from),
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => f.write_str("+"),
            Sign::Negative => f.write_str("-"),
        }
    }
}

/// Data carried on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeData {
    /// Relationship sign; absent means positive.
    pub sign: Option<Sign>,
    /// Optional weight, read as a path length by weighted betweenness.
    pub weight: Option<f64>,
}

impl EdgeData {
    /// An edge with a sign and no weight.
    pub fn signed(sign: Sign) -> Self {
        Self {
            sign: Some(sign),
            weight: None,
        }
    }

    /// An edge with a weight and no sign.
    pub fn weighted(weight: f64) -> Self {
        Self {
            sign: None,
            weight: Some(weight),
        }
    }

    /// Set the sign.
    pub fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = Some(sign);
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// The effective sign (missing sign counts as positive).
    pub fn effective_sign(&self) -> Sign {
        self.sign.unwrap_or(Sign::Positive)
    }
}

/// Unordered edge identity: `EdgeKey::new(u, v) == EdgeKey::new(v, u)`.
///
/// The smaller identifier is always stored first, so the derived `Ord` is the
/// lexicographic order on normalized `(u, v)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeKey {
    u: NodeId,
    v: NodeId,
}

impl EdgeKey {
    /// Create a normalized key.
    pub fn new(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { u: a, v: b }
        } else {
            Self { u: b, v: a }
        }
    }

    /// Smaller endpoint.
    pub fn u(&self) -> &NodeId {
        &self.u
    }

    /// Larger endpoint.
    pub fn v(&self) -> &NodeId {
        &self.v
    }

    /// Whether `id` is one of the endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.u.as_str() == id || self.v.as_str() == id
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_edge_key_is_unordered() {
        let a = EdgeKey::new("x", "y");
        let b = EdgeKey::new("y", "x");
        assert_eq!(a, b);
        assert_eq!(a.u().as_str(), "x");

        let set: HashSet<EdgeKey> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_edge_key_orders_lexicographically() {
        let mut keys = vec![
            EdgeKey::new("b", "c"),
            EdgeKey::new("c", "a"),
            EdgeKey::new("a", "b"),
        ];
        keys.sort();
        assert_eq!(keys[0], EdgeKey::new("a", "b"));
        assert_eq!(keys[1], EdgeKey::new("a", "c"));
        assert_eq!(keys[2], EdgeKey::new("b", "c"));
    }

    #[test]
    fn test_sign_parsing() {
        assert_eq!("+".parse::<Sign>().unwrap(), Sign::Positive);
        assert_eq!("-".parse::<Sign>().unwrap(), Sign::Negative);
        assert_eq!("-1".parse::<Sign>().unwrap(), Sign::Negative);
        assert_eq!(" 1 ".parse::<Sign>().unwrap(), Sign::Positive);
        assert!("0".parse::<Sign>().is_err());
        assert!("maybe".parse::<Sign>().is_err());
        assert_eq!(Sign::try_from(-3.0).unwrap(), Sign::Negative);
    }

    #[test]
    fn test_sign_product() {
        assert_eq!(Sign::Negative.times(Sign::Negative), Sign::Positive);
        assert_eq!(Sign::Positive.times(Sign::Negative), Sign::Negative);
        assert_eq!(EdgeData::default().effective_sign(), Sign::Positive);
    }

    #[test]
    fn test_attr_values_compare_within_variant() {
        assert_eq!(AttrValue::from(3i64), AttrValue::Number(3.0));
        assert_ne!(AttrValue::from("1"), AttrValue::from(1i64));
        assert_ne!(AttrValue::from(true), AttrValue::from("true"));
    }
}
