use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Cost of a link or a path, in abstract non-negative units.
pub type Cost = u64;

/// Identifier of a node in the simulated network.
///
/// Opaque string label; two nodes are the same node iff their labels are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node identifier from any string-like label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label as a string slice.
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
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An undirected weighted edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint.
    pub a: NodeId,
    /// Second endpoint.
    pub b: NodeId,
    /// Link weight, identical in both directions.
    pub weight: Cost,
}

impl Edge {
    /// Create a new edge.
    pub fn new(a: impl Into<NodeId>, b: impl Into<NodeId>, weight: Cost) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            weight,
        }
    }

    /// Create an edge from a signed weight, rejecting negative values.
    pub fn checked(
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        weight: i64,
    ) -> Result<Self, CoreError> {
        let a = a.into();
        let b = b.into();
        let weight = Cost::try_from(weight)
            .map_err(|_| CoreError::NegativeWeight { a: a.clone(), b: b.clone(), weight })?;
        Ok(Self { a, b, weight })
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.a, self.b, self.weight)
    }
}

/// One adjacency entry: a direct neighbor and the weight of the link to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The neighbor at the other end of the link.
    pub neighbor: NodeId,
    /// Weight of the link.
    pub weight: Cost,
}
