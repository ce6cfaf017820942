use indexmap::IndexMap;

use crate::error::CoreError;
use crate::types::{Cost, Edge, Link, NodeId};

/// Undirected weighted graph of named nodes.
///
/// Nodes iterate in insertion order, so two topologies built from the same
/// sequence of calls visit nodes (and therefore drive convergence) identically.
/// Every edge is stored in both endpoints' adjacency lists with the same weight.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    adjacency: IndexMap<NodeId, Vec<Link>>,
    edges: Vec<Edge>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology by inserting `edges` in order.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut topology = Self::new();
        for edge in edges {
            topology.insert_edge(edge);
        }
        topology
    }

    /// Register a node with an empty adjacency list. Returns `false` if the
    /// node was already present, in which case nothing changes.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.adjacency.contains_key(&id) {
            return false;
        }
        tracing::trace!(node = %id, "node registered");
        self.adjacency.insert(id, Vec::new());
        true
    }

    /// Add an undirected edge, registering missing endpoints first.
    ///
    /// Parallel edges are kept: adding the same edge twice yields two
    /// adjacency entries on each side.
    pub fn add_edge(&mut self, a: impl Into<NodeId>, b: impl Into<NodeId>, weight: Cost) {
        self.insert_edge(Edge::new(a, b, weight));
    }

    /// Like [`Topology::add_edge`], for callers holding a signed weight.
    /// Fails with [`CoreError::NegativeWeight`] without touching the graph.
    pub fn add_edge_checked(
        &mut self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        weight: i64,
    ) -> Result<(), CoreError> {
        let edge = Edge::checked(a, b, weight)?;
        self.insert_edge(edge);
        Ok(())
    }

    /// Insert an already-built edge.
    pub fn insert_edge(&mut self, edge: Edge) {
        self.add_node(&edge.a);
        self.add_node(&edge.b);

        if let Some(links) = self.adjacency.get_mut(&edge.a) {
            links.push(Link {
                neighbor: edge.b.clone(),
                weight: edge.weight,
            });
        }
        if let Some(links) = self.adjacency.get_mut(&edge.b) {
            links.push(Link {
                neighbor: edge.a.clone(),
                weight: edge.weight,
            });
        }

        tracing::trace!(a = %edge.a, b = %edge.b, weight = edge.weight, "edge added");
        self.edges.push(edge);
    }

    /// All registered nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.adjacency.keys()
    }

    /// A copy of the adjacency list of `id`.
    pub fn edges_from(&self, id: &NodeId) -> Result<Vec<Link>, CoreError> {
        self.neighbors(id).map(<[Link]>::to_vec)
    }

    /// Borrowed view of the adjacency list of `id`.
    pub fn neighbors(&self, id: &NodeId) -> Result<&[Link], CoreError> {
        self.adjacency
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| CoreError::UnknownNode(id.clone()))
    }

    /// Edges in the order they were inserted.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether `id` has been registered.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edge insertions (parallel edges counted separately).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl FromIterator<Edge> for Topology {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
