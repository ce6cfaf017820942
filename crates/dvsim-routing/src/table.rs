use std::fmt;

use dvsim_core::{Cost, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where a node forwards traffic for a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextHop {
    /// The destination is the table's own node.
    Local,
    /// Forward to this direct neighbor.
    Via(NodeId),
}

impl NextHop {
    /// The neighbor to forward to, or `None` for the local route.
    pub fn neighbor(&self) -> Option<&NodeId> {
        match self {
            Self::Local => None,
            Self::Via(id) => Some(id),
        }
    }

    /// Returns `true` for the self-entry sentinel.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for NextHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("self"),
            Self::Via(id) => write!(f, "{}", id),
        }
    }
}

/// A single row of a routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// The destination this row describes.
    pub destination: NodeId,
    /// Best known total cost to the destination.
    pub cost: Cost,
    /// First hop on the best known path.
    pub next_hop: NextHop,
}

/// Destinations added or improved by a single merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Destinations whose entry was written, in the order they were visited.
    pub updated: Vec<NodeId>,
}

impl MergeOutcome {
    /// Whether the merge modified the table at all.
    pub fn changed(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// The distance vector of one node: destination -> (cost, next hop).
///
/// Always holds the owner itself at cost 0 with [`NextHop::Local`]. Entries
/// are never removed and their costs never increase; rows keep the order in
/// which destinations were first learned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingTable {
    owner: NodeId,
    routes: IndexMap<NodeId, RouteEntry>,
}

impl RoutingTable {
    /// Create a table holding only the owner's self-entry.
    pub fn new(owner: impl Into<NodeId>) -> Self {
        let owner = owner.into();
        let mut routes = IndexMap::new();
        routes.insert(
            owner.clone(),
            RouteEntry {
                destination: owner.clone(),
                cost: 0,
                next_hop: NextHop::Local,
            },
        );
        Self { owner, routes }
    }

    /// The node this table belongs to.
    pub fn owner(&self) -> &NodeId {
        &self.owner
    }

    /// Merge a neighbor's table received over a link of `weight`.
    ///
    /// Returns `true` iff at least one entry was added or improved.
    pub fn merge(&mut self, other: &RoutingTable, weight: Cost) -> bool {
        self.merge_tracked(other, weight).changed()
    }

    /// Merge a neighbor's table and report which destinations changed.
    ///
    /// A destination is written when it is unknown here or when routing via
    /// `other` is strictly cheaper. Ties keep the existing next hop.
    pub fn merge_tracked(&mut self, other: &RoutingTable, weight: Cost) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for advertised in other.routes.values() {
            let candidate = advertised.cost.saturating_add(weight);
            let improves = self
                .routes
                .get(&advertised.destination)
                .map_or(true, |current| candidate < current.cost);
            if !improves {
                continue;
            }

            tracing::trace!(
                table = %self.owner,
                destination = %advertised.destination,
                cost = candidate,
                via = %other.owner,
                "route updated"
            );

            self.routes.insert(
                advertised.destination.clone(),
                RouteEntry {
                    destination: advertised.destination.clone(),
                    cost: candidate,
                    next_hop: NextHop::Via(other.owner.clone()),
                },
            );
            outcome.updated.push(advertised.destination.clone());
        }

        outcome
    }

    /// Rows in the order destinations were first learned (owner first).
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> + '_ {
        self.routes.values()
    }

    /// Rows ordered by destination identifier.
    pub fn sorted_entries(&self) -> Vec<&RouteEntry> {
        let mut entries: Vec<&RouteEntry> = self.routes.values().collect();
        entries.sort_by(|a, b| a.destination.cmp(&b.destination));
        entries
    }

    /// The row for `destination`, if known.
    pub fn route_to(&self, destination: &NodeId) -> Option<&RouteEntry> {
        self.routes.get(destination)
    }

    /// Best known cost to `destination`, if known.
    pub fn cost_to(&self, destination: &NodeId) -> Option<Cost> {
        self.route_to(destination).map(|entry| entry.cost)
    }

    /// Whether `destination` is reachable according to this table.
    pub fn contains(&self, destination: &NodeId) -> bool {
        self.routes.contains_key(destination)
    }

    /// Number of known destinations, the owner included.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always `false`: a table holds at least its self-entry.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
