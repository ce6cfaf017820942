//! Helpers shared by the integration tests: a brute-force shortest-path
//! oracle and proptest strategies for random networks.

use std::collections::HashMap;

use dvsim_core::{Cost, Edge, NodeId, Topology};
use proptest::prelude::*;

/// All-pairs shortest path costs computed with Floyd–Warshall.
///
/// Pairs with no connecting path are absent from the map.
pub fn all_pairs_shortest_paths(topology: &Topology) -> HashMap<(NodeId, NodeId), Cost> {
    let nodes: Vec<NodeId> = topology.nodes().cloned().collect();
    let n = nodes.len();
    let index: HashMap<&NodeId, usize> = nodes.iter().enumerate().map(|(i, id)| (id, i)).collect();

    let mut dist: Vec<Vec<Option<Cost>>> = vec![vec![None; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for edge in topology.edges() {
        let (i, j) = (index[&edge.a], index[&edge.b]);
        for (x, y) in [(i, j), (j, i)] {
            if dist[x][y].map_or(true, |current| edge.weight < current) {
                dist[x][y] = Some(edge.weight);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = dist[i][k] else { continue };
            for j in 0..n {
                let Some(kj) = dist[k][j] else { continue };
                let through = ik.saturating_add(kj);
                if dist[i][j].map_or(true, |current| through < current) {
                    dist[i][j] = Some(through);
                }
            }
        }
    }

    let mut result = HashMap::new();
    for (i, from) in nodes.iter().enumerate() {
        for (j, to) in nodes.iter().enumerate() {
            if let Some(cost) = dist[i][j] {
                result.insert((from.clone(), to.clone()), cost);
            }
        }
    }
    result
}

/// Label for the `i`-th generated node.
pub fn node_label(i: usize) -> String {
    format!("N{}", i)
}

/// Random connected network: a random spanning tree over `nodes` nodes plus
/// up to `extra` additional (possibly parallel) edges.
pub fn connected_edges(
    nodes: std::ops::Range<usize>,
    extra: usize,
    max_weight: Cost,
) -> impl Strategy<Value = Vec<Edge>> {
    nodes.prop_flat_map(move |n| {
        let tree = (1..n)
            .map(|i| (0..i, 0..=max_weight))
            .collect::<Vec<_>>();
        let extras = prop::collection::vec((0..n, 0..n, 0..=max_weight), 0..=extra);
        (tree, extras).prop_map(|(tree, extras)| {
            let mut edges: Vec<Edge> = tree
                .into_iter()
                .enumerate()
                .map(|(k, (parent, w))| Edge::new(node_label(k + 1), node_label(parent), w))
                .collect();
            edges.extend(
                extras
                    .into_iter()
                    .map(|(a, b, w)| Edge::new(node_label(a), node_label(b), w)),
            );
            edges
        })
    })
}

/// Random, possibly disconnected, edge list over at most `max_nodes` labels.
pub fn arbitrary_edges(max_nodes: usize, max_edges: usize, max_weight: Cost) -> impl Strategy<Value = Vec<Edge>> {
    prop::collection::vec((0..max_nodes, 0..max_nodes, 0..=max_weight), 0..=max_edges).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(a, b, w)| Edge::new(node_label(a), node_label(b), w))
                .collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_on_triangle() {
        let topology = Topology::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 1),
            Edge::new("A", "C", 5),
        ]);
        let dist = all_pairs_shortest_paths(&topology);
        assert_eq!(dist[&(NodeId::from("A"), NodeId::from("C"))], 2);
        assert_eq!(dist[&(NodeId::from("C"), NodeId::from("C"))], 0);
        assert_eq!(dist.len(), 9);
    }

    #[test]
    fn test_oracle_skips_unreachable_pairs() {
        let topology = Topology::from_edges(vec![Edge::new("A", "B", 1), Edge::new("X", "Y", 1)]);
        let dist = all_pairs_shortest_paths(&topology);
        assert!(!dist.contains_key(&(NodeId::from("A"), NodeId::from("X"))));
        assert_eq!(dist.len(), 8);
    }
}
