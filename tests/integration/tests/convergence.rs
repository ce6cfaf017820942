//! Integration test: topology construction through convergence, checked
//! against a brute-force shortest-path oracle.

use dvsim_core::{Cost, Edge, NodeId, Preset, Topology};
use dvsim_integration_tests::all_pairs_shortest_paths;
use dvsim_routing::{
    from_fn, ConvergenceEngine, EngineEvent, EngineState, NextHop, RoutingTable,
};

fn id(label: &str) -> NodeId {
    NodeId::from(label)
}

fn converge(topology: Topology) -> ConvergenceEngine {
    let mut engine = ConvergenceEngine::with_defaults(topology);
    engine.converge().expect("convergence");
    engine
}

fn rows(table: &RoutingTable) -> Vec<(String, Cost, Option<String>)> {
    table
        .entries()
        .map(|e| {
            (
                e.destination.to_string(),
                e.cost,
                e.next_hop.neighbor().map(|n| n.to_string()),
            )
        })
        .collect()
}

fn row(dest: &str, cost: Cost, hop: Option<&str>) -> (String, Cost, Option<String>) {
    (dest.to_string(), cost, hop.map(str::to_string))
}

// =========================================================================
// Reference scenarios
// =========================================================================

#[test]
fn test_triangle_final_tables() {
    let engine = converge(Preset::Triangle.topology());

    assert_eq!(
        rows(engine.table(&id("A")).unwrap()),
        vec![row("A", 0, None), row("B", 1, Some("B")), row("C", 2, Some("B"))]
    );
    assert_eq!(
        rows(engine.table(&id("B")).unwrap()),
        vec![row("B", 0, None), row("A", 1, Some("A")), row("C", 1, Some("C"))]
    );
    // C heard of A (directly, at 5) before it heard of B, so A keeps the
    // earlier row even after the cheaper path through B replaced it.
    assert_eq!(
        rows(engine.table(&id("C")).unwrap()),
        vec![row("C", 0, None), row("A", 2, Some("B")), row("B", 1, Some("B"))]
    );
}

#[test]
fn test_single_edge_final_tables() {
    let mut topology = Topology::new();
    topology.add_edge("A", "B", 4);
    let mut engine = ConvergenceEngine::with_defaults(topology);
    let report = engine.converge().unwrap();

    assert_eq!(report.productive_rounds, 1);
    assert_eq!(
        rows(engine.table(&id("A")).unwrap()),
        vec![row("A", 0, None), row("B", 4, Some("B"))]
    );
    assert_eq!(
        rows(engine.table(&id("B")).unwrap()),
        vec![row("B", 0, None), row("A", 4, Some("A"))]
    );
}

#[test]
fn test_six_node_preset_matches_oracle() {
    let topology = Preset::SixNode.topology();
    let oracle = all_pairs_shortest_paths(&topology);
    let node_count = topology.node_count();
    let mut engine = ConvergenceEngine::with_defaults(topology);
    let report = engine.converge().unwrap();

    assert!(report.rounds as usize <= node_count);
    for table in engine.tables() {
        assert_eq!(table.len(), node_count);
        for entry in table.entries() {
            let expected = oracle[&(table.owner().clone(), entry.destination.clone())];
            assert_eq!(entry.cost, expected, "{} -> {}", table.owner(), entry.destination);
        }
    }

    // A reaches C through B (1 + 3) rather than via F or E.
    let a = engine.table(&id("A")).unwrap();
    assert_eq!(a.cost_to(&id("C")), Some(4));
    assert_eq!(a.route_to(&id("D")).unwrap().cost, 5);
}

#[test]
fn test_duplicate_insertion_matches_single_insertion() {
    let base = vec![
        Edge::new("A", "B", 1),
        Edge::new("B", "C", 3),
        Edge::new("C", "D", 1),
        Edge::new("A", "D", 6),
    ];
    let mut doubled = base.clone();
    doubled.insert(1, Edge::new("A", "B", 1));

    let doubled_topology = Topology::from_edges(doubled);
    assert_eq!(doubled_topology.edges_from(&id("A")).unwrap().len(), 3);
    assert_eq!(doubled_topology.edges_from(&id("B")).unwrap().len(), 3);

    let single = converge(Topology::from_edges(base));
    let twice = converge(doubled_topology);
    for (a, b) in single.tables().zip(twice.tables()) {
        assert_eq!(rows(a), rows(b));
    }
}

#[test]
fn test_disconnected_network_converges_with_partial_tables() {
    let topology = Topology::from_edges(vec![
        Edge::new("A", "B", 2),
        Edge::new("B", "C", 2),
        Edge::new("X", "Y", 1),
    ]);
    let engine = converge(topology);

    assert_eq!(engine.state(), EngineState::Converged);
    for left in ["A", "B", "C"] {
        let table = engine.table(&id(left)).unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.contains(&id("X")));
        assert!(!table.contains(&id("Y")));
    }
    for right in ["X", "Y"] {
        let table = engine.table(&id(right)).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.contains(&id("A")));
    }
}

#[test]
fn test_zero_weight_links() {
    let topology = Topology::from_edges(vec![Edge::new("A", "B", 0), Edge::new("B", "C", 0)]);
    let engine = converge(topology);
    let a = engine.table(&id("A")).unwrap();
    assert_eq!(a.cost_to(&id("C")), Some(0));
    assert_eq!(a.route_to(&id("C")).unwrap().next_hop, NextHop::Via(id("B")));
    // The self-entry is never displaced, even by a free path back.
    assert!(a.route_to(&id("A")).unwrap().next_hop.is_local());
}

// =========================================================================
// Observation hook
// =========================================================================

#[test]
fn test_self_entry_holds_after_every_merge() {
    let mut engine = ConvergenceEngine::with_defaults(Preset::SixNode.topology());
    let mut checked = 0u64;
    {
        let mut observer = from_fn(|event| {
            if let EngineEvent::Merge(merge) = event {
                let own = merge.table.route_to(merge.destination).unwrap();
                assert_eq!(own.cost, 0);
                assert!(own.next_hop.is_local());
                checked += 1;
            }
        });
        engine.run(&mut observer).unwrap();
    }
    assert_eq!(checked, engine.report().merges);
}

#[test]
fn test_next_hops_are_direct_neighbors() {
    let topology = Preset::SixNode.topology();
    let engine = converge(topology);

    for table in engine.tables() {
        let neighbors: Vec<NodeId> = engine
            .topology()
            .edges_from(table.owner())
            .unwrap()
            .into_iter()
            .map(|link| link.neighbor)
            .collect();
        for entry in table.entries() {
            match &entry.next_hop {
                NextHop::Local => assert_eq!(&entry.destination, table.owner()),
                NextHop::Via(hop) => assert!(
                    neighbors.contains(hop),
                    "{} routes via {} which is not a neighbor",
                    table.owner(),
                    hop
                ),
            }
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let first = converge(Preset::SixNode.topology());
    let second = converge(Preset::SixNode.topology());
    for (a, b) in first.tables().zip(second.tables()) {
        assert_eq!(rows(a), rows(b));
    }
    assert_eq!(first.report(), second.report());
}

#[test]
fn test_final_tables_serialize() {
    let engine = converge(Preset::Triangle.topology());
    let json = serde_json::to_value(engine.tables().collect::<Vec<_>>()).unwrap();
    assert_eq!(json[0]["owner"], "A");
    assert_eq!(json[0]["routes"]["C"]["cost"], 2);
    assert_eq!(json[0]["routes"]["C"]["next_hop"]["via"], "B");
}
