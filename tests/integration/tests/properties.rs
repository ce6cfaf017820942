//! Property tests: random networks converge to the true shortest-path costs.

use dvsim_core::{NodeId, Topology};
use dvsim_integration_tests::{all_pairs_shortest_paths, arbitrary_edges, connected_edges};
use dvsim_routing::{from_fn, ConvergenceEngine, EngineEvent, EngineState};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_connected_networks_reach_shortest_paths(edges in connected_edges(1..12, 20, 50)) {
        let topology = Topology::from_edges(edges);
        let node_count = topology.node_count();
        let oracle = all_pairs_shortest_paths(&topology);

        let mut engine = ConvergenceEngine::with_defaults(topology);
        let report = engine.converge().unwrap();

        prop_assert_eq!(engine.state(), EngineState::Converged);
        prop_assert!(report.rounds as usize <= node_count.max(1));
        for table in engine.tables() {
            // Connected: every node knows every other node.
            prop_assert_eq!(table.len(), node_count);
            for entry in table.entries() {
                let key = (table.owner().clone(), entry.destination.clone());
                prop_assert_eq!(Some(&entry.cost), oracle.get(&key));
            }
        }
    }

    #[test]
    fn prop_tables_cover_exactly_the_reachable_nodes(edges in arbitrary_edges(10, 15, 20)) {
        let topology = Topology::from_edges(edges);
        let oracle = all_pairs_shortest_paths(&topology);
        let nodes: Vec<NodeId> = topology.nodes().cloned().collect();

        let mut engine = ConvergenceEngine::with_defaults(topology);
        engine.converge().unwrap();

        for from in &nodes {
            let table = engine.table(from).unwrap();
            for to in &nodes {
                let expected = oracle.get(&(from.clone(), to.clone())).copied();
                prop_assert_eq!(table.cost_to(to), expected);
            }
        }
    }

    #[test]
    fn prop_costs_only_decrease_during_a_run(edges in connected_edges(2..10, 12, 30)) {
        let topology = Topology::from_edges(edges);
        let mut engine = ConvergenceEngine::with_defaults(topology);

        let mut best: std::collections::HashMap<(NodeId, NodeId), u64> = Default::default();
        let mut violations = Vec::new();
        {
            let mut observer = from_fn(|event| {
                if let EngineEvent::Merge(merge) = event {
                    for entry in merge.table.entries() {
                        let key = (merge.destination.clone(), entry.destination.clone());
                        if let Some(previous) = best.insert(key.clone(), entry.cost) {
                            if entry.cost > previous {
                                violations.push((key, previous, entry.cost));
                            }
                        }
                    }
                }
            });
            engine.run(&mut observer).unwrap();
        }
        prop_assert!(violations.is_empty(), "costs increased: {:?}", violations);
    }
}
