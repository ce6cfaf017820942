use std::fmt;

use dvsim_core::{NodeId, Topology};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::events::{
    ConvergenceObserver, ConvergenceReport, EngineEvent, MergeEvent, NoopObserver, RoundSummary,
};
use crate::table::RoutingTable;

/// Configuration for the convergence engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Give up with [`RoutingError::RoundLimitExceeded`] after this many
    /// rounds. `None` runs until convergence.
    pub max_rounds: Option<u32>,
}

/// Lifecycle of an engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EngineState {
    /// Tables may still change.
    Running,
    /// A full round produced no change anywhere. Final state.
    Converged,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Converged => write!(f, "Converged"),
        }
    }
}

/// Drives every node's routing table to a fixed point.
///
/// Each round visits the nodes in topology order; every node sends its
/// current table to each neighbor, which merges it immediately. Later
/// senders in the same round therefore already see earlier updates
/// (Gauss-Seidel relaxation). The run ends after the first round in which
/// no merge changed anything.
///
/// Given the same topology construction sequence, the final tables,
/// including the next hop chosen among equal-cost paths, are always the same.
pub struct ConvergenceEngine {
    topology: Topology,
    tables: IndexMap<NodeId, RoutingTable>,
    config: EngineConfig,
    state: EngineState,
    rounds: u32,
    productive_rounds: u32,
    merges: u64,
    updates: u64,
}

impl ConvergenceEngine {
    /// Create an engine with one fresh routing table per topology node.
    pub fn new(topology: Topology, config: EngineConfig) -> Self {
        let tables = topology
            .nodes()
            .map(|id| (id.clone(), RoutingTable::new(id)))
            .collect();

        tracing::debug!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            max_rounds = ?config.max_rounds,
            "convergence engine initialised"
        );

        Self {
            topology,
            tables,
            config,
            state: EngineState::Running,
            rounds: 0,
            productive_rounds: 0,
            merges: 0,
            updates: 0,
        }
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults(topology: Topology) -> Self {
        Self::new(topology, EngineConfig::default())
    }

    /// Execute one round.
    ///
    /// Returns `None` without doing anything once the engine has converged.
    pub fn step<O>(&mut self, observer: &mut O) -> Result<Option<RoundSummary>, RoutingError>
    where
        O: ConvergenceObserver + ?Sized,
    {
        if self.state == EngineState::Converged {
            return Ok(None);
        }

        let round = self.rounds + 1;
        let mut summary = RoundSummary {
            round,
            merges: 0,
            changed_merges: 0,
            updates: 0,
            any_change: false,
        };

        for source in self.topology.nodes() {
            // Merging a table into itself never changes it, so a copy taken
            // before the source's links are walked equals the live table.
            let sent = self
                .tables
                .get(source)
                .cloned()
                .ok_or_else(|| RoutingError::UnknownNode(source.clone()))?;

            observer.on_event(&EngineEvent::Advertise {
                round,
                source,
                table: &sent,
            });

            for link in self.topology.neighbors(source)? {
                let table = self
                    .tables
                    .get_mut(&link.neighbor)
                    .ok_or_else(|| RoutingError::UnknownNode(link.neighbor.clone()))?;

                let outcome = table.merge_tracked(&sent, link.weight);
                let changed = outcome.changed();

                summary.merges += 1;
                if changed {
                    summary.changed_merges += 1;
                    summary.updates += outcome.updated.len() as u64;
                }

                tracing::trace!(
                    round,
                    source = %source,
                    destination = %link.neighbor,
                    weight = link.weight,
                    changed,
                    "table merged"
                );

                observer.on_event(&EngineEvent::Merge(MergeEvent {
                    round,
                    source,
                    destination: &link.neighbor,
                    weight: link.weight,
                    changed,
                    updated: &outcome.updated,
                    table: &*table,
                }));
            }
        }

        summary.any_change = summary.changed_merges > 0;
        self.rounds = round;
        self.merges += summary.merges;
        self.updates += summary.updates;

        tracing::debug!(
            round,
            merges = summary.merges,
            changed_merges = summary.changed_merges,
            updates = summary.updates,
            "round completed"
        );
        observer.on_event(&EngineEvent::RoundCompleted(summary));

        if summary.any_change {
            self.productive_rounds += 1;
        } else {
            self.state = EngineState::Converged;
            let report = self.report();
            tracing::info!(
                rounds = report.rounds,
                productive_rounds = report.productive_rounds,
                merges = report.merges,
                "network converged"
            );
            observer.on_event(&EngineEvent::Converged(report));
        }

        Ok(Some(summary))
    }

    /// Run rounds until the network converges.
    pub fn run<O>(&mut self, observer: &mut O) -> Result<ConvergenceReport, RoutingError>
    where
        O: ConvergenceObserver + ?Sized,
    {
        while self.state == EngineState::Running {
            if let Some(max_rounds) = self.config.max_rounds {
                if self.rounds >= max_rounds {
                    tracing::warn!(max_rounds, "round limit reached before convergence");
                    return Err(RoutingError::RoundLimitExceeded { max_rounds });
                }
            }
            self.step(observer)?;
        }
        Ok(self.report())
    }

    /// Run to convergence without observing individual steps.
    pub fn converge(&mut self) -> Result<ConvergenceReport, RoutingError> {
        self.run(&mut NoopObserver)
    }

    /// Counters accumulated so far.
    pub fn report(&self) -> ConvergenceReport {
        ConvergenceReport {
            rounds: self.rounds,
            productive_rounds: self.productive_rounds,
            merges: self.merges,
            updates: self.updates,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Number of rounds executed so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The routing table of `id`.
    pub fn table(&self, id: &NodeId) -> Result<&RoutingTable, RoutingError> {
        self.tables
            .get(id)
            .ok_or_else(|| RoutingError::UnknownNode(id.clone()))
    }

    /// All routing tables in topology order.
    pub fn tables(&self) -> impl Iterator<Item = &RoutingTable> + '_ {
        self.tables.values()
    }

    /// The topology this engine runs over.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Consume the engine and return its tables in topology order.
    pub fn into_tables(self) -> Vec<RoutingTable> {
        self.tables.into_values().collect()
    }
}
