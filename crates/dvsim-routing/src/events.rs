//! Observation points fired by the convergence engine.
//!
//! Observers receive borrowed views of the tables involved, so tracing a run
//! step by step costs nothing when no observer looks at them. The engine never
//! formats anything itself; rendering is the observer's business.

use dvsim_core::{Cost, NodeId};
use serde::Serialize;

use crate::table::RoutingTable;

/// Counters for one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: u32,
    /// Merge calls performed in the round.
    pub merges: u64,
    /// Merge calls that modified their target table.
    pub changed_merges: u64,
    /// Individual destination rows written in the round.
    pub updates: u64,
    /// Whether any table changed; `false` means the network is stable.
    pub any_change: bool,
}

/// Totals for a finished (converged) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConvergenceReport {
    /// Rounds executed, including the final round without changes.
    pub rounds: u32,
    /// Rounds in which at least one table changed.
    pub productive_rounds: u32,
    /// Merge calls across the whole run.
    pub merges: u64,
    /// Destination rows written across the whole run.
    pub updates: u64,
}

/// Fired after every individual merge.
#[derive(Debug, Clone, Copy)]
pub struct MergeEvent<'a> {
    /// Round in which the merge happened.
    pub round: u32,
    /// Node whose table was sent.
    pub source: &'a NodeId,
    /// Neighbor that merged it.
    pub destination: &'a NodeId,
    /// Weight of the link the table travelled over.
    pub weight: Cost,
    /// Whether the destination's table changed.
    pub changed: bool,
    /// Destinations added or improved by this merge.
    pub updated: &'a [NodeId],
    /// The destination's table after the merge.
    pub table: &'a RoutingTable,
}

/// Everything an observer can see during a run.
#[derive(Debug, Clone, Copy)]
pub enum EngineEvent<'a> {
    /// A node is about to send its table to all of its neighbors.
    Advertise {
        round: u32,
        source: &'a NodeId,
        table: &'a RoutingTable,
    },

    /// A neighbor merged a received table.
    Merge(MergeEvent<'a>),

    /// A full round finished.
    RoundCompleted(RoundSummary),

    /// A round finished without changes; the engine is now terminal.
    Converged(ConvergenceReport),
}

/// Receives [`EngineEvent`]s from a running engine.
pub trait ConvergenceObserver {
    fn on_event(&mut self, event: &EngineEvent<'_>);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ConvergenceObserver for NoopObserver {
    fn on_event(&mut self, _event: &EngineEvent<'_>) {}
}

/// Observer backed by a closure. Build it with [`from_fn`].
pub struct FnObserver<F>(F);

impl<F> ConvergenceObserver for FnObserver<F>
where
    F: FnMut(&EngineEvent<'_>),
{
    fn on_event(&mut self, event: &EngineEvent<'_>) {
        (self.0)(event)
    }
}

/// Wrap a closure as an observer.
pub fn from_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&EngineEvent<'_>),
{
    FnObserver(f)
}
