//! dvsim routing: distance-vector tables and the engine that converges them.
//!
//! This crate provides:
//! - [`RoutingTable`]: one node's distance vector and the merge rule applied
//!   when a neighbor's vector arrives.
//! - [`ConvergenceEngine`]: the round loop that exchanges tables between
//!   neighbors until no table changes.
//! - [`EngineEvent`] and [`ConvergenceObserver`]: per-merge and per-round
//!   observation points for step-by-step tracing.

pub mod engine;
pub mod error;
pub mod events;
pub mod table;

// Re-exports for convenience.
pub use engine::{ConvergenceEngine, EngineConfig, EngineState};
pub use error::RoutingError;
pub use events::{
    from_fn, ConvergenceObserver, ConvergenceReport, EngineEvent, FnObserver, MergeEvent,
    NoopObserver, RoundSummary,
};
pub use table::{MergeOutcome, NextHop, RouteEntry, RoutingTable};
