use dvsim_core::{CoreError, NodeId};

/// Errors that can occur within the routing layer.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("no routing table for node {0}")]
    UnknownNode(NodeId),

    #[error("topology error: {0}")]
    Topology(#[from] CoreError),

    #[error("network did not converge within {max_rounds} rounds")]
    RoundLimitExceeded { max_rounds: u32 },
}
