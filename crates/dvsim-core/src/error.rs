use crate::types::NodeId;

/// Errors raised while building or querying a topology.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("negative weight {weight} on edge {a} - {b}")]
    NegativeWeight { a: NodeId, b: NodeId, weight: i64 },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
