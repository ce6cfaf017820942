//! dvsim core: node identifiers, weighted edges, and the network topology
//! the routing simulation runs over.

pub mod error;
pub mod preset;
pub mod topology;
pub mod types;

pub use error::CoreError;
pub use preset::Preset;
pub use topology::Topology;
pub use types::{Cost, Edge, Link, NodeId};
