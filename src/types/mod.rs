//! All data types for the mystgraph library.

pub mod edge;
pub mod error;
pub mod node;
pub mod stats;

pub use edge::{Edge, EdgeAttribute, EdgeInput};
pub use error::{MystError, MystResult};
pub use node::{Node, NodeAttribute, NodeBuilder};
pub use stats::{
    GraphStats, Metadata, NodeDegreeInfo, NodeInfo, NodePairInfo, ShortestPathInfo,
    ShortestPathTable,
};

/// Weight of an ordinary routable edge.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Weight of a backtracking edge: present for connectivity, never a viable hop.
pub const BACKTRACKING_EDGE_WEIGHT: f64 = f64::INFINITY;

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
