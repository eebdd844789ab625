//! Analysis result records.

use std::collections::BTreeMap;

use serde::Serialize;

/// A node reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInfo {
    pub id: u64,
    pub name: String,
}

/// A node together with an in- or out-degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDegreeInfo {
    pub id: u64,
    pub name: String,
    pub degree: usize,
}

/// Shortest path between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathInfo {
    pub from: u64,
    pub to: u64,
    pub distance: f64,
    /// Node IDs, both endpoints included.
    pub path: Vec<u64>,
}

/// A pair of nodes and the path between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePairInfo {
    pub source: NodeInfo,
    pub target: NodeInfo,
    pub distance: f64,
    pub path: Vec<u64>,
}

/// All-pairs table: source -> target -> path.
pub type ShortestPathTable = BTreeMap<u64, BTreeMap<u64, ShortestPathInfo>>;

/// Analysis results for a graph, recomputed by every `process` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphStats {
    // path and connectivity analysis
    pub shortest_paths: ShortestPathTable,
    pub most_separated_nodes: Option<NodePairInfo>,
    pub connected_components: Vec<Vec<u64>>,
    pub disconnected_components: Vec<Vec<NodeInfo>>,

    // node degree information
    pub most_incoming_node: Option<NodeDegreeInfo>,
    pub most_outgoing_node: Option<NodeDegreeInfo>,
    pub nodes_with_no_incoming: Vec<NodeInfo>,
    pub nodes_with_no_outgoing: Vec<NodeInfo>,
    pub isolated_nodes: Vec<NodeInfo>,
    pub nodes_with_self_loops: Vec<NodeInfo>,
}

/// Totals and analysis results owned by a graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    pub total_nodes: usize,
    /// Number of distinct routable (source, target) pairs.
    pub total_edges: usize,
    pub total_cards: usize,
    pub total_groups: usize,
    /// When the stats were last computed (Unix epoch microseconds).
    pub computed_at: Option<u64>,
    pub stats: GraphStats,
}
