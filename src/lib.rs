//! mystgraph: deterministic construction and analysis of navigation graphs.
//!
//! Locations (cards grouped in stacks) are nodes; transitions between them are
//! attributed edges. The engine computes degree extremes, source/sink/isolated
//! classification, connected components, shortest paths (with mandatory
//! waypoints) and the most separated pair, with identical output on every run.

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::{load_config, EngineConfig};
pub use engine::{
    AnalysisEngine, Classification, ComponentAnalyzer, NodeAnalysis, NodeAnalyzer, PathAnalyzer,
};
pub use format::{InputReader, ReportWriter};
pub use graph::{GraphBuilder, GraphInput, MystGraph, TraversalDirection, Traverser};
pub use types::{
    now_micros, Edge, EdgeAttribute, EdgeInput, GraphStats, Metadata, MystError, MystResult, Node,
    NodeAttribute, NodeBuilder, NodeDegreeInfo, NodeInfo, NodePairInfo, ShortestPathInfo,
    ShortestPathTable, BACKTRACKING_EDGE_WEIGHT, DEFAULT_EDGE_WEIGHT,
};
