//! Top-level analysis run: nodes, then components, then paths.

use log::info;

use crate::config::EngineConfig;
use crate::graph::MystGraph;
use crate::types::{now_micros, GraphStats, MystResult, ShortestPathInfo};

use super::{ComponentAnalyzer, NodeAnalyzer, PathAnalyzer};

/// Runs every analyzer against a graph and stores the results in its metadata.
pub struct AnalysisEngine {
    config: EngineConfig,
}

impl AnalysisEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze the graph on three dimensions: nodes, components, and paths.
    ///
    /// Node classifications are written back to the graph before the
    /// component and path passes run. Previous results are replaced.
    pub fn process<'g>(&self, graph: &'g mut MystGraph) -> MystResult<&'g GraphStats> {
        // nodes
        let nodes = NodeAnalyzer::new(graph).analyze();
        let written = nodes.classification.apply(graph)?;
        info!("node analysis wrote {} attributes", written);

        let mut stats = GraphStats {
            most_incoming_node: nodes.most_incoming,
            most_outgoing_node: nodes.most_outgoing,
            nodes_with_no_incoming: nodes.sources,
            nodes_with_no_outgoing: nodes.sinks,
            isolated_nodes: nodes.isolated,
            nodes_with_self_loops: nodes.self_loops,
            ..GraphStats::default()
        };

        // components
        let components = ComponentAnalyzer::new(graph);
        stats.connected_components = components.find_connected_components();
        stats.disconnected_components = components.disconnected_components();
        info!("found {} connected components", stats.connected_components.len());

        // paths
        if self.config.compute_all_pairs {
            let paths = PathAnalyzer::with_config(graph, self.config.clone());
            stats.shortest_paths = paths.compute_all_shortest_paths();
            stats.most_separated_nodes = paths.find_most_separated_nodes(&stats.shortest_paths);
            if let Some(pair) = &stats.most_separated_nodes {
                info!(
                    "most separated nodes: {} -> {} ({})",
                    pair.source.name, pair.target.name, pair.distance
                );
            }
        }

        graph.refresh_totals();
        let metadata = graph.metadata_mut();
        metadata.computed_at = Some(now_micros());
        metadata.stats = stats;

        Ok(&graph.metadata().stats)
    }

    /// Shortest path between two nodes through optional waypoints.
    pub fn shortest_path(
        &self,
        graph: &MystGraph,
        from: u64,
        to: u64,
        waypoints: &[u64],
    ) -> MystResult<ShortestPathInfo> {
        PathAnalyzer::with_config(graph, self.config.clone()).compute_shortest_path(from, to, waypoints)
    }

    /// Same as [`AnalysisEngine::shortest_path`], addressing nodes by name.
    pub fn shortest_path_by_name(
        &self,
        graph: &MystGraph,
        from: &str,
        to: &str,
        waypoints: &[&str],
    ) -> MystResult<ShortestPathInfo> {
        let from_id = graph.node_id(from)?;
        let to_id = graph.node_id(to)?;
        let waypoint_ids = waypoints
            .iter()
            .map(|name| graph.node_id(name))
            .collect::<MystResult<Vec<u64>>>()?;
        self.shortest_path(graph, from_id, to_id, &waypoint_ids)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
