//! Fluent API for building MystGraph instances.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::types::{
    Edge, EdgeAttribute, EdgeInput, MystError, MystResult, Node, NodeAttribute, NodeBuilder,
};

use super::MystGraph;

/// Resolved node and edge lists as produced by ingestion.
///
/// Node order determines the assigned IDs. Edges reference nodes by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphInput {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeInput>,
}

impl GraphInput {
    /// Build a graph from these lists. No partial graph is returned on error.
    pub fn build(self) -> MystResult<MystGraph> {
        if self.nodes.is_empty() {
            return Err(MystError::InvalidInput("node list cannot be empty".into()));
        }

        let mut graph = MystGraph::with_capacity(self.nodes.len(), self.edges.len());

        for node in self.nodes {
            graph.add_node(node)?;
        }

        for input in self.edges {
            let source_id = graph.node_id(&input.source)?;
            let target_id = graph.node_id(&input.target)?;
            let edge = Edge::with_transitivity(
                source_id,
                target_id,
                input.attributes,
                input.transitivity_id,
            );
            graph.add_edge_with_attributes(edge)?;
        }

        graph.refresh_totals();
        info!(
            "built graph: {} nodes, {} routable edges ({} input edges)",
            graph.node_count(),
            graph.routable_edge_count(),
            graph.edge_count()
        );

        Ok(graph)
    }
}

/// Fluent builder for constructing a MystGraph.
pub struct GraphBuilder {
    input: GraphInput,
}

impl GraphBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            input: GraphInput::default(),
        }
    }

    /// Add a prepared node.
    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.input.nodes.push(node);
        self
    }

    /// Add a card belonging to a group.
    pub fn add_card(&mut self, name: &str, group: &str) -> &mut Self {
        self.add_node(
            NodeBuilder::new(name, group)
                .attribute(NodeAttribute::Card)
                .build(),
        )
    }

    /// Add a stack node (the group itself is its own group).
    pub fn add_stack(&mut self, name: &str) -> &mut Self {
        self.add_node(
            NodeBuilder::new(name, name)
                .attribute(NodeAttribute::Stack)
                .build(),
        )
    }

    /// Add a virtual node.
    pub fn add_virtual(&mut self, name: &str, group: &str) -> &mut Self {
        self.add_node(
            NodeBuilder::new(name, group)
                .attribute(NodeAttribute::Virtual)
                .build(),
        )
    }

    /// Add an edge between two named nodes.
    pub fn link(&mut self, source: &str, target: &str, attributes: &[EdgeAttribute]) -> &mut Self {
        self.input
            .edges
            .push(EdgeInput::new(source, target, attributes.to_vec()));
        self
    }

    /// Add an edge belonging to a transitivity group.
    pub fn link_transitive(
        &mut self,
        source: &str,
        target: &str,
        attributes: &[EdgeAttribute],
        transitivity_id: i64,
    ) -> &mut Self {
        self.input.edges.push(
            EdgeInput::new(source, target, attributes.to_vec()).transitivity(transitivity_id),
        );
        self
    }

    /// Add a backtracking edge.
    pub fn backtrack(&mut self, source: &str, target: &str) -> &mut Self {
        self.link(source, target, &[EdgeAttribute::Backtracking])
    }

    /// Add a disabled edge.
    pub fn disabled(&mut self, source: &str, target: &str) -> &mut Self {
        self.link(source, target, &[EdgeAttribute::Disabled])
    }

    /// Build the final MystGraph.
    pub fn build(&mut self) -> MystResult<MystGraph> {
        let input = std::mem::take(&mut self.input);
        debug!(
            "building graph from {} nodes and {} edges",
            input.nodes.len(),
            input.edges.len()
        );
        input.build()
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
