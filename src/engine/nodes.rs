//! Node-level analysis: degree extremes and source/sink/isolated/self-loop classification.

use log::debug;

use crate::graph::{MystGraph, Traverser};
use crate::types::{EdgeAttribute, MystResult, NodeAttribute, NodeDegreeInfo, NodeInfo};

/// Attribute write-backs produced by an analysis pass.
///
/// Analyzers only read the graph; the collected entries are applied in a
/// separate step so later consumers can query attributes instead of
/// recomputing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// (node_id, attribute) pairs to add.
    pub node_attributes: Vec<(u64, NodeAttribute)>,
    /// (source_id, target_id, attribute) triples to add.
    pub edge_attributes: Vec<(u64, u64, EdgeAttribute)>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.node_attributes.is_empty() && self.edge_attributes.is_empty()
    }

    /// Apply every entry to the graph. Returns the number of attributes that were new.
    pub fn apply(&self, graph: &mut MystGraph) -> MystResult<usize> {
        let mut added = 0;
        for &(id, attribute) in &self.node_attributes {
            if graph.add_node_attribute(id, attribute)? {
                added += 1;
            }
        }
        for &(source, target, attribute) in &self.edge_attributes {
            if graph.add_edge_attribute(source, target, attribute) {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// Everything the node analyzer reports in one pass.
#[derive(Debug, Clone, Default)]
pub struct NodeAnalysis {
    pub most_incoming: Option<NodeDegreeInfo>,
    pub most_outgoing: Option<NodeDegreeInfo>,
    pub sources: Vec<NodeInfo>,
    pub sinks: Vec<NodeInfo>,
    pub isolated: Vec<NodeInfo>,
    pub self_loops: Vec<NodeInfo>,
    pub classification: Classification,
}

/// Degree and classification scans over all nodes, ascending by ID.
pub struct NodeAnalyzer<'a> {
    graph: &'a MystGraph,
    traverser: Traverser<'a>,
}

impl<'a> NodeAnalyzer<'a> {
    pub fn new(graph: &'a MystGraph) -> Self {
        Self {
            graph,
            traverser: Traverser::new(graph),
        }
    }

    /// Run every scan. Each is an independent full pass.
    pub fn analyze(&self) -> NodeAnalysis {
        let mut classification = Classification::new();
        let most_incoming = self.find_node_with_most_incoming_edges();
        let most_outgoing = self.find_node_with_most_outgoing_edges();
        let sources = self.find_sources(&mut classification);
        let sinks = self.find_sinks(&mut classification);
        let isolated = self.find_isolated_nodes(&mut classification);
        let self_loops = self.find_nodes_with_self_loops(&mut classification);

        debug!(
            "node analysis: {} sources, {} sinks, {} isolated, {} self-loops",
            sources.len(),
            sinks.len(),
            isolated.len(),
            self_loops.len()
        );

        NodeAnalysis {
            most_incoming,
            most_outgoing,
            sources,
            sinks,
            isolated,
            self_loops,
            classification,
        }
    }

    /// Node with the most routable predecessors; lowest ID wins ties.
    pub fn find_node_with_most_incoming_edges(&self) -> Option<NodeDegreeInfo> {
        self.max_degree(|id| self.graph.in_degree(id))
    }

    /// Node with the most routable successors; lowest ID wins ties.
    pub fn find_node_with_most_outgoing_edges(&self) -> Option<NodeDegreeInfo> {
        self.max_degree(|id| self.graph.out_degree(id))
    }

    fn max_degree<F>(&self, degree_of: F) -> Option<NodeDegreeInfo>
    where
        F: Fn(u64) -> usize,
    {
        let mut best: Option<NodeDegreeInfo> = None;
        for id in self.traverser.node_ids() {
            let degree = degree_of(id);
            if best.as_ref().map_or(true, |b| degree > b.degree) {
                best = Some(NodeDegreeInfo {
                    id,
                    name: self.graph.display_name(id),
                    degree,
                });
            }
        }
        best
    }

    /// Nodes with no routable incoming edge and no backtracking edge into them.
    pub fn find_sources(&self, writeback: &mut Classification) -> Vec<NodeInfo> {
        let mut result = Vec::new();
        for id in self.traverser.node_ids() {
            if self.graph.in_degree(id) == 0 && !self.is_backtracking_target(id) {
                writeback.node_attributes.push((id, NodeAttribute::Source));
                result.push(self.info(id));
            }
        }
        result
    }

    /// Nodes with no routable outgoing edge and no backtracking edge into them.
    ///
    /// A backtracking edge landing on the node means the player can return
    /// there and leave again, so it does not count as a dead end.
    pub fn find_sinks(&self, writeback: &mut Classification) -> Vec<NodeInfo> {
        let mut result = Vec::new();
        for id in self.traverser.node_ids() {
            if self.graph.out_degree(id) == 0 && !self.is_backtracking_target(id) {
                writeback.node_attributes.push((id, NodeAttribute::Sink));
                result.push(self.info(id));
            }
        }
        result
    }

    /// Nodes with no routable edge at all and no backtracking edge touching them.
    pub fn find_isolated_nodes(&self, writeback: &mut Classification) -> Vec<NodeInfo> {
        let mut result = Vec::new();
        for id in self.traverser.node_ids() {
            if self.graph.in_degree(id) != 0 || self.graph.out_degree(id) != 0 {
                continue;
            }
            let touched_by_backtracking = self.graph.edges().iter().any(|e| {
                (e.source_id == id || e.target_id == id)
                    && e.has_attribute(EdgeAttribute::Backtracking)
            });
            if !touched_by_backtracking {
                writeback.node_attributes.push((id, NodeAttribute::Isolated));
                result.push(self.info(id));
            }
        }
        result
    }

    /// Nodes with a routable edge to themselves. The loop edge gets tagged.
    pub fn find_nodes_with_self_loops(&self, writeback: &mut Classification) -> Vec<NodeInfo> {
        let mut result = Vec::new();
        for id in self.traverser.node_ids() {
            if self.graph.has_edge_from_to(id, id) {
                writeback
                    .edge_attributes
                    .push((id, id, EdgeAttribute::SelfReference));
                result.push(self.info(id));
            }
        }
        result
    }

    // Scans the full edge list, disabled edges included.
    fn is_backtracking_target(&self, id: u64) -> bool {
        self.graph
            .edges()
            .iter()
            .any(|e| e.target_id == id && e.has_attribute(EdgeAttribute::Backtracking))
    }

    fn info(&self, id: u64) -> NodeInfo {
        NodeInfo {
            id,
            name: self.graph.display_name(id),
        }
    }
}
