//! Undirected connected-component decomposition.

use crate::graph::{MystGraph, Traverser};
use crate::types::NodeInfo;

/// Splits the graph into weakly connected components.
pub struct ComponentAnalyzer<'a> {
    graph: &'a MystGraph,
    traverser: Traverser<'a>,
}

impl<'a> ComponentAnalyzer<'a> {
    pub fn new(graph: &'a MystGraph) -> Self {
        Self {
            graph,
            traverser: Traverser::new(graph),
        }
    }

    /// Connected components as sorted ID lists.
    ///
    /// Order: largest first, then lexicographically by member IDs, a strict
    /// prefix sorting before the longer sequence.
    pub fn find_connected_components(&self) -> Vec<Vec<u64>> {
        let node_ids = self.traverser.node_ids();
        let capacity = node_ids.last().map(|&id| id as usize + 1).unwrap_or(0);
        let mut visited = vec![false; capacity];
        let mut components: Vec<Vec<u64>> = Vec::new();

        for id in node_ids {
            if visited[id as usize] {
                continue;
            }
            let component = self.traverser.bfs_component(id);
            for &member in &component {
                if let Some(slot) = visited.get_mut(member as usize) {
                    *slot = true;
                }
            }
            components.push(component);
        }

        // Slice ordering is element-wise with the shorter prefix first
        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        components
    }

    /// The same partition, with display names attached.
    pub fn disconnected_components(&self) -> Vec<Vec<NodeInfo>> {
        self.find_connected_components()
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|id| NodeInfo {
                        id,
                        name: self.graph.display_name(id),
                    })
                    .collect()
            })
            .collect()
    }
}
