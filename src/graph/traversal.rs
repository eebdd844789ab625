//! Deterministic enumeration and breadth-first traversal.

use std::collections::VecDeque;

use crate::types::NodeInfo;

use super::MystGraph;

/// Direction for graph traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow outgoing edges (source -> target).
    Forward,
    /// Follow incoming edges (target <- source).
    Backward,
    /// Follow edges in both directions.
    Both,
}

/// Ordering-stable walks over the routable adjacency.
pub struct Traverser<'a> {
    graph: &'a MystGraph,
}

impl<'a> Traverser<'a> {
    pub fn new(graph: &'a MystGraph) -> Self {
        Self { graph }
    }

    /// All node IDs, ascending.
    pub fn node_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.graph.nodes().iter().map(|n| n.id).collect();
        ids.sort_unstable();
        ids
    }

    /// Neighbor IDs in ascending order. `Both` yields outgoing neighbors
    /// followed by incoming ones, each run sorted.
    pub fn sorted_neighbors(&self, id: u64, direction: TraversalDirection) -> Vec<u64> {
        let mut forward: Vec<u64> = Vec::new();
        let mut backward: Vec<u64> = Vec::new();

        if direction != TraversalDirection::Backward {
            forward.extend(self.graph.successor_ids(id));
            forward.sort_unstable();
        }
        if direction != TraversalDirection::Forward {
            backward.extend(self.graph.predecessor_ids(id));
            backward.sort_unstable();
        }

        forward.extend(backward);
        forward
    }

    /// Undirected BFS from `start_id`. Returns the member IDs sorted ascending.
    ///
    /// Nodes are marked on discovery, and each dequeued node visits its
    /// outgoing neighbors before its incoming ones, both ascending.
    pub fn bfs_component(&self, start_id: u64) -> Vec<u64> {
        let capacity = self
            .graph
            .nodes()
            .iter()
            .map(|n| n.id as usize + 1)
            .max()
            .unwrap_or(0)
            .max(start_id as usize + 1);
        let mut visited = vec![false; capacity];
        let mut component = vec![start_id];
        let mut queue: VecDeque<u64> = VecDeque::new();

        visited[start_id as usize] = true;
        queue.push_back(start_id);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.sorted_neighbors(current, TraversalDirection::Both) {
                let slot = neighbor as usize;
                if slot < visited.len() && !visited[slot] {
                    visited[slot] = true;
                    component.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        component.sort_unstable();
        component
    }

    /// Same walk as [`Traverser::bfs_component`], resolved to display names.
    pub fn bfs_component_infos(&self, start_id: u64) -> Vec<NodeInfo> {
        self.bfs_component(start_id)
            .into_iter()
            .map(|id| NodeInfo {
                id,
                name: self.graph.display_name(id),
            })
            .collect()
    }
}
