//! Shortest paths, waypoint routes and the most separated pair.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use log::{debug, trace};

use crate::config::EngineConfig;
use crate::graph::{MystGraph, Traverser};
use crate::types::{
    MystError, MystResult, NodeInfo, NodePairInfo, ShortestPathInfo, ShortestPathTable,
};

/// Min-heap entry for Dijkstra; ties pop the lowest node ID first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    distance: f64,
    node: u64,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest-path tree over the routable adjacency.
struct ShortestPathTree {
    source: u64,
    distances: HashMap<u64, f64>,
    previous: HashMap<u64, u64>,
}

impl ShortestPathTree {
    /// Dijkstra from `source`. Infinite-weight edges never relax, so nodes only
    /// reachable through backtracking edges stay unreached.
    fn from(graph: &MystGraph, source: u64) -> Self {
        let mut distances: HashMap<u64, f64> = HashMap::new();
        let mut previous: HashMap<u64, u64> = HashMap::new();
        let mut heap = BinaryHeap::new();

        distances.insert(source, 0.0);
        heap.push(HeapEntry {
            distance: 0.0,
            node: source,
        });

        while let Some(HeapEntry { distance, node }) = heap.pop() {
            if distances.get(&node).is_some_and(|&best| distance > best) {
                continue;
            }
            for (neighbor, weight) in graph.weighted_successors(node) {
                if !weight.is_finite() {
                    continue;
                }
                let candidate = distance + weight;
                let improves = distances
                    .get(&neighbor)
                    .map_or(true, |&known| candidate < known);
                if improves {
                    distances.insert(neighbor, candidate);
                    previous.insert(neighbor, node);
                    heap.push(HeapEntry {
                        distance: candidate,
                        node: neighbor,
                    });
                }
            }
        }

        Self {
            source,
            distances,
            previous,
        }
    }

    /// Path (both endpoints included) and distance to `target`, if reached.
    fn path_to(&self, target: u64) -> Option<(Vec<u64>, f64)> {
        let distance = *self.distances.get(&target)?;
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = *self.previous.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some((path, distance))
    }
}

/// Depth-first state for enumerating equal-weight paths to one target.
struct EqualWeightSearch {
    to: u64,
    target_weight: f64,
    /// Nodes on the current path, indexed by ID.
    on_path: Vec<bool>,
    path: Vec<u64>,
    found: Vec<Vec<u64>>,
}

/// Path finding and separation analysis.
pub struct PathAnalyzer<'a> {
    graph: &'a MystGraph,
    traverser: Traverser<'a>,
    config: EngineConfig,
}

impl<'a> PathAnalyzer<'a> {
    pub fn new(graph: &'a MystGraph) -> Self {
        Self::with_config(graph, EngineConfig::default())
    }

    pub fn with_config(graph: &'a MystGraph, config: EngineConfig) -> Self {
        Self {
            graph,
            traverser: Traverser::new(graph),
            config,
        }
    }

    /// Shortest paths between every ordered pair of distinct nodes.
    ///
    /// A reachable target is kept only if no hop along its path has a
    /// backtracking or disabled edge in the side table.
    pub fn compute_all_shortest_paths(&self) -> ShortestPathTable {
        let node_ids = self.traverser.node_ids();
        let mut table: ShortestPathTable = BTreeMap::new();

        for &source in &node_ids {
            let tree = ShortestPathTree::from(self.graph, source);
            let row = table.entry(source).or_default();

            for &target in &node_ids {
                if source == target {
                    continue;
                }
                let Some((path, distance)) = tree.path_to(target) else {
                    continue;
                };
                if !self.is_navigable_path(&path) {
                    trace!("rejecting path {} -> {}: crosses a non-navigable edge", source, target);
                    continue;
                }
                row.insert(
                    target,
                    ShortestPathInfo {
                        from: source,
                        to: target,
                        distance,
                        path,
                    },
                );
            }
        }

        debug!(
            "all-pairs table holds {} paths",
            table.values().map(|row| row.len()).sum::<usize>()
        );
        table
    }

    /// Shortest path from `from` to `to` passing through `waypoints` in order.
    pub fn compute_shortest_path(
        &self,
        from: u64,
        to: u64,
        waypoints: &[u64],
    ) -> MystResult<ShortestPathInfo> {
        if !self.graph.contains_node(from) {
            return Err(MystError::NodeNotFound(from));
        }
        if !self.graph.contains_node(to) {
            return Err(MystError::NodeNotFound(to));
        }

        if waypoints.is_empty() {
            return self.single_pair(from, to);
        }

        let mut path: Vec<u64> = Vec::new();
        let mut distance = 0.0;
        let mut current = from;

        for &waypoint in waypoints {
            if !self.graph.contains_node(waypoint) {
                return Err(MystError::NodeNotFound(waypoint));
            }
            let segment = self.single_pair(current, waypoint)?;
            // The junction node opens the next segment
            path.extend_from_slice(&segment.path[..segment.path.len() - 1]);
            distance += segment.distance;
            current = waypoint;
        }

        let last = self.single_pair(current, to)?;
        path.extend_from_slice(&last.path);
        distance += last.distance;

        Ok(ShortestPathInfo {
            from,
            to,
            distance,
            path,
        })
    }

    fn single_pair(&self, from: u64, to: u64) -> MystResult<ShortestPathInfo> {
        let tree = ShortestPathTree::from(self.graph, from);
        let (mut path, distance) = tree
            .path_to(to)
            .filter(|(_, d)| d.is_finite())
            .ok_or(MystError::NoPath { from, to })?;

        if self.config.break_path_ties && path.len() > 2 {
            if let Some(smallest) = self.find_all_shortest_paths(from, to, distance).into_iter().min() {
                path = smallest;
            }
        }

        Ok(ShortestPathInfo {
            from,
            to,
            distance,
            path,
        })
    }

    /// Every simple path from `from` to `to` whose weight equals
    /// `target_weight`, never crossing a backtracking or disabled pair.
    /// Paths come out in lexicographic order.
    pub fn find_all_shortest_paths(&self, from: u64, to: u64, target_weight: f64) -> Vec<Vec<u64>> {
        let capacity = self.graph.node_count().max(from as usize + 1);
        let mut search = EqualWeightSearch {
            to,
            target_weight,
            on_path: vec![false; capacity],
            path: vec![from],
            found: Vec::new(),
        };
        self.explore(&mut search, from, 0.0);
        search.found
    }

    fn explore(&self, search: &mut EqualWeightSearch, current: u64, weight: f64) {
        let tolerance = self.config.weight_tolerance;

        if current == search.to {
            if (weight - search.target_weight).abs() < tolerance {
                search.found.push(search.path.clone());
            }
            return;
        }
        if weight > search.target_weight {
            return;
        }

        search.on_path[current as usize] = true;

        for (neighbor, edge_weight) in self.graph.weighted_successors(current) {
            if search.on_path.get(neighbor as usize).copied().unwrap_or(false) {
                continue;
            }
            if self.graph.is_backtracking_edge(current, neighbor)
                || self.graph.is_disabled_edge(current, neighbor)
            {
                continue;
            }
            if weight + edge_weight > search.target_weight + tolerance {
                continue;
            }
            search.path.push(neighbor);
            self.explore(search, neighbor, weight + edge_weight);
            search.path.pop();
        }

        search.on_path[current as usize] = false;
    }

    /// The pair with the largest finite shortest-path distance in `table`.
    ///
    /// Among equally distant pairs the one whose endpoints have the lowest
    /// combined in+out degree wins; remaining ties keep the first pair met.
    pub fn find_most_separated_nodes(&self, table: &ShortestPathTable) -> Option<NodePairInfo> {
        if self.graph.node_count() < 2 {
            return None;
        }

        let mut max_distance = f64::NEG_INFINITY;
        let mut candidates: Vec<&ShortestPathInfo> = Vec::new();

        for info in table.values().flat_map(|row| row.values()) {
            if !info.distance.is_finite() || info.distance < max_distance {
                continue;
            }
            if info.distance > max_distance {
                max_distance = info.distance;
                candidates.clear();
            }
            candidates.push(info);
        }

        let degree = |id: u64| self.graph.in_degree(id) + self.graph.out_degree(id);
        let mut best = *candidates.first()?;
        let mut best_score = degree(best.from) + degree(best.to);
        for &candidate in candidates.iter().skip(1) {
            let score = degree(candidate.from) + degree(candidate.to);
            if score < best_score {
                best_score = score;
                best = candidate;
            }
        }

        Some(NodePairInfo {
            source: self.info(best.from),
            target: self.info(best.to),
            distance: best.distance,
            path: best.path.clone(),
        })
    }

    /// Path between the most separated nodes, when they are actually apart.
    pub fn most_separated_path(&self, table: &ShortestPathTable) -> Option<Vec<u64>> {
        self.find_most_separated_nodes(table)
            .filter(|pair| pair.distance > 0.0 && !pair.path.is_empty())
            .map(|pair| pair.path)
    }

    fn is_navigable_path(&self, path: &[u64]) -> bool {
        path.windows(2).all(|hop| {
            self.graph
                .get_all_edges(hop[0], hop[1])
                .map_or(true, |edges| edges.iter().all(|e| e.is_navigable()))
        })
    }

    fn info(&self, id: u64) -> NodeInfo {
        NodeInfo {
            id,
            name: self.graph.display_name(id),
        }
    }
}
