//! Core graph structure: nodes, routable adjacency and the full edge side table.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use log::{debug, trace};

use crate::types::{
    Edge, EdgeAttribute, Metadata, MystError, MystResult, Node, NodeAttribute,
    BACKTRACKING_EDGE_WEIGHT, DEFAULT_EDGE_WEIGHT,
};

/// The in-memory navigation multigraph.
///
/// Two edge views are kept side by side. The routable adjacency holds one
/// weighted entry per (source, target) pair and is what degree, connectivity
/// and shortest-path computations read. The side table holds every distinct
/// edge, disabled ones included, and answers attribute queries.
pub struct MystGraph {
    /// All nodes, indexed by ID.
    nodes: Vec<Node>,
    /// Name -> ID.
    name_index: HashMap<String, u64>,
    /// Every edge handed to the graph, in insertion order (duplicates included).
    edges: Vec<Edge>,
    /// Routable adjacency: source_id -> target_id -> weight.
    outgoing: HashMap<u64, BTreeMap<u64, f64>>,
    /// Reverse routable adjacency: target_id -> source_ids.
    incoming: HashMap<u64, BTreeSet<u64>>,
    /// Side table: (source_id, target_id) -> distinct edges in insertion order.
    edge_map: HashMap<(u64, u64), Vec<Edge>>,
    /// Next available node ID.
    next_id: u64,
    /// Totals and analysis results.
    metadata: Metadata,
}

impl MystGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            name_index: HashMap::new(),
            edges: Vec::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            edge_map: HashMap::new(),
            next_id: 0,
            metadata: Metadata::default(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            name_index: HashMap::with_capacity(node_count),
            edges: Vec::with_capacity(edge_count),
            outgoing: HashMap::with_capacity(node_count),
            incoming: HashMap::with_capacity(node_count),
            edge_map: HashMap::with_capacity(edge_count),
            next_id: 0,
            metadata: Metadata::default(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct routable (source, target) pairs.
    pub fn routable_edge_count(&self) -> usize {
        self.outgoing.values().map(|targets| targets.len()).sum()
    }

    /// Number of edges handed to the graph, duplicates and disabled edges included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get all nodes (immutable slice, ascending ID).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Get every edge handed to the graph, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Totals and last analysis results.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Whether a node with this ID exists.
    pub fn contains_node(&self, id: u64) -> bool {
        self.get_node(id).is_some()
    }

    /// Get a node by ID.
    pub fn get_node(&self, id: u64) -> Option<&Node> {
        // IDs are dense and assigned in insertion order
        self.nodes.get(id as usize).filter(|n| n.id == id)
    }

    fn get_node_mut(&mut self, id: u64) -> Option<&mut Node> {
        self.nodes.get_mut(id as usize).filter(|n| n.id == id)
    }

    /// Add a node, returns the assigned ID.
    pub fn add_node(&mut self, mut node: Node) -> MystResult<u64> {
        if self.name_index.contains_key(&node.name) {
            return Err(MystError::AlreadyExists(node.name));
        }

        let id = self.next_id;
        self.next_id += 1;
        node.id = id;

        // Attributes are a set
        let mut seen = HashSet::new();
        node.attributes.retain(|a| seen.insert(*a));

        trace!("added node {} as {}", node.name, id);
        self.name_index.insert(node.name.clone(), id);
        self.nodes.push(node);

        Ok(id)
    }

    /// Add an edge to the routable adjacency with an explicit weight, and to the
    /// side table unless an identical edge is already recorded for the pair.
    ///
    /// When several routable edges share a pair, the pair keeps the largest
    /// weight, so a single backtracking edge makes the whole pair unroutable.
    /// Weights must be non-negative; `+inf` is accepted.
    pub fn add_edge(&mut self, edge: Edge, weight: f64) -> MystResult<()> {
        self.check_endpoints(&edge)?;
        if weight.is_nan() || weight < 0.0 {
            return Err(MystError::InvalidInput(format!(
                "edge {} -> {} has invalid weight {}",
                edge.source_id, edge.target_id, weight
            )));
        }
        self.edges.push(edge.clone());

        let slot = self
            .outgoing
            .entry(edge.source_id)
            .or_default()
            .entry(edge.target_id)
            .or_insert(weight);
        if weight > *slot {
            *slot = weight;
        }
        self.incoming
            .entry(edge.target_id)
            .or_default()
            .insert(edge.source_id);

        self.record_edge(edge);
        Ok(())
    }

    /// Add an edge, choosing its routability from its attributes.
    ///
    /// Disabled edges go to the side table only, backtracking edges are routed
    /// at infinite weight, everything else at unit weight.
    pub fn add_edge_with_attributes(&mut self, edge: Edge) -> MystResult<()> {
        if edge.has_attribute(EdgeAttribute::Disabled) {
            self.check_endpoints(&edge)?;
            self.edges.push(edge.clone());
            self.record_edge(edge);
            Ok(())
        } else if edge.has_attribute(EdgeAttribute::Backtracking) {
            self.add_edge(edge, BACKTRACKING_EDGE_WEIGHT)
        } else {
            self.add_edge(edge, DEFAULT_EDGE_WEIGHT)
        }
    }

    fn check_endpoints(&self, edge: &Edge) -> MystResult<()> {
        if !self.contains_node(edge.source_id) {
            return Err(MystError::NodeNotFound(edge.source_id));
        }
        if !self.contains_node(edge.target_id) {
            return Err(MystError::NodeNotFound(edge.target_id));
        }
        Ok(())
    }

    fn record_edge(&mut self, edge: Edge) {
        let stored = self
            .edge_map
            .entry((edge.source_id, edge.target_id))
            .or_default();
        if stored.iter().any(|existing| existing.is_duplicate_of(&edge)) {
            debug!(
                "skipping duplicate edge {} -> {} (transitivity {})",
                edge.source_id, edge.target_id, edge.transitivity_id
            );
            return;
        }
        stored.push(edge);
    }

    /// All distinct edges from source to target, in insertion order.
    pub fn get_all_edges(&self, source_id: u64, target_id: u64) -> Option<&[Edge]> {
        self.edge_map
            .get(&(source_id, target_id))
            .filter(|edges| !edges.is_empty())
            .map(|edges| edges.as_slice())
    }

    /// Attributes of every edge from source to target, concatenated.
    pub fn edge_attributes(&self, source_id: u64, target_id: u64) -> Option<Vec<EdgeAttribute>> {
        self.get_all_edges(source_id, target_id).map(|edges| {
            edges
                .iter()
                .flat_map(|e| e.attributes.iter().copied())
                .collect()
        })
    }

    /// Add an attribute to every stored copy of the (source, target) edge.
    /// Returns whether any copy changed.
    pub fn add_edge_attribute(
        &mut self,
        source_id: u64,
        target_id: u64,
        attribute: EdgeAttribute,
    ) -> bool {
        let mut changed = false;

        for edge in self
            .edges
            .iter_mut()
            .filter(|e| e.source_id == source_id && e.target_id == target_id)
        {
            if !edge.has_attribute(attribute) {
                edge.attributes.push(attribute);
                changed = true;
            }
        }

        if let Some(stored) = self.edge_map.get_mut(&(source_id, target_id)) {
            for edge in stored.iter_mut() {
                if !edge.has_attribute(attribute) {
                    edge.attributes.push(attribute);
                    changed = true;
                }
            }
        }

        changed
    }

    /// Add an attribute to a node. Returns whether it was added.
    pub fn add_node_attribute(&mut self, id: u64, attribute: NodeAttribute) -> MystResult<bool> {
        let node = self.get_node_mut(id).ok_or(MystError::NodeNotFound(id))?;
        Ok(node.add_attribute(attribute))
    }

    /// Whether any edge from source to target carries the backtracking attribute.
    pub fn is_backtracking_edge(&self, source_id: u64, target_id: u64) -> bool {
        self.any_edge_has(source_id, target_id, EdgeAttribute::Backtracking)
    }

    /// Whether any edge from source to target carries the disabled attribute.
    pub fn is_disabled_edge(&self, source_id: u64, target_id: u64) -> bool {
        self.any_edge_has(source_id, target_id, EdgeAttribute::Disabled)
    }

    fn any_edge_has(&self, source_id: u64, target_id: u64, attribute: EdgeAttribute) -> bool {
        self.get_all_edges(source_id, target_id)
            .map(|edges| edges.iter().any(|e| e.has_attribute(attribute)))
            .unwrap_or(false)
    }

    /// Whether a directed edge exists between two named nodes, routable or not.
    pub fn has_edge(&self, from_name: &str, to_name: &str) -> bool {
        match (self.name_index.get(from_name), self.name_index.get(to_name)) {
            (Some(&from), Some(&to)) => {
                self.has_edge_from_to(from, to) || self.get_all_edges(from, to).is_some()
            }
            _ => false,
        }
    }

    /// Whether the routable adjacency has an edge from `u` to `v`.
    pub fn has_edge_from_to(&self, u: u64, v: u64) -> bool {
        self.outgoing
            .get(&u)
            .map(|targets| targets.contains_key(&v))
            .unwrap_or(false)
    }

    /// Whether the routable adjacency has an edge between `x` and `y` in either direction.
    pub fn has_edge_between(&self, x: u64, y: u64) -> bool {
        self.has_edge_from_to(x, y) || self.has_edge_from_to(y, x)
    }

    /// Routable weight of the (u, v) pair.
    pub fn edge_weight(&self, u: u64, v: u64) -> Option<f64> {
        self.outgoing.get(&u).and_then(|targets| targets.get(&v)).copied()
    }

    /// Routable successors of a node with their weights, ascending by ID.
    pub fn weighted_successors(&self, id: u64) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(&t, &w)| (t, w)))
    }

    /// Routable successor IDs, ascending.
    pub fn successor_ids(&self, id: u64) -> impl Iterator<Item = u64> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flat_map(|targets| targets.keys().copied())
    }

    /// Routable predecessor IDs, ascending.
    pub fn predecessor_ids(&self, id: u64) -> impl Iterator<Item = u64> + '_ {
        self.incoming
            .get(&id)
            .into_iter()
            .flat_map(|sources| sources.iter().copied())
    }

    /// Number of distinct routable predecessors.
    pub fn in_degree(&self, id: u64) -> usize {
        self.incoming.get(&id).map(|s| s.len()).unwrap_or(0)
    }

    /// Number of distinct routable successors.
    pub fn out_degree(&self, id: u64) -> usize {
        self.outgoing.get(&id).map(|t| t.len()).unwrap_or(0)
    }

    /// Look up the ID registered for a name.
    pub fn node_id(&self, name: &str) -> MystResult<u64> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| MystError::UnknownName(name.to_string()))
    }

    /// Look up the name of a node.
    pub fn node_name(&self, id: u64) -> MystResult<&str> {
        self.get_node(id)
            .map(|n| n.name.as_str())
            .ok_or(MystError::NodeNotFound(id))
    }

    /// Look up the group (stack) a node belongs to.
    pub fn node_group(&self, id: u64) -> MystResult<&str> {
        self.get_node(id)
            .map(|n| n.group.as_str())
            .ok_or(MystError::NodeNotFound(id))
    }

    /// Name for display; never fails.
    pub fn display_name(&self, id: u64) -> String {
        match self.get_node(id) {
            Some(node) => node.name.clone(),
            None => format!("Node {}", id),
        }
    }

    /// Convert a path of IDs to display names.
    pub fn format_path_as_names(&self, path: &[u64]) -> Vec<String> {
        path.iter().map(|&id| self.display_name(id)).collect()
    }

    /// All node names, ascending by ID.
    pub fn all_node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Names of the routable successors of a node, ascending by ID.
    pub fn successors(&self, name: &str) -> MystResult<Vec<&str>> {
        let id = self.node_id(name)?;
        Ok(self
            .successor_ids(id)
            .filter_map(|s| self.node_name(s).ok())
            .collect())
    }

    /// Names of the routable predecessors of a node, ascending by ID.
    pub fn predecessors(&self, name: &str) -> MystResult<Vec<&str>> {
        let id = self.node_id(name)?;
        Ok(self
            .predecessor_ids(id)
            .filter_map(|p| self.node_name(p).ok())
            .collect())
    }

    /// Recompute node, edge, card and group totals.
    pub fn refresh_totals(&mut self) {
        let groups: HashSet<&str> = self.nodes.iter().map(|n| n.group.as_str()).collect();
        let total_cards = self
            .nodes
            .iter()
            .filter(|n| n.has_attribute(NodeAttribute::Card))
            .count();

        self.metadata.total_groups = groups.len();
        self.metadata.total_cards = total_cards;
        self.metadata.total_nodes = self.nodes.len();
        self.metadata.total_edges = self.routable_edge_count();
    }
}

impl Default for MystGraph {
    fn default() -> Self {
        Self::new()
    }
}
