//! Phase 1 tests: graph store, construction and lookups.

use std::io::Cursor;

use mystgraph::format::InputReader;
use mystgraph::graph::{GraphBuilder, GraphInput, MystGraph};
use mystgraph::types::edge::{Edge, EdgeAttribute, EdgeInput};
use mystgraph::types::error::MystError;
use mystgraph::types::node::{NodeAttribute, NodeBuilder};

// ==================== Helper ====================

fn card(name: &str) -> mystgraph::Node {
    NodeBuilder::new(name, "Myst")
        .attribute(NodeAttribute::Card)
        .build()
}

fn three_nodes() -> MystGraph {
    let mut graph = MystGraph::new();
    for name in ["A", "B", "C"] {
        graph.add_node(card(name)).unwrap();
    }
    graph
}

// ==================== Node Tests ====================

#[test]
fn test_node_ids_are_dense_and_sequential() {
    let mut graph = MystGraph::new();
    let ids: Vec<u64> = ["dock", "library", "tower", "ship"]
        .iter()
        .map(|n| graph.add_node(card(n)).unwrap())
        .collect();

    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(graph.node_count(), 4);
    for (i, node) in graph.nodes().iter().enumerate() {
        assert_eq!(node.id, i as u64);
    }
}

#[test]
fn test_duplicate_name_rejected() {
    let mut graph = three_nodes();
    let err = graph.add_node(card("B")).unwrap_err();
    assert!(matches!(err, MystError::AlreadyExists(ref name) if name == "B"));
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn test_node_attributes_deduplicated_on_insert() {
    let mut graph = MystGraph::new();
    let mut node = card("A");
    node.attributes.push(NodeAttribute::Card);
    node.attributes.push(NodeAttribute::ContainsRedPage);
    let id = graph.add_node(node).unwrap();

    let stored = graph.get_node(id).unwrap();
    assert_eq!(
        stored.attributes,
        vec![NodeAttribute::Card, NodeAttribute::ContainsRedPage]
    );
    assert!(!graph.add_node_attribute(id, NodeAttribute::Card).unwrap());
    assert!(graph.add_node_attribute(id, NodeAttribute::Sink).unwrap());
}

#[test]
fn test_lookups_fail_on_unknown() {
    let graph = three_nodes();
    assert!(matches!(graph.node_id("Z"), Err(MystError::UnknownName(_))));
    assert!(matches!(graph.node_name(42), Err(MystError::NodeNotFound(42))));
    assert!(matches!(graph.node_group(42), Err(MystError::NodeNotFound(42))));
    assert!(matches!(graph.successors("Z"), Err(MystError::UnknownName(_))));
    assert!(graph.get_node(42).is_none());
}

#[test]
fn test_display_name_falls_back() {
    let graph = three_nodes();
    assert_eq!(graph.display_name(1), "B");
    assert_eq!(graph.display_name(99), "Node 99");
    assert_eq!(
        graph.format_path_as_names(&[0, 99, 2]),
        vec!["A".to_string(), "Node 99".to_string(), "C".to_string()]
    );
}

#[test]
fn test_group_lookup() {
    let mut graph = MystGraph::new();
    graph.add_node(card("Myst:dock")).unwrap();
    let id = graph
        .add_node(
            NodeBuilder::new("Channelwood:1", "Channelwood")
                .original_name("CHANNELWOOD_001")
                .build(),
        )
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(graph.node_group(id).unwrap(), "Channelwood");
    assert_eq!(
        graph.get_node(id).unwrap().original_name.as_deref(),
        Some("CHANNELWOOD_001")
    );
    assert_eq!(graph.all_node_names(), vec!["Myst:dock", "Channelwood:1"]);
    assert_eq!(graph.node_id("Channelwood:1").unwrap(), id);
    assert_eq!(graph.node_name(id).unwrap(), "Channelwood:1");
}

// ==================== Edge Tests ====================

#[test]
fn test_edge_to_unknown_node_rejected() {
    let mut graph = three_nodes();
    let err = graph
        .add_edge_with_attributes(Edge::new(0, 7, vec![]))
        .unwrap_err();
    assert!(matches!(err, MystError::NodeNotFound(7)));
}

#[test]
fn test_disabled_edge_only_in_side_table() {
    let mut graph = three_nodes();
    graph
        .add_edge_with_attributes(Edge::new(0, 1, vec![EdgeAttribute::Disabled]))
        .unwrap();

    assert!(!graph.has_edge_from_to(0, 1));
    assert_eq!(graph.edge_weight(0, 1), None);
    assert_eq!(graph.out_degree(0), 0);
    assert_eq!(graph.in_degree(1), 0);
    assert!(graph.is_disabled_edge(0, 1));
    assert!(graph.has_edge("A", "B"));
    assert_eq!(graph.get_all_edges(0, 1).unwrap().len(), 1);
    assert_eq!(graph.routable_edge_count(), 0);
}

#[test]
fn test_backtracking_edge_has_infinite_weight() {
    let mut graph = three_nodes();
    graph
        .add_edge_with_attributes(Edge::new(1, 0, vec![EdgeAttribute::Backtracking]))
        .unwrap();
    graph
        .add_edge_with_attributes(Edge::new(0, 1, vec![EdgeAttribute::IntraGroup]))
        .unwrap();

    assert!(graph.has_edge_from_to(1, 0));
    assert_eq!(graph.edge_weight(1, 0), Some(f64::INFINITY));
    assert_eq!(graph.edge_weight(0, 1), Some(1.0));
    assert!(graph.is_backtracking_edge(1, 0));
    assert!(!graph.is_backtracking_edge(0, 1));
}

#[test]
fn test_add_edge_rejects_invalid_weight() {
    let mut graph = three_nodes();
    for weight in [-1.0, f64::NAN] {
        let err = graph.add_edge(Edge::new(0, 1, vec![]), weight).unwrap_err();
        assert!(matches!(err, MystError::InvalidInput(_)));
    }
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.get_all_edges(0, 1).is_none());
    assert!(!graph.has_edge_from_to(0, 1));

    graph.add_edge(Edge::new(0, 1, vec![]), 0.0).unwrap();
    graph.add_edge(Edge::new(1, 2, vec![]), f64::INFINITY).unwrap();
    assert_eq!(graph.edge_weight(0, 1), Some(0.0));
    assert_eq!(graph.edge_weight(1, 2), Some(f64::INFINITY));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_backtracking_copy_makes_pair_unroutable() {
    let mut graph = three_nodes();
    graph.add_edge_with_attributes(Edge::new(0, 1, vec![])).unwrap();
    graph
        .add_edge_with_attributes(Edge::new(0, 1, vec![EdgeAttribute::Backtracking]))
        .unwrap();
    assert_eq!(graph.edge_weight(0, 1), Some(f64::INFINITY));
    assert_eq!(graph.get_all_edges(0, 1).unwrap().len(), 2);
}

#[test]
fn test_duplicate_edge_suppressed() {
    let mut graph = three_nodes();
    let attrs = vec![EdgeAttribute::IntraGroup, EdgeAttribute::NotImplemented];
    graph
        .add_edge_with_attributes(Edge::with_transitivity(0, 2, attrs.clone(), 4))
        .unwrap();
    graph
        .add_edge_with_attributes(Edge::with_transitivity(0, 2, attrs, 4))
        .unwrap();

    assert_eq!(graph.get_all_edges(0, 2).unwrap().len(), 1);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.routable_edge_count(), 1);
}

#[test]
fn test_duplicate_detection_ignores_attribute_order() {
    let mut graph = three_nodes();
    graph
        .add_edge_with_attributes(Edge::new(
            0,
            1,
            vec![EdgeAttribute::CrossGroup, EdgeAttribute::NotImplemented],
        ))
        .unwrap();
    graph
        .add_edge_with_attributes(Edge::new(
            0,
            1,
            vec![EdgeAttribute::NotImplemented, EdgeAttribute::CrossGroup],
        ))
        .unwrap();
    assert_eq!(graph.get_all_edges(0, 1).unwrap().len(), 1);
}

#[test]
fn test_distinct_edges_kept_in_insertion_order() {
    let mut graph = three_nodes();
    graph
        .add_edge_with_attributes(Edge::with_transitivity(
            0,
            1,
            vec![EdgeAttribute::RestrictiveTransitivityTail],
            9,
        ))
        .unwrap();
    graph
        .add_edge_with_attributes(Edge::new(0, 1, vec![EdgeAttribute::IntraGroup]))
        .unwrap();
    graph
        .add_edge_with_attributes(Edge::with_transitivity(
            0,
            1,
            vec![EdgeAttribute::RestrictiveTransitivityTail],
            10,
        ))
        .unwrap();

    let edges = graph.get_all_edges(0, 1).unwrap();
    assert_eq!(edges.len(), 3);
    assert_eq!(edges[0].transitivity_id, 9);
    assert_eq!(edges[1].attributes, vec![EdgeAttribute::IntraGroup]);
    assert_eq!(edges[2].transitivity_id, 10);

    assert_eq!(
        graph.edge_attributes(0, 1).unwrap(),
        vec![
            EdgeAttribute::RestrictiveTransitivityTail,
            EdgeAttribute::IntraGroup,
            EdgeAttribute::RestrictiveTransitivityTail,
        ]
    );
}

#[test]
fn test_get_all_edges_none_for_missing_pair() {
    let graph = three_nodes();
    assert!(graph.get_all_edges(0, 1).is_none());
    assert!(graph.edge_attributes(0, 1).is_none());
    assert!(!graph.is_backtracking_edge(0, 1));
    assert!(!graph.is_disabled_edge(0, 1));
}

#[test]
fn test_add_edge_attribute_is_idempotent() {
    let mut graph = three_nodes();
    graph.add_edge_with_attributes(Edge::new(2, 2, vec![])).unwrap();

    assert!(graph.add_edge_attribute(2, 2, EdgeAttribute::SelfReference));
    assert!(!graph.add_edge_attribute(2, 2, EdgeAttribute::SelfReference));

    let stored = graph.get_all_edges(2, 2).unwrap();
    assert_eq!(stored[0].attributes, vec![EdgeAttribute::SelfReference]);
    assert_eq!(graph.edges()[0].attributes, vec![EdgeAttribute::SelfReference]);
}

#[test]
fn test_add_edge_attribute_missing_pair() {
    let mut graph = three_nodes();
    assert!(!graph.add_edge_attribute(0, 1, EdgeAttribute::SelfReference));
}

#[test]
fn test_successors_and_predecessors_sorted() {
    let mut graph = MystGraph::new();
    for name in ["hub", "d", "c", "b", "a"] {
        graph.add_node(card(name)).unwrap();
    }
    for target in [4, 2, 3, 1] {
        graph.add_edge_with_attributes(Edge::new(0, target, vec![])).unwrap();
    }
    graph.add_edge_with_attributes(Edge::new(3, 4, vec![])).unwrap();
    graph
        .add_edge_with_attributes(Edge::new(2, 4, vec![EdgeAttribute::Disabled]))
        .unwrap();

    assert_eq!(graph.successors("hub").unwrap(), vec!["d", "c", "b", "a"]);
    assert_eq!(graph.predecessors("a").unwrap(), vec!["hub", "b"]);
    assert_eq!(graph.in_degree(4), 2);
    assert!(graph.has_edge_between(4, 3));
    assert!(!graph.has_edge_between(4, 2));
}

// ==================== Builder / Input Tests ====================

#[test]
fn test_builder_resolves_names() {
    let graph = GraphBuilder::new()
        .add_stack("Myst")
        .add_card("Myst:dock", "Myst")
        .add_virtual("Myst:elevator", "Myst")
        .link("Myst:dock", "Myst:elevator", &[EdgeAttribute::IntraGroup])
        .link_transitive("Myst:elevator", "Myst", &[EdgeAttribute::CrossGroup], 3)
        .build()
        .unwrap();

    assert_eq!(graph.node_count(), 3);
    assert!(graph.has_edge("Myst:dock", "Myst:elevator"));
    assert_eq!(graph.get_all_edges(2, 0).unwrap()[0].transitivity_id, 3);

    let metadata = graph.metadata();
    assert_eq!(metadata.total_nodes, 3);
    assert_eq!(metadata.total_edges, 2);
    assert_eq!(metadata.total_cards, 1);
    assert_eq!(metadata.total_groups, 1);
}

#[test]
fn test_empty_input_rejected() {
    let err = GraphInput::default().build().err().unwrap();
    assert!(matches!(err, MystError::InvalidInput(_)));
}

#[test]
fn test_edge_to_absent_node_fails_construction() {
    let input = GraphInput {
        nodes: vec![card("A")],
        edges: vec![EdgeInput::new("A", "ghost", vec![])],
    };
    let err = input.build().err().unwrap();
    assert!(matches!(err, MystError::UnknownName(ref name) if name == "ghost"));
}

#[test]
fn test_duplicate_node_fails_construction() {
    let input = GraphInput {
        nodes: vec![card("A"), card("A")],
        edges: vec![],
    };
    assert!(matches!(input.build(), Err(MystError::AlreadyExists(_))));
}

#[test]
fn test_read_json_input() {
    let json = r#"{
        "nodes": [
            {"name": "Selenitic:1", "group": "Selenitic", "attributes": ["card"]},
            {"name": "Selenitic:2", "group": "Selenitic", "attributes": ["card", "contains_blue_page"],
             "secondary_name": "forest"}
        ],
        "edges": [
            {"source": "Selenitic:1", "target": "Selenitic:2", "attributes": ["intra_group"]},
            {"source": "Selenitic:2", "target": "Selenitic:1", "attributes": ["backtracking"], "transitivity_id": 5}
        ]
    }"#;

    let graph = InputReader::read_from(&mut Cursor::new(json)).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.get_node(1).unwrap().secondary_name.as_deref(), Some("forest"));
    assert!(graph
        .get_node(1)
        .unwrap()
        .has_attribute(NodeAttribute::ContainsBluePage));
    assert!(graph.is_backtracking_edge(1, 0));
    assert_eq!(graph.get_all_edges(1, 0).unwrap()[0].transitivity_id, 5);
}

#[test]
fn test_read_invalid_json() {
    let err = InputReader::read_from(&mut Cursor::new("{ not json")).err().unwrap();
    assert!(matches!(err, MystError::Json(_)));
}

#[test]
fn test_attribute_names_roundtrip() {
    for attr in [
        EdgeAttribute::IntraGroup,
        EdgeAttribute::CrossGroup,
        EdgeAttribute::Disabled,
        EdgeAttribute::SelfReference,
        EdgeAttribute::NotImplemented,
        EdgeAttribute::Backtracking,
        EdgeAttribute::RestrictiveTransitivityTail,
        EdgeAttribute::RestrictiveTransitivityHead,
    ] {
        assert_eq!(EdgeAttribute::from_name(attr.name()), Some(attr));
    }
    assert_eq!(NodeAttribute::from_name("SOURCE"), Some(NodeAttribute::Source));
    assert_eq!(NodeAttribute::from_name("nope"), None);
}
