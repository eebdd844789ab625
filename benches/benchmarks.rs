//! Criterion benchmarks for mystgraph.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use tempfile::NamedTempFile;

use mystgraph::engine::{AnalysisEngine, ComponentAnalyzer, PathAnalyzer};
use mystgraph::format::{InputReader, ReportWriter};
use mystgraph::graph::{GraphInput, MystGraph};
use mystgraph::types::{EdgeAttribute, EdgeInput, NodeAttribute, NodeBuilder};

/// Random navigation graph: cards spread over stacks, mostly intra-group
/// links with some backtracking and disabled edges mixed in.
fn make_input(node_count: usize, edges_per_node: usize) -> GraphInput {
    let mut rng = rand::thread_rng();
    let groups = ["Myst", "Selenitic", "Stoneship", "Mechanical", "Channelwood"];

    let nodes = (0..node_count)
        .map(|i| {
            NodeBuilder::new(format!("card_{}", i), groups[i % groups.len()])
                .attribute(NodeAttribute::Card)
                .build()
        })
        .collect();

    let mut edges = Vec::with_capacity(node_count * edges_per_node);
    for i in 0..node_count {
        for _ in 0..edges_per_node {
            let target = rng.gen_range(0..node_count);
            let attribute = match rng.gen_range(0..10) {
                0 => EdgeAttribute::Backtracking,
                1 => EdgeAttribute::Disabled,
                _ => EdgeAttribute::IntraGroup,
            };
            edges.push(EdgeInput::new(
                format!("card_{}", i),
                format!("card_{}", target),
                vec![attribute],
            ));
        }
    }

    GraphInput { nodes, edges }
}

fn make_graph(node_count: usize, edges_per_node: usize) -> MystGraph {
    make_input(node_count, edges_per_node).build().unwrap()
}

fn bench_build_10k(c: &mut Criterion) {
    let input = make_input(10_000, 3);

    c.bench_function("build_10k", |b| {
        b.iter(|| {
            let _ = input.clone().build().unwrap();
        })
    });
}

fn bench_components_10k(c: &mut Criterion) {
    let graph = make_graph(10_000, 2);

    c.bench_function("components_10k", |b| {
        b.iter(|| {
            let _ = ComponentAnalyzer::new(&graph).find_connected_components();
        })
    });
}

fn bench_shortest_path_10k(c: &mut Criterion) {
    let graph = make_graph(10_000, 3);
    let analyzer = PathAnalyzer::new(&graph);

    c.bench_function("shortest_path_10k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let from = rng.gen_range(0..10_000u64);
            let to = rng.gen_range(0..10_000u64);
            let _ = analyzer.compute_shortest_path(from, to, &[]);
        })
    });
}

fn bench_waypoint_path_10k(c: &mut Criterion) {
    let graph = make_graph(10_000, 3);
    let analyzer = PathAnalyzer::new(&graph);

    c.bench_function("waypoint_path_10k", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let waypoints = [rng.gen_range(0..10_000u64), rng.gen_range(0..10_000u64)];
            let _ = analyzer.compute_shortest_path(0, 9_999, &waypoints);
        })
    });
}

fn bench_process_1k(c: &mut Criterion) {
    let graph = make_graph(1_000, 3);
    let engine = AnalysisEngine::new();

    c.bench_function("process_1k", |b| {
        b.iter(|| {
            let mut copy = make_graph_from(&graph);
            let _ = engine.process(&mut copy).unwrap();
        })
    });
}

// Rebuilds an equivalent graph so every iteration starts unclassified
fn make_graph_from(graph: &MystGraph) -> MystGraph {
    let nodes = graph.nodes().to_vec();
    let edges = graph
        .edges()
        .iter()
        .map(|e| {
            EdgeInput::new(
                graph.display_name(e.source_id),
                graph.display_name(e.target_id),
                e.attributes.clone(),
            )
        })
        .collect();
    GraphInput { nodes, edges }.build().unwrap()
}

fn bench_read_json_10k(c: &mut Criterion) {
    let input = make_input(10_000, 3);
    let tmp = NamedTempFile::new().unwrap();
    std::fs::write(tmp.path(), serde_json::to_vec(&input).unwrap()).unwrap();

    c.bench_function("read_json_10k", |b| {
        b.iter(|| {
            let _ = InputReader::read_from_file(tmp.path()).unwrap();
        })
    });
}

fn bench_write_report_1k(c: &mut Criterion) {
    let mut graph = make_graph(1_000, 3);
    AnalysisEngine::new().process(&mut graph).unwrap();
    let writer = ReportWriter::new().include_all_pairs(true);

    c.bench_function("write_report_1k", |b| {
        b.iter(|| {
            let tmp = NamedTempFile::new().unwrap();
            writer.write_to_file(&graph, tmp.path()).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_build_10k,
    bench_components_10k,
    bench_shortest_path_10k,
    bench_waypoint_path_10k,
    bench_process_1k,
    bench_read_json_10k,
    bench_write_report_1k,
);
criterion_main!(benches);
