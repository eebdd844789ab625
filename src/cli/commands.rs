//! CLI command implementations.

use std::path::Path;

use crate::config::EngineConfig;
use crate::engine::{AnalysisEngine, ComponentAnalyzer};
use crate::format::{InputReader, ReportWriter};
use crate::graph::MystGraph;
use crate::types::{MystResult, NodeInfo};

/// Display totals for an input file.
pub fn cmd_info(path: &Path, json: bool) -> MystResult<()> {
    let mut graph = InputReader::read_from_file(path)?;
    graph.refresh_totals();
    let metadata = graph.metadata();

    if json {
        let info = serde_json::json!({
            "file": path.display().to_string(),
            "nodes": metadata.total_nodes,
            "routable_edges": metadata.total_edges,
            "input_edges": graph.edge_count(),
            "cards": metadata.total_cards,
            "groups": metadata.total_groups,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File: {}", path.display());
        println!("Nodes: {}", metadata.total_nodes);
        println!("Routable edges: {}", metadata.total_edges);
        println!("Input edges: {}", graph.edge_count());
        println!("Cards: {}", metadata.total_cards);
        println!("Groups: {}", metadata.total_groups);
    }
    Ok(())
}

/// Run the full analysis and print the results.
pub fn cmd_stats(path: &Path, config: EngineConfig, all_pairs: bool, json: bool) -> MystResult<()> {
    let mut graph = InputReader::read_from_file(path)?;
    let engine = AnalysisEngine::with_config(config);
    engine.process(&mut graph)?;

    if json {
        let writer = ReportWriter::new().pretty(true).include_all_pairs(all_pairs);
        writer.write_to(&graph, &mut std::io::stdout().lock())?;
        return Ok(());
    }

    let metadata = graph.metadata();
    let stats = &metadata.stats;
    println!("Nodes: {}", metadata.total_nodes);
    println!("Edges: {}", metadata.total_edges);
    if let Some(ts) = metadata.computed_at {
        println!("Computed: {}", format_timestamp(ts));
    }
    if let Some(node) = &stats.most_incoming_node {
        println!("Most incoming: {} (id {}, {} edges)", node.name, node.id, node.degree);
    }
    if let Some(node) = &stats.most_outgoing_node {
        println!("Most outgoing: {} (id {}, {} edges)", node.name, node.id, node.degree);
    }
    println!("Sources: {}", format_infos(&stats.nodes_with_no_incoming));
    println!("Sinks: {}", format_infos(&stats.nodes_with_no_outgoing));
    println!("Isolated: {}", format_infos(&stats.isolated_nodes));
    println!("Self-loops: {}", format_infos(&stats.nodes_with_self_loops));
    println!("Components: {}", stats.connected_components.len());
    if let Some(pair) = &stats.most_separated_nodes {
        println!(
            "Most separated: {} -> {} (distance {})",
            pair.source.name, pair.target.name, pair.distance
        );
        println!("  Path: {}", graph.format_path_as_names(&pair.path).join(" -> "));
    }
    Ok(())
}

/// List connected components, largest first.
pub fn cmd_components(path: &Path, limit: usize, json: bool) -> MystResult<()> {
    let graph = InputReader::read_from_file(path)?;
    let components = ComponentAnalyzer::new(&graph).disconnected_components();

    if json {
        let shown: Vec<&Vec<NodeInfo>> = components.iter().take(limit).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "count": components.len(),
                "components": shown,
            }))?
        );
    } else {
        println!("{} components", components.len());
        for (i, component) in components.iter().take(limit).enumerate() {
            println!("  #{} ({} nodes): {}", i + 1, component.len(), format_infos(component));
        }
    }
    Ok(())
}

/// Shortest path between two named nodes, optionally through waypoints.
pub fn cmd_path(
    path: &Path,
    from: &str,
    to: &str,
    via: &[String],
    config: EngineConfig,
    json: bool,
) -> MystResult<()> {
    let graph = InputReader::read_from_file(path)?;
    let engine = AnalysisEngine::with_config(config);
    let waypoints: Vec<&str> = via.iter().map(|s| s.as_str()).collect();
    let info = engine.shortest_path_by_name(&graph, from, to, &waypoints)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "from": info.from,
                "to": info.to,
                "distance": info.distance,
                "path": info.path,
                "names": graph.format_path_as_names(&info.path),
            }))?
        );
    } else {
        print_path(&graph, &info.path, info.distance);
    }
    Ok(())
}

/// Print the most separated pair.
pub fn cmd_separated(path: &Path, config: EngineConfig, json: bool) -> MystResult<()> {
    let mut graph = InputReader::read_from_file(path)?;
    let engine = AnalysisEngine::with_config(EngineConfig {
        compute_all_pairs: true,
        ..config
    });
    let stats = engine.process(&mut graph)?;
    let pair = stats.most_separated_nodes.clone();

    match (pair, json) {
        (Some(pair), true) => println!("{}", serde_json::to_string_pretty(&pair)?),
        (Some(pair), false) => {
            println!("{} -> {}", pair.source.name, pair.target.name);
            print_path(&graph, &pair.path, pair.distance);
        }
        (None, true) => println!("null"),
        (None, false) => println!("No connected pair of distinct nodes"),
    }
    Ok(())
}

fn print_path(graph: &MystGraph, path: &[u64], distance: f64) {
    println!("Distance: {}", distance);
    for (i, name) in graph.format_path_as_names(path).iter().enumerate() {
        println!("  {:>3}. {}", i, name);
    }
}

fn format_infos(infos: &[NodeInfo]) -> String {
    if infos.is_empty() {
        return "-".to_string();
    }
    infos
        .iter()
        .map(|n| n.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_timestamp(micros: u64) -> String {
    let secs = (micros / 1_000_000) as i64;
    let dt = chrono::DateTime::from_timestamp(secs, 0);
    match dt {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} us", micros),
    }
}
