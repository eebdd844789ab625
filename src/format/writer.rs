//! Writes analysis results as JSON.

use std::io::Write;
use std::path::Path;

use serde_json::{json, Value};

use crate::graph::MystGraph;
use crate::types::MystResult;

/// Serializes a graph's metadata and stats.
pub struct ReportWriter {
    pretty: bool,
    include_all_pairs: bool,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            pretty: false,
            include_all_pairs: false,
        }
    }

    /// Pretty-print the JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Include the (potentially large) all-pairs table.
    pub fn include_all_pairs(mut self, include: bool) -> Self {
        self.include_all_pairs = include;
        self
    }

    /// Build the report as a JSON value.
    pub fn to_value(&self, graph: &MystGraph) -> MystResult<Value> {
        let metadata = graph.metadata();
        let mut stats = serde_json::to_value(&metadata.stats)?;
        if !self.include_all_pairs {
            if let Some(obj) = stats.as_object_mut() {
                obj.remove("shortest_paths");
            }
        }
        Ok(json!({
            "total_nodes": metadata.total_nodes,
            "total_edges": metadata.total_edges,
            "total_cards": metadata.total_cards,
            "total_groups": metadata.total_groups,
            "computed_at": metadata.computed_at,
            "stats": stats,
        }))
    }

    /// Write the report to any writer.
    pub fn write_to(&self, graph: &MystGraph, writer: &mut impl Write) -> MystResult<()> {
        let value = self.to_value(graph)?;
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &value)?;
        } else {
            serde_json::to_writer(&mut *writer, &value)?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write the report to a file.
    pub fn write_to_file(&self, graph: &MystGraph, path: &Path) -> MystResult<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.write_to(graph, &mut file)?;
        file.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
