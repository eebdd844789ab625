//! Reads resolved node/edge lists (JSON) into an in-memory graph.

use std::io::Read;
use std::path::Path;

use crate::graph::{GraphInput, MystGraph};
use crate::types::MystResult;

/// Reader for JSON graph input files.
pub struct InputReader;

impl InputReader {
    /// Parse a JSON input file without building the graph.
    pub fn read_input_from_file(path: &Path) -> MystResult<GraphInput> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Read a JSON input file into a MystGraph.
    pub fn read_from_file(path: &Path) -> MystResult<MystGraph> {
        Self::read_input_from_file(path)?.build()
    }

    /// Read from any reader into a MystGraph.
    pub fn read_from(reader: &mut impl Read) -> MystResult<MystGraph> {
        let input: GraphInput = serde_json::from_reader(reader)?;
        input.build()
    }
}
