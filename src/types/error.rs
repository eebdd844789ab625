//! Error types for the mystgraph library.

use thiserror::Error;

/// All errors that can occur while building or analysing a navigation graph.
#[derive(Error, Debug)]
pub enum MystError {
    /// A node with the same name is already registered.
    #[error("Node already exists: {0}")]
    AlreadyExists(String),

    /// Node not found by ID.
    #[error("Node ID {0} not found")]
    NodeNotFound(u64),

    /// Node not found by name.
    #[error("Node '{0}' not found in graph")]
    UnknownName(String),

    /// A required construction input is missing or empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No routable path exists between two nodes (or the only route backtracks).
    #[error("No valid path exists from {from} to {to} without backtracking")]
    NoPath { from: u64, to: u64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience result type for mystgraph operations.
pub type MystResult<T> = Result<T, MystError>;
