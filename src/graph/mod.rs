//! In-memory graph store and its builders.

pub mod builder;
pub mod myst_graph;
pub mod traversal;

pub use builder::{GraphBuilder, GraphInput};
pub use myst_graph::MystGraph;
pub use traversal::{TraversalDirection, Traverser};
