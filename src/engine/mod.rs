//! Analyzers and the top-level analysis engine.

pub mod components;
pub mod nodes;
pub mod paths;
pub mod process;

pub use components::ComponentAnalyzer;
pub use nodes::{Classification, NodeAnalysis, NodeAnalyzer};
pub use paths::PathAnalyzer;
pub use process::AnalysisEngine;
