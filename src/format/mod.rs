//! JSON I/O for graph input and analysis reports.

pub mod reader;
pub mod writer;

pub use reader::InputReader;
pub use writer::ReportWriter;
