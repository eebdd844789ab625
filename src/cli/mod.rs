//! Command-line front-end.

pub mod commands;
