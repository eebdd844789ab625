//! CLI entry point for the `mystgraph` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mystgraph::cli::commands;
use mystgraph::config::{load_config, EngineConfig};
use mystgraph::MystError;

#[derive(Parser)]
#[command(
    name = "mystgraph",
    about = "Deterministic analysis of navigation graphs (degrees, components, paths)"
)]
struct Cli {
    /// Output format: "text" (default) or "json"
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a TOML engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display totals for a graph input file
    Info {
        /// Path to the JSON node/edge list
        file: PathBuf,
    },
    /// Run the full analysis
    Stats {
        /// Path to the JSON node/edge list
        file: PathBuf,
        /// Include the all-pairs table in JSON output
        #[arg(long)]
        all_pairs: bool,
    },
    /// List connected components, largest first
    Components {
        /// Path to the JSON node/edge list
        file: PathBuf,
        /// Maximum components to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Shortest path between two nodes
    Path {
        /// Path to the JSON node/edge list
        file: PathBuf,
        /// Source node name
        from: String,
        /// Target node name
        to: String,
        /// Comma-separated mandatory waypoint names, visited in order
        #[arg(long)]
        via: Option<String>,
    },
    /// Find the most separated pair of nodes
    Separated {
        /// Path to the JSON node/edge list
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    let json = cli.format == "json";

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(3);
            }
        },
        None => EngineConfig::default(),
    };

    let result = match cli.command {
        Commands::Info { file } => commands::cmd_info(&file, json),
        Commands::Stats { file, all_pairs } => commands::cmd_stats(&file, config, all_pairs, json),
        Commands::Components { file, limit } => commands::cmd_components(&file, limit, json),
        Commands::Path { file, from, to, via } => {
            let waypoints: Vec<String> = via
                .map(|s| {
                    s.split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            commands::cmd_path(&file, &from, &to, &waypoints, config, json)
        }
        Commands::Separated { file } => commands::cmd_separated(&file, config, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            MystError::Io(_) => 1,
            MystError::Json(_) | MystError::InvalidInput(_) | MystError::AlreadyExists(_) => 2,
            MystError::Config(_) => 3,
            MystError::NodeNotFound(_) | MystError::UnknownName(_) => 4,
            MystError::NoPath { .. } => 5,
        };
        process::exit(code);
    }
}
