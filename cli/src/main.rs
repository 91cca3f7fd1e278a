//! CORDON command-line entry point
//!
//! Reads a chunk dependency graph as JSON, solves for the maximum-weight
//! closure (optionally steered toward a target size), and writes the result
//! object to standard output.
//!
//! # Wire Contract
//! On success the result JSON is printed to stdout and the process exits
//! with status zero. On any failure - malformed input, unreadable file -
//! a minimal empty object is printed to stderr and the process exits with
//! a non-zero status; error detail is available through `RUST_LOG`.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::error;

use cordon_core::{maximum_weight_closure, solve_closure_by_size, ChunkGraph, ClosureResult};

/// Solve maximum-weight closures over chunk dependency graphs
#[derive(Debug, Parser)]
#[command(name = "cordon")]
#[command(about = "Maximum-weight closure solver for weighted dependency graphs")]
struct Cli {
    /// Target closure size; omitted selects the unconstrained optimum
    #[arg(long)]
    size: Option<i64>,

    /// Read the graph from a file instead of standard input
    #[arg(long)]
    input: Option<PathBuf>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pretty: bool,
}

fn load_graph(cli: &Cli) -> anyhow::Result<ChunkGraph> {
    let graph = match &cli.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            ChunkGraph::from_reader(file)?
        }
        None => ChunkGraph::from_reader(io::stdin().lock())?,
    };
    Ok(graph)
}

fn solve(cli: &Cli, graph: &ChunkGraph) -> ClosureResult {
    match cli.size {
        Some(target) => solve_closure_by_size(graph, target),
        None => maximum_weight_closure(graph),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let graph = load_graph(cli)?;
    let result = solve(cli, &graph);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            // Wire contract: failures emit an empty object on stderr.
            eprintln!("{{}}");
            ExitCode::FAILURE
        }
    }
}
