//! Tic-tac-toe solver
//!
//! Solves positions with the alpha-beta search and enumerates the full game tree.

mod solver;
mod stats;
mod tree;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttt_core::Board;

use crate::solver::analyze;
use crate::tree::count_tree;

/// Offline analysis for the tic-tac-toe engine
#[derive(Parser, Debug)]
#[command(name = "solver")]
#[command(about = "Solve tic-tac-toe positions and count the game tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a position and print the best line
    Solve {
        /// Nine cells of X, O or '.', rows optionally separated by '/'
        #[arg(short, long)]
        position: Option<String>,
    },

    /// Enumerate every game from the empty board
    Count,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Solve { position } => run_solve(position.as_deref()),
        Command::Count => run_count(),
    }
}

fn run_solve(position: Option<&str>) -> Result<()> {
    let board = match position {
        Some(text) => text
            .parse::<Board>()
            .with_context(|| format!("invalid --position {:?}", text))?,
        None => Board::new(),
    };

    info!("Solving position, {} to move", board.active_player());
    let analysis = analyze(board);
    analysis.log();

    println!("{}", board);
    println!();
    match analysis.result.best_move {
        Some(cell) => println!("Best move: {} plays {}", board.active_player(), cell),
        None => println!("Best move: none (game over)"),
    }
    println!("Line: {}", analysis.line());
    match analysis.winner() {
        Some(player) => println!("\n{} wins with optimal play!", player),
        None => println!("\n{}", analysis.verdict.describe()),
    }
    Ok(())
}

fn run_count() -> Result<()> {
    info!("Counting the full game tree");
    let start = Instant::now();
    let stats = count_tree(Board::new());
    stats.log_summary(start.elapsed());

    println!("Total nodes: {}", stats.nodes);
    println!("Finished games: {}", stats.games());
    println!("  X wins: {}", stats.x_wins);
    println!("  O wins: {}", stats.o_wins);
    println!("  Draws: {}", stats.draws);
    println!("Distinct positions: {}", stats.positions);
    println!("Up to symmetry: {}", stats.canonical_positions);
    Ok(())
}
