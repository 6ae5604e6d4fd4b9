//! Ultimate Tic-Tac-Toe terminal front end
//!
//! The binary is the "UI collaborator" of the engine: it feeds moves into
//! the game state, asks the configured players for theirs, and renders the
//! nested board between turns.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "uttt")]
#[command(version, about = "Ultimate Tic-Tac-Toe in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against humans or computers
    Play(ultimate_ttt::cli::commands::play::PlayArgs),

    /// Run a series of computer-vs-computer games
    Simulate(ultimate_ttt::cli::commands::simulate::SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => ultimate_ttt::cli::commands::play::execute(args),
        Commands::Simulate(args) => ultimate_ttt::cli::commands::simulate::execute(args),
    }
}
