//! Play command - interactive game in the terminal

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    cli::output,
    game::{GameState, Player},
    save::SavedGame,
};

use super::parse_seat;

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game")]
pub struct PlayArgs {
    /// Rows and columns per board
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Seat for X: human, random, easy, medium, hard, or depth:<n>
    #[arg(long, short = 'x', default_value = "human")]
    pub player_x: String,

    /// Seat for O
    #[arg(long, short = 'o', default_value = "medium")]
    pub player_o: String,

    /// Random seed for reproducible computer play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the game as JSON after every move
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Resume from a saved game (overrides size and seat options)
    #[arg(long)]
    pub load: Option<PathBuf>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (mut state, player_x, player_o) = match &args.load {
        Some(path) => {
            let saved = SavedGame::load_from(path)
                .with_context(|| format!("loading save from {}", path.display()))?;
            saved.restore().context("save data failed validation")?
        }
        None => (
            GameState::new(args.size)?,
            parse_seat(&args.player_x, Player::X)?,
            parse_seat(&args.player_o, Player::O)?,
        ),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    println!("{} (X) vs {} (O)", player_x.name, player_o.name);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !state.is_terminal() {
        println!("\n{state}");
        match state.next_board() {
            Some(board) => println!("{} to move in board {board}", state.next_player()),
            None => println!("{} to move, any open board", state.next_player()),
        }

        let seat = match state.next_player() {
            Player::X => &player_x,
            Player::O => &player_o,
        };

        let (board, tile) = if seat.is_human() {
            read_human_move(&mut lines, &state)?
        } else {
            let mv = seat.choose_move(&state, &mut rng)?;
            println!("{} plays board {}, tile {}", seat.name, mv.board, mv.tile);
            (mv.board, mv.tile)
        };

        if !state.make_move(board, tile) {
            bail!("move (board {board}, tile {tile}) was rejected unexpectedly");
        }

        if let Some(path) = &args.save {
            SavedGame::new(&state, player_x.clone(), player_o.clone()).save_to(path)?;
        }
    }

    println!("\n{state}");
    output::print_section("Game over");
    match state.winner() {
        Some(Player::X) => println!("{} (X) wins!", player_x.name),
        Some(Player::O) => println!("{} (O) wins!", player_o.name),
        None => println!("It's a tie."),
    }

    Ok(())
}

/// Prompt until the human enters a legal `board tile` pair.
fn read_human_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    state: &GameState,
) -> Result<(usize, usize)> {
    loop {
        print!("board tile> ");
        io::stdout().flush().context("flush prompt")?;

        let line = match lines.next() {
            Some(line) => line.context("read move input")?,
            None => bail!("input closed before the game finished"),
        };

        let mut parts = line.split_whitespace();
        let parsed = match (parts.next(), parts.next(), parts.next()) {
            (Some(board), Some(tile), None) => {
                board.parse::<usize>().ok().zip(tile.parse::<usize>().ok())
            }
            _ => None,
        };

        match parsed {
            Some((board, tile)) if state.is_valid_move(board, tile) => return Ok((board, tile)),
            Some((board, tile)) => {
                println!("illegal move: board {board}, tile {tile}");
            }
            None => {
                println!("enter two numbers: the board index and the tile index");
            }
        }
    }
}
