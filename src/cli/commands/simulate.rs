//! Simulate command - run a series of computer-vs-computer games

use anyhow::{bail, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    cli::output,
    game::{GameState, Player},
};

use super::parse_seat;

#[derive(Parser, Debug)]
#[command(about = "Run a series of computer-vs-computer games")]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Rows and columns per board
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Seat for X: random, easy, medium, hard, or depth:<n>
    #[arg(long, short = 'x', default_value = "random")]
    pub player_x: String,

    /// Seat for O
    #[arg(long, short = 'o', default_value = "random")]
    pub player_o: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let player_x = parse_seat(&args.player_x, Player::X)?;
    let player_o = parse_seat(&args.player_o, Player::O)?;
    if player_x.is_human() || player_o.is_human() {
        bail!("simulation requires computer seats on both sides");
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;
    let mut total_moves = 0usize;

    let pb = output::create_game_progress(args.games as u64);
    for _ in 0..args.games {
        let mut state = GameState::new(args.size)?;
        while !state.is_terminal() {
            let seat = match state.next_player() {
                Player::X => &player_x,
                Player::O => &player_o,
            };
            let mv = seat.choose_move(&state, &mut rng)?;
            if !state.make_move(mv.board, mv.tile) {
                bail!(
                    "move (board {}, tile {}) was rejected unexpectedly",
                    mv.board,
                    mv.tile
                );
            }
            total_moves += 1;
        }

        match state.winner() {
            Some(Player::X) => x_wins += 1,
            Some(Player::O) => o_wins += 1,
            None => draws += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let percent = |count: usize| format!("{count} ({:.1}%)", count as f64 * 100.0 / args.games as f64);

    output::print_section("Simulation results");
    output::print_kv("Games", &args.games.to_string());
    output::print_kv(&format!("{} (X)", player_x.name), &percent(x_wins));
    output::print_kv(&format!("{} (O)", player_o.name), &percent(o_wins));
    output::print_kv("Draws", &percent(draws));
    output::print_kv(
        "Avg moves per game",
        &format!("{:.1}", total_moves as f64 / args.games as f64),
    );

    Ok(())
}
