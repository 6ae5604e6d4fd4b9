//! Heuristic evaluation of search leaves
//!
//! A position is scored as a weighted sum of independent signals from one
//! player's perspective. Terminal wins and losses dominate every positional
//! signal, so a certain one-ply win always outranks any combination of the
//! softer heuristics. The weight set is explicit configuration, scoped to
//! the evaluator instance that carries it.

use serde::{Deserialize, Serialize};

use crate::game::{GameState, Move, Player};

/// Weights for the evaluation signals. The exact constants are tunable; the
/// contract is the ordering: `win` must dominate every achievable sum of the
/// positional weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Macro-board win or loss. Dominant.
    pub win: i32,
    /// The move's target micro board was won or conceded.
    pub board_win: i32,
    /// Per-cell potential over non-blocked macro-board patterns.
    pub macro_line: i32,
    /// Per-cell potential over non-blocked patterns of each open micro board.
    pub micro_line: i32,
    /// The move took a corner whose opposite corner the opponent holds.
    pub corner_block: i32,
    /// The move handed the opponent a free choice of boards.
    pub free_choice: i32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            win: 1_000_000,
            board_win: 2_000,
            macro_line: 150,
            micro_line: 15,
            corner_block: 40,
            free_choice: 60,
        }
    }
}

/// Scores a state from a fixed player's perspective.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    weights: HeuristicWeights,
}

impl Evaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Evaluator { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Score a leaf state reached by `last` from `perspective`'s point of
    /// view. Positive favors `perspective`, negative favors the opponent.
    ///
    /// Ownership signals compare cells against the perspective player
    /// directly; the two mover-relative signals (corner block, free-choice
    /// concession) are signed by whether `last` was the perspective
    /// player's move, since search leaves occur after either side's turn.
    pub fn score(&self, state: &GameState, last: Move, perspective: Player) -> i32 {
        let w = &self.weights;
        let opponent = perspective.opponent();

        match state.winner() {
            Some(p) if p == perspective => return w.win,
            Some(_) => return -w.win,
            None => {}
        }

        let mut score = 0;
        let patterns = state.patterns();

        let owner = state.macro_board()[last.board];
        if owner == perspective.to_cell() {
            score += w.board_win;
        } else if owner == opponent.to_cell() {
            score -= w.board_win;
        }

        score += w.macro_line
            * (patterns.line_potential(state.macro_board(), perspective)
                - patterns.line_potential(state.macro_board(), opponent));

        for board in 0..state.area() {
            if state.macro_board()[board].is_empty() {
                score += w.micro_line
                    * (patterns.line_potential(state.micro_board(board), perspective)
                        - patterns.line_potential(state.micro_board(board), opponent));
            }
        }

        let mover_sign = if last.player == perspective { 1 } else { -1 };

        if patterns.is_corner(last.tile) {
            let opposite = patterns.opposite_corner(last.tile);
            if state.micro_board(last.board)[opposite] == last.player.opponent().to_cell() {
                score += mover_sign * w.corner_block;
            }
        }

        if state.next_board().is_none() && !state.is_terminal() {
            score -= mover_sign * w.free_choice;
        }

        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new(HeuristicWeights::default())
    }
}
