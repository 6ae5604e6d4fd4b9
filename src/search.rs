//! Depth-limited minimax search with alpha-beta pruning
//!
//! The search walks the game tree depth-first, cloning the state for each
//! hypothetical line so branches never share mutable boards. Leaves (depth
//! exhausted or terminal) are scored by the heuristic evaluator from the
//! searching player's perspective. Pruning is an optimization only: the move
//! returned is the one an unpruned search over the same depth would pick.

use crate::{
    eval::{Evaluator, HeuristicWeights},
    game::{GameState, Move, Player},
};

/// A depth-limited alpha-beta searcher for one player.
///
/// The evaluator configuration lives for the duration of the searcher, which
/// is typically one `choose` invocation.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    depth: u8,
    evaluator: Evaluator,
}

impl Minimax {
    /// Create a searcher exploring `depth` plies. Depth 0 is the random
    /// policy and lives in the player layer, so the depth is clamped to 1.
    pub fn new(depth: u8, weights: HeuristicWeights) -> Self {
        Minimax {
            depth: depth.max(1),
            evaluator: Evaluator::new(weights),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Pick the best move for `perspective` in `state`.
    ///
    /// Moves are examined in the stable order of
    /// [`GameState::valid_moves`]; a candidate replaces the incumbent only
    /// on a strictly better value, so ties keep the earliest move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] when called on a terminal
    /// state; callers are expected to check for game over first.
    pub fn choose(&self, state: &GameState, perspective: Player) -> Result<Move, crate::Error> {
        let mut best: Option<(Move, i32)> = None;
        let mut alpha = i32::MIN;
        let beta = i32::MAX;

        for &mv in state.valid_moves() {
            let child = state.child(mv)?;
            let value = self.evaluate(&child, mv, self.depth - 1, alpha, beta, false, perspective)?;
            if best.is_none_or(|(_, incumbent)| value > incumbent) {
                best = Some((mv, value));
                alpha = alpha.max(value);
            }
        }

        best.map(|(mv, _)| mv).ok_or(crate::Error::NoValidMoves)
    }

    /// Recursive node evaluation. `last` is the move that produced `state`,
    /// `maximize` is true when `perspective` is to move.
    fn evaluate(
        &self,
        state: &GameState,
        last: Move,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximize: bool,
        perspective: Player,
    ) -> Result<i32, crate::Error> {
        if depth == 0 || state.is_terminal() {
            return Ok(self.evaluator.score(state, last, perspective));
        }

        let mut best = if maximize { i32::MIN } else { i32::MAX };

        for &mv in state.valid_moves() {
            let child = state.child(mv)?;
            let value = self.evaluate(&child, mv, depth - 1, alpha, beta, !maximize, perspective)?;

            if maximize {
                if value > best {
                    best = value;
                }
                alpha = alpha.max(best);
                if best > beta {
                    break;
                }
            } else {
                if value < best {
                    best = value;
                }
                beta = beta.min(best);
                if best < alpha {
                    break;
                }
            }
        }

        Ok(best)
    }
}
