//! Player configuration and move policies
//!
//! A player binds a display name and a symbol to a move policy: humans are
//! driven externally by the UI collaborator, random players draw uniformly
//! from the legal moves, and minimax players delegate to the search engine
//! at a configured depth.

use std::str::FromStr;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    eval::HeuristicWeights,
    game::{GameState, Move, Player},
    search::Minimax,
};

/// Strength labels with a default search-depth mapping.
///
/// The label-to-depth table is configuration, not contract: callers needing
/// a different mapping construct [`PlayerKind::Minimax`] with an explicit
/// depth instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Random,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Default search depth for the label; 0 means no search at all.
    pub fn depth(self) -> u8 {
        match self {
            Difficulty::Random => 0,
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// The move policy this label selects.
    pub fn kind(self) -> PlayerKind {
        match self.depth() {
            0 => PlayerKind::Random,
            depth => PlayerKind::Minimax { depth },
        }
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Difficulty::Random),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(crate::Error::ParseDifficulty {
                input: s.to_string(),
                expected: "random, easy, medium, hard".to_string(),
            }),
        }
    }
}

/// How a player produces moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerKind {
    /// Moves are fed in externally; `choose_move` refuses.
    Human,
    /// Uniform random choice over the legal moves.
    Random,
    /// Alpha-beta search at the given depth.
    Minimax { depth: u8 },
}

/// A participant in the game: name, symbol, and move policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub name: String,
    pub symbol: Player,
    kind: PlayerKind,
    #[serde(default)]
    weights: HeuristicWeights,
}

impl GamePlayer {
    /// A human seat; the UI applies this player's moves directly.
    pub fn human(name: impl Into<String>, symbol: Player) -> Self {
        GamePlayer {
            name: name.into(),
            symbol,
            kind: PlayerKind::Human,
            weights: HeuristicWeights::default(),
        }
    }

    /// A computer seat at the given difficulty, with default weights.
    pub fn ai(name: impl Into<String>, symbol: Player, difficulty: Difficulty) -> Self {
        Self::with_kind(name, symbol, difficulty.kind())
    }

    /// A computer seat with an explicit policy.
    pub fn with_kind(name: impl Into<String>, symbol: Player, kind: PlayerKind) -> Self {
        GamePlayer {
            name: name.into(),
            symbol,
            kind,
            weights: HeuristicWeights::default(),
        }
    }

    /// Override the heuristic weight configuration.
    pub fn with_weights(mut self, weights: HeuristicWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// The symbol the player's search treats as the opponent.
    pub fn opponent(&self) -> Player {
        self.symbol.opponent()
    }

    /// Choose a move in `state` according to this player's policy.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::NoValidMoves`] when the game is already over —
    ///   callers must not ask for a move in a terminal state.
    /// - [`crate::Error::HumanControlled`] for human seats, whose moves
    ///   arrive from the outside.
    pub fn choose_move<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Move, crate::Error> {
        if state.is_terminal() {
            return Err(crate::Error::NoValidMoves);
        }

        match self.kind {
            PlayerKind::Human => Err(crate::Error::HumanControlled {
                name: self.name.clone(),
            }),
            PlayerKind::Random => state
                .valid_moves()
                .choose(rng)
                .copied()
                .ok_or(crate::Error::NoValidMoves),
            PlayerKind::Minimax { depth } => {
                Minimax::new(depth, self.weights).choose(state, self.symbol)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!("random".parse::<Difficulty>().unwrap(), Difficulty::Random);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_random_difficulty_selects_random_policy() {
        assert_eq!(Difficulty::Random.kind(), PlayerKind::Random);
        for label in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(matches!(label.kind(), PlayerKind::Minimax { depth } if depth > 0));
        }
    }

    #[test]
    fn test_random_policy_only_emits_valid_moves() {
        let mut state = GameState::new(3).expect("valid size");
        state.make_move(4, 4);

        let player = GamePlayer::with_kind("Bot", Player::O, PlayerKind::Random);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mv = player.choose_move(&state, &mut rng).expect("moves remain");
            assert!(state.valid_moves().contains(&mv));
        }
    }

    #[test]
    fn test_human_seat_refuses_to_choose() {
        let state = GameState::new(3).expect("valid size");
        let player = GamePlayer::human("Ada", Player::X);
        let mut rng = StdRng::seed_from_u64(7);
        let result = player.choose_move(&state, &mut rng);
        assert!(matches!(result, Err(crate::Error::HumanControlled { .. })));
    }

    #[test]
    fn test_ai_seat_produces_a_legal_search_move() {
        let state = GameState::new(3).expect("valid size");
        let player = GamePlayer::ai("Bot", Player::X, Difficulty::Easy);
        let mut rng = StdRng::seed_from_u64(7);
        let mv = player.choose_move(&state, &mut rng).expect("moves remain");
        assert!(state.valid_moves().contains(&mv));
        assert_eq!(mv.player, Player::X);
    }
}
