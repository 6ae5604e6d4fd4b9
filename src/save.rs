//! Saved-game serialization and validated reconstruction
//!
//! Only the defining fields of a state are stored; `winner` and the move
//! cache are derived and recomputed on restore. Reconstruction validates the
//! stored fields in full and either yields a complete, consistent
//! [`GameState`] or fails — a partially-initialized state is never produced.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    game::{Cell, GameState, PatternTable, Player},
    player::GamePlayer,
};

/// The stored form of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub size: usize,
    pub board: Vec<Cell>,
    pub small_boards: Vec<Vec<Cell>>,
    pub next_player: Player,
    pub next_board: Option<usize>,
}

impl SavedState {
    /// Capture the defining fields of a live state.
    pub fn capture(state: &GameState) -> Self {
        SavedState {
            size: state.size(),
            board: state.macro_board().to_vec(),
            small_boards: (0..state.area())
                .map(|i| state.micro_board(i).to_vec())
                .collect(),
            next_player: state.next_player(),
            next_board: state.next_board(),
        }
    }

    /// Rebuild a live state, recomputing the winner and the move cache.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CorruptSave`] when any stored field is
    /// missing its invariants: wrong array lengths, a macro entry
    /// inconsistent with its micro board, an impossible forced board, or a
    /// turn that disagrees with the piece counts.
    pub fn restore(&self) -> Result<GameState, crate::Error> {
        let size = self.size;
        if size < 2 {
            return Err(crate::Error::corrupt(format!(
                "board size {size} is too small"
            )));
        }

        let area = size * size;
        if self.board.len() != area {
            return Err(crate::Error::corrupt(format!(
                "macro board has {} entries, expected {area}",
                self.board.len()
            )));
        }
        if self.small_boards.len() != area {
            return Err(crate::Error::corrupt(format!(
                "expected {area} small boards, got {}",
                self.small_boards.len()
            )));
        }
        for (index, small) in self.small_boards.iter().enumerate() {
            if small.len() != area {
                return Err(crate::Error::corrupt(format!(
                    "small board {index} has {} cells, expected {area}",
                    small.len()
                )));
            }
        }

        let patterns = PatternTable::shared(size);
        self.check_macro_consistency(&patterns)?;
        self.check_turn_parity(&patterns)?;
        self.check_next_board(&patterns)?;

        Ok(GameState::from_parts(
            size,
            self.board.clone(),
            self.small_boards.clone(),
            self.next_player,
            self.next_board,
        ))
    }

    /// Each macro entry must match what its micro board actually shows.
    fn check_macro_consistency(&self, patterns: &PatternTable) -> Result<(), crate::Error> {
        for (index, small) in self.small_boards.iter().enumerate() {
            let x_won = patterns.has_won(small, Player::X);
            let o_won = patterns.has_won(small, Player::O);
            if x_won && o_won {
                return Err(crate::Error::corrupt(format!(
                    "small board {index} has winning lines for both players"
                )));
            }

            let expected = match (x_won, o_won) {
                (true, _) => Cell::X,
                (_, true) => Cell::O,
                _ => Cell::Empty,
            };
            if self.board[index] != expected {
                return Err(crate::Error::corrupt(format!(
                    "macro entry {index} disagrees with its small board"
                )));
            }
        }
        Ok(())
    }

    /// X always opens, so the piece counts pin down whose turn it is. The
    /// winning move does not pass the turn, which shifts the parity rule
    /// for finished games.
    fn check_turn_parity(&self, patterns: &PatternTable) -> Result<(), crate::Error> {
        let mut x_count = 0usize;
        let mut o_count = 0usize;
        for small in &self.small_boards {
            for cell in small {
                match cell {
                    Cell::X => x_count += 1,
                    Cell::O => o_count += 1,
                    Cell::Empty => {}
                }
            }
        }

        if x_count < o_count || x_count > o_count + 1 {
            return Err(crate::Error::corrupt(format!(
                "piece counts are impossible: X={x_count}, O={o_count}"
            )));
        }

        let x_macro_win = patterns.has_won(&self.board, Player::X);
        let o_macro_win = patterns.has_won(&self.board, Player::O);
        if x_macro_win && o_macro_win {
            return Err(crate::Error::corrupt(
                "macro board has winning lines for both players",
            ));
        }

        let expected_turn = if x_macro_win {
            Player::X
        } else if o_macro_win {
            Player::O
        } else if x_count == o_count {
            Player::X
        } else {
            Player::O
        };
        let expected_diff = match (x_macro_win, o_macro_win) {
            (true, _) => 1,
            (_, true) => 0,
            _ => x_count - o_count,
        };

        if self.next_player != expected_turn || x_count - o_count != expected_diff {
            return Err(crate::Error::corrupt(format!(
                "recorded turn {} disagrees with the piece counts (X={x_count}, O={o_count})",
                self.next_player
            )));
        }
        Ok(())
    }

    /// A forced board must be undecided and still have an open cell; a
    /// finished game has no forced board at all.
    fn check_next_board(&self, patterns: &PatternTable) -> Result<(), crate::Error> {
        let finished =
            patterns.has_won(&self.board, Player::X) || patterns.has_won(&self.board, Player::O);

        match self.next_board {
            None => Ok(()),
            Some(_) if finished => Err(crate::Error::corrupt(
                "finished game cannot have a forced board",
            )),
            Some(board) if board >= self.board.len() => Err(crate::Error::corrupt(format!(
                "forced board {board} is out of range"
            ))),
            Some(board) if !self.board[board].is_empty() => Err(crate::Error::corrupt(format!(
                "forced board {board} is already decided"
            ))),
            Some(board) if !self.small_boards[board].iter().any(|c| c.is_empty()) => Err(
                crate::Error::corrupt(format!("forced board {board} has no open cells")),
            ),
            Some(_) => Ok(()),
        }
    }
}

/// A complete saved game: the state plus both seat configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub state: SavedState,
    pub player_x: GamePlayer,
    pub player_o: GamePlayer,
}

impl SavedGame {
    pub fn new(state: &GameState, player_x: GamePlayer, player_o: GamePlayer) -> Self {
        SavedGame {
            state: SavedState::capture(state),
            player_x,
            player_o,
        }
    }

    /// Restore the state and check that the seats pair up correctly.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CorruptSave`] for inconsistent state fields
    /// or mismatched player symbols.
    pub fn restore(&self) -> Result<(GameState, GamePlayer, GamePlayer), crate::Error> {
        if self.player_x.symbol != Player::X || self.player_o.symbol != Player::O {
            return Err(crate::Error::corrupt(
                "player symbols do not match their seats",
            ));
        }
        let state = self.state.restore()?;
        Ok((state, self.player_x.clone(), self.player_o.clone()))
    }

    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(data)?)
    }

    /// Write the save as JSON.
    pub fn save_to(&self, path: &Path) -> Result<(), crate::Error> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| crate::Error::io(format!("write save file {}", path.display()), e))
    }

    /// Read a save back from JSON.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::io(format!("read save file {}", path.display()), e))?;
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Difficulty;

    fn mid_game_state() -> GameState {
        let mut state = GameState::new(3).expect("valid size");
        for (board, tile) in [(4, 4), (4, 0), (0, 4), (4, 8)] {
            assert!(state.make_move(board, tile), "move ({board}, {tile})");
        }
        state
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let state = mid_game_state();
        let saved = SavedState::capture(&state);
        let restored = saved.restore().expect("capture of a live state restores");

        assert_eq!(restored.macro_board(), state.macro_board());
        for i in 0..state.area() {
            assert_eq!(restored.micro_board(i), state.micro_board(i));
        }
        assert_eq!(restored.next_player(), state.next_player());
        assert_eq!(restored.next_board(), state.next_board());
        assert_eq!(restored.winner(), state.winner());
        assert_eq!(restored.valid_moves(), state.valid_moves());
    }

    #[test]
    fn test_json_round_trip() {
        let state = mid_game_state();
        let saved = SavedGame::new(
            &state,
            GamePlayer::human("Ada", Player::X),
            GamePlayer::ai("Bot", Player::O, Difficulty::Medium),
        );
        let json = saved.to_json().expect("serializes");
        let loaded = SavedGame::from_json(&json).expect("parses");
        assert_eq!(loaded, saved);

        let (restored, px, po) = loaded.restore().expect("restores");
        assert_eq!(restored.valid_moves(), state.valid_moves());
        assert!(px.is_human());
        assert!(!po.is_human());
    }

    #[test]
    fn test_wrong_macro_length_rejected() {
        let state = mid_game_state();
        let mut saved = SavedState::capture(&state);
        saved.board.pop();
        assert!(matches!(
            saved.restore(),
            Err(crate::Error::CorruptSave { .. })
        ));
    }

    #[test]
    fn test_inconsistent_macro_entry_rejected() {
        let state = mid_game_state();
        let mut saved = SavedState::capture(&state);
        // claim board 8 was won by O although its cells show nothing
        saved.board[8] = Cell::O;
        assert!(matches!(
            saved.restore(),
            Err(crate::Error::CorruptSave { .. })
        ));
    }

    #[test]
    fn test_bogus_forced_board_rejected() {
        let state = mid_game_state();
        let mut saved = SavedState::capture(&state);
        saved.next_board = Some(99);
        assert!(matches!(
            saved.restore(),
            Err(crate::Error::CorruptSave { .. })
        ));
    }

    #[test]
    fn test_turn_parity_mismatch_rejected() {
        let state = mid_game_state();
        let mut saved = SavedState::capture(&state);
        saved.next_player = saved.next_player.opponent();
        assert!(matches!(
            saved.restore(),
            Err(crate::Error::CorruptSave { .. })
        ));
    }

    #[test]
    fn test_mismatched_seats_rejected() {
        let state = mid_game_state();
        let saved = SavedGame::new(
            &state,
            GamePlayer::human("Ada", Player::O),
            GamePlayer::human("Bea", Player::O),
        );
        assert!(matches!(
            saved.restore(),
            Err(crate::Error::CorruptSave { .. })
        ));
    }
}
