//! Game state representation and move application

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use super::{
    board::{Cell, Player},
    patterns::PatternTable,
};

/// A move in the game: a micro board, a tile within it, and the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub board: usize,
    pub tile: usize,
    pub player: Player,
}

/// Complete game state: the macro board of decided micro boards, the micro
/// boards themselves, whose turn it is, and which board (if any) the next
/// move is constrained to.
///
/// `winner` and `valid_moves` are caches, recomputed after every successful
/// move. Cloning deep-copies the board vectors and shares the pattern table
/// by reference, so hypothetical states explored by the search never alias
/// the boards of their parent.
#[derive(Debug, Clone)]
pub struct GameState {
    size: usize,
    macro_board: Vec<Cell>,
    micro_boards: Vec<Vec<Cell>>,
    next_player: Player,
    next_board: Option<usize>,
    winner: Option<Player>,
    valid_moves: Vec<Move>,
    patterns: Arc<PatternTable>,
}

impl GameState {
    /// Create a fresh game: all cells empty, X to move, free board choice.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] for sizes below 2.
    pub fn new(size: usize) -> Result<Self, crate::Error> {
        if size < 2 {
            return Err(crate::Error::InvalidBoardSize { size });
        }

        let area = size * size;
        let mut state = GameState {
            size,
            macro_board: vec![Cell::Empty; area],
            micro_boards: vec![vec![Cell::Empty; area]; area],
            next_player: Player::X,
            next_board: None,
            winner: None,
            valid_moves: Vec::new(),
            patterns: PatternTable::shared(size),
        };
        state.valid_moves = state.compute_valid_moves();
        Ok(state)
    }

    /// Rebuild a state from its stored fields, recomputing the derived
    /// `winner` and `valid_moves` caches. The caller is responsible for
    /// validating the fields first (see [`crate::SavedState::restore`]).
    pub(crate) fn from_parts(
        size: usize,
        macro_board: Vec<Cell>,
        micro_boards: Vec<Vec<Cell>>,
        next_player: Player,
        next_board: Option<usize>,
    ) -> Self {
        let patterns = PatternTable::shared(size);
        let winner = [Player::X, Player::O]
            .into_iter()
            .find(|&p| patterns.has_won(&macro_board, p));

        let mut state = GameState {
            size,
            macro_board,
            micro_boards,
            next_player,
            next_board,
            winner,
            valid_moves: Vec::new(),
            patterns,
        };
        state.valid_moves = state.compute_valid_moves();
        state
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of micro boards, which equals the number of tiles per board.
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    /// The macro board: entry i holds the winner of micro board i.
    pub fn macro_board(&self) -> &[Cell] {
        &self.macro_board
    }

    pub fn micro_board(&self, index: usize) -> &[Cell] {
        &self.micro_boards[index]
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// The micro board the next move must land in; `None` is a free choice
    /// over every undecided board.
    pub fn next_board(&self) -> Option<usize> {
        self.next_board
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn patterns(&self) -> &Arc<PatternTable> {
        &self.patterns
    }

    /// The game is over once no moves remain, by macro win or exhaustion.
    pub fn is_terminal(&self) -> bool {
        self.valid_moves.is_empty()
    }

    /// Every playable board is decided or full, and nobody won.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && self.valid_moves.is_empty()
    }

    /// Verify that a move is legal in the current position. No side effects.
    pub fn is_valid_move(&self, board: usize, tile: usize) -> bool {
        self.winner.is_none()
            && board < self.area()
            && tile < self.area()
            && self.macro_board[board].is_empty()
            && self.next_board.map_or(true, |forced| forced == board)
            && self.micro_boards[board][tile].is_empty()
    }

    /// The legal moves for the current turn, in board-major, tile-minor
    /// order. The ordering is stable and part of the contract: it decides
    /// which move the search keeps when heuristic scores tie.
    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    fn compute_valid_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }

        let open_tiles = |board: usize| {
            let player = self.next_player;
            self.micro_boards[board]
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_empty())
                .map(move |(tile, _)| Move {
                    board,
                    tile,
                    player,
                })
        };

        match self.next_board {
            Some(board) => open_tiles(board).collect(),
            None => (0..self.area())
                .filter(|&board| self.macro_board[board].is_empty())
                .flat_map(open_tiles)
                .collect(),
        }
    }

    /// Apply a move if it is legal.
    ///
    /// Returns false and leaves the state untouched when the move is
    /// invalid. On success the mover's symbol is written, a won micro board
    /// is promoted into the macro board, and either the game ends (macro
    /// win) or the turn passes with the forced-board rule applied: the
    /// opponent is sent to the board named by the tile index unless that
    /// board is decided or full, in which case they get a free choice.
    pub fn make_move(&mut self, board: usize, tile: usize) -> bool {
        if !self.is_valid_move(board, tile) {
            return false;
        }

        let mover = self.next_player;
        self.micro_boards[board][tile] = mover.to_cell();

        if self.patterns.has_won(&self.micro_boards[board], mover) {
            self.macro_board[board] = mover.to_cell();
        }

        if self.patterns.has_won(&self.macro_board, mover) {
            self.winner = Some(mover);
            self.next_board = None;
            self.valid_moves.clear();
            return true;
        }

        self.next_player = mover.opponent();
        self.next_board = if self.macro_board[tile].is_empty()
            && self.micro_boards[tile].iter().any(|cell| cell.is_empty())
        {
            Some(tile)
        } else {
            None
        };
        self.valid_moves = self.compute_valid_moves();

        true
    }

    /// Clone the state and apply one move to the copy, for hypothetical
    /// lines explored by the search. The move is expected to come from
    /// [`valid_moves`](Self::valid_moves).
    pub fn child(&self, mv: Move) -> Result<GameState, crate::Error> {
        let mut next = self.clone();
        if !next.make_move(mv.board, mv.tile) {
            return Err(crate::Error::LegalMoveFailed {
                board: mv.board,
                tile: mv.tile,
            });
        }
        Ok(next)
    }
}

impl fmt::Display for GameState {
    /// Render the nested grid row by row, with decided boards overlaid by
    /// their winner's symbol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size;
        for board_row in 0..size {
            for tile_row in 0..size {
                let mut line = String::new();
                for board_col in 0..size {
                    let board = board_row * size + board_col;
                    for tile_col in 0..size {
                        let tile = tile_row * size + tile_col;
                        let cell = match self.macro_board[board] {
                            Cell::Empty => self.micro_boards[board][tile],
                            won => won,
                        };
                        line.push(cell.to_char());
                        line.push(' ');
                    }
                    if board_col + 1 < size {
                        line.push_str("| ");
                    }
                }
                writeln!(f, "{}", line.trim_end())?;
            }
            if board_row + 1 < size {
                writeln!(f, "{}", "-".repeat(size * (2 * size + 2) - 3))?;
            }
        }
        Ok(())
    }
}
