//! Victory pattern analysis for arbitrary board sizes

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
};

use super::{Cell, Player};

/// The victory patterns for one board size: every row, column, and diagonal
/// of an N x N board, as indices into an area-length cell array.
///
/// A table is built once per size and shared by reference across every board
/// of that size. Both the macro board and the micro boards use the same table.
#[derive(Debug)]
pub struct PatternTable {
    size: usize,
    patterns: Vec<Vec<usize>>,
}

fn cache() -> &'static Mutex<HashMap<usize, Arc<PatternTable>>> {
    static CACHE: OnceLock<Mutex<HashMap<usize, Arc<PatternTable>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

impl PatternTable {
    /// Get the shared pattern table for a board size, building it on first use.
    pub fn shared(size: usize) -> Arc<PatternTable> {
        let mut tables = cache().lock().expect("pattern cache poisoned");
        Arc::clone(
            tables
                .entry(size)
                .or_insert_with(|| Arc::new(PatternTable::build(size))),
        )
    }

    /// Compute all winning index tuples for an N x N board: N rows, N
    /// columns, and the two diagonals, in that order.
    fn build(size: usize) -> PatternTable {
        let mut patterns = Vec::with_capacity(2 * size + 2);

        // rows
        for row in 0..size {
            patterns.push((0..size).map(|col| row * size + col).collect());
        }

        // columns
        for col in 0..size {
            patterns.push((0..size).map(|row| row * size + col).collect());
        }

        // diagonals
        patterns.push((0..size).map(|i| i * size + i).collect());
        patterns.push((0..size).map(|i| (i + 1) * size - i - 1).collect());

        PatternTable { size, patterns }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells on a board of this size.
    pub fn area(&self) -> usize {
        self.size * self.size
    }

    pub fn patterns(&self) -> &[Vec<usize>] {
        &self.patterns
    }

    /// Check if a player holds every cell of some victory pattern.
    pub fn has_won(&self, cells: &[Cell], player: Player) -> bool {
        let target = player.to_cell();
        self.patterns
            .iter()
            .any(|pattern| pattern.iter().all(|&idx| cells[idx] == target))
    }

    /// Sum, over every pattern free of opponent cells, of the number of
    /// cells the player already holds. A pattern containing an opponent
    /// cell is blocked and contributes nothing.
    pub fn line_potential(&self, cells: &[Cell], player: Player) -> i32 {
        let own = player.to_cell();
        let theirs = player.opponent().to_cell();
        self.patterns
            .iter()
            .filter(|pattern| pattern.iter().all(|&idx| cells[idx] != theirs))
            .map(|pattern| pattern.iter().filter(|&&idx| cells[idx] == own).count() as i32)
            .sum()
    }

    /// Whether a tile index is one of the four corners of the board.
    pub fn is_corner(&self, tile: usize) -> bool {
        let area = self.area();
        tile == 0 || tile == self.size - 1 || tile == area - self.size || tile == area - 1
    }

    /// The corner diagonally opposite a corner tile.
    pub fn opposite_corner(&self, tile: usize) -> usize {
        debug_assert!(self.is_corner(tile));
        self.area() - 1 - tile
    }
}
