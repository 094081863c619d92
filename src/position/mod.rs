//! The tic-tac-toe board representation, along with all required data types.

use std::fmt;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;
pub const BOARD_AREA: usize = BOARD_SIZE * BOARD_SIZE;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals, in that order.
/// The order is load-bearing: `Board::winner` reports the first matching line.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

pub const CORNERS: [(usize, usize); 4] = [(0, 0), (0, 2), (2, 0), (2, 2)];
pub const CENTER: (usize, usize) = (1, 1);

/// Iterates over all squares in row-major order.
pub fn squares_iterator() -> impl Iterator<Item = (usize, usize)> {
    (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Player {
    X,
    O,
    Empty,
}

impl Player {
    /// X and O are each other's opponents. Empty maps to Empty,
    /// which keeps the mapping total for code that stores Empty cells.
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
            Player::Empty => Player::Empty,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
            Player::Empty => write!(f, " "),
        }
    }
}

/// A square coordinate with the score the search assigned to it.
///
/// Equality and hashing only consider the coordinates, so a move's score can
/// be replaced without changing its identity in a collection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub score: i32,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col, score: 0 }
    }

    pub fn with_score(row: usize, col: usize, score: i32) -> Self {
        Move { row, col, score }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{}): {}", self.row, self.col, self.score)
    }
}

/// A 3x3 tic-tac-toe board.
///
/// The search engine mutates a single board through `make_move`/`undo_move`
/// pairs instead of copying it at every node, so `undo_move` must restore the
/// exact prior state.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: [[Player; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            grid: [[Player::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }
}

impl Board {
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        row < BOARD_SIZE && col < BOARD_SIZE && self.grid[row][col] == Player::Empty
    }

    /// Places `player` on the square if the move is valid, otherwise does
    /// nothing. Callers are expected to pre-validate.
    pub fn make_move(&mut self, row: usize, col: usize, player: Player) {
        if self.is_valid_move(row, col) {
            self.grid[row][col] = player;
        }
    }

    /// Unconditionally clears a square. Only for search backtracking.
    pub fn undo_move(&mut self, row: usize, col: usize) {
        self.grid[row][col] = Player::Empty;
    }

    pub fn get(&self, row: usize, col: usize) -> Player {
        self.grid[row][col]
    }

    /// All empty squares in row-major order. This is the order the search
    /// explores, and therefore the tie-break between equal-scored moves.
    pub fn available_moves(&self) -> ArrayVec<Move, BOARD_AREA> {
        squares_iterator()
            .filter(|&(row, col)| self.grid[row][col] == Player::Empty)
            .map(|(row, col)| Move::new(row, col))
            .collect()
    }

    /// The player holding a full line, or Empty if no line is complete.
    /// Lines are checked in the fixed order of `LINES`.
    pub fn winner(&self) -> Player {
        for line in LINES.iter() {
            let (row, col) = line[0];
            let first = self.grid[row][col];
            if first != Player::Empty
                && line[1..]
                    .iter()
                    .all(|&(row, col)| self.grid[row][col] == first)
            {
                return first;
            }
        }
        Player::Empty
    }

    pub fn is_full(&self) -> bool {
        squares_iterator().all(|(row, col)| self.grid[row][col] != Player::Empty)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner() != Player::Empty || self.is_full()
    }

    pub fn reset(&mut self) {
        self.grid = [[Player::Empty; BOARD_SIZE]; BOARD_SIZE];
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                write!(f, "{}", self.grid[row][col])?;
                if col + 1 < BOARD_SIZE {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row + 1 < BOARD_SIZE {
                writeln!(f, "-+-+-")?;
            }
        }
        Ok(())
    }
}
