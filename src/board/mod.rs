//! Board representation for Gomoku

pub mod bitboard;
pub mod board;


use serde::{Deserialize, Serialize};

// Re-exports
pub use bitboard::Bitboard;
pub use board::{create_empty_board, reconstruct_board, try_reconstruct_board, Board};

/// Board size (15x15)
pub const BOARD_SIZE: usize = 15;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 225

/// Stone colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Empty,
    Black,
    White,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    /// True for Black and White
    #[inline]
    pub fn is_player(self) -> bool {
        self != Stone::Empty
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
            Stone::Empty => "Empty",
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Panics on coordinates outside the board.
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE,
            "position ({row}, {col}) is off the {BOARD_SIZE}x{BOARD_SIZE} board"
        );
        Self { row, col }
    }

    /// Board center (7, 7)
    #[inline]
    pub const fn center() -> Self {
        Self {
            row: (BOARD_SIZE / 2) as u8,
            col: (BOARD_SIZE / 2) as u8,
        }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Step `steps` cells along `(dr, dc)`, or `None` when that leaves the board.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset(self, dr: i32, dc: i32, steps: i32) -> Option<Pos> {
        let r = i32::from(self.row) + dr * steps;
        let c = i32::from(self.col) + dc * steps;
        Pos::is_valid(r, c).then(|| Pos::new(r as u8, c as u8))
    }

    /// Manhattan distance between two cells
    #[inline]
    pub fn manhattan(self, other: Pos) -> i32 {
        (i32::from(self.row) - i32::from(other.row)).abs()
            + (i32::from(self.col) - i32::from(other.col)).abs()
    }

    /// Chebyshev (king-move) distance between two cells
    #[inline]
    pub fn chebyshev(self, other: Pos) -> i32 {
        (i32::from(self.row) - i32::from(other.row))
            .abs()
            .max((i32::from(self.col) - i32::from(other.col)).abs())
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A stone placed by a player, as recorded in a move history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
    pub player: Stone,
}

impl Move {
    #[inline]
    pub fn new(pos: Pos, player: Stone) -> Self {
        Self {
            row: pos.row,
            col: pos.col,
            player,
        }
    }

    /// Panics when the move lies off the board.
    #[inline]
    pub fn pos(self) -> Pos {
        Pos::new(self.row, self.col)
    }
}
