//! Board structure and move replay

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::{Move, Pos, Stone, BOARD_SIZE};
use crate::error::BoardError;

/// Game board: one bitboard per color.
///
/// Serializes as `BOARD_SIZE` rows of cell states so the presentation layer
/// can persist and render it without knowing the bit layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<Stone>>", try_from = "Vec<Vec<Stone>>")]
pub struct Board {
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone without any legality check.
    /// Use `play` for game moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Apply a move from a trusted caller.
    ///
    /// # Panics
    /// On an off-board coordinate, an occupied target or an `Empty` player.
    pub fn play(&mut self, mv: Move) {
        let pos = mv.pos();
        assert!(mv.player.is_player(), "move at {pos} has no player");
        assert!(
            self.is_empty(pos),
            "cell {pos} is already occupied by {}",
            self.get(pos)
        );
        self.place_stone(pos, mv.player);
    }

    /// Apply an untrusted move, reporting why it is illegal instead of panicking.
    /// `index` is the move's position in its history and only feeds the error.
    pub fn try_play(&mut self, mv: Move, index: usize) -> Result<(), BoardError> {
        if (mv.row as usize) >= BOARD_SIZE || (mv.col as usize) >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds {
                index,
                row: mv.row,
                col: mv.col,
            });
        }
        if !mv.player.is_player() {
            return Err(BoardError::NotAPlayer { index });
        }
        let pos = mv.pos();
        if !self.is_empty(pos) {
            return Err(BoardError::Occupied {
                index,
                row: mv.row,
                col: mv.col,
                occupant: self.get(pos),
            });
        }
        self.place_stone(pos, mv.player);
        Ok(())
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Iterate over every occupied cell, Black stones first
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        self.black.iter_ones().chain(self.white.iter_ones())
    }

    /// Iterate over every empty cell in index order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..BOARD_SIZE * BOARD_SIZE)
            .map(Pos::from_index)
            .filter(move |&pos| self.is_empty(pos))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == BOARD_SIZE * BOARD_SIZE
    }
}

/// Fresh 15x15 board with every cell empty.
#[must_use]
pub fn create_empty_board() -> Board {
    Board::new()
}

/// Rebuild a board by replaying `moves` from empty.
///
/// # Panics
/// On any illegal move; histories handed to the engine are expected to be valid.
#[must_use]
pub fn reconstruct_board(moves: &[Move]) -> Board {
    let mut board = Board::new();
    for &mv in moves {
        board.play(mv);
    }
    board
}

/// Rebuild a board from an untrusted history, stopping at the first illegal move.
pub fn try_reconstruct_board(moves: &[Move]) -> Result<Board, BoardError> {
    let mut board = Board::new();
    for (index, &mv) in moves.iter().enumerate() {
        board.try_play(mv, index)?;
    }
    Ok(board)
}

impl From<Board> for Vec<Vec<Stone>> {
    fn from(board: Board) -> Self {
        (0..BOARD_SIZE as u8)
            .map(|r| {
                (0..BOARD_SIZE as u8)
                    .map(|c| board.get(Pos::new(r, c)))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<Vec<Stone>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Stone>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(BoardError::BadDimensions { rows: rows.len() });
        }
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &stone) in row.iter().enumerate() {
                board.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Text grid: `X` Black, `O` White, `.` empty, with column/row labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, "{c:>3}")?;
        }
        writeln!(f)?;
        for r in 0..BOARD_SIZE as u8 {
            write!(f, "{r:>3}")?;
            for c in 0..BOARD_SIZE as u8 {
                let symbol = match self.get(Pos::new(r, c)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                };
                write!(f, "{symbol:>3}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
