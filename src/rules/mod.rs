//! Game rules for freestyle Gomoku
//!
//! Five or more in a row wins; there are no captures or forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{check_win, check_winner, find_five_positions, has_five_at_pos, DIRECTIONS};
