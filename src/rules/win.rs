//! Win condition checking: five or more stones in a row
//!
//! Overlines count as wins. The check is local to the triggering cell, so an
//! incremental check after each move agrees with a check on a rebuilt board.

use crate::board::{Board, Pos, Stone};

/// Direction vectors for line checking (4 directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Find the winning line through `pos` for `player`.
///
/// The cell at `pos` is treated as holding `player`'s stone. Returns the full
/// ordered run (five or more cells, `pos` included) on the first axis that
/// reaches five, or `None` when no axis does.
#[must_use]
pub fn check_win(board: &Board, pos: Pos, player: Stone) -> Option<Vec<Pos>> {
    if !player.is_player() {
        return None;
    }

    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        // Extend in negative direction first
        let mut step = 1;
        while let Some(prev) = pos.offset(-dr, -dc, step) {
            if board.get(prev) != player {
                break;
            }
            line.insert(0, prev);
            step += 1;
        }

        // Extend in positive direction
        step = 1;
        while let Some(next) = pos.offset(dr, dc, step) {
            if board.get(next) != player {
                break;
            }
            line.push(next);
            step += 1;
        }

        if line.len() >= 5 {
            return Some(line);
        }
    }
    None
}

/// Fast five-in-a-row check at a specific position. No allocation.
#[inline]
#[must_use]
pub fn has_five_at_pos(board: &Board, pos: Pos, player: Stone) -> bool {
    player.is_player()
        && DIRECTIONS.iter().any(|&(dr, dc)| {
            1 + run_length(board, pos, dr, dc, player) + run_length(board, pos, -dr, -dc, player)
                >= 5
        })
}

/// Count consecutive `player` stones starting one step from `pos`.
#[inline]
fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, player: Stone) -> usize {
    (1..)
        .map_while(|step| pos.offset(dr, dc, step))
        .take_while(|&p| board.get(p) == player)
        .count()
}

/// Scan the whole board for any five of `player`'s stones.
#[must_use]
pub fn find_five_positions(board: &Board, player: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(player)?;
    stones.iter_ones().find_map(|pos| check_win(board, pos, player))
}

/// Check for a winner anywhere on the board.
#[must_use]
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| find_five_positions(board, stone).is_some())
}
