//! Per-cell heuristic: how valuable is this cell for this player?
//!
//! The cell is scored as if `player` had just placed a stone there. Each of the
//! four axes yields a [`Shape`]; the cell score is the sum of their weights plus
//! a small center-proximity bonus. Move selection, match analysis and puzzle
//! verification all go through [`evaluate_cell`].

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::rules::DIRECTIONS;

use super::patterns::{Shape, ShapeWeights};

/// Bonus for the center cell; drops by one per Manhattan step.
const CENTER_BONUS: i32 = 15;

/// Evaluation of one cell for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEval {
    /// Shape along each axis, in [`DIRECTIONS`] order
    pub shapes: [Shape; 4],
    /// Sum of the shape weights
    pub line_score: i32,
    pub center_bonus: i32,
}

impl CellEval {
    #[inline]
    #[must_use]
    pub fn score(&self) -> i32 {
        self.line_score + self.center_bonus
    }

    /// Strongest shape over the four axes
    #[inline]
    #[must_use]
    pub fn best(&self) -> Shape {
        self.shapes.iter().copied().max().unwrap_or(Shape::Dead)
    }

    /// Number of axes at or above `shape`
    #[inline]
    #[must_use]
    pub fn count_at_least(&self, shape: Shape) -> usize {
        self.shapes.iter().filter(|&&s| s >= shape).count()
    }

    /// Two simultaneous threats: a four or open three on two different axes.
    #[inline]
    #[must_use]
    pub fn is_double_threat(&self) -> bool {
        self.count_at_least(Shape::OpenThree) >= 2
    }
}

/// Evaluate `pos` for `player` with the given weights.
#[must_use]
pub fn evaluate_cell(board: &Board, pos: Pos, player: Stone, weights: &ShapeWeights) -> CellEval {
    let mut shapes = [Shape::Dead; 4];
    for (slot, &(dr, dc)) in shapes.iter_mut().zip(DIRECTIONS.iter()) {
        *slot = classify_axis(board, pos, dr, dc, player);
    }

    CellEval {
        shapes,
        line_score: shapes.iter().map(|&s| weights.weight(s)).sum(),
        center_bonus: center_bonus(pos),
    }
}

/// Score of `pos` for `player` under the default weight table.
#[must_use]
pub fn positional_score(board: &Board, pos: Pos, player: Stone) -> i32 {
    evaluate_cell(board, pos, player, &ShapeWeights::default()).score()
}

/// `15 - manhattan distance from center`, never negative.
#[inline]
#[must_use]
pub fn center_bonus(pos: Pos) -> i32 {
    (CENTER_BONUS - pos.manhattan(Pos::center())).max(0)
}

/// Classify the run through `pos` along one axis.
///
/// Walks outward in both directions counting contiguous `player` stones. An
/// end is open when the first non-matching cell is on the board and empty;
/// an opponent stone or the board edge blocks it.
fn classify_axis(board: &Board, pos: Pos, dr: i32, dc: i32, player: Stone) -> Shape {
    let mut count = 1;
    let mut open_ends = 0;

    for (dr, dc) in [(dr, dc), (-dr, -dc)] {
        let mut step = 1;
        loop {
            match pos.offset(dr, dc, step).map(|p| board.get(p)) {
                Some(s) if s == player => {
                    count += 1;
                    step += 1;
                }
                Some(Stone::Empty) => {
                    open_ends += 1;
                    break;
                }
                // Opponent stone or edge
                _ => break,
            }
        }
    }

    Shape::classify(count, open_ends)
}
