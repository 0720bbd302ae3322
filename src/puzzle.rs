//! Tactical puzzle synthesis
//!
//! A puzzle is a short motif (the tactic itself) dropped at a random anchor,
//! axis and orientation, surrounded by a few quiet filler stones. The stones
//! are stitched into an alternating move history that starts with Black, so
//! the side to move follows from parity.
//!
//! Every candidate position is verified before it is returned: no five on the
//! board, a non-empty solution set, and no competing threat for the defender.
//! A candidate that fails is thrown away; after repeated failures fillers are
//! dropped, which leaves the bare motif that always verifies.

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Pos, Stone, BOARD_SIZE};
use crate::engine::Difficulty;
use crate::eval::{evaluate_cell, CellEval, Shape, ShapeWeights};
use crate::rules::{check_winner, has_five_at_pos, DIRECTIONS};

/// Failed candidates before fillers are dropped
const MAX_FILLED_ATTEMPTS: usize = 64;

/// Fillers keep this Chebyshev distance from every other stone
const FILLER_SPACING: i32 = 3;

/// The tactic a puzzle asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PuzzleKind {
    /// Complete an existing four
    WinInOne,
    /// Stop the opponent's only five point
    BlockFive,
    /// Extend a three into an open four
    OpenFour,
    /// Make a four and an open three with one stone
    DoubleThreat,
}

impl PuzzleKind {
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => PuzzleKind::WinInOne,
            Difficulty::Medium => PuzzleKind::BlockFive,
            Difficulty::Hard => PuzzleKind::OpenFour,
            Difficulty::Extreme => PuzzleKind::DoubleThreat,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PuzzleKind::WinInOne => "Finish It",
            PuzzleKind::BlockFive => "Hold the Line",
            PuzzleKind::OpenFour => "Seize the Initiative",
            PuzzleKind::DoubleThreat => "Double Trouble",
        }
    }

    fn describe(self, next: Stone) -> String {
        match self {
            PuzzleKind::WinInOne => format!("{next} to play and complete five in a row."),
            PuzzleKind::BlockFive => format!(
                "{} threatens five. {next} to play and stop it.",
                next.opponent()
            ),
            PuzzleKind::OpenFour => format!("{next} to play and make an open four."),
            PuzzleKind::DoubleThreat => {
                format!("{next} to play and make a four and an open three with one stone.")
            }
        }
    }

    /// Every empty cell that solves this kind of puzzle for `next`.
    #[must_use]
    pub fn solutions(self, board: &Board, next: Stone) -> Vec<Pos> {
        match self {
            PuzzleKind::WinInOne => cells_where(board, next, |e| e.best() == Shape::Five),
            PuzzleKind::BlockFive => {
                cells_where(board, next.opponent(), |e| e.best() == Shape::Five)
            }
            PuzzleKind::OpenFour => cells_where(board, next, |e| e.best() == Shape::OpenFour),
            PuzzleKind::DoubleThreat => cells_where(board, next, |e| {
                e.best() >= Shape::Four && e.is_double_threat()
            }),
        }
    }

    /// Whether the position is a fair puzzle of this kind.
    fn verify(self, board: &Board, next: Stone, solutions: &[Pos]) -> bool {
        if solutions.is_empty() || check_winner(board).is_some() {
            return false;
        }
        let opponent = next.opponent();
        let next_wins = || board.empty_cells().any(|pos| has_five_at_pos(board, pos, next));
        let opponent_fours =
            || !cells_where(board, opponent, |e| e.best() >= Shape::Four).is_empty();

        match self {
            PuzzleKind::WinInOne => true,
            PuzzleKind::BlockFive => solutions.len() == 1 && !next_wins(),
            PuzzleKind::OpenFour => !next_wins() && !opponent_fours(),
            PuzzleKind::DoubleThreat => {
                !next_wins()
                    && !opponent_fours()
                    && cells_where(board, next, |e| e.best() == Shape::OpenFour).is_empty()
            }
        }
    }

    fn motifs(self) -> &'static [&'static [MotifCell]] {
        match self {
            PuzzleKind::WinInOne => &[WIN_BLOCKED_FOUR, WIN_SPLIT_FOUR],
            PuzzleKind::BlockFive => &[BLOCK_FOUR, BLOCK_SPLIT_FOUR],
            PuzzleKind::OpenFour => &[OPEN_THREE, OPEN_SPLIT_THREE],
            PuzzleKind::DoubleThreat => &[FOUR_AND_THREE],
        }
    }
}

/// A generated puzzle position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleState {
    pub board: Board,
    /// Alternating from Black; replays to `board`
    pub move_history: Vec<Move>,
    pub next_player: Stone,
    pub title: String,
    pub description: String,
    pub kind: PuzzleKind,
    pub difficulty: Difficulty,
    /// Cells that solve the puzzle
    pub solutions: Vec<Pos>,
}

impl PuzzleState {
    #[must_use]
    pub fn is_solution(&self, pos: Pos) -> bool {
        self.solutions.contains(&pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Side to move
    Next,
    /// Defender
    Opp,
    /// Must stay empty
    Free,
}

/// One motif cell: (axis slot, step along that axis, role).
/// Slot 0 and slot 1 are two different axes through the same anchor.
type MotifCell = (usize, i32, Role);

use Role::{Free, Next, Opp};

/// `O X X X X .`
const WIN_BLOCKED_FOUR: &[MotifCell] = &[
    (0, 0, Opp),
    (0, 1, Next),
    (0, 2, Next),
    (0, 3, Next),
    (0, 4, Next),
    (0, 5, Free),
];

/// `X X . X X`
const WIN_SPLIT_FOUR: &[MotifCell] = &[
    (0, 0, Next),
    (0, 1, Next),
    (0, 2, Free),
    (0, 3, Next),
    (0, 4, Next),
];

/// `X O O O O .`
const BLOCK_FOUR: &[MotifCell] = &[
    (0, 0, Next),
    (0, 1, Opp),
    (0, 2, Opp),
    (0, 3, Opp),
    (0, 4, Opp),
    (0, 5, Free),
];

/// `X O O O . O X`
const BLOCK_SPLIT_FOUR: &[MotifCell] = &[
    (0, -1, Next),
    (0, 0, Opp),
    (0, 1, Opp),
    (0, 2, Opp),
    (0, 3, Free),
    (0, 4, Opp),
    (0, 5, Next),
];

/// `. . X X X . .`
const OPEN_THREE: &[MotifCell] = &[
    (0, -1, Free),
    (0, 0, Free),
    (0, 1, Next),
    (0, 2, Next),
    (0, 3, Next),
    (0, 4, Free),
    (0, 5, Free),
];

/// `. X X . X .`
const OPEN_SPLIT_THREE: &[MotifCell] = &[
    (0, 0, Free),
    (0, 1, Next),
    (0, 2, Next),
    (0, 3, Free),
    (0, 4, Next),
    (0, 5, Free),
];

/// Blocked three on one axis, open two on another, meeting at the anchor
const FOUR_AND_THREE: &[MotifCell] = &[
    (0, -1, Free),
    (0, 0, Free),
    (0, 1, Next),
    (0, 2, Next),
    (0, 3, Next),
    (0, 4, Opp),
    (1, -1, Free),
    (1, 1, Next),
    (1, 2, Next),
    (1, 3, Free),
];

/// Generate a puzzle using a thread-local RNG.
#[must_use]
pub fn generate_puzzle(difficulty: Difficulty) -> PuzzleState {
    generate_puzzle_with_rng(difficulty, &mut rand::thread_rng())
}

/// Generate a puzzle for `difficulty`, drawing every random choice from `rng`.
#[must_use]
pub fn generate_puzzle_with_rng<R: Rng + ?Sized>(
    difficulty: Difficulty,
    rng: &mut R,
) -> PuzzleState {
    let kind = PuzzleKind::for_difficulty(difficulty);
    let filler_pairs = match difficulty {
        Difficulty::Easy => 2,
        Difficulty::Medium => 3,
        Difficulty::Hard => 4,
        Difficulty::Extreme => 5,
    };
    let mut failures = 0;

    loop {
        let fillers = if failures < MAX_FILLED_ATTEMPTS { filler_pairs } else { 0 };
        let next = if rng.gen_bool(0.5) { Stone::Black } else { Stone::White };

        let Some(mut board) = place_motif(kind, next, rng) else {
            continue;
        };
        add_fillers(&mut board, fillers, rng);
        if !pad_parity(&mut board, next, rng) {
            continue;
        }

        let solutions = kind.solutions(&board, next);
        if !kind.verify(&board, next, &solutions) {
            failures += 1;
            trace!("{kind:?} candidate rejected ({failures} so far)");
            continue;
        }

        let move_history = interleave(&board, rng);
        debug!(
            "{kind:?} puzzle: {} stones, {next} to move, {} solution(s), {failures} rejected",
            move_history.len(),
            solutions.len()
        );
        return PuzzleState {
            board,
            move_history,
            next_player: next,
            title: kind.title().to_string(),
            description: kind.describe(next),
            kind,
            difficulty,
            solutions,
        };
    }
}

/// Empty cells whose evaluation for `player` satisfies `pred`.
fn cells_where(board: &Board, player: Stone, pred: impl Fn(&CellEval) -> bool) -> Vec<Pos> {
    let weights = ShapeWeights::default();
    board
        .empty_cells()
        .filter(|&pos| pred(&evaluate_cell(board, pos, player, &weights)))
        .collect()
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Pos {
    let size = BOARD_SIZE as u8;
    Pos::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// Drop one of the kind's motifs on an empty board, or `None` if it would
/// leave the board or overlap itself.
fn place_motif<R: Rng + ?Sized>(kind: PuzzleKind, next: Stone, rng: &mut R) -> Option<Board> {
    let motif = *kind.motifs().choose(rng)?;
    let anchor = random_cell(rng);

    let mut axes: Vec<(i32, i32)> = DIRECTIONS.to_vec();
    axes.shuffle(rng);
    let axes: Vec<(i32, i32)> = axes
        .into_iter()
        .take(2)
        .map(|(dr, dc)| if rng.gen_bool(0.5) { (dr, dc) } else { (-dr, -dc) })
        .collect();

    let mut board = Board::new();
    let mut free = Vec::new();
    for &(slot, step, role) in motif {
        let (dr, dc) = axes[slot];
        let pos = anchor.offset(dr, dc, step)?;
        match role {
            Role::Free => free.push(pos),
            Role::Next | Role::Opp if !board.is_empty(pos) => return None,
            Role::Next => board.place_stone(pos, next),
            Role::Opp => board.place_stone(pos, next.opponent()),
        }
    }
    if free.iter().any(|&pos| !board.is_empty(pos)) {
        return None;
    }
    Some(board)
}

/// A random empty cell at least `FILLER_SPACING` away from every stone.
fn quiet_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Pos> {
    let quiet: Vec<Pos> = board
        .empty_cells()
        .filter(|&pos| board.occupied().all(|s| s.chebyshev(pos) >= FILLER_SPACING))
        .collect();
    quiet.choose(rng).copied()
}

fn add_fillers<R: Rng + ?Sized>(board: &mut Board, pairs: usize, rng: &mut R) {
    for _ in 0..pairs {
        for stone in [Stone::Black, Stone::White] {
            if let Some(pos) = quiet_cell(board, rng) {
                board.place_stone(pos, stone);
            }
        }
    }
}

/// Add quiet stones until the counts match an alternating history with
/// `next` to move: equal counts for Black, one extra Black for White.
fn pad_parity<R: Rng + ?Sized>(board: &mut Board, next: Stone, rng: &mut R) -> bool {
    let count = |board: &Board, stone| board.stones(stone).map_or(0, |b| b.count() as i64);
    let target = if next == Stone::Black { 0 } else { 1 };

    loop {
        let surplus = count(&*board, Stone::Black) - count(&*board, Stone::White);
        let stone = match surplus.cmp(&target) {
            std::cmp::Ordering::Equal => return true,
            std::cmp::Ordering::Less => Stone::Black,
            std::cmp::Ordering::Greater => Stone::White,
        };
        match quiet_cell(board, rng) {
            Some(pos) => board.place_stone(pos, stone),
            None => return false,
        }
    }
}

/// Shuffle each colour's stones and alternate them, Black first.
fn interleave<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Vec<Move> {
    let mut shuffled = |stone: Stone| {
        let mut cells: Vec<Pos> = board
            .stones(stone)
            .map(|b| b.iter_ones().collect())
            .unwrap_or_default();
        cells.shuffle(rng);
        cells
    };
    let black = shuffled(Stone::Black);
    let white = shuffled(Stone::White);

    let mut history = Vec::with_capacity(black.len() + white.len());
    let mut white = white.into_iter();
    for pos in black {
        history.push(Move::new(pos, Stone::Black));
        if let Some(w) = white.next() {
            history.push(Move::new(w, Stone::White));
        }
    }
    history
}
