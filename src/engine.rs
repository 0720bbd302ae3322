//! Heuristic move selection for the computer opponent
//!
//! Every empty cell near existing stones is scored twice with the shared cell
//! evaluator: once for the AI (attack) and once for its opponent (defense).
//! The two are blended by difficulty. Hard and Extreme also rank candidates by
//! categorical override tiers before the blend:
//!
//! 1. **Win**: the cell completes five for the AI
//! 2. **Block**: the cell stops the opponent's five
//! 3. **Open four**: the cell gives the AI an open four
//! 4. **Block open four**: the cell denies the opponent an open four
//! 5. **Double threat** (Extreme only): two threats on different axes
//!
//! Candidates tied on (tier, score) are picked uniformly at random through an
//! injected RNG, so tests can seed selection.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Move, Pos, Stone};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut board = Board::new();
//! board.play(Move::new(Pos::new(7, 7), Stone::Black));
//!
//! let engine = AIEngine::new(Difficulty::Hard);
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = engine.get_move_with_stats(&board, Stone::White, &mut rng).unwrap();
//! assert!(board.is_empty(result.pos));
//! ```

use std::str::FromStr;

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::config::EngineConfig;
use crate::eval::{evaluate_cell, CellEval, Shape};

/// AI strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Hard and Extreme never miss a win or an immediate block
    #[inline]
    pub fn uses_overrides(self) -> bool {
        matches!(self, Difficulty::Hard | Difficulty::Extreme)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, hard or extreme)"
            )),
        }
    }
}

/// Why the selector chose its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    /// Blended attack/defense score
    Heuristic,
    /// Two threats at once (Extreme)
    DoubleThreat,
    /// Denies the opponent an open four
    BlockOpenFour,
    /// Creates an open four
    OpenFour,
    /// Stops the opponent completing five
    Block,
    /// Completes five
    Win,
    /// Empty board, center opening
    Opening,
}

impl MoveReason {
    /// Override tier of a candidate. Higher tiers win before any score is compared.
    fn tier(self) -> u8 {
        match self {
            MoveReason::Heuristic => 0,
            MoveReason::DoubleThreat => 1,
            MoveReason::BlockOpenFour => 2,
            MoveReason::OpenFour => 3,
            MoveReason::Block => 4,
            MoveReason::Win => 5,
            MoveReason::Opening => 6,
        }
    }
}

/// Result of a move selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub pos: Pos,
    /// Blended score of the chosen cell
    pub score: i32,
    pub reason: MoveReason,
    /// Number of candidates that were scored
    pub candidates: usize,
}

/// Heuristic move selector for one difficulty.
#[derive(Debug, Clone)]
pub struct AIEngine {
    difficulty: Difficulty,
    config: EngineConfig,
}

impl AIEngine {
    /// Create an engine with the default weight table.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_config(difficulty, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(difficulty: Difficulty, config: EngineConfig) -> Self {
        Self { difficulty, config }
    }

    /// Best cell for `color`, or `None` when the board is full.
    #[must_use]
    pub fn get_move<R: Rng + ?Sized>(
        &self,
        board: &Board,
        color: Stone,
        rng: &mut R,
    ) -> Option<Pos> {
        self.get_move_with_stats(board, color, rng).map(|result| result.pos)
    }

    /// Best cell for `color` with the score and reason behind it.
    #[must_use]
    pub fn get_move_with_stats<R: Rng + ?Sized>(
        &self,
        board: &Board,
        color: Stone,
        rng: &mut R,
    ) -> Option<MoveResult> {
        if board.is_board_empty() {
            return Some(MoveResult {
                pos: Pos::center(),
                score: 0,
                reason: MoveReason::Opening,
                candidates: 1,
            });
        }

        let candidates = generate_candidates(board, self.config.ai.candidate_radius);
        if candidates.is_empty() {
            debug!("no empty cells left for {color}");
            return None;
        }

        let opponent = color.opponent();
        let mut best_key = (0u8, i32::MIN);
        let mut best: Vec<(Pos, MoveReason, i32)> = Vec::new();

        for &pos in &candidates {
            let attack = evaluate_cell(board, pos, color, &self.config.weights);
            let defense = evaluate_cell(board, pos, opponent, &self.config.weights);
            let (reason, total) = self.score_candidate(&attack, &defense, rng);
            trace!(
                "{pos}: attack={} defense={} total={total} reason={reason:?}",
                attack.score(),
                defense.score()
            );

            let key = (reason.tier(), total);
            if key > best_key {
                best_key = key;
                best.clear();
            }
            if key == best_key {
                best.push((pos, reason, total));
            }
        }

        let &(pos, reason, score) = best.choose(rng)?;
        debug!(
            "{:?} {color} plays {pos} ({reason:?}, score {score}, {} tied of {})",
            self.difficulty,
            best.len(),
            candidates.len()
        );
        Some(MoveResult {
            pos,
            score,
            reason,
            candidates: candidates.len(),
        })
    }

    /// Blend attack and defense into the candidate's total and override tier.
    fn score_candidate<R: Rng + ?Sized>(
        &self,
        attack: &CellEval,
        defense: &CellEval,
        rng: &mut R,
    ) -> (MoveReason, i32) {
        let ai = &self.config.ai;
        let mut total = attack.score() + defense.score() * ai.defense_pct(self.difficulty) / 100;

        if self.difficulty == Difficulty::Easy && ai.easy_jitter > 0 {
            total += rng.gen_range(0..=ai.easy_jitter);
        }

        if !self.difficulty.uses_overrides() {
            return (MoveReason::Heuristic, total);
        }

        let reason = if attack.best() == Shape::Five {
            MoveReason::Win
        } else if defense.best() == Shape::Five {
            MoveReason::Block
        } else if attack.best() == Shape::OpenFour {
            MoveReason::OpenFour
        } else if defense.best() == Shape::OpenFour {
            MoveReason::BlockOpenFour
        } else if self.difficulty == Difficulty::Extreme && attack.is_double_threat() {
            MoveReason::DoubleThreat
        } else {
            MoveReason::Heuristic
        };
        (reason, total)
    }
}

/// Empty cells within `radius` (Chebyshev) of any stone.
///
/// Falls back to every empty cell when no stone has an empty neighbourhood,
/// and is empty only when the board is full.
#[must_use]
pub fn generate_candidates(board: &Board, radius: i32) -> Vec<Pos> {
    let mut moves = Vec::with_capacity(64);
    let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];

    for pos in board.occupied() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let Some(p) = pos.offset(dr, dc, 1) else {
                    continue;
                };
                let (r, c) = (p.row as usize, p.col as usize);
                if seen[r][c] {
                    continue;
                }
                seen[r][c] = true;
                if board.is_empty(p) {
                    moves.push(p);
                }
            }
        }
    }

    if moves.is_empty() {
        moves.extend(board.empty_cells());
    }
    moves.sort_unstable();
    moves
}

/// Choose a move for `ai_player` using a thread-local RNG.
#[must_use]
pub fn select_move(board: &Board, ai_player: Stone, difficulty: Difficulty) -> Option<Pos> {
    select_move_with_rng(board, ai_player, difficulty, &mut rand::thread_rng())
}

/// Choose a move for `ai_player`, drawing tie-breaks and jitter from `rng`.
#[must_use]
pub fn select_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    ai_player: Stone,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Pos> {
    AIEngine::new(difficulty).get_move(board, ai_player, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, TOTAL_CELLS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_with(black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in black {
            board.place_stone(Pos::new(r, c), Stone::Black);
        }
        for &(r, c) in white {
            board.place_stone(Pos::new(r, c), Stone::White);
        }
        board
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_empty_board_plays_center() {
        let board = Board::new();
        for difficulty in Difficulty::ALL {
            let result = AIEngine::new(difficulty)
                .get_move_with_stats(&board, Stone::Black, &mut rng())
                .unwrap();
            assert_eq!(result.pos, Pos::new(7, 7));
            assert_eq!(result.reason, MoveReason::Opening);
        }
    }

    #[test]
    fn test_full_board_returns_none() {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            // Pattern with no five: alternate colors in pairs along each row, shifted per row
            let pos = Pos::from_index(idx);
            let stone = if (pos.col as usize / 2 + pos.row as usize) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        assert!(board.is_full());
        assert!(generate_candidates(&board, 2).is_empty());
        for difficulty in Difficulty::ALL {
            assert_eq!(select_move_with_rng(&board, Stone::White, difficulty, &mut rng()), None);
        }
    }

    #[test]
    fn test_candidates_stay_local() {
        let board = board_with(&[(7, 7)], &[]);
        let moves = generate_candidates(&board, 2);
        assert_eq!(moves.len(), 24);
        assert!(moves.iter().all(|p| p.chebyshev(Pos::new(7, 7)) <= 2));
        assert!(!moves.contains(&Pos::new(7, 7)));
    }

    #[test]
    fn test_candidates_clip_at_corner() {
        let board = board_with(&[(0, 0)], &[]);
        assert_eq!(generate_candidates(&board, 2).len(), 8);
    }

    #[test]
    fn test_hard_completes_five_for_either_side() {
        // Black open four at (7,3)-(7,6)
        let board = board_with(&[(7, 3), (7, 4), (7, 5), (7, 6)], &[(8, 8), (9, 9), (6, 2)]);
        for color in [Stone::Black, Stone::White] {
            for difficulty in [Difficulty::Hard, Difficulty::Extreme] {
                let result = AIEngine::new(difficulty)
                    .get_move_with_stats(&board, color, &mut rng())
                    .unwrap();
                assert!(
                    result.pos == Pos::new(7, 2) || result.pos == Pos::new(7, 7),
                    "{difficulty:?} {color} played {}",
                    result.pos
                );
                let expected = if color == Stone::Black {
                    MoveReason::Win
                } else {
                    MoveReason::Block
                };
                assert_eq!(result.reason, expected);
            }
        }
    }

    #[test]
    fn test_win_beats_block() {
        // White to move: White has a four, Black also has a four
        let board = board_with(
            &[(3, 3), (3, 4), (3, 5), (3, 6)],
            &[(10, 3), (10, 4), (10, 5), (10, 6), (3, 2)],
        );
        let result = AIEngine::new(Difficulty::Hard)
            .get_move_with_stats(&board, Stone::White, &mut rng())
            .unwrap();
        assert_eq!(result.reason, MoveReason::Win);
        assert!(result.pos == Pos::new(10, 2) || result.pos == Pos::new(10, 7));
    }

    #[test]
    fn test_hard_blocks_immediate_five() {
        // White has a closed four; Black has a tempting open three elsewhere
        let board = board_with(
            &[(2, 2), (2, 3), (2, 4), (9, 6)],
            &[(9, 7), (9, 8), (9, 9), (9, 10)],
        );
        for difficulty in [Difficulty::Hard, Difficulty::Extreme] {
            let pos = select_move_with_rng(&board, Stone::Black, difficulty, &mut rng()).unwrap();
            assert_eq!(pos, Pos::new(9, 11));
        }
    }

    #[test]
    fn test_open_four_outranks_blocking_open_four() {
        // Black can make an open four; White threatens to make one too
        let board = board_with(
            &[(5, 5), (5, 6), (5, 7), (12, 1)],
            &[(10, 9), (10, 10), (10, 11), (0, 14)],
        );
        let result = AIEngine::new(Difficulty::Hard)
            .get_move_with_stats(&board, Stone::Black, &mut rng())
            .unwrap();
        assert_eq!(result.reason, MoveReason::OpenFour);
        assert!(result.pos == Pos::new(5, 4) || result.pos == Pos::new(5, 8));
    }

    #[test]
    fn test_blocks_open_four_without_own_threat() {
        let board = board_with(&[(2, 12)], &[(10, 9), (10, 10), (10, 11)]);
        let result = AIEngine::new(Difficulty::Hard)
            .get_move_with_stats(&board, Stone::Black, &mut rng())
            .unwrap();
        assert_eq!(result.reason, MoveReason::BlockOpenFour);
        assert!(result.pos == Pos::new(10, 8) || result.pos == Pos::new(10, 12));
    }

    #[test]
    fn test_extreme_finds_double_threat() {
        // (7,7) joins a closed three and an open two: four plus open three
        let board = board_with(
            &[(7, 8), (7, 9), (7, 10), (8, 7), (9, 7)],
            &[(7, 11), (0, 0), (0, 2), (0, 4), (14, 14)],
        );
        let result = AIEngine::new(Difficulty::Extreme)
            .get_move_with_stats(&board, Stone::Black, &mut rng())
            .unwrap();
        assert_eq!(result.pos, Pos::new(7, 7));
        assert_eq!(result.reason, MoveReason::DoubleThreat);
    }

    #[test]
    fn test_hard_prefers_cells_next_to_lone_stone() {
        let mut board = Board::new();
        board.play(Move::new(Pos::new(7, 7), Stone::Black));
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos =
                select_move_with_rng(&board, Stone::White, Difficulty::Hard, &mut rng).unwrap();
            // Orthogonal neighbours: open two denied plus the highest center bonus
            assert_eq!(pos.manhattan(Pos::new(7, 7)), 1, "seed {seed} played {pos}");
        }
    }

    #[test]
    fn test_easy_returns_legal_cell() {
        let mut board = Board::new();
        board.play(Move::new(Pos::new(7, 7), Stone::Black));
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pos =
                select_move_with_rng(&board, Stone::White, Difficulty::Easy, &mut rng).unwrap();
            assert!(board.is_empty(pos));
            assert!(pos.chebyshev(Pos::new(7, 7)) <= 2);
        }
    }

    #[test]
    fn test_never_returns_occupied_cell() {
        let board = board_with(
            &[(7, 7), (8, 8), (6, 9), (9, 6), (7, 9)],
            &[(7, 8), (8, 7), (6, 7), (9, 9), (5, 5)],
        );
        for difficulty in Difficulty::ALL {
            for seed in 0..8 {
                let mut rng = StdRng::seed_from_u64(seed);
                let pos = select_move_with_rng(&board, Stone::Black, difficulty, &mut rng).unwrap();
                assert!(board.is_empty(pos), "{difficulty:?} returned occupied {pos}");
            }
        }
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let board = board_with(&[(7, 7), (8, 8)], &[(7, 8)]);
        let engine = AIEngine::new(Difficulty::Medium);
        let a = engine.get_move(&board, Stone::White, &mut StdRng::seed_from_u64(9));
        let b = engine.get_move(&board, Stone::White, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_does_not_mutate_board() {
        let board = board_with(&[(7, 7), (7, 8)], &[(8, 8)]);
        let before = board.clone();
        let _ = select_move_with_rng(&board, Stone::White, Difficulty::Extreme, &mut rng());
        assert_eq!(board, before);
    }

    #[test]
    fn test_medium_prefers_stopping_open_four() {
        // White's own open three is worth less than 70% of denying Black's open four
        let board = board_with(&[(7, 5), (7, 6), (7, 7)], &[(2, 2), (2, 3)]);
        let result = AIEngine::new(Difficulty::Medium)
            .get_move_with_stats(&board, Stone::White, &mut rng())
            .unwrap();
        assert_eq!(result.reason, MoveReason::Heuristic);
        assert!(
            result.pos == Pos::new(7, 4) || result.pos == Pos::new(7, 8),
            "Medium played {}",
            result.pos
        );
        assert!(result.score > 7_000);
    }

    #[test]
    fn test_largest_valid_weights_do_not_overflow() {
        use crate::config::MAX_WEIGHT;

        let mut config = EngineConfig::default();
        config.weights.five = MAX_WEIGHT;
        config.weights.open_four = MAX_WEIGHT - 1;
        config.weights.four = MAX_WEIGHT - 2;
        config.weights.open_three = MAX_WEIGHT - 2;
        config.weights.three = MAX_WEIGHT - 3;
        config.weights.open_two = MAX_WEIGHT - 3;
        config.weights.two = MAX_WEIGHT - 4;
        config.weights.dead = MAX_WEIGHT - 4;
        config.ai.easy_jitter = MAX_WEIGHT;
        config.validate().unwrap();

        let board = board_with(&[(7, 3), (7, 4), (7, 5), (7, 6)], &[(8, 8), (9, 9), (6, 2)]);
        for difficulty in Difficulty::ALL {
            let engine = AIEngine::with_config(difficulty, config.clone());
            let pos = engine.get_move(&board, Stone::White, &mut rng()).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("extreme".parse::<Difficulty>(), Ok(Difficulty::Extreme));
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_reason_tiers_are_ordered() {
        assert!(MoveReason::Win.tier() > MoveReason::Block.tier());
        assert!(MoveReason::Block.tier() > MoveReason::OpenFour.tier());
        assert!(MoveReason::OpenFour.tier() > MoveReason::BlockOpenFour.tier());
        assert!(MoveReason::BlockOpenFour.tier() > MoveReason::DoubleThreat.tier());
        assert!(MoveReason::DoubleThreat.tier() > MoveReason::Heuristic.tier());
    }
}
