//! Match replay and move-by-move classification
//!
//! A move list is replayed on a fresh board. Each move is judged on the
//! position *before* it was played, with the same cell evaluator the AI uses:
//! what it built for the mover (attack) and what it took away from the
//! opponent (defense). The classifications drive a clamped advantage curve
//! (positive favours Black), the key-move list and per-player statistics.
//!
//! Replay is deterministic: the same move list always yields the same result.

pub mod stats;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Pos, Stone};
use crate::config::{AnalysisConfig, EngineConfig};
use crate::eval::{evaluate_cell, CellEval, Shape};
use crate::opening::detect_opening;
use crate::rules::check_win;

pub use stats::PlayerStats;

/// Advantage curve bound; a win snaps the curve to it.
pub const MAX_ADVANTAGE: i32 = 100;

/// Classification of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Normal,
    Attack,
    Defense,
    Brilliant,
    Mistake,
    Blunder,
    Victory,
}

/// One analysed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAnnotation {
    pub move_index: usize,
    pub player: Stone,
    pub row: u8,
    pub col: u8,
    pub move_type: MoveType,
    /// Attack plus defense score of the cell before the move
    pub score: i32,
    pub description: String,
    pub advantage_after_move: i32,
}

/// Full analysis of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total_moves: usize,
    pub winner: Option<Stone>,
    pub black_stats: PlayerStats,
    pub white_stats: PlayerStats,
    /// `total_moves + 1` entries, starting at 0
    pub advantage_curve: Vec<i32>,
    /// Every non-normal move, plus the final move
    pub key_moves: Vec<MoveAnnotation>,
    pub summary: String,
    pub opening: Option<String>,
    /// Line completed by the winning move
    pub win_line: Option<Vec<Pos>>,
}

impl AnalysisResult {
    #[must_use]
    pub fn stats(&self, player: Stone) -> Option<&PlayerStats> {
        match player {
            Stone::Black => Some(&self.black_stats),
            Stone::White => Some(&self.white_stats),
            Stone::Empty => None,
        }
    }
}

/// Replays and classifies matches under one configuration.
#[derive(Debug, Clone, Default)]
pub struct MatchAnalyzer {
    config: EngineConfig,
}

impl MatchAnalyzer {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Analyse `moves` in play order.
    ///
    /// # Panics
    /// On an illegal move (occupied or off-board cell, or an `Empty` player).
    #[must_use]
    pub fn analyze(&self, moves: &[Move]) -> AnalysisResult {
        let weights = &self.config.weights;
        let mut board = Board::new();
        let mut advantage = 0;
        let mut curve = Vec::with_capacity(moves.len() + 1);
        curve.push(advantage);
        let mut annotations = Vec::with_capacity(moves.len());
        let mut winner = None;
        let mut win_line = None;

        for (index, &mv) in moves.iter().enumerate() {
            let pos = mv.pos();
            let attack = evaluate_cell(&board, pos, mv.player, weights);
            let defense = evaluate_cell(&board, pos, mv.player.opponent(), weights);

            board.play(mv);
            let line = check_win(&board, pos, mv.player);
            let move_type = self.classify(index, &attack, &defense, line.is_some());

            advantage = self.advance(advantage, move_type, mv.player);
            curve.push(advantage);

            if let Some(line) = line {
                if winner.is_none() {
                    winner = Some(mv.player);
                    win_line = Some(line);
                }
            }

            annotations.push(MoveAnnotation {
                move_index: index,
                player: mv.player,
                row: mv.row,
                col: mv.col,
                move_type,
                score: attack.score() + defense.score(),
                description: describe(move_type, mv.player, pos, &attack, &defense),
                advantage_after_move: advantage,
            });
        }

        let total_moves = moves.len();
        let key_moves = key_moves(annotations);
        let count_moves = |player| moves.iter().filter(|m| m.player == player).count();
        let black_stats = PlayerStats::from_key_moves(
            Stone::Black,
            &key_moves,
            count_moves(Stone::Black),
            total_moves,
            winner,
        );
        let white_stats = PlayerStats::from_key_moves(
            Stone::White,
            &key_moves,
            count_moves(Stone::White),
            total_moves,
            winner,
        );
        let summary = stats::summarize(total_moves, winner, &curve);

        debug!(
            "analysed {total_moves} moves: winner={winner:?}, {} key moves, final advantage {}",
            key_moves.len(),
            advantage
        );

        AnalysisResult {
            total_moves,
            winner,
            black_stats,
            white_stats,
            advantage_curve: curve,
            key_moves,
            summary,
            opening: detect_opening(moves).map(str::to_string),
            win_line,
        }
    }

    /// Priority classification of a move from its pre-move evaluations.
    fn classify(
        &self,
        index: usize,
        attack: &CellEval,
        defense: &CellEval,
        wins: bool,
    ) -> MoveType {
        let cfg: &AnalysisConfig = &self.config.analysis;
        let combined = attack.score() + defense.score();

        if wins {
            MoveType::Victory
        } else if attack.best() >= Shape::OpenFour {
            MoveType::Attack
        } else if defense.best() >= Shape::OpenFour {
            MoveType::Defense
        } else if attack.best() >= Shape::OpenThree {
            MoveType::Attack
        } else if defense.best() >= Shape::OpenThree {
            MoveType::Defense
        } else if attack.best() >= Shape::OpenTwo && defense.best() >= Shape::OpenTwo {
            MoveType::Brilliant
        } else if index > cfg.opening_moves && combined < cfg.blunder_below {
            MoveType::Blunder
        } else if index > cfg.opening_moves && combined < cfg.mistake_below {
            MoveType::Mistake
        } else {
            MoveType::Normal
        }
    }

    /// Apply a move's delta from Black's point of view and clamp.
    fn advance(&self, advantage: i32, move_type: MoveType, player: Stone) -> i32 {
        let cfg = &self.config.analysis;
        let sign = if player == Stone::Black { 1 } else { -1 };
        let delta = match move_type {
            MoveType::Victory => return sign * MAX_ADVANTAGE,
            MoveType::Attack => cfg.attack_delta,
            MoveType::Brilliant => cfg.brilliant_delta,
            MoveType::Defense => cfg.defense_delta,
            MoveType::Normal => cfg.normal_delta,
            MoveType::Mistake => cfg.mistake_delta,
            MoveType::Blunder => cfg.blunder_delta,
        };
        (advantage + sign * delta).clamp(-MAX_ADVANTAGE, MAX_ADVANTAGE)
    }
}

/// Analyse a match with the default configuration.
#[must_use]
pub fn analyze_match(moves: &[Move]) -> AnalysisResult {
    MatchAnalyzer::default().analyze(moves)
}

/// Keep non-normal moves and always the last one.
fn key_moves(annotations: Vec<MoveAnnotation>) -> Vec<MoveAnnotation> {
    let last_index = annotations.len().checked_sub(1);
    annotations
        .into_iter()
        .filter(|a| a.move_type != MoveType::Normal || Some(a.move_index) == last_index)
        .collect()
}

fn describe(
    move_type: MoveType,
    player: Stone,
    pos: Pos,
    attack: &CellEval,
    defense: &CellEval,
) -> String {
    match move_type {
        MoveType::Victory => format!("{player} completes five in a row at {pos}"),
        MoveType::Attack if attack.best() >= Shape::OpenFour => {
            format!("{player} makes an unstoppable open four at {pos}")
        }
        MoveType::Attack if attack.best() >= Shape::Four => {
            format!("{player} threatens five with a four at {pos}")
        }
        MoveType::Attack => format!("{player} builds an open three at {pos}"),
        MoveType::Defense if defense.best() == Shape::Five => {
            format!("{player} blocks an imminent five at {pos}")
        }
        MoveType::Defense if defense.best() >= Shape::OpenFour => {
            format!("{player} stops an open four before it forms at {pos}")
        }
        MoveType::Defense => format!("{player} defuses a developing threat at {pos}"),
        MoveType::Brilliant => format!("{player} attacks and defends at once at {pos}"),
        MoveType::Mistake => format!("{player} plays a slack move at {pos}"),
        MoveType::Blunder => format!("{player} plays far from the action at {pos}"),
        MoveType::Normal => format!("{player} develops at {pos}"),
    }
}
