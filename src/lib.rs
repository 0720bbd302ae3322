//! Gomoku rules, heuristic AI, match analysis and puzzles
//!
//! A freestyle Gomoku engine on a 15x15 board:
//! - Five or more in a row wins (overlines count)
//! - No captures, no forbidden moves
//! - Black moves first
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards, moves and reconstruction
//! - [`rules`]: Win detection
//! - [`eval`]: Per-cell shape classification and scoring
//! - [`engine`]: Difficulty-aware move selection
//! - [`analysis`]: Move-by-move review of a finished or running game
//! - [`puzzle`]: Tactical puzzle generation
//! - [`opening`]: Classical renju opening names
//! - [`config`]: Tunable weights and thresholds, loadable from TOML
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{analyze_match, select_move, Board, Difficulty, Move, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut history = Vec::new();
//!
//! let opening = Move::new(Pos::new(7, 7), Stone::Black);
//! board.play(opening);
//! history.push(opening);
//!
//! // AI responds as White
//! if let Some(pos) = select_move(&board, Stone::White, Difficulty::Hard) {
//!     let reply = Move::new(pos, Stone::White);
//!     board.play(reply);
//!     history.push(reply);
//! }
//!
//! let review = analyze_match(&history);
//! assert_eq!(review.advantage_curve.len(), history.len() + 1);
//! ```
//!
//! # Move Priority
//!
//! On Hard and Extreme the selector follows this priority:
//! 1. Complete five
//! 2. Block the opponent's five
//! 3. Make an open four
//! 4. Stop the opponent's open four
//! 5. Double threat (Extreme only)
//! 6. Best blended attack/defense score
//!
//! All operations are pure: boards are taken by shared reference and results
//! are fresh values. Randomness comes from an injected [`rand::Rng`].

pub mod analysis;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod opening;
pub mod puzzle;
pub mod rules;

// Re-export commonly used types for convenience
pub use analysis::{
    analyze_match, AnalysisResult, MatchAnalyzer, MoveAnnotation, MoveType, PlayerStats,
};
pub use board::{
    create_empty_board, reconstruct_board, try_reconstruct_board, Board, Move, Pos, Stone,
    BOARD_SIZE,
};
pub use config::EngineConfig;
pub use engine::{select_move, select_move_with_rng, AIEngine, Difficulty, MoveReason, MoveResult};
pub use error::{BoardError, ConfigError};
pub use eval::{positional_score, Shape, ShapeWeights};
pub use opening::detect_opening;
pub use puzzle::{generate_puzzle, generate_puzzle_with_rng, PuzzleKind, PuzzleState};
pub use rules::check_win;
