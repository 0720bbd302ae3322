//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for single cells:
//! - Line shapes (twos, threes, fours, fives), open or blocked
//! - A configurable weight per shape
//! - Positional bonus (center proximity)

pub mod heuristic;
pub mod patterns;

pub use heuristic::{center_bonus, evaluate_cell, positional_score, CellEval};
pub use patterns::{PatternScore, Shape, ShapeWeights};
