//! Per-player style metrics and the one-line match summary

use serde::{Deserialize, Serialize};

use super::{MoveAnnotation, MoveType, MAX_ADVANTAGE};
use crate::board::Stone;

/// Moves from the end of the game that count towards the endgame metric
const ENDGAME_WINDOW: usize = 10;

/// Style metrics, each in 0..=99
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerStats {
    pub accuracy: u8,
    pub aggression: u8,
    pub defense: u8,
    pub stability: u8,
    pub complexity: u8,
    pub endgame: u8,
}

#[derive(Debug, Default)]
struct TypeCounts {
    attack: i32,
    defense: i32,
    brilliant: i32,
    mistake: i32,
    blunder: i32,
}

impl TypeCounts {
    fn add(&mut self, move_type: MoveType) {
        match move_type {
            MoveType::Attack => self.attack += 1,
            MoveType::Defense => self.defense += 1,
            MoveType::Brilliant => self.brilliant += 1,
            MoveType::Mistake => self.mistake += 1,
            MoveType::Blunder => self.blunder += 1,
            MoveType::Normal | MoveType::Victory => {}
        }
    }
}

impl PlayerStats {
    /// Fold `player`'s own key moves into bounded metrics.
    ///
    /// `moves_played` is the player's move count in the whole game and
    /// normalises the ratios.
    #[must_use]
    pub fn from_key_moves(
        player: Stone,
        key_moves: &[MoveAnnotation],
        moves_played: usize,
        total_moves: usize,
        winner: Option<Stone>,
    ) -> Self {
        let mut all = TypeCounts::default();
        let mut late = TypeCounts::default();
        let late_from = total_moves.saturating_sub(ENDGAME_WINDOW);

        for annotation in key_moves.iter().filter(|a| a.player == player) {
            all.add(annotation.move_type);
            if annotation.move_index >= late_from {
                late.add(annotation.move_type);
            }
        }

        let n = i32::try_from(moves_played.max(1)).unwrap_or(i32::MAX);
        let pct = |count: i32| count * 100 / n;

        let result_bonus = match winner {
            Some(w) if w == player => 25,
            Some(_) => -15,
            None => 0,
        };

        Self {
            accuracy: bounded(
                85 + pct(all.brilliant) / 2 - pct(all.mistake) - 2 * pct(all.blunder),
            ),
            aggression: bounded(20 + pct(all.attack) + pct(all.brilliant)),
            defense: bounded(20 + 3 * pct(all.defense) / 2),
            stability: bounded(99 - 12 * all.mistake - 25 * all.blunder),
            complexity: bounded(15 + 12 * all.brilliant + 4 * (all.attack + all.defense)),
            endgame: bounded(
                50 + 8 * (late.attack + late.defense + late.brilliant)
                    - 10 * (late.mistake + late.blunder)
                    + result_bonus,
            ),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bounded(value: i32) -> u8 {
    value.clamp(0, 99) as u8
}

/// Pick the summary sentence from game length and advantage.
#[must_use]
pub fn summarize(total_moves: usize, winner: Option<Stone>, curve: &[i32]) -> String {
    let final_advantage = curve.last().copied().unwrap_or(0);

    match winner {
        Some(w) => {
            // Advantage before the last move, from the winner's side
            let before = curve.len().checked_sub(2).map_or(0, |i| curve[i]);
            let before_for_winner = if w == Stone::Black { before } else { -before };
            if total_moves <= 20 {
                format!("{w} won a swift, decisive game in {total_moves} moves.")
            } else if before_for_winner <= -20 {
                format!("{w} turned the game around with a late comeback.")
            } else if total_moves > 60 {
                format!("{w} prevailed after a long, grinding battle of {total_moves} moves.")
            } else {
                format!("{w} converted a steady advantage into victory in {total_moves} moves.")
            }
        }
        None if total_moves < 10 => {
            "The game ended before either side built real pressure.".to_string()
        }
        None if final_advantage.abs() < 20 => {
            "A tightly balanced struggle with no decisive breakthrough.".to_string()
        }
        None => {
            let leader = if final_advantage > 0 { Stone::Black } else { Stone::White };
            let strength = if final_advantage.abs() >= MAX_ADVANTAGE / 2 {
                "a clear"
            } else {
                "the"
            };
            format!("{leader} holds {strength} upper hand, but the game is still undecided.")
        }
    }
}
