//! Engine tuning: shape weights, difficulty blends and review thresholds

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Difficulty;
use crate::error::ConfigError;
use crate::eval::ShapeWeights;

/// Largest accepted shape weight or jitter.
///
/// Four axes of `five` plus the center bonus, scaled by a percentage, must
/// stay inside `i32`.
pub const MAX_WEIGHT: i32 = 1_000_000;

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub weights: ShapeWeights,
    pub ai: AiConfig,
    pub analysis: AnalysisConfig,
}

/// How each difficulty blends attack and defense scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Share of the defense score added to the attack score, in percent
    pub easy_defense_pct: i32,
    pub medium_defense_pct: i32,
    pub hard_defense_pct: i32,
    pub extreme_defense_pct: i32,
    /// Upper bound of the uniform noise added to every Easy candidate
    pub easy_jitter: i32,
    /// Chebyshev distance from existing stones that candidates may lie at
    pub candidate_radius: i32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            easy_defense_pct: 20,
            medium_defense_pct: 70,
            hard_defense_pct: 90,
            extreme_defense_pct: 100,
            easy_jitter: 400,
            candidate_radius: 2,
        }
    }
}

impl AiConfig {
    #[must_use]
    pub fn defense_pct(&self, difficulty: Difficulty) -> i32 {
        match difficulty {
            Difficulty::Easy => self.easy_defense_pct,
            Difficulty::Medium => self.medium_defense_pct,
            Difficulty::Hard => self.hard_defense_pct,
            Difficulty::Extreme => self.extreme_defense_pct,
        }
    }
}

/// Match analysis thresholds and advantage deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Moves with index <= this are never called mistakes or blunders
    pub opening_moves: usize,
    /// Combined attack + defense score below which a move is a mistake
    pub mistake_below: i32,
    /// Combined attack + defense score below which a move is a blunder
    pub blunder_below: i32,
    pub attack_delta: i32,
    pub brilliant_delta: i32,
    pub defense_delta: i32,
    pub normal_delta: i32,
    pub mistake_delta: i32,
    pub blunder_delta: i32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            opening_moves: 4,
            mistake_below: 40,
            blunder_below: 20,
            attack_delta: 10,
            brilliant_delta: 15,
            defense_delta: 5,
            normal_delta: 2,
            mistake_delta: -10,
            blunder_delta: -20,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = self.weights.descending();
        if weights[0].1 <= weights[1].1 || weights[1].1 <= weights[2].1 {
            return Err(ConfigError::Validation(
                "weights.five > weights.open_four > weights.four is required".into(),
            ));
        }
        for pair in weights.windows(2) {
            if pair[0].1 < pair[1].1 {
                return Err(ConfigError::Validation(format!(
                    "weights.{} must be >= weights.{}",
                    pair[0].0, pair[1].0
                )));
            }
        }
        if self.weights.five > MAX_WEIGHT {
            return Err(ConfigError::Validation(format!(
                "weights.five must be <= {MAX_WEIGHT}"
            )));
        }
        if self.weights.dead < 0 {
            return Err(ConfigError::Validation("weights.dead must be >= 0".into()));
        }

        for (name, pct) in [
            ("easy_defense_pct", self.ai.easy_defense_pct),
            ("medium_defense_pct", self.ai.medium_defense_pct),
            ("hard_defense_pct", self.ai.hard_defense_pct),
            ("extreme_defense_pct", self.ai.extreme_defense_pct),
        ] {
            if !(0..=100).contains(&pct) {
                return Err(ConfigError::Validation(format!(
                    "ai.{name} must be in [0, 100]"
                )));
            }
        }
        if !(0..=MAX_WEIGHT).contains(&self.ai.easy_jitter) {
            return Err(ConfigError::Validation(format!(
                "ai.easy_jitter must be in [0, {MAX_WEIGHT}]"
            )));
        }
        if self.ai.candidate_radius < 1 {
            return Err(ConfigError::Validation(
                "ai.candidate_radius must be >= 1".into(),
            ));
        }

        if self.analysis.blunder_below > self.analysis.mistake_below {
            return Err(ConfigError::Validation(
                "analysis.blunder_below must be <= analysis.mistake_below".into(),
            ));
        }
        if self.analysis.blunder_delta > self.analysis.mistake_delta
            || self.analysis.mistake_delta > 0
        {
            return Err(ConfigError::Validation(
                "analysis.blunder_delta <= analysis.mistake_delta <= 0 is required".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml(
            r#"
            [ai]
            medium_defense_pct = 60

            [analysis]
            opening_moves = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.medium_defense_pct, 60);
        assert_eq!(config.ai.hard_defense_pct, 90);
        assert_eq!(config.analysis.opening_moves, 6);
        assert_eq!(config.weights, ShapeWeights::default());
    }

    #[test]
    fn test_rejects_unordered_weights() {
        let err = EngineConfig::from_toml(
            r#"
            [weights]
            three = 5000
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("weights.open_three must be >= weights.three"));
    }

    #[test]
    fn test_rejects_oversized_weights() {
        let err = EngineConfig::from_toml(
            r#"
            [weights]
            five = 30000000
            open_four = 3000000
            four = 300000
            open_three = 300000
            three = 30000
            open_two = 30000
            two = 3000
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("weights.five must be <= 1000000"));

        let mut config = EngineConfig::default();
        config.ai.easy_jitter = MAX_WEIGHT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_pct() {
        let mut config = EngineConfig::default();
        config.ai.hard_defense_pct = 150;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = EngineConfig::from_toml("[ai\nbroken").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_defense_pct_per_difficulty() {
        let ai = AiConfig::default();
        assert_eq!(ai.defense_pct(Difficulty::Easy), 20);
        assert_eq!(ai.defense_pct(Difficulty::Extreme), 100);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            EngineConfig::load_or_default(Path::new("/nonexistent/gomoku.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
