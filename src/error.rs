use std::path::PathBuf;

use crate::board::{Stone, BOARD_SIZE};

/// Errors raised when untrusted moves or boards are applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("move {index}: ({row}, {col}) is off the {size}x{size} board", size = BOARD_SIZE)]
    OutOfBounds { index: usize, row: u8, col: u8 },

    #[error("move {index}: ({row}, {col}) is already occupied by {occupant}")]
    Occupied {
        index: usize,
        row: u8,
        col: u8,
        occupant: Stone,
    },

    #[error("move {index}: a move must be played by Black or White")]
    NotAPlayer { index: usize },

    #[error("board grid must be {size}x{size}, got {rows} rows", size = BOARD_SIZE)]
    BadDimensions { rows: usize },
}

/// Errors that can occur when loading engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
