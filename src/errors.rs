use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::TurnPhase;

/// Top-level error type for the whole dice game
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Player error: {0}")]
    Player(#[from] PlayerError),
}

/// Errors raised while validating a match setup
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("A match needs at least one player")]
    NoPlayers,

    #[error("Target score must be positive, got {target}")]
    InvalidTarget { target: u32 },

    #[error("Expected at most {expected} human names, got {given}")]
    TooManyHumanNames { expected: usize, given: usize },

    #[error("{humans} human player(s) need an input source")]
    MissingInput { humans: usize },
}

/// Misuse of the turn engine
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    #[error("Cannot roll while the engine is in phase {phase:?}")]
    NotAwaitingRoll { phase: TurnPhase },

    #[error("The match has already finished")]
    MatchFinished,
}

/// Failures while a player is producing a decision
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerError {
    #[error("Input closed while waiting for {player}")]
    InputClosed { player: String },

    #[error("Input error for {player}: {details}")]
    Input { player: String, details: String },
}

/// Result type aliases for convenience
pub type PigResult<T> = Result<T, PigError>;
pub type GameResult<T> = Result<T, GameError>;
pub type PlayerResult<T> = Result<T, PlayerError>;

impl PlayerError {
    /// Maps an I/O failure from the input collaborator onto the player being asked.
    pub fn from_io(player: impl Into<String>, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Self::InputClosed {
                player: player.into(),
            },
            _ => Self::Input {
                player: player.into(),
                details: err.to_string(),
            },
        }
    }
}

impl From<io::Error> for PigError {
    fn from(err: io::Error) -> Self {
        PigError::Player(PlayerError::from_io("setup", err))
    }
}
