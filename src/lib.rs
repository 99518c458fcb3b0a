// Pig Dice Library - Core Module Organization
//
// This file serves as the central organization point for the dice game,
// exporting all the necessary modules and types in a clean, structured manner.

// Core game data structures and enums
pub mod enums;
pub mod errors;
pub mod game;

// Game entities
pub mod die;
pub mod player;
pub mod players;
pub mod score_box;

// Collaborators: randomness, time, terminal I/O
pub mod clock;
pub mod config;
pub mod console;
pub mod events;
pub mod rng;

// Re-export common types for convenient access
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::MatchConfig;
pub use crate::console::{ConsoleInput, Prompt, SharedPrompt};
pub use crate::die::Die;
pub use crate::enums::{EndReason, MatchOutcome, RollOutcome, TurnPhase};
pub use crate::errors::{ConfigError, GameError, PigError, PigResult, PlayerError};
pub use crate::events::{ConsoleSink, EventLog, EventSink, GameEvent, NullSink};
pub use crate::game::{GameManager, MatchSummary, TurnEngine, DEFAULT_TARGET, FORCED_END_AFTER};
pub use crate::player::{Player, PlayerKind, PlayerStrategy};
pub use crate::players::{AutomatedStrategy, HumanStrategy, ScriptedStrategy};
pub use crate::rng::{GameRng, RandomSource, ScriptedSource};
pub use crate::score_box::ScoreBox;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
