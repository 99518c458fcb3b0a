use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a single throw of the die.
///
/// Rolling the lowest face is not a usable value: it forfeits the pending
/// score and ends the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollOutcome {
    Forfeit,
    Value(u8),
}

impl RollOutcome {
    pub fn value(self) -> Option<u8> {
        match self {
            RollOutcome::Forfeit => None,
            RollOutcome::Value(face) => Some(face),
        }
    }

    pub fn is_forfeit(self) -> bool {
        matches!(self, RollOutcome::Forfeit)
    }
}

/// Where the turn engine currently sits in the roll/decide cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingRoll,
    Rolled,
    AwaitingDecision,
    TurnComplete,
    MatchComplete,
}

/// Why a match stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// A player banked enough to reach the target score
    TargetReached,
    /// The wall-clock deadline passed during a roll
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner { index: usize, name: String },
    /// No single leader when the deadline fired. `between` lists the players
    /// sharing the top banked score (everyone, when that score is zero).
    Tie { between: Vec<usize> },
}

impl MatchOutcome {
    pub fn winner_index(&self) -> Option<usize> {
        match self {
            MatchOutcome::Winner { index, .. } => Some(*index),
            MatchOutcome::Tie { .. } => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, MatchOutcome::Tie { .. })
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Winner { name, .. } => write!(f, "{} has won", name),
            MatchOutcome::Tie { .. } => write!(f, "Match tie"),
        }
    }
}
