// Player module - the player record and the decision trait
//
// Implementations of the decision trait live in crate::players

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use crate::console::SharedPrompt;
use crate::errors::{PlayerError, PlayerResult};
use crate::players::{AutomatedStrategy, HumanStrategy};
use crate::rng::RandomSource;

/// Names handed to the first computer players, in seat order
pub const CPU_NAMES: [&str; 4] = ["Ca", "Cb", "Cc", "Cd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Automated,
    Scripted,
}

/// Decides whether the active player rolls again.
pub trait PlayerStrategy {
    fn kind(&self) -> PlayerKind;

    /// Called once after every non-forfeit roll with the pending score.
    /// Only input failures of an interactive strategy produce an error.
    fn keep_rolling(&mut self, pending: u32) -> io::Result<bool>;
}

/// A seat in the match: identity, banked score and how decisions are made
pub struct Player {
    name: String,
    score: u32,
    strategy: Box<dyn PlayerStrategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn PlayerStrategy>) -> Self {
        Player {
            name: name.into(),
            score: 0,
            strategy,
        }
    }

    pub fn human(name: impl Into<String>, prompt: SharedPrompt) -> Self {
        Self::new(name, Box::new(HumanStrategy::new(prompt)))
    }

    /// Computer player for seat `number` among the computers.
    pub fn automated(number: usize, source: Box<dyn RandomSource>) -> Self {
        Self::new(cpu_name(number), Box::new(AutomatedStrategy::new(source)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn banked_score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn kind(&self) -> PlayerKind {
        self.strategy.kind()
    }

    pub fn is_bot(&self) -> bool {
        self.kind() != PlayerKind::Human
    }

    pub fn keep_rolling(&mut self, pending: u32) -> PlayerResult<bool> {
        self.strategy
            .keep_rolling(pending)
            .map_err(|err| PlayerError::from_io(self.name.as_str(), err))
    }
}

pub fn cpu_name(number: usize) -> String {
    match CPU_NAMES.get(number) {
        Some(name) => name.to_string(),
        None => format!("Cpu{}", number),
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.score)
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("score", &self.score)
            .field("kind", &self.kind())
            .finish()
    }
}
