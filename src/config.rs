use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::game::DEFAULT_TARGET;

/// Everything needed to set up a match. Rules other than the player counts
/// and the target score are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub humans: usize,
    pub computers: usize,
    pub target: u32,
    /// Seed for every random stream of the match; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Names for the human seats, in order. Missing names are asked for.
    pub human_names: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            humans: 1,
            computers: 1,
            target: DEFAULT_TARGET,
            seed: None,
            human_names: Vec::new(),
        }
    }
}

impl MatchConfig {
    /// Computer-only match, used by the simulator
    pub fn bots_only(computers: usize, target: u32, seed: Option<u64>) -> Self {
        MatchConfig {
            humans: 0,
            computers,
            target,
            seed,
            human_names: Vec::new(),
        }
    }

    pub fn player_count(&self) -> usize {
        self.humans + self.computers
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count() == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.target == 0 {
            return Err(ConfigError::InvalidTarget {
                target: self.target,
            });
        }
        if self.human_names.len() > self.humans {
            return Err(ConfigError::TooManyHumanNames {
                expected: self.humans,
                given: self.human_names.len(),
            });
        }
        Ok(())
    }
}
