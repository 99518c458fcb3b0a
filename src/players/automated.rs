use std::fmt;
use std::io;

use crate::player::{PlayerKind, PlayerStrategy};
use crate::rng::RandomSource;

/// Fixed part of the stopping threshold
pub const THRESHOLD_BASE: u32 = 10;
/// The random part of the threshold is drawn from `1..=THRESHOLD_SPREAD`
pub const THRESHOLD_SPREAD: u32 = 35;

/// Computer strategy: keep rolling while the pending score is below
/// `THRESHOLD_BASE + uniform(1..=THRESHOLD_SPREAD)`.
///
/// The threshold is drawn fresh on every call, so the chance of holding
/// grows as the pending score climbs within a turn.
pub struct AutomatedStrategy {
    source: Box<dyn RandomSource>,
}

impl AutomatedStrategy {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        AutomatedStrategy { source }
    }

    pub fn draw_threshold(&mut self) -> u32 {
        THRESHOLD_BASE + self.source.range_inclusive(1, THRESHOLD_SPREAD)
    }
}

impl PlayerStrategy for AutomatedStrategy {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Automated
    }

    fn keep_rolling(&mut self, pending: u32) -> io::Result<bool> {
        let threshold = self.draw_threshold();
        let decision = pending < threshold;
        log::debug!(
            "Automated decision: pending {} vs threshold {} -> {}",
            pending,
            threshold,
            if decision { "roll" } else { "hold" }
        );
        Ok(decision)
    }
}

impl fmt::Debug for AutomatedStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomatedStrategy").finish_non_exhaustive()
    }
}
