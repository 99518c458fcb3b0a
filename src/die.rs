use std::fmt;

use crate::enums::RollOutcome;
use crate::rng::RandomSource;

pub const LOWEST_FACE: u8 = 1;
pub const HIGHEST_FACE: u8 = 6;

/// A single six-sided die drawing from its own random source.
pub struct Die {
    source: Box<dyn RandomSource>,
    value: u8,
}

impl Die {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Die {
            source,
            value: LOWEST_FACE,
        }
    }

    /// Throws the die. The lowest face comes back as [`RollOutcome::Forfeit`].
    pub fn roll(&mut self) -> RollOutcome {
        self.value = self
            .source
            .range_inclusive(LOWEST_FACE as u32, HIGHEST_FACE as u32) as u8;
        if self.value == LOWEST_FACE {
            RollOutcome::Forfeit
        } else {
            RollOutcome::Value(self.value)
        }
    }

    /// Face shown by the most recent roll
    pub fn value(&self) -> u8 {
        self.value
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rolled {}.", self.value)
    }
}

impl fmt::Debug for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Die").field("value", &self.value).finish()
    }
}
