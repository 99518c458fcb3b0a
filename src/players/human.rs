use std::fmt;
use std::io;

use crate::console::SharedPrompt;
use crate::player::{PlayerKind, PlayerStrategy};

pub const ROLL_AGAIN_PROMPT: &str = "  1 - Roll again, 0 - Hold? ";

/// Human strategy - asks the person at the keyboard after every roll
pub struct HumanStrategy {
    prompt: SharedPrompt,
}

impl HumanStrategy {
    pub fn new(prompt: SharedPrompt) -> Self {
        HumanStrategy { prompt }
    }
}

impl PlayerStrategy for HumanStrategy {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn keep_rolling(&mut self, _pending: u32) -> io::Result<bool> {
        let answer = self
            .prompt
            .borrow_mut()
            .read_int(ROLL_AGAIN_PROMPT, 0, Some(1))?;
        Ok(answer == 1)
    }
}

impl fmt::Debug for HumanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HumanStrategy").finish_non_exhaustive()
    }
}
