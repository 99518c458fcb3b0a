use std::collections::VecDeque;
use std::io;

use crate::player::{PlayerKind, PlayerStrategy};

/// Plays back a fixed list of decisions, then holds forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    decisions: VecDeque<bool>,
    pendings_seen: Vec<u32>,
}

impl ScriptedStrategy {
    pub fn new(decisions: impl IntoIterator<Item = bool>) -> Self {
        ScriptedStrategy {
            decisions: decisions.into_iter().collect(),
            pendings_seen: Vec::new(),
        }
    }

    /// Pending scores this strategy was asked about, in order
    pub fn pendings_seen(&self) -> &[u32] {
        &self.pendings_seen
    }
}

impl PlayerStrategy for ScriptedStrategy {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Scripted
    }

    fn keep_rolling(&mut self, pending: u32) -> io::Result<bool> {
        self.pendings_seen.push(pending);
        Ok(self.decisions.pop_front().unwrap_or(false))
    }
}
