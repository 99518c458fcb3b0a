use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::console::starred;
use crate::enums::EndReason;
use crate::player::PlayerKind;

/// A player's name and banked score at some moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub score: u32,
}

/// Everything the engine reports while a match is played
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted {
        first: String,
    },
    TurnStarted {
        player: String,
        standings: Vec<Standing>,
    },
    Rolled {
        player: String,
        face: u8,
        pending: u32,
    },
    Forfeited {
        player: String,
    },
    Decided {
        player: String,
        kind: PlayerKind,
        keep_rolling: bool,
    },
    Banked {
        player: String,
        points: u32,
        total: u32,
    },
    Won {
        player: String,
        score: u32,
        reason: EndReason,
    },
    Tied {
        players: Vec<String>,
    },
}

/// Receiver for status output
pub trait EventSink {
    fn emit(&mut self, event: &GameEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent) {}
}

/// Records events. Clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Renders events as the text lines shown to people at the terminal
pub struct ConsoleSink<W> {
    writer: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn write_event(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::MatchStarted { first } => writeln!(self.writer, "{} starts", first),
            GameEvent::TurnStarted { player, standings } => {
                let scores = standings
                    .iter()
                    .map(|standing| format!("{}: {}", standing.name, standing.score))
                    .join(", ");
                writeln!(self.writer, "\nCurrent score --> {}", scores)?;
                writeln!(self.writer, "\n*** {} to play ***", player)
            }
            GameEvent::Rolled { face, pending, .. } => {
                writeln!(self.writer, "Last roll: {}, new box value: {}", face, pending)
            }
            GameEvent::Forfeited { .. } => writeln!(self.writer, "  Rolled one. Switching turns"),
            GameEvent::Decided {
                kind: PlayerKind::Automated,
                keep_rolling,
                ..
            } => {
                if *keep_rolling {
                    writeln!(self.writer, "  CPU will roll again.")
                } else {
                    writeln!(self.writer, "  CPU will hold.")
                }
            }
            GameEvent::Decided { .. } | GameEvent::Banked { .. } => Ok(()),
            GameEvent::Won { player, .. } => {
                writeln!(self.writer, "{}", starred(&format!(" {} has won ", player)))
            }
            GameEvent::Tied { .. } => writeln!(self.writer, "{}", starred(" Match tie ")),
        }?;
        self.writer.flush()
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &GameEvent) {
        if let Err(e) = self.write_event(event) {
            log::warn!("Failed to write game output: {}", e);
        }
    }
}
