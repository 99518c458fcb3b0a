use crate::clock::Clock;
use crate::config::MatchConfig;
use crate::console::SharedPrompt;
use crate::die::Die;
use crate::errors::{ConfigError, PigResult};
use crate::events::EventSink;
use crate::player::Player;
use crate::rng::GameRng;

use super::engine::{MatchSummary, TurnEngine};

pub const SINGLE_HUMAN_NAME: &str = "Human";

/// Builds a match from a [`MatchConfig`] and plays it to the end.
///
/// All randomness comes from one seeded [`GameRng`]: the die and every
/// computer player get a forked stream, and the first player is drawn from
/// the root stream.
pub struct GameManager {
    seed: u64,
    rng: GameRng,
    engine: TurnEngine,
    started: bool,
}

impl GameManager {
    pub fn setup(
        config: &MatchConfig,
        prompt: Option<SharedPrompt>,
        sink: Box<dyn EventSink>,
    ) -> PigResult<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let seed = rng.seed();
        log::info!(
            "Setting up match: {} human(s), {} computer(s), target {}, seed {}",
            config.humans,
            config.computers,
            config.target,
            seed
        );

        let die = Die::new(Box::new(rng.fork()));
        let players = build_roster(config, prompt, &mut rng)?;
        let engine = TurnEngine::new(players, die, sink, config.target)?;

        Ok(GameManager {
            seed,
            rng,
            engine,
            started: false,
        })
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.engine = self.engine.with_clock(clock);
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Chooses who starts (once) and plays until a win condition fires.
    pub fn play(&mut self) -> PigResult<MatchSummary> {
        if !self.started {
            self.engine.decide_first_player(&mut self.rng);
            self.started = true;
        }
        self.engine.play_match()?;
        Ok(self.summary())
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: Some(self.seed),
            ..self.engine.summary()
        }
    }
}

/// Humans first, then computers named `Ca`, `Cb`, ...
fn build_roster(
    config: &MatchConfig,
    prompt: Option<SharedPrompt>,
    rng: &mut GameRng,
) -> PigResult<Vec<Player>> {
    let mut players = Vec::with_capacity(config.player_count());

    if config.humans > 0 {
        let prompt = prompt.ok_or(ConfigError::MissingInput {
            humans: config.humans,
        })?;

        for seat in 0..config.humans {
            let name = match config.human_names.get(seat) {
                Some(name) => name.clone(),
                None if config.humans == 1 => SINGLE_HUMAN_NAME.to_string(),
                None => {
                    let question = format!("Enter name of human player no. {}: ", seat);
                    let answer = prompt.borrow_mut().read_text(&question)?;
                    if answer.is_empty() {
                        format!("{}{}", SINGLE_HUMAN_NAME, seat)
                    } else {
                        answer
                    }
                }
            };
            players.push(Player::human(name, prompt.clone()));
        }
    }

    for number in 0..config.computers {
        players.push(Player::automated(number, Box::new(rng.fork())));
    }

    Ok(players)
}
