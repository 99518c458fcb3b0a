use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::die::Die;
use crate::enums::{EndReason, MatchOutcome, RollOutcome, TurnPhase};
use crate::errors::{ConfigError, GameError, PigResult};
use crate::events::{EventSink, GameEvent, Standing};
use crate::player::Player;
use crate::rng::RandomSource;
use crate::score_box::ScoreBox;

pub const DEFAULT_TARGET: u32 = 100;

/// Time after the first roll of a match at which the next scoring roll ends it
pub const FORCED_END_AFTER: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub turns: u32,
    pub rolls: u32,
    pub forfeits: u32,
}

/// What happened during one call to [`TurnEngine::process_roll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// Seat of the player who rolled
    pub player: usize,
    pub outcome: RollOutcome,
    /// Box value right after the roll, before any commit or discard
    pub pending: u32,
    /// Phase the engine ended up in
    pub phase: TurnPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: Option<u64>,
    pub outcome: Option<MatchOutcome>,
    pub reason: Option<EndReason>,
    pub standings: Vec<Standing>,
    pub stats: MatchStats,
}

/// Drives a single match: rolls, decisions, commits, turn order and both end
/// conditions. Owns every piece of mutable match state.
pub struct TurnEngine {
    players: Vec<Player>,
    active: usize,
    die: Die,
    score_box: ScoreBox,
    phase: TurnPhase,
    target: u32,
    clock: Box<dyn Clock>,
    started_at: Option<Instant>,
    deadline: Option<Instant>,
    outcome: Option<MatchOutcome>,
    end_reason: Option<EndReason>,
    stats: MatchStats,
    sink: Box<dyn EventSink>,
}

impl TurnEngine {
    pub fn new(
        players: Vec<Player>,
        die: Die,
        sink: Box<dyn EventSink>,
        target: u32,
    ) -> PigResult<Self> {
        if players.is_empty() {
            return Err(ConfigError::NoPlayers.into());
        }
        if target == 0 {
            return Err(ConfigError::InvalidTarget { target }.into());
        }

        Ok(TurnEngine {
            players,
            active: 0,
            die,
            score_box: ScoreBox::new(),
            phase: TurnPhase::AwaitingRoll,
            target,
            clock: Box::new(SystemClock),
            started_at: None,
            deadline: None,
            outcome: None,
            end_reason: None,
            stats: MatchStats::default(),
            sink,
        })
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub fn pending(&self) -> u32 {
        self.score_box.value()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn die(&self) -> &Die {
        &self.die
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::MatchComplete
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .map(|player| Standing {
                name: player.name().to_string(),
                score: player.banked_score(),
            })
            .collect()
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            seed: None,
            outcome: self.outcome.clone(),
            reason: self.end_reason,
            standings: self.standings(),
            stats: self.stats,
        }
    }

    /// Puts `index` (wrapped to the roster size) in charge. Setup only.
    pub fn set_active(&mut self, index: usize) {
        self.active = index % self.players.len();
    }

    pub fn advance_to_next_player(&mut self) {
        self.active = (self.active + 1) % self.players.len();
    }

    pub fn advance_to_previous_player(&mut self) {
        let count = self.players.len();
        self.active = (self.active + count - 1) % count;
    }

    /// Picks the starting seat uniformly and announces it.
    pub fn decide_first_player(&mut self, source: &mut dyn RandomSource) {
        let count = self.players.len();
        let draw = source.range_inclusive(1, count as u32) as usize;
        self.set_active(draw);
        log::info!("{} starts", self.active_player().name());
        self.emit(GameEvent::MatchStarted {
            first: self.active_player().name().to_string(),
        });
    }

    /// Starts the active player's turn with an empty score box.
    pub fn begin_turn(&mut self) -> PigResult<()> {
        if self.is_finished() {
            return Err(GameError::MatchFinished.into());
        }
        self.score_box.reset();
        self.phase = TurnPhase::AwaitingRoll;
        self.emit(GameEvent::TurnStarted {
            player: self.active_player().name().to_string(),
            standings: self.standings(),
        });
        Ok(())
    }

    /// One roll of the active player, followed by the forced-end check and,
    /// if the match goes on, the player's decision.
    pub fn process_roll(&mut self) -> PigResult<RollReport> {
        match self.phase {
            TurnPhase::AwaitingRoll => {}
            TurnPhase::MatchComplete => return Err(GameError::MatchFinished.into()),
            phase => return Err(GameError::NotAwaitingRoll { phase }.into()),
        }

        let now = self.clock.now();
        if self.deadline.is_none() {
            self.started_at = Some(now);
            self.deadline = Some(now + FORCED_END_AFTER);
            log::debug!("Forced-end deadline set {:?} after the first roll", FORCED_END_AFTER);
        }

        let roller = self.active;
        let outcome = self.die.roll();
        self.stats.rolls += 1;
        self.phase = TurnPhase::Rolled;

        let pending = match outcome {
            RollOutcome::Forfeit => {
                log::debug!("{} rolled a one", self.active_player().name());
                self.stats.forfeits += 1;
                self.score_box.reset();
                self.emit(GameEvent::Forfeited {
                    player: self.active_player().name().to_string(),
                });
                self.finish_turn();
                0
            }
            RollOutcome::Value(face) => {
                self.score_box.add(face as u32);
                let pending = self.score_box.value();
                log::debug!(
                    "{} rolled {}, pending {}",
                    self.active_player().name(),
                    face,
                    pending
                );

                if self.deadline_passed(now) {
                    self.force_end();
                } else {
                    self.emit(GameEvent::Rolled {
                        player: self.active_player().name().to_string(),
                        face,
                        pending,
                    });
                    self.ask_active_player(pending)?;
                }
                pending
            }
        };

        Ok(RollReport {
            player: roller,
            outcome,
            pending,
            phase: self.phase,
        })
    }

    /// Rolls for the active player until the turn or the match ends.
    pub fn play_turn(&mut self) -> PigResult<()> {
        self.begin_turn()?;
        while self.phase == TurnPhase::AwaitingRoll {
            self.process_roll()?;
        }
        Ok(())
    }

    /// Plays turns while every banked score is below the target, unless the
    /// forced-end check stops the match first.
    pub fn play_match(&mut self) -> PigResult<MatchOutcome> {
        if self.is_finished() {
            return Err(GameError::MatchFinished.into());
        }

        while !self.is_finished() && self.all_below_target() {
            self.play_turn()?;
        }

        if !self.is_finished() {
            // The seat before the active one just banked the winning turn
            self.advance_to_previous_player();
            let outcome = MatchOutcome::Winner {
                index: self.active,
                name: self.active_player().name().to_string(),
            };
            self.finish_match(outcome, EndReason::TargetReached);
        }

        self.outcome
            .clone()
            .ok_or_else(|| GameError::MatchFinished.into())
    }

    fn all_below_target(&self) -> bool {
        self.players
            .iter()
            .all(|player| player.banked_score() < self.target)
    }

    fn ask_active_player(&mut self, pending: u32) -> PigResult<()> {
        self.phase = TurnPhase::AwaitingDecision;
        let keep_rolling = self.players[self.active].keep_rolling(pending)?;
        self.emit(GameEvent::Decided {
            player: self.active_player().name().to_string(),
            kind: self.active_player().kind(),
            keep_rolling,
        });

        if keep_rolling {
            self.phase = TurnPhase::AwaitingRoll;
        } else {
            self.bank();
        }
        Ok(())
    }

    fn bank(&mut self) {
        let points = self.score_box.value();
        let player = &mut self.players[self.active];
        player.add_score(points);
        log::debug!(
            "{} banks {} for a total of {}",
            player.name(),
            points,
            player.banked_score()
        );
        let event = GameEvent::Banked {
            player: player.name().to_string(),
            points,
            total: player.banked_score(),
        };
        self.emit(event);
        self.score_box.reset();
        self.finish_turn();
    }

    fn finish_turn(&mut self) {
        self.stats.turns += 1;
        self.advance_to_next_player();
        self.phase = TurnPhase::TurnComplete;
    }

    fn deadline_passed(&self, now: Instant) -> bool {
        self.deadline.map_or(false, |deadline| now >= deadline)
    }

    /// Ends the match on banked scores only; the pending box is not counted.
    fn force_end(&mut self) {
        log::info!("Forced-end deadline passed, deciding on banked scores");
        let top = self
            .players
            .iter()
            .map(Player::banked_score)
            .max()
            .unwrap_or(0);
        let leaders: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.banked_score() == top)
            .map(|(index, _)| index)
            .collect();

        let outcome = if top > 0 && leaders.len() == 1 {
            let index = leaders[0];
            MatchOutcome::Winner {
                index,
                name: self.players[index].name().to_string(),
            }
        } else {
            MatchOutcome::Tie { between: leaders }
        };
        self.finish_match(outcome, EndReason::Deadline);
    }

    fn finish_match(&mut self, outcome: MatchOutcome, reason: EndReason) {
        self.phase = TurnPhase::MatchComplete;
        let event = match &outcome {
            MatchOutcome::Winner { index, name } => GameEvent::Won {
                player: name.clone(),
                score: self.players[*index].banked_score(),
                reason,
            },
            MatchOutcome::Tie { between } => GameEvent::Tied {
                players: between
                    .iter()
                    .map(|&index| self.players[index].name().to_string())
                    .collect(),
            },
        };
        log::info!("Match over ({:?}): {}", reason, outcome);
        self.emit(event);
        self.outcome = Some(outcome);
        self.end_reason = Some(reason);
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::errors::PigError;
    use crate::events::{EventLog, NullSink};
    use crate::players::{AutomatedStrategy, ScriptedStrategy};
    use crate::rng::{GameRng, ScriptedSource};

    fn scripted(name: &str, decisions: &[bool]) -> Player {
        Player::new(name, Box::new(ScriptedStrategy::new(decisions.to_vec())))
    }

    fn engine(players: Vec<Player>, faces: &[u32]) -> TurnEngine {
        let die = Die::new(Box::new(ScriptedSource::new(faces.to_vec())));
        TurnEngine::new(players, die, Box::new(NullSink), DEFAULT_TARGET).unwrap()
    }

    #[test]
    fn test_rejects_empty_roster_and_zero_target() {
        let die = Die::new(Box::new(ScriptedSource::new([3])));
        let err = TurnEngine::new(Vec::new(), die, Box::new(NullSink), 100).err();
        assert!(matches!(err, Some(PigError::Config(ConfigError::NoPlayers))));

        let die = Die::new(Box::new(ScriptedSource::new([3])));
        let err = TurnEngine::new(vec![scripted("A", &[])], die, Box::new(NullSink), 0).err();
        assert!(matches!(
            err,
            Some(PigError::Config(ConfigError::InvalidTarget { target: 0 }))
        ));
    }

    #[test]
    fn test_pending_is_sum_of_rolls() {
        let faces = [2, 6, 3, 5, 4];
        let mut game = engine(vec![scripted("A", &[true; 10]), scripted("B", &[])], &faces);
        game.begin_turn().unwrap();

        let mut expected = 0;
        for face in faces {
            let report = game.process_roll().unwrap();
            expected += face;
            assert_eq!(report.outcome, RollOutcome::Value(face as u8));
            assert_eq!(report.pending, expected);
            assert_eq!(game.pending(), expected);
            assert_eq!(game.phase(), TurnPhase::AwaitingRoll);
        }
        assert_eq!(game.active_index(), 0);
    }

    #[test]
    fn test_three_rolls_then_hold_banks_fifteen() {
        let mut game = engine(
            vec![scripted("A", &[true, true, false]), scripted("B", &[])],
            &[4, 5, 6],
        );
        game.play_turn().unwrap();

        assert_eq!(game.players()[0].banked_score(), 15);
        assert_eq!(game.pending(), 0);
        assert_eq!(game.phase(), TurnPhase::TurnComplete);
        assert_eq!(game.active_index(), 1);
        assert_eq!(game.stats().turns, 1);
    }

    #[test]
    fn test_forfeit_discards_thirty_pending() {
        let mut game = engine(
            vec![scripted("A", &[true; 10]), scripted("B", &[])],
            &[6, 6, 6, 6, 6, 1],
        );
        game.begin_turn().unwrap();
        for _ in 0..5 {
            game.process_roll().unwrap();
        }
        assert_eq!(game.pending(), 30);

        let report = game.process_roll().unwrap();
        assert_eq!(report.outcome, RollOutcome::Forfeit);
        assert_eq!(report.pending, 0);
        assert_eq!(report.phase, TurnPhase::TurnComplete);
        assert_eq!(game.pending(), 0);
        assert_eq!(game.players()[0].banked_score(), 0);
        assert_eq!(game.active_index(), 1);
        assert_eq!(game.stats().forfeits, 1);
    }

    #[test]
    fn test_forfeit_keeps_existing_bank() {
        let mut first = scripted("A", &[]);
        first.add_score(40);
        let mut game = engine(vec![first, scripted("B", &[])], &[1]);
        game.play_turn().unwrap();
        assert_eq!(game.players()[0].banked_score(), 40);
    }

    #[test]
    fn test_next_and_previous_are_inverse() {
        let players = (0..3).map(|i| scripted(&format!("P{}", i), &[])).collect();
        let mut game = engine(players, &[3]);
        for start in 0..3 {
            game.set_active(start);
            game.advance_to_next_player();
            game.advance_to_previous_player();
            assert_eq!(game.active_index(), start);
            game.advance_to_previous_player();
            game.advance_to_next_player();
            assert_eq!(game.active_index(), start);
        }

        game.set_active(2);
        game.advance_to_next_player();
        assert_eq!(game.active_index(), 0);
        game.advance_to_previous_player();
        assert_eq!(game.active_index(), 2);
    }

    #[test]
    fn test_single_player_keeps_the_turn() {
        let mut game = engine(vec![scripted("Solo", &[])], &[5]);
        game.play_turn().unwrap();
        assert_eq!(game.active_index(), 0);
        assert_eq!(game.players()[0].banked_score(), 5);
    }

    #[test]
    fn test_rolling_outside_a_turn_is_rejected() {
        let mut game = engine(vec![scripted("A", &[]), scripted("B", &[])], &[4]);
        game.play_turn().unwrap();
        let err = game.process_roll().unwrap_err();
        assert!(matches!(
            err,
            PigError::Game(GameError::NotAwaitingRoll {
                phase: TurnPhase::TurnComplete
            })
        ));
    }

    #[test]
    fn test_decide_first_player_wraps_draw() {
        let players = (0..3).map(|i| scripted(&format!("P{}", i), &[])).collect();
        let mut game = engine(players, &[3]);

        game.decide_first_player(&mut ScriptedSource::new([2]));
        assert_eq!(game.active_index(), 2);
        game.decide_first_player(&mut ScriptedSource::new([3]));
        assert_eq!(game.active_index(), 0);
    }

    #[test]
    fn test_reaching_target_wins_for_previous_seat() {
        let die = Die::new(Box::new(ScriptedSource::new([6])));
        let mut game = TurnEngine::new(
            vec![scripted("A", &[true, false]), scripted("B", &[])],
            die,
            Box::new(NullSink),
            10,
        )
        .unwrap();

        let outcome = game.play_match().unwrap();
        assert_eq!(
            outcome,
            MatchOutcome::Winner {
                index: 0,
                name: "A".to_string()
            }
        );
        assert_eq!(game.end_reason(), Some(EndReason::TargetReached));
        assert_eq!(game.players()[0].banked_score(), 12);
        assert!(game.is_finished());
        assert!(matches!(
            game.play_match(),
            Err(PigError::Game(GameError::MatchFinished))
        ));
        assert!(matches!(
            game.process_roll(),
            Err(PigError::Game(GameError::MatchFinished))
        ));
    }

    #[test]
    fn test_match_continues_until_someone_reaches_target() {
        // B holds on every first roll of 4; A forfeits every turn
        let die = Die::new(Box::new(ScriptedSource::new([1, 4])));
        let mut game = TurnEngine::new(
            vec![scripted("A", &[]), scripted("B", &[])],
            die,
            Box::new(NullSink),
            20,
        )
        .unwrap();

        let outcome = game.play_match().unwrap();
        assert_eq!(outcome.winner_index(), Some(1));
        assert_eq!(game.players()[0].banked_score(), 0);
        assert_eq!(game.players()[1].banked_score(), 20);
        assert_eq!(game.stats().turns, 10);
    }

    fn timed_engine(scores: [u32; 2], faces: &[u32]) -> (TurnEngine, ManualClock) {
        let mut human = scripted("Human", &[true; 10]);
        human.add_score(scores[0]);
        let mut cpu = Player::automated(0, Box::new(ScriptedSource::new([35])));
        cpu.add_score(scores[1]);

        let clock = ManualClock::new();
        let game = engine(vec![human, cpu], faces).with_clock(Box::new(clock.clone()));
        (game, clock)
    }

    #[test]
    fn test_forced_end_picks_strict_leader() {
        let (mut game, clock) = timed_engine([40, 0], &[5]);
        game.begin_turn().unwrap();
        game.process_roll().unwrap();
        assert!(!game.is_finished());

        clock.advance(FORCED_END_AFTER + Duration::from_secs(1));
        let report = game.process_roll().unwrap();

        assert_eq!(report.phase, TurnPhase::MatchComplete);
        assert_eq!(
            game.outcome(),
            Some(&MatchOutcome::Winner {
                index: 0,
                name: "Human".to_string()
            })
        );
        assert_eq!(game.end_reason(), Some(EndReason::Deadline));
        // Pending score is not banked when the match is cut short
        assert_eq!(game.players()[0].banked_score(), 40);
    }

    #[test]
    fn test_forced_end_with_all_zero_is_a_tie() {
        let (mut game, clock) = timed_engine([0, 0], &[5]);
        game.begin_turn().unwrap();
        game.process_roll().unwrap();

        clock.advance(FORCED_END_AFTER);
        game.process_roll().unwrap();
        assert_eq!(
            game.outcome(),
            Some(&MatchOutcome::Tie {
                between: vec![0, 1]
            })
        );
    }

    #[test]
    fn test_forced_end_with_shared_lead_is_a_tie() {
        let (mut game, clock) = timed_engine([20, 20], &[5]);
        game.begin_turn().unwrap();
        game.process_roll().unwrap();
        clock.advance(FORCED_END_AFTER * 2);
        game.process_roll().unwrap();
        assert!(game.outcome().unwrap().is_tie());
    }

    #[test]
    fn test_deadline_is_fixed_at_first_roll() {
        let (mut game, clock) = timed_engine([10, 0], &[5]);
        assert_eq!(game.deadline(), None);

        game.begin_turn().unwrap();
        game.process_roll().unwrap();
        let deadline = game.deadline().unwrap();
        assert_eq!(deadline - game.started_at().unwrap(), FORCED_END_AFTER);

        clock.advance(Duration::from_secs(30));
        game.process_roll().unwrap();
        assert_eq!(game.deadline(), Some(deadline));
        assert!(!game.is_finished());

        clock.advance(Duration::from_secs(30));
        game.process_roll().unwrap();
        assert!(game.is_finished());
    }

    #[test]
    fn test_forfeit_after_deadline_does_not_end_match() {
        let (mut game, clock) = timed_engine([10, 0], &[5, 1]);
        game.begin_turn().unwrap();
        game.process_roll().unwrap();
        clock.advance(FORCED_END_AFTER);

        let report = game.process_roll().unwrap();
        assert_eq!(report.outcome, RollOutcome::Forfeit);
        assert!(!game.is_finished());
    }

    #[test]
    fn test_forced_end_skips_the_decision() {
        let log = EventLog::new();
        let clock = ManualClock::new();
        let die = Die::new(Box::new(ScriptedSource::new([3])));
        let mut game = TurnEngine::new(
            vec![scripted("A", &[true; 5]), scripted("B", &[])],
            die,
            Box::new(log.clone()),
            DEFAULT_TARGET,
        )
        .unwrap()
        .with_clock(Box::new(clock.clone()));

        game.begin_turn().unwrap();
        game.process_roll().unwrap();
        clock.advance(FORCED_END_AFTER);
        game.process_roll().unwrap();

        let events = log.events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::Tied {
                players: vec!["A".to_string(), "B".to_string()]
            })
        );
        let decisions = events
            .iter()
            .filter(|event| matches!(event, GameEvent::Decided { .. }))
            .count();
        assert_eq!(decisions, 1);
    }

    #[test]
    fn test_event_sequence_for_a_turn() {
        let log = EventLog::new();
        let die = Die::new(Box::new(ScriptedSource::new([4, 1])));
        let mut game = TurnEngine::new(
            vec![scripted("A", &[true]), scripted("B", &[])],
            die,
            Box::new(log.clone()),
            DEFAULT_TARGET,
        )
        .unwrap();
        game.play_turn().unwrap();

        let standings = vec![
            Standing {
                name: "A".to_string(),
                score: 0,
            },
            Standing {
                name: "B".to_string(),
                score: 0,
            },
        ];
        assert_eq!(
            log.events(),
            vec![
                GameEvent::TurnStarted {
                    player: "A".to_string(),
                    standings,
                },
                GameEvent::Rolled {
                    player: "A".to_string(),
                    face: 4,
                    pending: 4,
                },
                GameEvent::Decided {
                    player: "A".to_string(),
                    kind: crate::player::PlayerKind::Scripted,
                    keep_rolling: true,
                },
                GameEvent::Forfeited {
                    player: "A".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_seeded_bot_match_reaches_target() {
        let mut rng = GameRng::new(2024);
        let players = (0..3)
            .map(|i| Player::automated(i, Box::new(rng.fork())))
            .collect();
        let die = Die::new(Box::new(rng.fork()));
        let mut game = TurnEngine::new(players, die, Box::new(NullSink), DEFAULT_TARGET).unwrap();
        game.decide_first_player(&mut rng);

        let outcome = game.play_match().unwrap();
        let winner = outcome.winner_index().unwrap();
        assert!(game.players()[winner].banked_score() >= DEFAULT_TARGET);
        assert_eq!(game.end_reason(), Some(EndReason::TargetReached));

        let summary = game.summary();
        assert_eq!(summary.standings.len(), 3);
        assert!(summary.stats.rolls >= summary.stats.turns);
    }

    #[test]
    fn test_automated_strategy_can_drive_the_engine() {
        // Threshold 45 with pending below it: keep rolling until the forfeit
        let cpu = Player::new(
            "Cpu",
            Box::new(AutomatedStrategy::new(Box::new(ScriptedSource::new([35])))),
        );
        let mut game = engine(vec![cpu, scripted("B", &[])], &[6, 6, 6, 1]);
        game.play_turn().unwrap();
        assert_eq!(game.players()[0].banked_score(), 0);
        assert_eq!(game.stats().rolls, 4);
    }
}
