#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn-based state machine that drives a single game of Fountain.
//!
//! A [`Game`] owns the world and the player for the whole session. Each turn is
//! split in two halves so adapters can block on input in between:
//! [`Game::begin_turn`] performs the win check and gathers the senses, then
//! [`Game::resolve`] applies the chosen action, syncs the recorded position and
//! performs the death check. [`Game::run`] loops both halves against an
//! [`ActionSource`] and an [`OutcomeSink`] until the game ends.

use fountain_core::{Action, CommandOutcome, Coord, Event, GameStatus, Room};
use fountain_system_senses::Sense;
use fountain_world::{GridWorld, Player};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

/// Supplies one classified action per turn.
pub trait ActionSource {
    /// Failure raised when no action can be obtained.
    type Error;

    /// Blocks until the next action is available.
    fn next_action(&mut self) -> Result<Action, Self::Error>;
}

/// Receives everything a player should be told during a game.
pub trait OutcomeSink {
    /// Failure raised when the output cannot be delivered.
    type Error;

    /// Called before input is requested with the hints that currently hold.
    fn turn_started(&mut self, position: Coord, senses: &[Sense]) -> Result<(), Self::Error>;

    /// Called once the action of the turn has been resolved.
    fn turn_resolved(&mut self, report: &TurnReport) -> Result<(), Self::Error>;

    /// Called once when the game reaches a terminal status.
    fn game_finished(&mut self, status: GameStatus) -> Result<(), Self::Error>;
}

/// Result of the first half of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The game continues and waits for the player's action.
    AwaitingAction {
        /// Room the player stands in.
        position: Coord,
        /// Senses that hold, in display order.
        senses: Vec<Sense>,
    },
    /// The game is over.
    Finished(GameStatus),
}

/// Everything that happened while resolving one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Sequence number of the resolved turn, starting at one.
    pub turn: u32,
    /// Action that was resolved.
    pub action: Action,
    /// Room the player occupies after the turn.
    pub position: Coord,
    /// Outcome reported by the command system.
    pub outcome: CommandOutcome,
    /// Events recorded during the turn, in order.
    pub events: Vec<Event>,
    /// Status of the game after the death check.
    pub status: GameStatus,
}

/// Misuse of the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An action was submitted after the game ended.
    #[error("the game is already over ({0:?})")]
    Finished(GameStatus),
}

/// A single game session.
#[derive(Clone, Debug)]
pub struct Game {
    world: GridWorld,
    player: Player,
    status: GameStatus,
    turns: u32,
    journal: Vec<Event>,
}

impl Game {
    /// Starts a session with a living player standing at the world's spawn.
    #[must_use]
    pub fn new(mut world: GridWorld) -> Self {
        let player = Player::new(world.spawn());
        world.record_player_position(player.position());
        Self {
            world,
            player,
            status: GameStatus::Exploring,
            turns: 0,
            journal: Vec::new(),
        }
    }

    /// Read-only access to the world.
    #[must_use]
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Read-only access to the player.
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of actions resolved so far.
    #[must_use]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Every event recorded since the session started.
    #[must_use]
    pub fn journal(&self) -> &[Event] {
        &self.journal
    }

    /// Performs the win check and, if the game goes on, evaluates the senses.
    pub fn begin_turn(&mut self) -> TurnStart {
        if self.status.is_terminal() || self.escape() {
            return TurnStart::Finished(self.status);
        }

        TurnStart::AwaitingAction {
            position: self.player.position(),
            senses: fountain_system_senses::evaluate(&self.world),
        }
    }

    /// Resolves the player's action, then syncs the recorded position and
    /// performs the death check.
    ///
    /// The win check runs first, so a player already back at the entrance with
    /// the fountain running wins instead of acting. The sync and the death
    /// check run whether or not the action succeeded.
    pub fn resolve(&mut self, action: Action) -> Result<TurnReport, SessionError> {
        if self.status.is_terminal() || self.escape() {
            return Err(SessionError::Finished(self.status));
        }
        Ok(self.play(action))
    }

    /// Plays turns until the game ends, returning the terminal status.
    pub fn run<S, O>(&mut self, source: &mut S, sink: &mut O) -> Result<GameStatus, S::Error>
    where
        S: ActionSource + ?Sized,
        O: OutcomeSink<Error = S::Error> + ?Sized,
    {
        loop {
            match self.begin_turn() {
                TurnStart::Finished(status) => {
                    sink.game_finished(status)?;
                    return Ok(status);
                }
                TurnStart::AwaitingAction { position, senses } => {
                    sink.turn_started(position, &senses)?;
                    let action = source.next_action()?;
                    let report = self.play(action);
                    sink.turn_resolved(&report)?;
                }
            }
        }
    }

    fn play(&mut self, action: Action) -> TurnReport {
        self.turns = self.turns.saturating_add(1);
        let mut events = Vec::new();
        let outcome = fountain_system_commands::resolve(
            action,
            &mut self.player,
            &mut self.world,
            &mut events,
        );

        let position = self.player.position();
        self.world.record_player_position(position);

        if self.world.room(position) == Room::Pit {
            self.player.kill();
            events.push(Event::PlayerFell { at: position });
        }

        for event in &events {
            debug!("turn {}: {event:?}", self.turns);
        }
        self.journal.extend_from_slice(&events);
        if !self.player.is_alive() {
            self.finish(GameStatus::Dead);
        }

        TurnReport {
            turn: self.turns,
            action,
            position,
            outcome,
            events,
            status: self.status,
        }
    }

    /// Ends the game as won if the player stands at the entrance with the
    /// fountain running.
    fn escape(&mut self) -> bool {
        let position = self.player.position();
        if !self.world.is_fountain_active() || position != self.world.spawn() {
            return false;
        }
        let event = Event::PlayerEscaped { at: position };
        debug!("turn {}: {event:?}", self.turns);
        self.journal.push(event);
        self.finish(GameStatus::Won);
        true
    }

    fn finish(&mut self, status: GameStatus) {
        info!("game finished as {status:?} after {} turns", self.turns);
        self.status = status;
    }
}
