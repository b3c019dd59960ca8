use std::{collections::VecDeque, convert::Infallible};

use fountain_core::{
    Action, Coord, Event, GameStatus, FOUNTAIN_ACTIVATED_MESSAGE, WALL_MESSAGE,
};
use fountain_system_senses::Sense;
use fountain_system_session::{
    ActionSource, Game, OutcomeSink, SessionError, TurnReport, TurnStart,
};
use fountain_world::{GridWorld, WorldConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct Script {
    actions: VecDeque<Action>,
}

impl Script {
    fn new(actions: &[Action]) -> Self {
        Self {
            actions: actions.iter().copied().collect(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ScriptExhausted;

impl ActionSource for Script {
    type Error = ScriptExhausted;

    fn next_action(&mut self) -> Result<Action, Self::Error> {
        self.actions.pop_front().ok_or(ScriptExhausted)
    }
}

#[derive(Default)]
struct Transcript {
    started: Vec<(Coord, Vec<Sense>)>,
    reports: Vec<TurnReport>,
    finished: Vec<GameStatus>,
}

impl OutcomeSink for Transcript {
    type Error = ScriptExhausted;

    fn turn_started(&mut self, position: Coord, senses: &[Sense]) -> Result<(), Self::Error> {
        self.started.push((position, senses.to_vec()));
        Ok(())
    }

    fn turn_resolved(&mut self, report: &TurnReport) -> Result<(), Self::Error> {
        self.reports.push(report.clone());
        Ok(())
    }

    fn game_finished(&mut self, status: GameStatus) -> Result<(), Self::Error> {
        self.finished.push(status);
        Ok(())
    }
}

fn expect_awaiting(game: &mut Game) -> Vec<Sense> {
    match game.begin_turn() {
        TurnStart::AwaitingAction { senses, .. } => senses,
        TurnStart::Finished(status) => panic!("game ended unexpectedly as {status:?}"),
    }
}

#[test]
fn fountain_then_return_to_entrance_wins() {
    let world = GridWorld::from_layout(3, 3, Coord::new(0, 0), Coord::new(2, 2), &[])
        .expect("valid layout");
    let mut game = Game::new(world);

    for action in [Action::East, Action::North, Action::East, Action::North] {
        let _ = expect_awaiting(&mut game);
        let report = game.resolve(action).expect("game in progress");
        assert!(report.outcome.succeeded, "{action:?} should stay inside the grid");
    }
    assert_eq!(game.player().position(), Coord::new(2, 2));

    assert_eq!(expect_awaiting(&mut game), vec![Sense::FountainProximity]);
    let report = game.resolve(Action::Activate).expect("game in progress");
    assert!(report.outcome.succeeded);
    assert_eq!(report.outcome.message, FOUNTAIN_ACTIVATED_MESSAGE);

    for action in [Action::West, Action::South, Action::West, Action::South] {
        let _ = expect_awaiting(&mut game);
        let _ = game.resolve(action).expect("game in progress");
    }

    assert_eq!(game.begin_turn(), TurnStart::Finished(GameStatus::Won));
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(
        game.journal().last(),
        Some(&Event::PlayerEscaped {
            at: Coord::new(0, 0)
        })
    );
}

#[test]
fn returning_without_fountain_does_not_win() {
    let world = GridWorld::from_layout(3, 3, Coord::new(0, 0), Coord::new(2, 2), &[])
        .expect("valid layout");
    let mut game = Game::new(world);

    let _ = game.resolve(Action::East).expect("game in progress");
    let _ = game.resolve(Action::West).expect("game in progress");

    assert_eq!(expect_awaiting(&mut game), vec![Sense::Light]);
    assert_eq!(game.status(), GameStatus::Exploring);
}

#[test]
fn stepping_into_sensed_pit_kills_the_player() {
    let world = GridWorld::from_layout(3, 3, Coord::new(1, 1), Coord::new(0, 2), &[
        Coord::new(2, 1),
    ])
    .expect("valid layout");
    let mut game = Game::new(world);

    let senses = expect_awaiting(&mut game);
    assert!(
        senses.contains(&Sense::AdjacentPit),
        "the pit east of the player should be audible"
    );

    let report = game.resolve(Action::East).expect("game in progress");
    assert_eq!(report.status, GameStatus::Dead);
    assert_eq!(
        report.events.last(),
        Some(&Event::PlayerFell {
            at: Coord::new(2, 1)
        })
    );
    assert!(!game.player().is_alive());
    assert_eq!(game.begin_turn(), TurnStart::Finished(GameStatus::Dead));
}

#[test]
fn resolving_at_the_entrance_with_the_fountain_running_wins() {
    let world = GridWorld::from_layout(2, 1, Coord::new(0, 0), Coord::new(1, 0), &[])
        .expect("valid layout");
    let mut game = Game::new(world);

    for action in [Action::East, Action::Activate, Action::West] {
        let report = game.resolve(action).expect("game in progress");
        assert_eq!(report.status, GameStatus::Exploring);
    }
    assert!(game.world().is_fountain_active());

    assert_eq!(
        game.resolve(Action::East),
        Err(SessionError::Finished(GameStatus::Won))
    );
    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.player().position(), Coord::new(0, 0));
    assert_eq!(game.turns(), 3);
    assert_eq!(
        game.journal().last(),
        Some(&Event::PlayerEscaped {
            at: Coord::new(0, 0)
        })
    );
    assert_eq!(game.begin_turn(), TurnStart::Finished(GameStatus::Won));
}

#[test]
fn wall_collision_still_consumes_the_turn() {
    let world = GridWorld::from_layout(3, 3, Coord::new(0, 1), Coord::new(2, 2), &[])
        .expect("valid layout");
    let mut game = Game::new(world);

    let report = game.resolve(Action::West).expect("game in progress");

    assert!(!report.outcome.succeeded);
    assert_eq!(report.outcome.message, WALL_MESSAGE);
    assert_eq!(report.position, Coord::new(0, 1));
    assert_eq!(report.turn, 1);
    assert_eq!(game.world().last_player_position(), Coord::new(0, 1));
    assert_eq!(game.status(), GameStatus::Exploring);
}

#[test]
fn senses_read_the_position_synced_after_the_turn() {
    let world = GridWorld::from_layout(4, 1, Coord::new(0, 0), Coord::new(3, 0), &[])
        .expect("valid layout");
    let mut game = Game::new(world);

    assert_eq!(expect_awaiting(&mut game), vec![Sense::Light]);
    let _ = game.resolve(Action::East).expect("game in progress");
    assert_eq!(game.world().last_player_position(), Coord::new(1, 0));
    assert!(expect_awaiting(&mut game).is_empty());
}

#[test]
fn run_drives_scripted_game_to_victory() {
    let world = GridWorld::from_layout(2, 2, Coord::new(0, 0), Coord::new(1, 1), &[])
        .expect("valid layout");
    let mut game = Game::new(world);
    let mut script = Script::new(&[
        Action::East,
        Action::North,
        Action::Activate,
        Action::South,
        Action::West,
    ]);
    let mut transcript = Transcript::default();

    let status = game.run(&mut script, &mut transcript);

    assert_eq!(status, Ok(GameStatus::Won));
    assert_eq!(transcript.finished, vec![GameStatus::Won]);
    assert_eq!(transcript.reports.len(), 5);
    assert_eq!(transcript.started.len(), 5);
    assert_eq!(transcript.started[0], (Coord::new(0, 0), vec![Sense::Light]));
    assert_eq!(
        transcript.started[3],
        (Coord::new(1, 1), vec![Sense::FountainProximity])
    );
}

#[test]
fn run_surfaces_source_errors() {
    let world = GridWorld::from_layout(2, 2, Coord::new(0, 0), Coord::new(1, 1), &[])
        .expect("valid layout");
    let mut game = Game::new(world);
    let mut script = Script::new(&[Action::East]);
    let mut transcript = Transcript::default();

    let status = game.run(&mut script, &mut transcript);

    assert_eq!(status, Err(ScriptExhausted));
    assert!(transcript.finished.is_empty());
    assert_eq!(game.turns(), 1);
}

#[test]
fn generated_worlds_start_at_the_lit_entrance() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let world = GridWorld::generate(WorldConfig::square(6, 2), &mut rng).expect("feasible");
    let spawn = world.spawn();
    let mut game = Game::new(world);

    let senses = expect_awaiting(&mut game);
    assert_eq!(game.player().position(), spawn);
    assert_eq!(senses.first(), Some(&Sense::Light));
}

#[test]
fn infallible_sinks_compose_with_run() {
    struct Silent;

    impl OutcomeSink for Silent {
        type Error = Infallible;

        fn turn_started(&mut self, _: Coord, _: &[Sense]) -> Result<(), Infallible> {
            Ok(())
        }

        fn turn_resolved(&mut self, _: &TurnReport) -> Result<(), Infallible> {
            Ok(())
        }

        fn game_finished(&mut self, _: GameStatus) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct AlwaysEast;

    impl ActionSource for AlwaysEast {
        type Error = Infallible;

        fn next_action(&mut self) -> Result<Action, Infallible> {
            Ok(Action::East)
        }
    }

    let world = GridWorld::from_layout(4, 1, Coord::new(0, 0), Coord::new(1, 0), &[
        Coord::new(3, 0),
    ])
    .expect("valid layout");
    let mut game = Game::new(world);

    assert_eq!(game.run(&mut AlwaysEast, &mut Silent), Ok(GameStatus::Dead));
    assert_eq!(game.player().position(), Coord::new(3, 0));
}
