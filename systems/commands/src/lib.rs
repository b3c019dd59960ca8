#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command resolution for the player's per-turn actions.
//!
//! Every action is resolved against the player and the world exactly once and
//! always produces a [`CommandOutcome`]; refusals are reported through the
//! outcome rather than as errors. Each resolution performs at most one state
//! change and appends one [`Event`] describing it.

use fountain_core::{
    Action, CommandOutcome, Direction, Event, FOUNTAIN_ACTIVATED_MESSAGE, NO_FOUNTAIN_MESSAGE,
    WALL_MESSAGE,
};
use fountain_world::{GridWorld, Player};

/// Resolves the provided action, mutating the player or world when it succeeds.
pub fn resolve(
    action: Action,
    player: &mut Player,
    world: &mut GridWorld,
    out_events: &mut Vec<Event>,
) -> CommandOutcome {
    match action {
        Action::North => step(Direction::North, player, world, out_events),
        Action::South => step(Direction::South, player, world, out_events),
        Action::East => step(Direction::East, player, world, out_events),
        Action::West => step(Direction::West, player, world, out_events),
        Action::Activate => activate(player, world, out_events),
    }
}

/// Moves the player one room, refusing when the destination leaves the grid.
pub fn step(
    direction: Direction,
    player: &mut Player,
    world: &GridWorld,
    out_events: &mut Vec<Event>,
) -> CommandOutcome {
    let from = player.position();
    match from.step(direction).filter(|to| world.contains(*to)) {
        Some(to) => {
            player.move_to(to);
            out_events.push(Event::PlayerMoved { from, to });
            CommandOutcome::success("")
        }
        None => {
            out_events.push(Event::MoveBlocked {
                at: from,
                direction,
            });
            CommandOutcome::failure(WALL_MESSAGE)
        }
    }
}

/// Switches the fountain on when the player stands next to its dormant lever.
pub fn activate(
    player: &Player,
    world: &mut GridWorld,
    out_events: &mut Vec<Event>,
) -> CommandOutcome {
    let at = player.position();
    if world.is_fountain_active() || at != world.fountain() {
        out_events.push(Event::ActivationRejected { at });
        return CommandOutcome::failure(NO_FOUNTAIN_MESSAGE);
    }

    world.activate_fountain();
    out_events.push(Event::FountainActivated { at });
    CommandOutcome::success(FOUNTAIN_ACTIVATED_MESSAGE)
}
