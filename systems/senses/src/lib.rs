#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Sense evaluation system that turns the recorded player position into hints.
//!
//! Senses only read the world. They are evaluated against
//! [`GridWorld::last_player_position`] so the player never needs to be passed
//! in, and repeated evaluation without an intervening mutation always yields
//! the same hints.

use fountain_core::Room;
use fountain_world::GridWorld;
use serde::Serialize;

/// Hints the player can perceive from the current room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Sense {
    /// The player stands in the cavern entrance.
    Light,
    /// At least one of the eight surrounding rooms is a pit.
    AdjacentPit,
    /// The player stands in the fountain room.
    FountainProximity,
}

/// Every sense in the order hints are displayed.
pub const SENSES: [Sense; 3] = [Sense::Light, Sense::AdjacentPit, Sense::FountainProximity];

impl Sense {
    /// Text shown to the player while the sense holds.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Light => "You can sense the heat of sunlight, this must be the cavern entrance.",
            Self::AdjacentPit => {
                "You hear the wind blowing and noise echoing. There must be a pit somewhere near."
            }
            Self::FountainProximity => "You hear water flowing.",
        }
    }

    /// Reports whether the sense holds for the recorded player position.
    #[must_use]
    pub fn holds(self, world: &GridWorld) -> bool {
        let position = world.last_player_position();
        match self {
            Self::Light => world.room(position) == Room::Spawn,
            Self::AdjacentPit => world.is_type_adjacent(Room::Pit, position),
            Self::FountainProximity => world.room(position) == Room::Fountain,
        }
    }
}

/// Collects every sense that currently holds, in display order.
#[must_use]
pub fn evaluate(world: &GridWorld) -> Vec<Sense> {
    SENSES
        .iter()
        .copied()
        .filter(|sense| sense.holds(world))
        .collect()
}

/// Collects the messages of every sense that currently holds, in display order.
#[must_use]
pub fn messages(world: &GridWorld) -> Vec<&'static str> {
    evaluate(world).into_iter().map(Sense::message).collect()
}
