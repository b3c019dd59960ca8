#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fountain engine.
//!
//! This crate defines the vocabulary that connects adapters, the authoritative
//! world, and the pure systems. Adapters submit [`Action`] values describing the
//! player's intent, the command system resolves them against the world and
//! reports a [`CommandOutcome`] together with the [`Event`] values describing
//! what changed. The session system drives turns and reports [`GameStatus`]
//! transitions back to the adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest map side length the interactive prompt accepts.
pub const MIN_MAP_SIZE: u32 = 5;

/// Largest map side length the interactive prompt accepts.
pub const MAX_MAP_SIZE: u32 = 8;

/// Number of pits placed in a freshly generated cavern.
pub const DEFAULT_PIT_COUNT: u32 = 2;

/// Message reported when a move would leave the grid.
pub const WALL_MESSAGE: &str = "You're facing a wall.";

/// Message reported when activation is attempted away from a dormant fountain.
pub const NO_FOUNTAIN_MESSAGE: &str = "No fountain to activate";

/// Narration reported when the fountain is switched on.
pub const FOUNTAIN_ACTIVATED_MESSAGE: &str = "You found a lever and pull it to trigger the fountain.\nYou can hear water flows loudly now.\nTime to leave this place, go back to the entrance...";

/// Narration reported when the player escapes with the fountain running.
pub const VICTORY_NARRATION: &str = "You escaped, congratulations.";

/// Narration reported when the player falls into a pit.
pub const DEATH_NARRATION: &str = "You fell into a pit to your death.";

/// Location of a single room expressed as horizontal and vertical indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    x: u32,
    y: u32,
}

impl Coord {
    /// Creates a new room coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based horizontal index.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based vertical index.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Offsets the coordinate by the provided signed deltas.
    ///
    /// Returns `None` when either axis would leave the non-negative range.
    /// Upper bounds are the world's concern and are not checked here.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Self { x, y })
    }

    /// Moves the coordinate one room in the provided direction.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Classification of a single room of the cavern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    /// Entrance of the cavern where the player starts and must return.
    Spawn,
    /// Room holding the fountain lever.
    Fountain,
    /// Empty room with nothing remarkable in it.
    Normal,
    /// Lethal room; entering it ends the game.
    Pit,
    /// Sentinel returned for coordinates outside the grid. Never stored.
    OffMap,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing `y`.
    North,
    /// Movement toward decreasing `y`.
    South,
    /// Movement toward increasing `x`.
    East,
    /// Movement toward decreasing `x`.
    West,
}

impl Direction {
    /// Unit step applied to a coordinate when moving in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Closed set of intents the player may submit during a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Step one room north.
    North,
    /// Step one room south.
    South,
    /// Step one room east.
    East,
    /// Step one room west.
    West,
    /// Pull the fountain lever in the current room.
    Activate,
}

impl Action {
    /// Direction of travel for movement actions, `None` for activation.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::North => Some(Direction::North),
            Self::South => Some(Direction::South),
            Self::East => Some(Direction::East),
            Self::West => Some(Direction::West),
            Self::Activate => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::North,
            Direction::South => Self::South,
            Direction::East => Self::East,
            Direction::West => Self::West,
        }
    }
}

/// Result of resolving a single action against the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// Whether the action took effect.
    pub succeeded: bool,
    /// Text to surface to the player. Empty when there is nothing to say.
    pub message: &'static str,
}

impl CommandOutcome {
    /// Creates a successful outcome carrying the provided message.
    #[must_use]
    pub const fn success(message: &'static str) -> Self {
        Self {
            succeeded: true,
            message,
        }
    }

    /// Creates a failed outcome carrying the provided message.
    #[must_use]
    pub const fn failure(message: &'static str) -> Self {
        Self {
            succeeded: false,
            message,
        }
    }

    /// Reports whether the outcome carries text worth displaying.
    #[must_use]
    pub const fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

/// Facts recorded while a turn is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the player moved between two rooms.
    PlayerMoved {
        /// Room occupied before moving.
        from: Coord,
        /// Room occupied after moving.
        to: Coord,
    },
    /// Reports that a move was refused because it would leave the grid.
    MoveBlocked {
        /// Room the player remained in.
        at: Coord,
        /// Direction the player attempted to travel.
        direction: Direction,
    },
    /// Confirms that the fountain was switched on.
    FountainActivated {
        /// Room holding the fountain.
        at: Coord,
    },
    /// Reports that an activation request had nothing to act on.
    ActivationRejected {
        /// Room the player stood in when trying.
        at: Coord,
    },
    /// Reports that the player entered a pit.
    PlayerFell {
        /// Pit room the player entered.
        at: Coord,
    },
    /// Reports that the player left the cavern after activating the fountain.
    PlayerEscaped {
        /// Entrance room the player left through.
        at: Coord,
    },
}

/// Lifecycle of a single game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The player is alive and still inside the cavern.
    #[default]
    Exploring,
    /// The player escaped after activating the fountain.
    Won,
    /// The player fell into a pit.
    Dead,
}

impl GameStatus {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Exploring)
    }

    /// Closing narration for terminal states.
    #[must_use]
    pub const fn narration(self) -> Option<&'static str> {
        match self {
            Self::Exploring => None,
            Self::Won => Some(VICTORY_NARRATION),
            Self::Dead => Some(DEATH_NARRATION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Coord, Direction, Event, GameStatus, DEATH_NARRATION, VICTORY_NARRATION};

    #[test]
    fn offset_rejects_negative_axes() {
        let origin = Coord::new(0, 0);
        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(0, -1), None);
        assert_eq!(origin.offset(1, 1), Some(Coord::new(1, 1)));
    }

    #[test]
    fn north_increases_y_and_east_increases_x() {
        let origin = Coord::new(2, 2);
        assert_eq!(origin.step(Direction::North), Some(Coord::new(2, 3)));
        assert_eq!(origin.step(Direction::South), Some(Coord::new(2, 1)));
        assert_eq!(origin.step(Direction::East), Some(Coord::new(3, 2)));
        assert_eq!(origin.step(Direction::West), Some(Coord::new(1, 2)));
    }

    #[test]
    fn activate_has_no_direction() {
        assert_eq!(Action::Activate.direction(), None);
        for direction in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            assert_eq!(Action::from(direction).direction(), Some(direction));
        }
    }

    #[test]
    fn only_terminal_states_carry_narration() {
        assert!(!GameStatus::Exploring.is_terminal());
        assert_eq!(GameStatus::Exploring.narration(), None);
        assert_eq!(GameStatus::Won.narration(), Some(VICTORY_NARRATION));
        assert_eq!(GameStatus::Dead.narration(), Some(DEATH_NARRATION));
    }

    #[test]
    fn coordinate_displays_as_pair() {
        assert_eq!(Coord::new(3, 7).to_string(), "(3, 7)");
    }

    #[test]
    fn events_serialize_with_variant_tags() {
        let event = Event::PlayerMoved {
            from: Coord::new(0, 0),
            to: Coord::new(1, 0),
        };
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(
            json,
            r#"{"PlayerMoved":{"from":{"x":0,"y":0},"to":{"x":1,"y":0}}}"#
        );
    }
}
