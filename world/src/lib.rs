#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Fountain.
//!
//! [`GridWorld`] owns the rooms of the cavern together with the spawn and
//! fountain locations, the fountain switch and the last position the player was
//! recorded at. Rooms are only written while the world is being built; after
//! that the only mutations are [`GridWorld::activate_fountain`] and
//! [`GridWorld::record_player_position`].

mod generation;
mod player;

use fountain_core::{Coord, Room};
use rand::Rng;
use thiserror::Error;

pub use generation::MAX_PLACEMENT_ATTEMPTS;
pub use player::Player;

/// Largest number of rooms a cavern may hold.
pub const MAX_ROOM_COUNT: u64 = 1 << 20;

const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Parameters that shape a generated cavern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    width: u32,
    height: u32,
    pit_count: u32,
}

impl WorldConfig {
    /// Creates a configuration for a rectangular cavern.
    #[must_use]
    pub const fn new(width: u32, height: u32, pit_count: u32) -> Self {
        Self {
            width,
            height,
            pit_count,
        }
    }

    /// Creates a configuration for a `size × size` cavern.
    #[must_use]
    pub const fn square(size: u32, pit_count: u32) -> Self {
        Self::new(size, size, pit_count)
    }

    /// Number of rooms along the `x` axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rooms along the `y` axis.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of pits to place.
    #[must_use]
    pub const fn pit_count(&self) -> u32 {
        self.pit_count
    }
}

/// Reasons a world could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// One of the grid dimensions is zero.
    #[error("cannot build a {width}x{height} cavern")]
    EmptyGrid {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The grid holds more rooms than [`MAX_ROOM_COUNT`].
    #[error("a {width}x{height} cavern has too many rooms")]
    TooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Random placement gave up before every room found a valid cell.
    #[error("gave up placing {room:?} rooms after {placed} of {requested} ({attempts} attempts)")]
    GenerationInfeasible {
        /// Kind of room that could not be placed.
        room: Room,
        /// Rooms of that kind placed before giving up.
        placed: u32,
        /// Rooms of that kind requested.
        requested: u32,
        /// Samples drawn for the failing placement.
        attempts: u32,
    },
    /// A fixed layout references a coordinate outside the grid.
    #[error("coordinate {coord} lies outside the cavern")]
    OutOfBounds {
        /// Offending coordinate.
        coord: Coord,
    },
    /// A fixed layout puts the fountain on the entrance.
    #[error("fountain cannot share the entrance room {coord}")]
    FountainOnSpawn {
        /// Shared coordinate.
        coord: Coord,
    },
    /// A fixed layout puts a pit on a room that is not normal.
    #[error("pit at {coord} overlaps another room")]
    PitOnReservedRoom {
        /// Offending coordinate.
        coord: Coord,
    },
    /// A fixed layout puts a pit next to another pit.
    #[error("pit at {coord} touches another pit")]
    AdjacentPits {
        /// Coordinate of the later pit.
        coord: Coord,
    },
}

/// Represents the authoritative state of one cavern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    width: u32,
    height: u32,
    rooms: Vec<Room>,
    spawn: Coord,
    fountain: Coord,
    fountain_active: bool,
    last_player_position: Coord,
}

impl GridWorld {
    /// Generates a cavern by uniform rejection sampling.
    ///
    /// The spawn is accepted on the first draw, the fountain is redrawn until it
    /// differs from the spawn, and each pit is redrawn until it lands on a normal
    /// room with no pit among its eight neighbours. Every placement gives up
    /// after [`MAX_PLACEMENT_ATTEMPTS`] draws.
    pub fn generate<R>(config: WorldConfig, rng: &mut R) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        generation::generate(config, rng)
    }

    /// Builds a cavern with a fixed layout.
    ///
    /// Pits are placed in the order given and must satisfy the same rules as
    /// generated pits.
    pub fn from_layout(
        width: u32,
        height: u32,
        spawn: Coord,
        fountain: Coord,
        pits: &[Coord],
    ) -> Result<Self, WorldError> {
        let room_count = room_count(width, height)?;
        for coord in [spawn, fountain] {
            if !in_bounds(width, height, coord) {
                return Err(WorldError::OutOfBounds { coord });
            }
        }
        if spawn == fountain {
            return Err(WorldError::FountainOnSpawn { coord: spawn });
        }

        let mut world = Self::with_landmarks(width, height, room_count, spawn, fountain);
        for &coord in pits {
            if !world.contains(coord) {
                return Err(WorldError::OutOfBounds { coord });
            }
            if world.room(coord) != Room::Normal {
                return Err(WorldError::PitOnReservedRoom { coord });
            }
            if world.is_type_adjacent(Room::Pit, coord) {
                return Err(WorldError::AdjacentPits { coord });
            }
            world.dig_pit(coord);
        }

        Ok(world)
    }

    /// Creates an all-normal cavern holding only the entrance and the fountain.
    fn with_landmarks(
        width: u32,
        height: u32,
        room_count: usize,
        spawn: Coord,
        fountain: Coord,
    ) -> Self {
        let mut world = Self {
            width,
            height,
            rooms: vec![Room::Normal; room_count],
            spawn,
            fountain,
            fountain_active: false,
            last_player_position: spawn,
        };
        world.write_room(spawn, Room::Spawn);
        world.write_room(fountain, Room::Fountain);
        world
    }

    fn dig_pit(&mut self, coord: Coord) {
        self.write_room(coord, Room::Pit);
    }

    fn write_room(&mut self, coord: Coord, room: Room) {
        if let Some(slot) = self.index(coord).and_then(|index| self.rooms.get_mut(index)) {
            *slot = room;
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.y()).ok()?;
        let column = usize::try_from(coord.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Number of rooms along the `x` axis.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rooms along the `y` axis.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Entrance of the cavern.
    #[must_use]
    pub const fn spawn(&self) -> Coord {
        self.spawn
    }

    /// Room holding the fountain lever.
    #[must_use]
    pub const fn fountain(&self) -> Coord {
        self.fountain
    }

    /// Reports whether the fountain has been switched on.
    #[must_use]
    pub const fn is_fountain_active(&self) -> bool {
        self.fountain_active
    }

    /// Position recorded at the end of the previous turn.
    #[must_use]
    pub const fn last_player_position(&self) -> Coord {
        self.last_player_position
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        in_bounds(self.width, self.height, coord)
    }

    /// Returns the room at the provided signed location.
    ///
    /// Any location outside the grid, negative ones included, reads as
    /// [`Room::OffMap`].
    #[must_use]
    pub fn room_at(&self, x: i64, y: i64) -> Room {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => self.room(Coord::new(x, y)),
            _ => Room::OffMap,
        }
    }

    /// Returns the room stored at the coordinate, or [`Room::OffMap`].
    #[must_use]
    pub fn room(&self, coord: Coord) -> Room {
        self.index(coord)
            .and_then(|index| self.rooms.get(index).copied())
            .unwrap_or(Room::OffMap)
    }

    /// Reports whether any of the eight rooms surrounding `coord` is `room`.
    ///
    /// Edges do not wrap; neighbours beyond them read as [`Room::OffMap`].
    #[must_use]
    pub fn is_type_adjacent(&self, room: Room, coord: Coord) -> bool {
        let x = i64::from(coord.x());
        let y = i64::from(coord.y());
        NEIGHBOUR_OFFSETS
            .iter()
            .any(|&(dx, dy)| self.room_at(x + dx, y + dy) == room)
    }

    /// Iterates every stored room together with its coordinate, row by row.
    pub fn rooms(&self) -> impl Iterator<Item = (Coord, Room)> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
            .map(|coord| (coord, self.room(coord)))
    }

    /// Number of pit rooms in the cavern.
    #[must_use]
    pub fn pit_count(&self) -> usize {
        self.rooms.iter().filter(|room| **room == Room::Pit).count()
    }

    /// Switches the fountain on. Calling it again has no further effect.
    pub fn activate_fountain(&mut self) {
        self.fountain_active = true;
    }

    /// Overwrites the position senses are evaluated against.
    pub fn record_player_position(&mut self, coord: Coord) {
        self.last_player_position = coord;
    }
}

/// Validates the grid dimensions and returns the number of rooms to store.
fn room_count(width: u32, height: u32) -> Result<usize, WorldError> {
    if width == 0 || height == 0 {
        return Err(WorldError::EmptyGrid { width, height });
    }
    let count = u64::from(width) * u64::from(height);
    if count > MAX_ROOM_COUNT {
        return Err(WorldError::TooLarge { width, height });
    }
    usize::try_from(count).map_err(|_| WorldError::TooLarge { width, height })
}

const fn in_bounds(width: u32, height: u32, coord: Coord) -> bool {
    coord.x() < width && coord.y() < height
}
