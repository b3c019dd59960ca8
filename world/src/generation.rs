use fountain_core::{Coord, Room};
use log::{debug, warn};
use rand::Rng;

use crate::{room_count, GridWorld, WorldConfig, WorldError};

/// Upper bound on random draws spent placing a single room.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

pub(crate) fn generate<R>(config: WorldConfig, rng: &mut R) -> Result<GridWorld, WorldError>
where
    R: Rng + ?Sized,
{
    let (width, height) = (config.width(), config.height());
    let room_count = room_count(width, height)?;

    let spawn = random_coord(width, height, rng);
    let Some(fountain) = sample_until(width, height, rng, |coord| coord != spawn) else {
        let error = WorldError::GenerationInfeasible {
            room: Room::Fountain,
            placed: 0,
            requested: 1,
            attempts: MAX_PLACEMENT_ATTEMPTS,
        };
        warn!("{error} in a {width}x{height} cavern");
        return Err(error);
    };

    let mut world = GridWorld::with_landmarks(width, height, room_count, spawn, fountain);
    for placed in 0..config.pit_count() {
        let candidate = sample_until(width, height, rng, |coord| {
            world.room(coord) == Room::Normal && !world.is_type_adjacent(Room::Pit, coord)
        });
        let Some(pit) = candidate else {
            let error = WorldError::GenerationInfeasible {
                room: Room::Pit,
                placed,
                requested: config.pit_count(),
                attempts: MAX_PLACEMENT_ATTEMPTS,
            };
            warn!("{error} in a {width}x{height} cavern");
            return Err(error);
        };
        world.dig_pit(pit);
    }

    debug!(
        "generated {width}x{height} cavern: spawn {spawn}, fountain {fountain}, {} pits",
        config.pit_count()
    );
    Ok(world)
}

fn random_coord<R>(width: u32, height: u32, rng: &mut R) -> Coord
where
    R: Rng + ?Sized,
{
    Coord::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

fn sample_until<R, F>(width: u32, height: u32, rng: &mut R, accept: F) -> Option<Coord>
where
    R: Rng + ?Sized,
    F: Fn(Coord) -> bool,
{
    (0..MAX_PLACEMENT_ATTEMPTS)
        .map(|_| random_coord(width, height, rng))
        .find(|coord| accept(*coord))
}
