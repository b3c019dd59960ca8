use fountain_core::Coord;

/// The explorer walking the cavern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    position: Coord,
    alive: bool,
}

impl Player {
    /// Creates a living player standing at the provided room.
    #[must_use]
    pub const fn new(position: Coord) -> Self {
        Self {
            position,
            alive: true,
        }
    }

    /// Room the player currently occupies.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Reports whether the player is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Places the player in another room. Bounds are the caller's concern.
    pub fn move_to(&mut self, position: Coord) {
        self.position = position;
    }

    /// Marks the player as dead. There is no way back.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
