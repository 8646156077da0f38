//! Actors: everything that moves or animates on top of the terrain
//!
//! Every tick produces fresh actor values; nothing is updated in place.
//! Actors keep the [`ActorId`] they were given at level load so a tick can
//! refer to a specific actor after the list has been rebuilt.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::{Level, Spawn, TileKind};
use super::state::{State, Status};
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::Physics;

/// Stable actor handle, assigned in plan scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Actor category, for renderers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Hazard,
    Player,
    Coin,
}

/// Moving lava variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// `v`: falls and restarts from its spawn cell when it lands
    Dripping,
    /// `=`: sweeps left and right between walls
    Horizontal,
    /// `|`: sweeps up and down between walls
    Vertical,
}

/// Moving lava
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: ActorId,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Where a dripping hazard restarts after hitting a wall
    pub home: Option<Vec2>,
}

impl Hazard {
    pub fn new(id: ActorId, kind: HazardKind, pos: Vec2) -> Self {
        let (vel, home) = match kind {
            HazardKind::Dripping => (DRIP_VELOCITY, Some(pos)),
            HazardKind::Horizontal => (SWEEP_H_VELOCITY, None),
            HazardKind::Vertical => (SWEEP_V_VELOCITY, None),
        };
        Self {
            id,
            kind,
            pos,
            vel,
            home,
        }
    }

    /// Move, then reset or bounce if the move would enter a wall
    pub fn advance(&self, dt: f32, level: &Level) -> Self {
        let next = self.pos + self.vel * dt;
        if !level.touches(next, HAZARD_SIZE, TileKind::Wall) {
            Self { pos: next, ..*self }
        } else if let Some(home) = self.home {
            Self { pos: home, ..*self }
        } else {
            Self {
                vel: -self.vel,
                ..*self
            }
        }
    }
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: ActorId,
    pub pos: Vec2,
    /// `x` is this tick's requested run speed, `y` the integrated fall speed
    pub vel: Vec2,
}

impl Player {
    pub fn new(id: ActorId, cell: Vec2) -> Self {
        Self {
            id,
            pos: cell + PLAYER_SPAWN_OFFSET,
            vel: Vec2::ZERO,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, PLAYER_SIZE)
    }

    pub fn advance(&self, dt: f32, level: &Level, physics: &Physics, input: &TickInput) -> Self {
        let mut x_speed = 0.0;
        if input.left {
            x_speed -= physics.run_speed;
        }
        if input.right {
            x_speed += physics.run_speed;
        }

        let mut pos = self.pos;
        let moved_x = pos + Vec2::new(x_speed * dt, 0.0);
        if !level.touches(moved_x, PLAYER_SIZE, TileKind::Wall) {
            pos = moved_x;
        }

        let mut y_speed = self.vel.y + physics.gravity * dt;
        let moved_y = pos + Vec2::new(0.0, y_speed * dt);
        if !level.touches(moved_y, PLAYER_SIZE, TileKind::Wall) {
            pos = moved_y;
        } else if input.jump && y_speed > 0.0 {
            y_speed = -physics.jump_speed;
        } else {
            y_speed = 0.0;
        }

        Self {
            id: self.id,
            pos,
            vel: Vec2::new(x_speed, y_speed),
        }
    }
}

/// A collectible coin bobbing around a fixed anchor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: ActorId,
    /// Visible position
    pub pos: Vec2,
    /// Anchor the coin bobs around
    pub base: Vec2,
    /// Wobble phase (radians)
    pub wobble: f32,
}

impl Coin {
    pub fn new(id: ActorId, cell: Vec2, wobble: f32) -> Self {
        let base = cell + COIN_SPAWN_OFFSET;
        Self {
            id,
            pos: Self::wobble_pos(base, wobble),
            base,
            wobble,
        }
    }

    #[inline]
    fn wobble_pos(base: Vec2, wobble: f32) -> Vec2 {
        base + Vec2::new(0.0, wobble.sin() * WOBBLE_DIST)
    }

    pub fn advance(&self, dt: f32, physics: &Physics) -> Self {
        let wobble = self.wobble + physics.wobble_speed * dt;
        Self {
            pos: Self::wobble_pos(self.base, wobble),
            wobble,
            ..*self
        }
    }
}

/// Any actor in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Actor {
    Hazard(Hazard),
    Player(Player),
    Coin(Coin),
}

impl Actor {
    /// Build the actor a plan character spawns at `cell`
    pub fn create(spawn: Spawn, id: ActorId, cell: Vec2, rng: &mut impl Rng) -> Self {
        match spawn {
            Spawn::Player => Actor::Player(Player::new(id, cell)),
            Spawn::Coin => Actor::Coin(Coin::new(id, cell, rng.random_range(0.0..TAU))),
            Spawn::Hazard(kind) => Actor::Hazard(Hazard::new(id, kind, cell)),
        }
    }

    pub fn id(&self) -> ActorId {
        match self {
            Actor::Hazard(h) => h.id,
            Actor::Player(p) => p.id,
            Actor::Coin(c) => c.id,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Hazard(_) => ActorKind::Hazard,
            Actor::Player(_) => ActorKind::Player,
            Actor::Coin(_) => ActorKind::Coin,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Actor::Hazard(h) => h.pos,
            Actor::Player(p) => p.pos,
            Actor::Coin(c) => c.pos,
        }
    }

    /// Bounding box size; fixed per variant
    pub fn size(&self) -> Vec2 {
        match self {
            Actor::Hazard(_) => HAZARD_SIZE,
            Actor::Player(_) => PLAYER_SIZE,
            Actor::Coin(_) => COIN_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos(), self.size())
    }

    /// Next-tick value of this actor. Reads `state` as it was before the tick.
    pub fn advance(&self, dt: f32, state: &State, input: &TickInput) -> Self {
        match self {
            Actor::Hazard(h) => Actor::Hazard(h.advance(dt, state.level())),
            Actor::Player(p) => {
                Actor::Player(p.advance(dt, state.level(), state.physics(), input))
            }
            Actor::Coin(c) => Actor::Coin(c.advance(dt, state.physics())),
        }
    }

    /// Resolve this actor overlapping the player
    pub fn on_overlap(&self, state: State) -> State {
        match self {
            Actor::Hazard(_) => state.with_status(Status::Lost),
            Actor::Coin(c) => {
                let state = state.without_actor(c.id);
                // A level that has already ended stays ended
                if state.status() == Status::Playing && state.coins_remaining() == 0 {
                    state.with_status(Status::Won)
                } else {
                    state
                }
            }
            // The player is never checked against itself
            Actor::Player(_) => state,
        }
    }
}
