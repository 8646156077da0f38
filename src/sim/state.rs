//! Simulation snapshot
//!
//! A [`State`] is never mutated once built: every tick and every collision
//! produces a new snapshot. The terrain is shared between snapshots of the
//! same level through an `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind, Player};
use super::level::Level;
use crate::settings::Physics;

/// Outcome of the current level run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }

    /// Won and lost are terminal
    pub fn is_over(&self) -> bool {
        *self != Status::Playing
    }
}

/// One immutable frame of a level run
#[derive(Debug, Clone)]
pub struct State {
    pub(super) level: Arc<Level>,
    pub(super) actors: Vec<Actor>,
    pub(super) status: Status,
    pub(super) physics: Physics,
}

impl State {
    /// Initial state of a level with default physics
    pub fn start(level: Arc<Level>) -> Self {
        Self::start_with(level, Physics::default())
    }

    /// Initial state of a level with custom physics
    pub fn start_with(level: Arc<Level>, physics: Physics) -> Self {
        let actors = level.start_actors().to_vec();
        Self {
            level,
            actors,
            status: Status::Playing,
            physics,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Shared handle to the terrain, for building related states
    pub fn level_handle(&self) -> Arc<Level> {
        Arc::clone(&self.level)
    }

    /// Actors in scan order
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    /// The player, if still present
    pub fn player(&self) -> Option<&Player> {
        self.actors.iter().find_map(|actor| match actor {
            Actor::Player(player) => Some(player),
            _ => None,
        })
    }

    pub fn coins_remaining(&self) -> usize {
        self.actors
            .iter()
            .filter(|actor| actor.kind() == ActorKind::Coin)
            .count()
    }

    /// Same level and status, new actor list
    pub(super) fn with_actors(&self, actors: Vec<Actor>) -> Self {
        Self {
            level: Arc::clone(&self.level),
            actors,
            status: self.status,
            physics: self.physics,
        }
    }

    pub(super) fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Drop the actor with `id`; no-op if it is already gone
    pub(super) fn without_actor(self, id: ActorId) -> Self {
        let actors = self
            .actors
            .iter()
            .filter(|actor| actor.id() != id)
            .copied()
            .collect();
        Self { actors, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_copies_level_actors() {
        let level = Arc::new(Level::from_plan("#@.o.o#").expect("valid plan"));
        let state = State::start(Arc::clone(&level));
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.actors(), level.start_actors());
        assert_eq!(state.coins_remaining(), 2);
        assert!(state.player().is_some());
        assert!(Arc::ptr_eq(&state.level_handle(), &level));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Playing.as_str(), "playing");
        assert_eq!(Status::Won.as_str(), "won");
        assert_eq!(Status::Lost.as_str(), "lost");
        assert!(!Status::Playing.is_over());
        assert!(Status::Won.is_over());
        assert!(Status::Lost.is_over());
    }

    #[test]
    fn test_restart_is_fresh() {
        let level = Arc::new(Level::from_plan("@o").expect("valid plan"));
        let state = State::start(Arc::clone(&level));
        let coin = state.actors()[1].id();
        let won = state.without_actor(coin).with_status(Status::Won);
        assert_eq!(won.actors().len(), 1);

        // Starting again ignores whatever happened to earlier snapshots
        let again = State::start(level);
        assert_eq!(again.actors().len(), 2);
        assert_eq!(again.status(), Status::Playing);
    }
}
