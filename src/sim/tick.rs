//! Simulation tick
//!
//! Advances a [`State`] by a caller-supplied time delta. Pure: the previous
//! state is left untouched and a new one is returned.

use serde::{Deserialize, Serialize};

use super::level::TileKind;
use super::state::{State, Status};
use crate::consts::PLAYER_SIZE;

/// Input flags for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl State {
    /// Advance every actor by `dt` seconds and resolve collisions with the player
    ///
    /// All actors read this (pre-tick) state. Once the level is won or lost,
    /// actors keep moving but the status no longer changes.
    pub fn advance(&self, dt: f32, input: &TickInput) -> State {
        let actors = self
            .actors
            .iter()
            .map(|actor| actor.advance(dt, self, input))
            .collect();
        let next = self.with_actors(actors);
        if next.status.is_over() {
            return next;
        }

        // A valid level always has a player; without one nothing can collide
        let Some(player) = next.player().copied() else {
            return next;
        };

        if self.level.touches(player.pos, PLAYER_SIZE, TileKind::Hazard) {
            log::info!("Player touched lava at ({:.2}, {:.2})", player.pos.x, player.pos.y);
            return next.with_status(Status::Lost);
        }

        // Overlaps are found against this tick's snapshot, then applied in order
        let player_rect = player.rect();
        let hits: Vec<_> = next
            .actors
            .iter()
            .filter(|actor| actor.id() != player.id && actor.rect().overlaps(&player_rect))
            .copied()
            .collect();

        let resolved = hits
            .iter()
            .fold(next, |state, actor| actor.on_overlap(state));
        if resolved.status.is_over() {
            log::info!("Level {}", resolved.status.as_str());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::sim::actor::{Actor, ActorKind};
    use crate::sim::level::Level;

    const DT: f32 = 1.0 / 60.0;

    fn start(plan: &str) -> State {
        State::start(Arc::new(Level::from_plan(plan).expect("valid plan")))
    }

    fn run_until_over(mut state: State, input: &TickInput, max_ticks: usize) -> State {
        for _ in 0..max_ticks {
            if state.status().is_over() {
                break;
            }
            state = state.advance(DT, input);
        }
        state
    }

    #[test]
    fn test_fall_into_lava_loses() {
        let state = start(
            "
#.....#
#..@..#
#.....#
#+++++#",
        );
        let end = run_until_over(state, &TickInput::default(), 300);
        assert_eq!(end.status(), Status::Lost);
        // The player sank into the lava row
        let Some(player) = end.player() else {
            panic!("player missing");
        };
        assert!(player.pos.y + PLAYER_SIZE.y > 3.0);
    }

    #[test]
    fn test_sweeper_overlap_loses() {
        let state = start(
            "
#######
#.....#
#@...=#
#######",
        );
        let end = run_until_over(state, &TickInput::default(), 600);
        assert_eq!(end.status(), Status::Lost);
        assert_eq!(end.actors().len(), 2);
    }

    #[test]
    fn test_collecting_last_coin_wins() {
        let state = start(
            "
######
#....#
#@.o.#
######",
        );
        let coin = state.actors()[1].id();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let end = run_until_over(state, &right, 120);
        assert_eq!(end.status(), Status::Won);
        assert!(end.actors().iter().all(|a| a.id() != coin));
        assert_eq!(end.coins_remaining(), 0);
    }

    #[test]
    fn test_collecting_one_of_two_coins_keeps_playing() {
        let state = start(
            "
########
#......#
#@.o..o#
########",
        );
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut state = state;
        for _ in 0..20 {
            state = state.advance(DT, &right);
        }
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.coins_remaining(), 1);
    }

    #[test]
    fn test_overlap_with_two_coins_in_one_tick() {
        let level = Arc::new(Level::from_plan("@oo").expect("valid plan"));
        let state = State::start(Arc::clone(&level));
        // Stack both coins on the player
        let Some(&player) = state.player() else {
            panic!("no player");
        };
        let actors = state
            .actors()
            .iter()
            .map(|actor| match *actor {
                Actor::Coin(mut coin) => {
                    coin.base = player.pos;
                    coin.pos = player.pos;
                    Actor::Coin(coin)
                }
                other => other,
            })
            .collect();
        let stacked = state.with_actors(actors);
        let next = stacked.advance(0.0, &TickInput::default());
        assert_eq!(next.status(), Status::Won);
        assert_eq!(next.actors().len(), 1);
        assert_eq!(next.actors()[0].kind(), ActorKind::Player);
    }

    #[test]
    fn test_hazard_then_coin_in_same_tick_stays_lost() {
        let level = Arc::new(Level::from_plan("@=o").expect("valid plan"));
        let state = State::start(level);
        let Some(&player) = state.player() else {
            panic!("no player");
        };
        let actors = state
            .actors()
            .iter()
            .map(|actor| match *actor {
                Actor::Hazard(mut hazard) => {
                    hazard.pos = player.pos;
                    hazard.vel = glam::Vec2::ZERO;
                    Actor::Hazard(hazard)
                }
                Actor::Coin(mut coin) => {
                    coin.base = player.pos;
                    coin.pos = player.pos;
                    Actor::Coin(coin)
                }
                other => other,
            })
            .collect();
        let next = state.with_actors(actors).advance(0.0, &TickInput::default());
        assert_eq!(next.status(), Status::Lost);
        assert_eq!(next.coins_remaining(), 0);
    }

    #[test]
    fn test_actors_read_pre_tick_state() {
        let state = start(
            "
#v..o.#
#..@..#
#=...|#
#######",
        );
        let input = TickInput::default();
        let next = state.advance(DT, &input);
        for (before, after) in state.actors().iter().zip(next.actors()) {
            assert_eq!(*after, before.advance(DT, &state, &input));
        }
    }

    #[test]
    fn test_terminal_status_is_sticky() {
        let state = start(
            "
#.....#
#..@..#
#.....#
#+++++#",
        );
        let lost = run_until_over(state, &TickInput::default(), 300);
        assert_eq!(lost.status(), Status::Lost);

        let mut state = lost;
        let jump = TickInput {
            jump: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..120 {
            state = state.advance(DT, &jump);
            assert_eq!(state.status(), Status::Lost);
        }
    }

    #[test]
    fn test_zero_dt_leaves_positions() {
        let state = start(
            "
#o....#
#..@..#
#.....#
#######",
        );
        let next = state.advance(0.0, &TickInput::default());
        assert_eq!(next.status(), Status::Playing);
        for (before, after) in state.actors().iter().zip(next.actors()) {
            assert_eq!(before.pos(), after.pos());
        }
    }

    proptest! {
        #[test]
        fn prop_zero_dt_is_idempotent_on_positions(
            left in any::<bool>(),
            right in any::<bool>(),
            jump in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let plan = "
#v..o..#
#......#
#..@..o#
#=....|#
########";
            let level = Level::parse(plan, &crate::sim::Legend::default(), seed).expect("valid plan");
            let state = State::start(Arc::new(level));
            let input = TickInput { left, right, jump };
            let next = state.advance(0.0, &input);
            prop_assert_eq!(next.status(), Status::Playing);
            for (before, after) in state.actors().iter().zip(next.actors()) {
                prop_assert_eq!(before.pos(), after.pos());
            }
        }

        #[test]
        fn prop_ended_runs_never_resume(
            steps in proptest::collection::vec((0.0f32..0.1, any::<bool>(), any::<bool>(), any::<bool>()), 1..60),
        ) {
            let level = Level::from_plan("@o").expect("valid plan");
            let state = State::start(Arc::new(level));
            let coin = state.actors()[1];
            let mut state = coin.on_overlap(state);
            prop_assert_eq!(state.status(), Status::Won);
            for (dt, left, right, jump) in steps {
                state = state.advance(dt, &TickInput { left, right, jump });
                prop_assert_eq!(state.status(), Status::Won);
            }
        }
    }
}
