//! Pure simulation module
//!
//! All gameplay logic lives here. This module must stay free of side effects:
//! - Time only advances through the delta passed to `State::advance`
//! - Seeded RNG only, and only for cosmetic coin phases
//! - Actors keep plan scan order
//! - No rendering, input devices, or clocks

pub mod actor;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorId, ActorKind, Coin, Hazard, HazardKind, Player};
pub use collision::Rect;
pub use level::{Glyph, Legend, Level, LevelError, Spawn, TileKind};
pub use state::{State, Status};
pub use tick::TickInput;
