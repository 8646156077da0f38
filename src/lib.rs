//! Lava Leap - A tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Pure simulation (level parsing, terrain collision, actors, game state)
//! - `driver`: Headless frame driver (delta clamping, grace countdown, level sequencing)
//! - `levels`: Built-in level plans
//! - `settings`: Data-driven physics and driver tuning

pub mod driver;
pub mod levels;
pub mod settings;
pub mod sim;

pub use driver::{Campaign, LevelRun, clamp_dt};
pub use settings::{Physics, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Player bounding box (tiles)
    pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.5);
    /// Player spawns half a tile above its grid cell so it stands on the floor
    pub const PLAYER_SPAWN_OFFSET: Vec2 = Vec2::new(0.0, -0.5);

    /// Coin bounding box (tiles)
    pub const COIN_SIZE: Vec2 = Vec2::new(0.6, 0.6);
    /// Coin anchor offset inside its grid cell
    pub const COIN_SPAWN_OFFSET: Vec2 = Vec2::new(0.2, 0.1);

    /// Hazard bounding box (tiles)
    pub const HAZARD_SIZE: Vec2 = Vec2::new(1.0, 1.0);
    /// Dripping hazard (`v`): falls, then resets to its spawn cell
    pub const DRIP_VELOCITY: Vec2 = Vec2::new(0.0, 3.0);
    /// Horizontal sweeper (`=`)
    pub const SWEEP_H_VELOCITY: Vec2 = Vec2::new(2.0, 0.0);
    /// Vertical sweeper (`|`)
    pub const SWEEP_V_VELOCITY: Vec2 = Vec2::new(0.0, 2.0);

    /// Player horizontal speed (tiles/s)
    pub const PLAYER_RUN_SPEED: f32 = 7.0;
    /// Upward speed applied on jump (tiles/s)
    pub const PLAYER_JUMP_SPEED: f32 = 17.0;
    /// Downward acceleration (tiles/s²)
    pub const GRAVITY: f32 = 30.0;

    /// Coin wobble angular speed (radians/s)
    pub const WOBBLE_SPEED: f32 = 8.0;
    /// Coin wobble amplitude (tiles)
    pub const WOBBLE_DIST: f32 = 0.07;

    /// Largest time delta fed to a single tick (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Time the driver keeps ticking after a level ends (seconds)
    pub const END_GRACE: f32 = 1.0;
}
