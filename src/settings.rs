//! Physics and driver tuning
//!
//! Loaded from JSON; every field falls back to the compiled-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("setting `{field}` is out of range: {value}")]
    Invalid { field: &'static str, value: f32 },
}

/// Movement constants used by actors each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Player horizontal speed while a direction is held
    pub run_speed: f32,
    /// Upward speed set when the player jumps off a surface
    pub jump_speed: f32,
    /// Downward acceleration applied to the player
    pub gravity: f32,
    /// Coin wobble angular rate
    pub wobble_speed: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            run_speed: PLAYER_RUN_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: GRAVITY,
            wobble_speed: WOBBLE_SPEED,
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: Physics,

    // === Driver ===
    /// Cap on the delta passed to a single tick (seconds)
    pub max_frame_dt: f32,
    /// Ticks keep running this long after a level is won or lost (seconds)
    pub end_grace: f32,

    /// Seed for coin wobble phases
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: Physics::default(),
            max_frame_dt: MAX_FRAME_DT,
            end_grace: END_GRACE,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot use
    pub fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.physics;
        let fields = [
            ("physics.run_speed", p.run_speed),
            ("physics.jump_speed", p.jump_speed),
            ("physics.gravity", p.gravity),
            ("physics.wobble_speed", p.wobble_speed),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                log::warn!("Rejecting setting {field} = {value}");
                return Err(SettingsError::Invalid { field, value });
            }
        }
        // Zero grace is allowed: the driver stops on the ending tick
        if !self.end_grace.is_finite() || self.end_grace < 0.0 {
            log::warn!("Rejecting setting end_grace = {}", self.end_grace);
            return Err(SettingsError::Invalid {
                field: "end_grace",
                value: self.end_grace,
            });
        }
        Ok(())
    }
}
