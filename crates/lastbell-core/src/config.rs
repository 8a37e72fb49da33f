//! Runtime tunables.
//!
//! Defaults mirror [`crate::constants`]. A config is loaded from JSON (every
//! field optional) and must pass [`GameConfig::validate`] before an engine is
//! built from it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading configuration or content tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lookahead ({lookahead}) must exceed segment length ({segment_length})")]
    LookaheadTooShort { lookahead: f32, segment_length: f32 },
    #[error(
        "segment window too small: {max_segments} x {segment_length} must exceed lookahead + segment length ({required})"
    )]
    WindowTooSmall {
        max_segments: usize,
        segment_length: f32,
        required: f32,
    },
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("content pool `{0}` is empty")]
    EmptyPool(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,

    pub stamina_drain: f32,
    pub stamina_regen: f32,
    pub sanity_drain_darkness: f32,
    pub sanity_drain_ghost: f32,
    pub sanity_regen: f32,
    pub battery_drain: f32,
    pub ghost_proximity_radius: f32,

    pub interact_distance: f32,

    pub segment_length: f32,
    /// Distance ahead of the player the frontier is kept.
    pub lookahead: f32,
    pub max_segments: usize,
    pub classroom_chance: f32,
    pub desk_chance: f32,
    /// Chance that a present desk is knocked over.
    pub desk_knocked_chance: f32,
    pub elevator_chance: f32,
    pub light_chance: f32,
    pub ghost_spawn_chance: f32,
    /// Upper bound on the sanity-boosted spawn chance.
    pub ghost_spawn_cap: f32,

    /// Puzzle score required to call the elevator.
    pub elevator_threshold: u32,
    /// Reaching a floor beyond this one ends the run as an escape.
    pub final_floor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            run_speed: RUN_SPEED,
            crouch_speed: CROUCH_SPEED,
            stamina_drain: STAMINA_DRAIN,
            stamina_regen: STAMINA_REGEN,
            sanity_drain_darkness: SANITY_DRAIN_DARKNESS,
            sanity_drain_ghost: SANITY_DRAIN_GHOST_NEARBY,
            sanity_regen: SANITY_REGEN_LIGHT,
            battery_drain: BATTERY_DRAIN_RATE,
            ghost_proximity_radius: GHOST_PROXIMITY_RADIUS,
            interact_distance: INTERACT_DISTANCE,
            segment_length: SEGMENT_LENGTH,
            lookahead: GENERATION_LOOKAHEAD,
            max_segments: MAX_SEGMENTS,
            classroom_chance: 0.6,
            desk_chance: 0.6,
            desk_knocked_chance: 0.2,
            elevator_chance: 0.1,
            light_chance: 0.7,
            ghost_spawn_chance: 0.4,
            ghost_spawn_cap: 0.8,
            elevator_threshold: ELEVATOR_PUZZLE_THRESHOLD,
            final_floor: FINAL_FLOOR,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the invariants the level window depends on.
    ///
    /// The window must hold at least the lookahead plus the segment the
    /// player stands in, otherwise eviction could remove floor under them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("crouch_speed", self.crouch_speed),
            ("segment_length", self.segment_length),
            ("interact_distance", self.interact_distance),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.lookahead <= self.segment_length {
            return Err(ConfigError::LookaheadTooShort {
                lookahead: self.lookahead,
                segment_length: self.segment_length,
            });
        }

        let required = self.lookahead + self.segment_length;
        if self.max_segments as f32 * self.segment_length <= required {
            return Err(ConfigError::WindowTooSmall {
                max_segments: self.max_segments,
                segment_length: self.segment_length,
                required,
            });
        }

        for (name, value) in [
            ("classroom_chance", self.classroom_chance),
            ("desk_chance", self.desk_chance),
            ("desk_knocked_chance", self.desk_knocked_chance),
            ("elevator_chance", self.elevator_chance),
            ("light_chance", self.light_chance),
            ("ghost_spawn_chance", self.ghost_spawn_chance),
            ("ghost_spawn_cap", self.ghost_spawn_cap),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        Ok(())
    }
}
