//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind parameters for the ghost FSM and the spawner.

use glam::Vec3;
use lastbell_core::constants::*;
use lastbell_core::enums::{GhostKind, GhostState};

/// Where a ghost appears relative to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnAnchor {
    /// Distance behind the player's view direction.
    Behind(f32),
    /// Distance ahead of the player's view direction.
    Ahead(f32),
    /// Fixed world-space offset from the player.
    Offset(Vec3),
}

/// Behavioral profile for a ghost kind.
#[derive(Debug, Clone, Copy)]
pub struct GhostProfile {
    pub initial_state: GhostState,
    /// Movement speed (m/s).
    pub speed: f32,
    /// Speed while the player is lit and within [`CRAWLER_BOOST_RADIUS`].
    pub lit_speed: Option<f32>,
    /// Distance at which the ghost reaches the player.
    pub contact_radius: f32,
    pub spawn: SpawnAnchor,
    /// Absolute spawn height, overriding the player's eye level.
    pub spawn_height: Option<f32>,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: GhostKind) -> GhostProfile {
    match kind {
        GhostKind::Shadow => GhostProfile {
            initial_state: GhostState::Chasing,
            speed: 3.8,
            lit_speed: None,
            contact_radius: 1.5,
            spawn: SpawnAnchor::Behind(18.0),
            spawn_height: None,
        },
        GhostKind::Crawler => GhostProfile {
            initial_state: GhostState::Chasing,
            speed: 4.0,
            lit_speed: Some(6.0),
            contact_radius: 1.5,
            spawn: SpawnAnchor::Behind(20.0),
            spawn_height: Some(CRAWLER_SPAWN_HEIGHT),
        },
        GhostKind::Mannequin => GhostProfile {
            initial_state: GhostState::Frozen,
            speed: 8.0,
            lit_speed: None,
            contact_radius: 1.2,
            spawn: SpawnAnchor::Ahead(25.0),
            spawn_height: None,
        },
        GhostKind::Screamer => GhostProfile {
            initial_state: GhostState::Wandering,
            speed: 2.0,
            lit_speed: None,
            contact_radius: 2.0,
            spawn: SpawnAnchor::Behind(25.0),
            spawn_height: None,
        },
        GhostKind::Phantom => GhostProfile {
            initial_state: GhostState::Chasing,
            speed: 1.5,
            lit_speed: None,
            contact_radius: 1.0,
            spawn: SpawnAnchor::Offset(Vec3::new(5.0, 0.0, 5.0)),
            spawn_height: None,
        },
        GhostKind::Hallucination => GhostProfile {
            initial_state: GhostState::Chasing,
            speed: 15.0,
            lit_speed: None,
            contact_radius: 1.0,
            spawn: SpawnAnchor::Ahead(8.0),
            spawn_height: None,
        },
    }
}

/// Spawn point for `kind` given the player's eye position and flat view
/// direction.
pub fn spawn_position(kind: GhostKind, player: Vec3, view_flat: Vec3) -> Vec3 {
    let profile = get_profile(kind);
    let mut pos = match profile.spawn {
        SpawnAnchor::Behind(d) => player - view_flat * d,
        SpawnAnchor::Ahead(d) => player + view_flat * d,
        SpawnAnchor::Offset(offset) => player + offset,
    };
    if let Some(y) = profile.spawn_height {
        pos.y = y;
    }
    pos
}
