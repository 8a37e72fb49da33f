//! ECS components for ghost entities.
//!
//! Components are plain data structs with no methods.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{GhostKind, GhostState};
use crate::types::GhostId;

/// Identity of a ghost entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ghost {
    pub id: GhostId,
    pub kind: GhostKind,
}

/// Kinematic state of a ghost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GhostBody {
    pub position: Vec3,
    /// Heading on the ground plane (radians, same convention as the player).
    pub facing: f32,
    /// Base speed (m/s). The crawler's lit boost is applied on top.
    pub speed: f32,
}

/// Behavior state of a ghost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GhostBrain {
    pub state: GhostState,
    pub behavior: GhostBehavior,
    /// Remaining stun time. Zero when not stunned.
    pub stun_secs: f32,
}

/// Per-kind auxiliary data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GhostBehavior {
    Shadow,
    Crawler,
    Mannequin {
        /// Whether the player's view held the mannequin last tick.
        seen: bool,
    },
    Screamer,
    Phantom,
    Hallucination,
}

impl GhostBehavior {
    pub fn for_kind(kind: GhostKind) -> Self {
        match kind {
            GhostKind::Shadow => GhostBehavior::Shadow,
            GhostKind::Crawler => GhostBehavior::Crawler,
            GhostKind::Mannequin => GhostBehavior::Mannequin { seen: false },
            GhostKind::Screamer => GhostBehavior::Screamer,
            GhostKind::Phantom => GhostBehavior::Phantom,
            GhostKind::Hallucination => GhostBehavior::Hallucination,
        }
    }
}
