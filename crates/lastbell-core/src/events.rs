//! Events emitted by the simulation for presentation and rendering.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{InteractableId, SegmentId};

/// Fire-and-forget feedback for the UI and audio collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Short on-screen notification.
    Toast { text: String, duration_secs: f32 },
    /// Inner voice line shown as a subtitle.
    Monologue { text: String, duration_secs: f32 },
    AchievementUnlocked {
        id: AchievementId,
        title: String,
        icon: String,
    },
    ModalOpened { phase: GamePhase },
    ModalClosed { phase: GamePhase },
    Sound { cue: SoundCue },
    FlashlightDepleted,
    Death { cause: DeathCause },
    FloorReached { floor: u32 },
    Escaped { floor: u32 },
}

impl GameEvent {
    pub fn toast(text: impl Into<String>) -> Self {
        GameEvent::Toast {
            text: text.into(),
            duration_secs: crate::constants::TOAST_SECS,
        }
    }

    pub fn monologue(text: impl Into<String>, duration_secs: f32) -> Self {
        GameEvent::Monologue {
            text: text.into(),
            duration_secs,
        }
    }
}

/// Abstract instructions for the renderer's scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneCommand {
    PlaceGeometry {
        segment: SegmentId,
        /// Interactable this geometry represents, if any.
        object: Option<InteractableId>,
        shape: ShapeClass,
        material: MaterialClass,
        center: Vec3,
        half_extents: Vec3,
        yaw: f32,
    },
    PlaceLight {
        segment: SegmentId,
        position: Vec3,
    },
    /// Geometry of a consumed interactable should disappear.
    RemoveProp { object: InteractableId },
    ReleaseSegment { segment: SegmentId },
    ClearAll,
}
