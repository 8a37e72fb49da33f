//! Game state snapshot: the complete visible state sent to the frontend each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, SceneCommand};
use crate::types::{DoorId, Facing, GhostId, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub floor: u32,
    pub player: PlayerView,
    pub meters: MeterView,
    pub flashlight: FlashlightView,
    pub statuses: Vec<StatusView>,
    pub inventory: Vec<ItemKind>,
    pub ghosts: Vec<GhostView>,
    pub doors: Vec<DoorView>,
    /// Hover text of the interactable under the crosshair.
    pub hover_text: Option<String>,
    pub modal: Option<ModalView>,
    pub puzzles_solved: u32,
    pub elevator_threshold: u32,
    pub achievements: Vec<AchievementView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
    /// Scene commands raised since the previous snapshot.
    pub scene: Vec<SceneCommand>,
    pub segment_count: usize,
    pub frontier_z: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    /// Eye position.
    pub position: Vec3,
    pub facing: Facing,
    pub movement: MovementMode,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MeterView {
    pub stamina: f32,
    pub sanity: f32,
    pub health: f32,
    pub battery: f32,
    /// Current health cap including armor.
    pub max_health: f32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlashlightView {
    pub on: bool,
    /// Light intensity this tick. Zero when off, low on a flicker.
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusView {
    pub effect: StatusEffect,
    pub remaining_secs: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostView {
    pub id: GhostId,
    pub kind: GhostKind,
    pub state: GhostState,
    pub position: Vec3,
    pub facing: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorView {
    pub id: DoorId,
    pub pivot: Vec3,
    /// Current hinge angle (radians). Zero is closed.
    pub angle: f32,
    pub open: bool,
}

/// Content of the open modal. Answers are never exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModalView {
    Puzzle {
        question: String,
        hint: String,
    },
    Hacking {
        title: String,
        code: String,
        options: Vec<String>,
        description: String,
    },
    Reading {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementView {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
}
