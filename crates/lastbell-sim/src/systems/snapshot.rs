//! Snapshot system: reads the engine state and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use lastbell_core::components::{Ghost, GhostBody, GhostBrain};
use lastbell_core::enums::GamePhase;
use lastbell_core::events::{GameEvent, SceneCommand};
use lastbell_core::state::*;
use lastbell_core::stats::RunStats;
use lastbell_core::types::{InteractableId, SimTime};

use crate::achievements::AchievementTracker;
use crate::crafting::Inventory;
use crate::level::Level;
use crate::modal::ActiveModal;
use crate::player::Player;
use crate::status::StatusEffects;
use crate::vitals::{Flashlight, Meters};

/// Borrowed view of everything the snapshot reads.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: &'a Player,
    pub meters: &'a Meters,
    pub flashlight: &'a Flashlight,
    pub status: &'a StatusEffects,
    pub inventory: &'a Inventory,
    pub level: &'a Level,
    pub hover: Option<InteractableId>,
    pub modal: Option<&'a ActiveModal>,
    pub stats: &'a RunStats,
    pub elevator_threshold: u32,
    pub achievements: &'a AchievementTracker,
}

/// Build a complete GameStateSnapshot, moving in the drained event buffers.
pub fn build_snapshot(
    src: &SnapshotSource<'_>,
    events: Vec<GameEvent>,
    scene: Vec<SceneCommand>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: src.time,
        phase: src.phase,
        floor: src.stats.floor,
        player: src.player.view(),
        meters: MeterView {
            stamina: src.meters.stamina,
            sanity: src.meters.sanity,
            health: src.meters.health,
            battery: src.meters.battery,
            max_health: src.meters.max_health(),
        },
        flashlight: FlashlightView {
            on: src.flashlight.on,
            intensity: if src.flashlight.on {
                src.flashlight.intensity
            } else {
                0.0
            },
        },
        statuses: src.status.views(),
        inventory: src.inventory.as_slice().to_vec(),
        ghosts: build_ghosts(src.world),
        doors: src.level.doors.values().map(|d| d.view()).collect(),
        hover_text: src
            .hover
            .and_then(|id| src.level.registry.get(id))
            .map(|item| item.hover_text.clone()),
        modal: src.modal.map(ActiveModal::view),
        puzzles_solved: src.stats.puzzles_solved,
        elevator_threshold: src.elevator_threshold,
        achievements: src.achievements.views(),
        events,
        scene,
        segment_count: src.level.window.len(),
        frontier_z: src.level.window.frontier_z(),
    }
}

/// Build GhostView list sorted by id.
fn build_ghosts(world: &World) -> Vec<GhostView> {
    let mut ghosts: Vec<GhostView> = world
        .query::<(&Ghost, &GhostBody, &GhostBrain)>()
        .iter()
        .map(|(_, (ghost, body, brain))| GhostView {
            id: ghost.id,
            kind: ghost.kind,
            state: brain.state,
            position: body.position,
            facing: body.facing,
        })
        .collect();

    ghosts.sort_by_key(|g| g.id);
    ghosts
}
