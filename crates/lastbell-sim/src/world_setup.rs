//! Spawn factories: ghost entities and installation of generated segments.

use glam::Vec3;
use hecs::World;

use lastbell_core::components::{Ghost, GhostBehavior, GhostBody, GhostBrain};
use lastbell_core::constants::GHOST_MIN_FLOOR;
use lastbell_core::enums::GhostKind;
use lastbell_core::events::SceneCommand;
use lastbell_core::types::{DoorId, GhostId, InteractableId, SegmentId};
use lastbell_ghost_ai::fsm::yaw_toward;
use lastbell_ghost_ai::profiles::{get_profile, spawn_position};
use lastbell_procgen::segment::{ObjectKind, SegmentBlueprint};

use crate::interaction::InteractableKind;
use crate::level::{Door, Level, Segment};
use crate::outbox::Outbox;

/// Spawn a ghost of `kind` at an explicit position, facing the player.
pub fn spawn_ghost_at(
    world: &mut World,
    id: GhostId,
    kind: GhostKind,
    position: Vec3,
    player: Vec3,
) -> hecs::Entity {
    let profile = get_profile(kind);
    world.spawn((
        Ghost { id, kind },
        GhostBody {
            position,
            facing: yaw_toward(player - position),
            speed: profile.speed,
        },
        GhostBrain {
            state: profile.initial_state,
            behavior: GhostBehavior::for_kind(kind),
            stun_secs: 0.0,
        },
    ))
}

/// Spawn a ghost at its profile's anchor relative to the player.
/// Hostile kinds are refused above `GHOST_MIN_FLOOR`.
pub fn spawn_ghost(
    world: &mut World,
    next_id: &mut u32,
    kind: GhostKind,
    player: Vec3,
    view_flat: Vec3,
    floor: u32,
) -> Option<GhostId> {
    if kind.is_hostile() && floor < GHOST_MIN_FLOOR {
        log::debug!("refusing {:?} spawn on floor {}", kind, floor);
        return None;
    }
    let id = GhostId(*next_id);
    *next_id += 1;
    let position = spawn_position(kind, player, view_flat);
    spawn_ghost_at(world, id, kind, position, player);
    log::debug!("spawned {:?} {:?} at {}", kind, id, position);
    Some(id)
}

/// Register a blueprint's objects and doors and emit its placement commands.
/// Returns the segment record for the level window.
pub fn install_segment(
    id: SegmentId,
    blueprint: SegmentBlueprint,
    level: &mut Level,
    outbox: &mut Outbox,
) -> Segment {
    // Door ids first so door objects can reference them.
    let door_ids: Vec<DoorId> = blueprint
        .doors
        .iter()
        .map(|_| {
            let door = DoorId(level.next_door_id);
            level.next_door_id += 1;
            door
        })
        .collect();

    let mut object_ids: Vec<InteractableId> = Vec::with_capacity(blueprint.objects.len());
    for object in blueprint.objects {
        let kind = match object.kind {
            ObjectKind::Pickup(item) => InteractableKind::Pickup(item),
            ObjectKind::Door { door } => match door_ids.get(door) {
                Some(id) => InteractableKind::Door(*id),
                None => {
                    log::warn!("door object references missing door {}", door);
                    InteractableKind::Flavor(String::new())
                }
            },
            ObjectKind::Locker { hide_at } => InteractableKind::Locker { hide_at },
            ObjectKind::Note(text) => InteractableKind::Note(text),
            ObjectKind::Flavor(text) => InteractableKind::Flavor(text),
            ObjectKind::Puzzle => InteractableKind::Puzzle,
            ObjectKind::Computer => InteractableKind::Computer,
            ObjectKind::ElevatorCall => InteractableKind::ElevatorCall,
        };
        object_ids.push(level.registry.insert(id, kind, object.hover_text, object.bounds));
    }

    for (spec, door_id) in blueprint.doors.into_iter().zip(door_ids.iter().copied()) {
        let Some(object) = object_ids.get(spec.object).copied() else {
            log::warn!("door {:?} has no interactable", door_id);
            continue;
        };
        level.doors.insert(door_id, Door::new(door_id, id, object, spec));
    }

    for geometry in blueprint.geometry {
        outbox.scene(SceneCommand::PlaceGeometry {
            segment: id,
            object: geometry.object.and_then(|i| object_ids.get(i).copied()),
            shape: geometry.shape,
            material: geometry.material,
            center: geometry.center,
            half_extents: geometry.half_extents,
            yaw: geometry.yaw,
        });
    }
    for position in &blueprint.lights {
        outbox.scene(SceneCommand::PlaceLight {
            segment: id,
            position: *position,
        });
    }

    Segment {
        id,
        start_z: blueprint.start_z,
        safe: blueprint.safe,
        solids: blueprint.solids,
        interactables: object_ids,
        doors: door_ids,
        has_elevator: blueprint.has_elevator,
        has_light: !blueprint.lights.is_empty(),
    }
}
