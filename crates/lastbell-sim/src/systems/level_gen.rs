//! Level generation stage: extends the map ahead of the player and evicts
//! the oldest segment once the window is full.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;

use lastbell_core::config::GameConfig;
use lastbell_core::constants::GHOST_MIN_FLOOR;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::GhostKind;
use lastbell_core::events::SceneCommand;
use lastbell_core::types::SegmentId;
use lastbell_procgen::segment::{add_tutorial_note, ghost_spawn_chance, synthesize_segment, SegmentParams};

use crate::level::Level;
use crate::outbox::Outbox;
use crate::player::Player;
use crate::systems::ghost_ai::announce_spawn;
use crate::world_setup;

/// Synthesize one segment at the frontier and install it.
pub fn extend<R: Rng + ?Sized>(
    level: &mut Level,
    rng: &mut R,
    config: &GameConfig,
    content: &ContentTables,
    safe: bool,
    tutorial: bool,
    outbox: &mut Outbox,
) -> SegmentId {
    let params = SegmentParams::from_config(config, level.window.frontier_z(), safe);
    let mut blueprint = synthesize_segment(rng, &params, content);
    if tutorial {
        add_tutorial_note(&mut blueprint, content);
    }

    let id = level.window.allocate_id();
    let segment = world_setup::install_segment(id, blueprint, level, outbox);
    if let Some(evicted) = level.window.push(segment, config.segment_length) {
        level.release(&evicted);
        outbox.scene(SceneCommand::ReleaseSegment { segment: evicted.id });
    }
    id
}

/// Extend the map if the player is within lookahead of the frontier, then
/// roll for a hostile spawn. At most one segment per tick.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    level: &mut Level,
    world: &mut World,
    next_ghost_id: &mut u32,
    player: &Player,
    floor: u32,
    sanity: f32,
    config: &GameConfig,
    content: &ContentTables,
    rng: &mut R,
    outbox: &mut Outbox,
) -> bool {
    if !level.window.needs_extension(player.position.z, config.lookahead) {
        return false;
    }
    extend(level, rng, config, content, false, false, outbox);

    if floor >= GHOST_MIN_FLOOR {
        let chance = ghost_spawn_chance(config.ghost_spawn_chance, config.ghost_spawn_cap, sanity);
        if rng.gen::<f32>() < chance {
            if let Some(kind) = GhostKind::HOSTILE.choose(rng).copied() {
                let spawned = world_setup::spawn_ghost(
                    world,
                    next_ghost_id,
                    kind,
                    player.position,
                    player.facing.forward_flat(),
                    floor,
                );
                if spawned.is_some() {
                    announce_spawn(kind, content, rng, outbox);
                }
            }
        }
    }
    true
}
