//! Cleanup system: removes ghosts flagged for despawn this tick.

use hecs::{Entity, World};

/// Despawn every buffered entity. The buffer is reused across ticks to
/// avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.sort_unstable();
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        if let Err(err) = world.despawn(entity) {
            log::debug!("despawn skipped for {entity:?}: {err}");
        }
    }
}
