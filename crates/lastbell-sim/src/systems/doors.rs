//! Door hinge interpolation.

use crate::level::Level;

/// Swing every door toward its target and keep its interactable box in step.
pub fn run(level: &mut Level, dt: f32) {
    for door in level.doors.values_mut() {
        door.step(dt);
        if let Some(item) = level.registry.get_mut(door.object) {
            item.bounds = door.bounds();
        }
    }
}
