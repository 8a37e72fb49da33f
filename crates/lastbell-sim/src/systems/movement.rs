//! Player movement and look integration.
//!
//! Turns the tick's input intent into a new eye position and view, probing
//! the level's solids ahead of the step.

use glam::Vec3;
use rand::Rng;

use lastbell_core::commands::InputIntent;
use lastbell_core::config::GameConfig;
use lastbell_core::constants::*;
use lastbell_core::enums::MovementMode;
use lastbell_core::types::Aabb;

use crate::player::Player;

/// Eye and waist probes, so low furniture blocks as well as walls.
const PROBE_HEIGHTS: [f32; 2] = [0.0, -1.1];

/// Apply yaw and pitch deltas.
pub fn look(player: &mut Player, input: &InputIntent) {
    player.facing.yaw += input.yaw_delta;
    player.facing.pitch = (player.facing.pitch + input.pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
}

/// Move the player for one tick. Returns the movement mode the meters use.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    player: &mut Player,
    input: &InputIntent,
    config: &GameConfig,
    solids: &[Aabb],
    stamina: f32,
    sanity: f32,
    rng: &mut R,
    dt: f32,
) -> MovementMode {
    look(player, input);

    if player.interact_cooldown > 0.0 {
        player.interact_cooldown = (player.interact_cooldown - dt).max(0.0);
    }
    if !input.running {
        player.run_blocked = false;
    }
    player.crouching = input.crouching;

    let mut forward = input.move_forward.clamp(-1.0, 1.0);
    let mut right = input.move_right.clamp(-1.0, 1.0);
    if sanity < CONTROL_DISTORTION_SANITY && rng.gen_bool(CONTROL_DISTORTION_CHANCE) {
        forward = -forward;
        right = -right;
    }

    let running = input.running && !player.crouching && !player.run_blocked && stamina > 0.0;
    let speed = if player.crouching {
        config.crouch_speed
    } else if running {
        config.run_speed
    } else {
        config.walk_speed
    };

    let wish = player.facing.forward_flat() * forward + player.facing.right() * right;
    let mut moved = false;
    if wish.length_squared() > 1e-6 {
        let dir = wish.normalize();
        if !blocked(player.position, dir, solids) {
            player.position += dir * speed * dt;
            moved = true;
        }
    }

    let target = if player.crouching {
        CROUCH_EYE_HEIGHT
    } else {
        EYE_HEIGHT
    };
    let blend = (EYE_HEIGHT_APPROACH_RATE * dt).min(1.0);
    player.position.y += (target - player.position.y) * blend;
    player.position.y = player.position.y.max(MIN_EYE_HEIGHT);

    player.movement = if player.crouching {
        MovementMode::Crouch
    } else if !moved {
        MovementMode::Idle
    } else if running {
        MovementMode::Run
    } else {
        MovementMode::Walk
    };
    player.movement
}

fn blocked(eye: Vec3, dir: Vec3, solids: &[Aabb]) -> bool {
    PROBE_HEIGHTS.iter().any(|dy| {
        let origin = eye + Vec3::Y * *dy;
        solids
            .iter()
            .any(|s| s.ray_hit(origin, dir, MOVE_PROBE_DISTANCE).is_some())
    })
}
