//! Ghost AI stage: runs the FSM for every ghost and applies its effects.
//!
//! Calls the ghost FSM from lastbell-ghost-ai to compute transitions and
//! movement, then writes the results back into the ECS components.

use glam::Vec3;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use lastbell_core::components::{Ghost, GhostBody, GhostBrain};
use lastbell_core::constants::SPAWN_MONOLOGUE_SECS;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::{GhostKind, GhostState, SoundCue, StatusEffect};
use lastbell_ghost_ai::fsm::{evaluate, GhostContext, GhostEffect};

use crate::outbox::Outbox;
use crate::player::Player;
use crate::status::StatusEffects;
use crate::vitals::Meters;

/// Whether any ghost lies within `radius` of `point`.
pub fn any_within(world: &World, point: Vec3, radius: f32) -> bool {
    world
        .query::<&GhostBody>()
        .iter()
        .any(|(_, body)| body.position.distance(point) < radius)
}

/// Freeze every ghost within `radius` for `secs`. Returns how many were hit.
/// With `first_only`, stops after the lowest-id ghost in range.
pub fn stun_within(world: &mut World, point: Vec3, radius: f32, secs: f32, first_only: bool) -> usize {
    let mut targets: Vec<(u32, Entity)> = world
        .query::<(&Ghost, &GhostBody)>()
        .iter()
        .filter(|(_, (_, body))| body.position.distance(point) < radius)
        .map(|(entity, (ghost, _))| (ghost.id.0, entity))
        .collect();
    targets.sort_unstable_by_key(|(id, _)| *id);
    if first_only {
        targets.truncate(1);
    }

    for (_, entity) in &targets {
        if let Ok(mut brain) = world.get::<&mut GhostBrain>(*entity) {
            brain.state = GhostState::Frozen;
            brain.stun_secs = secs;
        }
    }
    targets.len()
}

/// Presentation for a fresh spawn.
pub fn announce_spawn<R: Rng + ?Sized>(
    kind: GhostKind,
    content: &ContentTables,
    rng: &mut R,
    outbox: &mut Outbox,
) {
    match kind {
        GhostKind::Shadow => {
            if let Some(line) = content.scary_monologues.choose(rng) {
                outbox.monologue(line.clone(), SPAWN_MONOLOGUE_SECS);
            }
        }
        GhostKind::Crawler => outbox.monologue("Something's on the ceiling...", SPAWN_MONOLOGUE_SECS),
        GhostKind::Mannequin => outbox.monologue("Did that statue just move?", SPAWN_MONOLOGUE_SECS),
        _ => {}
    }
    if kind.is_hostile() {
        outbox.cue(SoundCue::Breath);
    } else {
        outbox.cue(SoundCue::Scream);
    }
}

/// Run the ghost FSM for every ghost and apply what it reports.
#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    player: &mut Player,
    meters: &mut Meters,
    status: &mut StatusEffects,
    flashlight_on: bool,
    rng: &mut R,
    outbox: &mut Outbox,
    despawn_buffer: &mut Vec<Entity>,
    dt: f32,
) {
    let view_dir = player.facing.forward();
    let hidden = player.is_hidden();

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut contexts: Vec<(Entity, GhostContext)> = Vec::new();
    {
        let mut query = world.query::<(&Ghost, &GhostBody, &GhostBrain)>();
        for (entity, (ghost, body, brain)) in query.iter() {
            contexts.push((
                entity,
                GhostContext {
                    kind: ghost.kind,
                    state: brain.state,
                    behavior: brain.behavior,
                    stun_secs: brain.stun_secs,
                    position: body.position,
                    facing: body.facing,
                    speed: body.speed,
                    player_position: player.position,
                    view_dir,
                    flashlight_on,
                    player_crouching: player.crouching,
                    player_hidden: hidden,
                    dt,
                    roll: 0.0,
                },
            ));
        }
    }
    // Deterministic order regardless of archetype layout.
    contexts.sort_unstable_by_key(|(entity, _)| entity.id());

    let mut effects: Vec<(GhostKind, GhostEffect)> = Vec::new();
    for (entity, mut ctx) in contexts {
        ctx.roll = rng.gen();
        let update = evaluate(&ctx);

        if let Ok(mut body) = world.get::<&mut GhostBody>(entity) {
            body.position = update.position;
            body.facing = update.facing;
        }
        if let Ok(mut brain) = world.get::<&mut GhostBrain>(entity) {
            brain.state = update.state;
            brain.behavior = update.behavior;
            brain.stun_secs = update.stun_secs;
        }
        if update.state_changed {
            log::debug!("{:?} -> {:?}", ctx.kind, update.state);
        }

        for effect in update.effects {
            if effect == GhostEffect::Despawn {
                despawn_buffer.push(entity);
            } else {
                effects.push((ctx.kind, effect));
            }
        }
    }

    for (kind, effect) in effects {
        match effect {
            GhostEffect::Damage(amount) => meters.damage(amount),
            GhostEffect::ApplyBleeding => status.apply(StatusEffect::Bleeding),
            GhostEffect::Kill(cause) => {
                log::info!("player caught by {:?}", kind);
                meters.kill(cause);
            }
            GhostEffect::SanityPenalty(amount) => meters.add_sanity(-amount),
            GhostEffect::StopRunning => player.run_blocked = true,
            GhostEffect::Toast(text) => outbox.toast(text),
            GhostEffect::Cue(cue) => outbox.cue(cue),
            GhostEffect::Despawn => {}
        }
    }
}
