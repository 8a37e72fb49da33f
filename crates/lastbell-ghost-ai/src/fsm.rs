//! Ghost behavior finite state machine.
//!
//! Pure functions that compute state transitions, movement and contact
//! effects for ghost entities based on their kind, current state, and the
//! player's situation. No ECS dependency; operates on plain data.

use glam::Vec3;
use lastbell_core::components::GhostBehavior;
use lastbell_core::constants::*;
use lastbell_core::enums::{DeathCause, GhostKind, GhostState, SoundCue};

use crate::profiles::{get_profile, GhostProfile};

/// Input to the ghost FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct GhostContext {
    pub kind: GhostKind,
    pub state: GhostState,
    pub behavior: GhostBehavior,
    pub stun_secs: f32,
    pub position: Vec3,
    pub facing: f32,
    pub speed: f32,
    /// Player eye position.
    pub player_position: Vec3,
    /// Player's full view direction (normalized).
    pub view_dir: Vec3,
    pub flashlight_on: bool,
    pub player_crouching: bool,
    pub player_hidden: bool,
    pub dt: f32,
    /// Uniform roll in [0, 1) for cosmetic randomness.
    pub roll: f32,
}

/// Side effects the simulation must apply after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostEffect {
    Damage(f32),
    ApplyBleeding,
    Kill(DeathCause),
    SanityPenalty(f32),
    /// Player is forced out of running until they release the run input.
    StopRunning,
    Despawn,
    Toast(&'static str),
    Cue(SoundCue),
}

/// Output from the ghost FSM.
#[derive(Debug, Clone)]
pub struct GhostUpdate {
    pub state: GhostState,
    pub behavior: GhostBehavior,
    pub stun_secs: f32,
    pub position: Vec3,
    pub facing: f32,
    pub speed: f32,
    pub state_changed: bool,
    pub effects: Vec<GhostEffect>,
}

impl GhostUpdate {
    fn unchanged(ctx: &GhostContext) -> Self {
        Self {
            state: ctx.state,
            behavior: ctx.behavior,
            stun_secs: ctx.stun_secs,
            position: ctx.position,
            facing: ctx.facing,
            speed: ctx.speed,
            state_changed: false,
            effects: Vec::new(),
        }
    }

    fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            self.state = state;
            self.state_changed = true;
        }
    }
}

/// Evaluate the FSM for one ghost. Returns the updated state, position and
/// any effects on the player.
pub fn evaluate(ctx: &GhostContext) -> GhostUpdate {
    let mut update = GhostUpdate::unchanged(ctx);
    let dist = ctx.position.distance(ctx.player_position);

    if dist > GHOST_DESPAWN_RADIUS {
        update.effects.push(GhostEffect::Despawn);
        return update;
    }

    // Hidden players only attract what is already at the locker door
    if ctx.player_hidden && dist > HIDING_UPDATE_RADIUS {
        return update;
    }

    if ctx.state == GhostState::Frozen && ctx.kind != GhostKind::Mannequin {
        update.stun_secs = (ctx.stun_secs - ctx.dt).max(0.0);
        if update.stun_secs <= 0.0 {
            update.set_state(GhostState::Chasing);
        }
        return update;
    }

    let profile = get_profile(ctx.kind);

    match ctx.kind {
        GhostKind::Shadow => {
            pursue(ctx, &mut update, ctx.speed, false);
            if dist < profile.contact_radius {
                update.effects.push(GhostEffect::Damage(SHADOW_CONTACT_DAMAGE));
                update.effects.push(GhostEffect::ApplyBleeding);
                update.effects.push(GhostEffect::Kill(DeathCause::Ghost(ctx.kind)));
            }
        }
        GhostKind::Crawler => evaluate_crawler(ctx, &profile, dist, &mut update),
        GhostKind::Mannequin => evaluate_mannequin(ctx, &profile, dist, &mut update),
        GhostKind::Screamer => evaluate_screamer(ctx, &profile, dist, &mut update),
        GhostKind::Phantom => {
            pursue(ctx, &mut update, ctx.speed, false);
            if dist < profile.contact_radius {
                update.effects.push(GhostEffect::Kill(DeathCause::Ghost(ctx.kind)));
            }
        }
        GhostKind::Hallucination => {
            pursue(ctx, &mut update, ctx.speed, false);
            if dist < profile.contact_radius {
                update.effects.push(GhostEffect::Despawn);
                update.effects.push(GhostEffect::Cue(SoundCue::Scream));
                update
                    .effects
                    .push(GhostEffect::SanityPenalty(HALLUCINATION_SANITY_PENALTY));
            }
        }
    }

    update
}

fn evaluate_crawler(ctx: &GhostContext, profile: &GhostProfile, dist: f32, update: &mut GhostUpdate) {
    let speed = match profile.lit_speed {
        Some(lit) if ctx.flashlight_on && dist < CRAWLER_BOOST_RADIUS => lit,
        _ => profile.speed,
    };
    update.speed = speed;
    pursue(ctx, update, speed, false);
    if dist < profile.contact_radius {
        update.effects.push(GhostEffect::Kill(DeathCause::Ghost(ctx.kind)));
    }
}

/// Mannequins hold still while inside the player's view cone and close in
/// on the ground plane otherwise.
fn evaluate_mannequin(ctx: &GhostContext, profile: &GhostProfile, dist: f32, update: &mut GhostUpdate) {
    let seen = is_observed(ctx.view_dir, ctx.player_position, ctx.position);
    update.behavior = GhostBehavior::Mannequin { seen };

    if seen {
        update.set_state(GhostState::Frozen);
    } else {
        update.set_state(GhostState::Chasing);
        pursue(ctx, update, ctx.speed, true);
        if ctx.roll < 0.1 {
            update.effects.push(GhostEffect::Cue(SoundCue::Click));
        }
    }

    if dist < profile.contact_radius {
        update.effects.push(GhostEffect::Kill(DeathCause::Ghost(ctx.kind)));
    }
}

fn evaluate_screamer(ctx: &GhostContext, profile: &GhostProfile, dist: f32, update: &mut GhostUpdate) {
    match ctx.state {
        GhostState::Wandering => {
            update.position.z += ctx.speed * ctx.dt;
            if dist < SCREAMER_DETECT_RADIUS && !ctx.player_crouching {
                update.set_state(GhostState::Screaming);
                update.effects.push(GhostEffect::Cue(SoundCue::Scream));
                update
                    .effects
                    .push(GhostEffect::SanityPenalty(SCREAMER_SANITY_PENALTY));
                update.effects.push(GhostEffect::Toast("It found you!"));
                update.effects.push(GhostEffect::StopRunning);
            }
        }
        GhostState::Screaming => {
            update.position.x += (ctx.roll - 0.5) * 0.1;
            if dist < profile.contact_radius {
                update.effects.push(GhostEffect::Kill(DeathCause::Ghost(ctx.kind)));
            }
        }
        _ => {}
    }
}

/// Whether a point is inside the player's view cone.
pub fn is_observed(view_dir: Vec3, eye: Vec3, target: Vec3) -> bool {
    let to_target = (target - eye).normalize_or_zero();
    view_dir.dot(to_target) > MANNEQUIN_VIEW_DOT
}

/// Heading (radians) that faces along `dir` on the ground plane.
pub fn yaw_toward(dir: Vec3) -> f32 {
    (-dir.x).atan2(-dir.z)
}

fn pursue(ctx: &GhostContext, update: &mut GhostUpdate, speed: f32, flat: bool) {
    let mut dir = ctx.player_position - ctx.position;
    if flat {
        dir.y = 0.0;
    }
    let dir = dir.normalize_or_zero();
    if dir == Vec3::ZERO {
        return;
    }
    update.facing = yaw_toward(dir);
    update.position = ctx.position + dir * speed * ctx.dt;
}
