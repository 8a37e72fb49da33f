//! Sanity side effects: hallucinations, ambient scares and idle musings.

use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;

use lastbell_core::constants::*;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::{GhostKind, MovementMode, SoundCue};
use lastbell_core::stats::RunStats;

use crate::outbox::Outbox;
use crate::player::Player;
use crate::systems::ghost_ai::announce_spawn;
use crate::world_setup;

/// Timers driving the sanity side effects.
#[derive(Debug, Clone)]
pub struct SanityFx {
    pub hallucination_timer: f32,
    pub event_timer: f32,
    pub next_event_secs: f32,
}

impl Default for SanityFx {
    fn default() -> Self {
        Self {
            hallucination_timer: 0.0,
            event_timer: 0.0,
            next_event_secs: SANITY_EVENT_MIN_SECS,
        }
    }
}

/// Seconds between hallucinations at the given sanity.
pub fn hallucination_interval(sanity: f32) -> f32 {
    if sanity < 20.0 {
        5.0
    } else if sanity < 40.0 {
        10.0
    } else {
        20.0
    }
}

/// Outcome of a sanity event roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanityEvent {
    Breath,
    Whisper,
    Scream,
}

/// Pick the event for the current sanity and a uniform roll.
pub fn sanity_event(sanity: f32, roll: f32) -> Option<SanityEvent> {
    if sanity > SANITY_EVENT_CALM_THRESHOLD {
        None
    } else if sanity < 60.0 && roll < 0.3 {
        Some(SanityEvent::Breath)
    } else if sanity < 40.0 && roll < 0.6 {
        Some(SanityEvent::Whisper)
    } else if sanity < 20.0 {
        Some(SanityEvent::Scream)
    } else {
        None
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng + ?Sized>(
    fx: &mut SanityFx,
    sanity: f32,
    stats: &mut RunStats,
    world: &mut World,
    next_ghost_id: &mut u32,
    player: &Player,
    content: &ContentTables,
    rng: &mut R,
    outbox: &mut Outbox,
    dt: f32,
) {
    if sanity < 10.0 {
        stats.lowest_sanity_seen = true;
    }

    if sanity < HALLUCINATION_SANITY_THRESHOLD {
        fx.hallucination_timer += dt;
        if fx.hallucination_timer > hallucination_interval(sanity) {
            fx.hallucination_timer = 0.0;
            let spawned = world_setup::spawn_ghost(
                world,
                next_ghost_id,
                GhostKind::Hallucination,
                player.position,
                player.facing.forward_flat(),
                stats.floor,
            );
            if spawned.is_some() {
                announce_spawn(GhostKind::Hallucination, content, rng, outbox);
                outbox.toast("Where am I...?");
            }
        }
    }

    fx.event_timer += dt;
    if fx.event_timer > fx.next_event_secs {
        fx.event_timer = 0.0;
        fx.next_event_secs = SANITY_EVENT_MIN_SECS + rng.gen::<f32>() * SANITY_EVENT_SPAN_SECS;
        match sanity_event(sanity, rng.gen()) {
            Some(SanityEvent::Breath) => {
                outbox.cue(SoundCue::Breath);
                outbox.toast("Something is breathing in your ear...");
            }
            Some(SanityEvent::Whisper) => {
                outbox.monologue("They're here... I can't see them, but I know.", 3.0);
            }
            Some(SanityEvent::Scream) => {
                outbox.cue(SoundCue::Scream);
                outbox.toast("Hallucination: screaming");
            }
            None => {}
        }
    }

    if player.movement == MovementMode::Walk && rng.gen_bool(IDLE_MONOLOGUE_CHANCE) {
        if let Some(line) = content.idle_monologues.choose(rng) {
            outbox.monologue(line.clone(), FLAVOR_MONOLOGUE_SECS);
        }
    }
}
