//! Simulation constants and tuning parameters.
//!
//! Values that a level designer may want to tune at runtime are duplicated as
//! defaults in [`crate::config::GameConfig`].

use std::f32::consts::FRAC_PI_2;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Player ---

pub const WALK_SPEED: f32 = 2.3;
pub const RUN_SPEED: f32 = 5.0;
pub const CROUCH_SPEED: f32 = 1.2;

/// Standing eye height (meters).
pub const EYE_HEIGHT: f32 = 1.7;
pub const CROUCH_EYE_HEIGHT: f32 = 0.9;
pub const MIN_EYE_HEIGHT: f32 = 0.5;
/// Eye height inside a locker.
pub const HIDING_EYE_HEIGHT: f32 = 1.3;
/// Exponential rate at which eye height settles toward its target.
pub const EYE_HEIGHT_APPROACH_RATE: f32 = 8.0;

/// Forward probe length for wall collision while moving.
pub const MOVE_PROBE_DISTANCE: f32 = 0.6;

/// Pitch limit so the view never flips over the poles.
pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.1;

// --- Meters ---

pub const METER_MAX: f32 = 100.0;
pub const STAMINA_DRAIN: f32 = 25.0;
pub const STAMINA_REGEN: f32 = 8.0;
pub const SANITY_DRAIN_DARKNESS: f32 = 1.2;
pub const SANITY_DRAIN_GHOST_NEARBY: f32 = 6.0;
pub const SANITY_REGEN_LIGHT: f32 = 0.8;
pub const HIDING_STAMINA_REGEN: f32 = 8.0;
pub const HIDING_SANITY_REGEN: f32 = 1.0;
pub const BATTERY_DRAIN_RATE: f32 = 0.04;

/// Any ghost closer than this drains sanity.
pub const GHOST_PROXIMITY_RADIUS: f32 = 8.0;

/// Extra health granted by one piece of armor.
pub const ARMOR_BONUS: f32 = 50.0;

// --- Flashlight ---

pub const FLASHLIGHT_INTENSITY: f32 = 2.8;
pub const FLICKER_INTENSITY: f32 = 0.1;
pub const LOW_BATTERY_THRESHOLD: f32 = 20.0;
pub const LOW_SANITY_FLICKER_THRESHOLD: f32 = 40.0;
pub const FLICKER_PROB_LOW_BATTERY: f32 = 0.10;
pub const FLICKER_PROB_LOW_SANITY: f32 = 0.05;
pub const FLICKER_PROB_BASE: f32 = 0.01;

// --- Status effects ---

pub const BLEED_INTERVAL_SECS: f32 = 2.0;
pub const BLEED_DAMAGE: f32 = 2.0;
pub const STIM_DURATION_SECS: f32 = 30.0;

// --- Ghosts ---

/// Ghosts beyond this range are removed every tick.
pub const GHOST_DESPAWN_RADIUS: f32 = 45.0;

/// While hiding, only ghosts closer than this are updated.
pub const HIDING_UPDATE_RADIUS: f32 = 2.0;

/// Hostile ghosts only appear from this floor on.
pub const GHOST_MIN_FLOOR: u32 = 2;

/// Mannequin is observed when dot(view, dir_to_ghost) exceeds this.
pub const MANNEQUIN_VIEW_DOT: f32 = 0.5;

pub const SCREAMER_DETECT_RADIUS: f32 = 10.0;
pub const SCREAMER_SANITY_PENALTY: f32 = 40.0;
pub const HALLUCINATION_SANITY_PENALTY: f32 = 10.0;
pub const SHADOW_CONTACT_DAMAGE: f32 = 30.0;

/// Crawler speeds up when the player is lit and closer than this.
pub const CRAWLER_BOOST_RADIUS: f32 = 15.0;

/// Height at which crawlers spawn (they cling to the ceiling).
pub const CRAWLER_SPAWN_HEIGHT: f32 = 3.8;

// --- Items ---

pub const MOLOTOV_RADIUS: f32 = 15.0;
pub const MOLOTOV_STUN_SECS: f32 = 5.0;
pub const EMP_RADIUS: f32 = 30.0;
pub const EMP_STUN_SECS: f32 = 10.0;
pub const EMP_FLASHLIGHT_OUTAGE_SECS: f32 = 3.0;
pub const BANDAGE_HEAL: f32 = 20.0;
pub const PILLS_SANITY: f32 = 40.0;
pub const MEDKIT_HEAL: f32 = 50.0;
pub const ADRENALINE_SANITY: f32 = 20.0;

/// Healing while below this health counts as a near-death recovery.
pub const NEAR_DEATH_HEALTH: f32 = 20.0;

// --- Sanity side effects ---

pub const HALLUCINATION_SANITY_THRESHOLD: f32 = 50.0;
pub const CONTROL_DISTORTION_SANITY: f32 = 40.0;
pub const CONTROL_DISTORTION_CHANCE: f64 = 0.02;
pub const SANITY_EVENT_CALM_THRESHOLD: f32 = 80.0;
pub const SANITY_EVENT_MIN_SECS: f32 = 10.0;
pub const SANITY_EVENT_SPAN_SECS: f32 = 20.0;
/// Sanity below which ghost spawns become more likely.
pub const SPAWN_SANITY_THRESHOLD: f32 = 40.0;

// --- Level ---

pub const SEGMENT_LENGTH: f32 = 20.0;
pub const CORRIDOR_HALF_WIDTH: f32 = 3.0;
pub const CEILING_HEIGHT: f32 = 4.0;
pub const GENERATION_LOOKAHEAD: f32 = 80.0;
pub const MAX_SEGMENTS: usize = 12;
pub const MAX_WALL_PROPS: u32 = 4;
pub const MAX_DEBRIS: u32 = 11;

// --- Doors ---

pub const DOOR_OPEN_ANGLE: f32 = -FRAC_PI_2;
pub const DOOR_APPROACH_RATE: f32 = 5.0;
pub const DOOR_SNAP_EPSILON: f32 = 0.01;

// --- Interaction ---

pub const INTERACT_DISTANCE: f32 = 2.5;
pub const INTERACTION_COOLDOWN_SECS: f32 = 0.25;

/// Occluders must be hit this much earlier than the target to block it.
pub const OCCLUSION_EPSILON: f32 = 1e-3;

// --- Progression ---

pub const ELEVATOR_PUZZLE_THRESHOLD: u32 = 10;
pub const ELEVATOR_RIDE_SECS: f32 = 4.0;
pub const HACK_PROGRESS: u32 = 2;
pub const FINAL_FLOOR: u32 = 10;

// --- Presentation ---

pub const TOAST_SECS: f32 = 3.0;
pub const FLAVOR_MONOLOGUE_SECS: f32 = 3.0;
pub const SPAWN_MONOLOGUE_SECS: f32 = 2.0;
pub const HURT_MONOLOGUE_SECS: f32 = 1.0;
pub const ARRIVAL_MONOLOGUE_SECS: f32 = 4.0;
/// Per-tick chance of an idle musing while walking.
pub const IDLE_MONOLOGUE_CHANCE: f64 = 0.0005;
