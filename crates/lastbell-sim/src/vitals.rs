//! Player physiology: the four meters and the flashlight.
//!
//! Stored in `SimulationEngine` as plain structs, NOT as ECS entities.

use lastbell_core::config::GameConfig;
use lastbell_core::constants::*;
use lastbell_core::enums::{DeathCause, MovementMode};

/// Per-tick inputs to the meter model.
#[derive(Debug, Clone, Copy)]
pub struct MeterContext {
    pub dt: f32,
    pub flashlight_on: bool,
    pub ghost_nearby: bool,
    pub movement: MovementMode,
    pub hidden: bool,
    pub stimulated: bool,
}

/// Stamina, sanity, health and battery.
#[derive(Debug, Clone)]
pub struct Meters {
    pub stamina: f32,
    pub sanity: f32,
    pub health: f32,
    pub battery: f32,
    /// Extra health cap from equipped armor.
    pub armor_bonus: f32,
    /// First lethal cause recorded this tick.
    pub pending_death: Option<DeathCause>,
}

impl Default for Meters {
    fn default() -> Self {
        Self {
            stamina: METER_MAX,
            sanity: METER_MAX,
            health: METER_MAX,
            battery: METER_MAX,
            armor_bonus: 0.0,
            pending_death: None,
        }
    }
}

impl Meters {
    pub fn max_health(&self) -> f32 {
        METER_MAX + self.armor_bonus
    }

    /// Evolve stamina, sanity and battery over `ctx.dt`.
    pub fn tick(&mut self, ctx: &MeterContext, config: &GameConfig) {
        let dt = ctx.dt;

        if ctx.hidden {
            self.stamina = clamp_meter(self.stamina + HIDING_STAMINA_REGEN * dt);
            self.sanity = clamp_meter(self.sanity + HIDING_SANITY_REGEN * dt);
            return;
        }

        if ctx.stimulated {
            self.stamina = METER_MAX;
        } else if ctx.movement == MovementMode::Run {
            self.stamina = clamp_meter(self.stamina - config.stamina_drain * dt);
        } else {
            self.stamina = clamp_meter(self.stamina + config.stamina_regen * dt);
        }

        let mut drain = 0.0;
        if !ctx.flashlight_on {
            drain += config.sanity_drain_darkness;
        }
        if ctx.ghost_nearby {
            drain += config.sanity_drain_ghost;
        }
        if drain > 0.0 {
            self.sanity = clamp_meter(self.sanity - drain * dt);
        } else {
            self.sanity = clamp_meter(self.sanity + config.sanity_regen * dt);
        }

        if ctx.flashlight_on {
            self.battery = clamp_meter(self.battery - config.battery_drain * dt);
        }
    }

    pub fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    /// Restore health up to the current cap.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health()).max(self.health);
    }

    pub fn add_sanity(&mut self, delta: f32) {
        self.sanity = clamp_meter(self.sanity + delta);
    }

    pub fn equip_armor(&mut self) {
        self.armor_bonus += ARMOR_BONUS;
        self.health += ARMOR_BONUS;
    }

    /// Record a lethal event. Only the first cause per run is kept.
    pub fn kill(&mut self, cause: DeathCause) {
        self.health = 0.0;
        self.pending_death.get_or_insert(cause);
    }
}

fn clamp_meter(v: f32) -> f32 {
    v.clamp(0.0, METER_MAX)
}

/// Flashlight output for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashlightOutput {
    pub intensity: f32,
    pub flicker_probability: f32,
}

/// Flashlight switch state.
#[derive(Debug, Clone, Default)]
pub struct Flashlight {
    pub on: bool,
    /// Set once the battery empties; cleared when it holds charge again.
    pub depleted: bool,
    /// Bumped on every switch change so stale deferred restores are dropped.
    pub generation: u32,
    pub intensity: f32,
}

impl Flashlight {
    pub fn new() -> Self {
        Self {
            on: true,
            intensity: FLASHLIGHT_INTENSITY,
            ..Default::default()
        }
    }

    pub fn set(&mut self, on: bool) {
        if self.on != on {
            self.on = on;
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Flip the switch. Refused while the battery is empty.
    pub fn toggle(&mut self, battery: f32) -> bool {
        if !self.on && battery <= 0.0 {
            return false;
        }
        self.set(!self.on);
        true
    }
}

/// Flicker probability and output intensity given the meters and a uniform
/// roll in [0, 1).
pub fn flashlight_output(on: bool, battery: f32, sanity: f32, roll: f32) -> FlashlightOutput {
    let flicker_probability = if battery < LOW_BATTERY_THRESHOLD {
        FLICKER_PROB_LOW_BATTERY
    } else if sanity < LOW_SANITY_FLICKER_THRESHOLD {
        FLICKER_PROB_LOW_SANITY
    } else {
        FLICKER_PROB_BASE
    };
    let intensity = if !on {
        0.0
    } else if roll < flicker_probability {
        FLICKER_INTENSITY
    } else {
        FLASHLIGHT_INTENSITY
    };
    FlashlightOutput {
        intensity,
        flicker_probability,
    }
}
