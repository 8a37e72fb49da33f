//! Timed status conditions layered on top of the meters.

use std::collections::BTreeMap;

use lastbell_core::constants::{BLEED_DAMAGE, BLEED_INTERVAL_SECS};
use lastbell_core::enums::StatusEffect;
use lastbell_core::state::StatusView;

#[derive(Debug, Clone, Copy, Default)]
struct StatusEntry {
    /// `None` for effects that last until cleared.
    remaining: Option<f32>,
    /// Time since the last periodic tick (bleeding only).
    accumulator: f32,
}

/// Result of advancing the tracker by one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTick {
    /// Total periodic damage dealt this step.
    pub damage: f32,
    /// Number of bleed ticks that fired.
    pub bleed_ticks: u32,
    pub expired: Vec<StatusEffect>,
}

/// Set of active status effects, at most one entry per effect.
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    entries: BTreeMap<StatusEffect, StatusEntry>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an untimed effect. Re-applying keeps the existing entry intact.
    pub fn apply(&mut self, effect: StatusEffect) {
        self.entries.entry(effect).or_default();
    }

    /// Add a timed effect, or refresh the timer of an existing one.
    pub fn apply_timed(&mut self, effect: StatusEffect, secs: f32) {
        self.entries.entry(effect).or_default().remaining = Some(secs);
    }

    pub fn clear(&mut self, effect: StatusEffect) -> bool {
        self.entries.remove(&effect).is_some()
    }

    pub fn has(&self, effect: StatusEffect) -> bool {
        self.entries.contains_key(&effect)
    }

    pub fn remaining(&self, effect: StatusEffect) -> Option<f32> {
        self.entries.get(&effect).and_then(|e| e.remaining)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count down timers, fire bleed ticks, drop expired entries.
    pub fn tick(&mut self, dt: f32) -> StatusTick {
        let mut out = StatusTick::default();

        for (effect, entry) in self.entries.iter_mut() {
            if *effect == StatusEffect::Bleeding {
                entry.accumulator += dt;
                if entry.accumulator >= BLEED_INTERVAL_SECS {
                    entry.accumulator = 0.0;
                    out.damage += BLEED_DAMAGE;
                    out.bleed_ticks += 1;
                }
            }
            if let Some(remaining) = entry.remaining.as_mut() {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    out.expired.push(*effect);
                }
            }
        }

        for effect in &out.expired {
            self.entries.remove(effect);
        }
        out
    }

    pub fn views(&self) -> Vec<StatusView> {
        self.entries
            .iter()
            .map(|(effect, entry)| StatusView {
                effect: *effect,
                remaining_secs: entry.remaining.map(|r| r.max(0.0)),
            })
            .collect()
    }
}
