//! Status effect countdown and bleed damage.

use rand::seq::SliceRandom;
use rand::Rng;

use lastbell_core::constants::HURT_MONOLOGUE_SECS;
use lastbell_core::content::ContentTables;
use lastbell_core::enums::StatusEffect;

use crate::outbox::Outbox;
use crate::status::StatusEffects;
use crate::vitals::Meters;

pub fn run<R: Rng + ?Sized>(
    status: &mut StatusEffects,
    meters: &mut Meters,
    content: &ContentTables,
    rng: &mut R,
    outbox: &mut Outbox,
    dt: f32,
) {
    let tick = status.tick(dt);

    if tick.damage > 0.0 {
        meters.damage(tick.damage);
    }
    for _ in 0..tick.bleed_ticks {
        outbox.toast("You're bleeding!");
        if let Some(line) = content.hurt_monologues.choose(rng) {
            outbox.monologue(line.clone(), HURT_MONOLOGUE_SECS);
        }
    }

    for effect in tick.expired {
        match effect {
            StatusEffect::Stimulated => outbox.toast("The stimulant wore off"),
            StatusEffect::Bleeding => {}
        }
    }
}
