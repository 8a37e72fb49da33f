//! Meter drain/regen and flashlight output.

use rand::Rng;

use lastbell_core::config::GameConfig;
use lastbell_core::enums::SoundCue;
use lastbell_core::events::GameEvent;

use crate::outbox::Outbox;
use crate::vitals::{flashlight_output, Flashlight, MeterContext, Meters};

/// Evolve the meters, then resolve battery depletion and flicker.
pub fn run<R: Rng + ?Sized>(
    meters: &mut Meters,
    flashlight: &mut Flashlight,
    ctx: &MeterContext,
    config: &GameConfig,
    rng: &mut R,
    outbox: &mut Outbox,
) {
    meters.tick(ctx, config);

    if meters.battery > 0.0 {
        flashlight.depleted = false;
    } else if flashlight.on && !flashlight.depleted {
        flashlight.set(false);
        flashlight.depleted = true;
        outbox.push(GameEvent::FlashlightDepleted);
        outbox.toast("The flashlight died!");
        outbox.cue(SoundCue::Click);
        log::debug!("battery depleted");
    }

    let output = flashlight_output(flashlight.on, meters.battery, meters.sanity, rng.gen());
    flashlight.intensity = output.intensity;
}
