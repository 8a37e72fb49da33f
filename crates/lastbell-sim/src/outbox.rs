//! Per-tick buffers for presentation events and scene commands.

use lastbell_core::enums::SoundCue;
use lastbell_core::events::{GameEvent, SceneCommand};

/// Collects everything raised between two snapshots.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub events: Vec<GameEvent>,
    pub scene: Vec<SceneCommand>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn toast(&mut self, text: impl Into<String>) {
        self.events.push(GameEvent::toast(text));
    }

    pub fn monologue(&mut self, text: impl Into<String>, duration_secs: f32) {
        self.events.push(GameEvent::monologue(text, duration_secs));
    }

    pub fn cue(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound { cue });
    }

    pub fn scene(&mut self, command: SceneCommand) {
        self.scene.push(command);
    }

    /// Hand both buffers to the snapshot and start empty.
    pub fn take(&mut self) -> (Vec<GameEvent>, Vec<SceneCommand>) {
        (
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.scene),
        )
    }
}
