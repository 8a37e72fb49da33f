//! Player body state owned by the engine.

use glam::Vec3;

use lastbell_core::constants::EYE_HEIGHT;
use lastbell_core::enums::MovementMode;
use lastbell_core::state::PlayerView;
use lastbell_core::types::Facing;

#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position.
    pub position: Vec3,
    pub facing: Facing,
    pub movement: MovementMode,
    pub crouching: bool,
    /// Set by a screamer's shriek. Cleared once the run input is released.
    pub run_blocked: bool,
    /// Where to put the player back when they leave a locker.
    pub hide_return: Option<Vec3>,
    pub interact_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::at_origin()
    }
}

impl Player {
    pub fn at_origin() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            facing: Facing::default(),
            movement: MovementMode::Idle,
            crouching: false,
            run_blocked: false,
            hide_return: None,
            interact_cooldown: 0.0,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hide_return.is_some()
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            facing: self.facing,
            movement: self.movement,
            hidden: self.is_hidden(),
        }
    }
}
