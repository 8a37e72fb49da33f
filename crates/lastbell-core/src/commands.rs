//! Input sent from the frontend to the simulation.
//!
//! [`InputIntent`] is sampled once per tick. [`PlayerCommand`]s are queued and
//! processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ItemKind;

/// Abstract per-tick input, already decoupled from devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputIntent {
    /// -1 (back) to 1 (forward).
    pub move_forward: f32,
    /// -1 (left) to 1 (right).
    pub move_right: f32,
    pub running: bool,
    pub crouching: bool,
    /// Edge-triggered flashlight toggle.
    pub toggle_flashlight: bool,
    pub interact: bool,
    /// Edge-triggered pause toggle.
    pub pause: bool,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
}

/// Discrete player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Inventory ---
    /// Craft the recipe producing `result`.
    Craft { result: ItemKind },
    UseItem { item: ItemKind },

    // --- Modals ---
    SubmitPuzzleAnswer { answer: String },
    SubmitHackAnswer { answer: String },
    /// Leave the puzzle, hacking or reading modal.
    CloseModal,
    ExitHiding,

    // --- Simulation control ---
    Pause,
    Resume,
    /// Start a fresh run. The only way out of a terminal phase.
    Restart,
}
