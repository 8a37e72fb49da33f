//! Simulation engine for LAST BELL.
//!
//! Owns the hecs ghost world and the run state, runs the stages at a fixed
//! tick rate, and produces GameStateSnapshots for the frontend.

pub mod achievements;
pub mod crafting;
pub mod deck;
pub mod deferred;
pub mod engine;
pub mod interaction;
pub mod level;
pub mod modal;
pub mod outbox;
pub mod player;
pub mod status;
pub mod systems;
pub mod vitals;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use lastbell_core as core;

#[cfg(test)]
mod tests;
