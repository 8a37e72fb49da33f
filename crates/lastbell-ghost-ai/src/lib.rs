//! Ghost AI for LAST BELL.
//!
//! Implements per-kind ghost state machines and spawn placement.

pub mod fsm;
pub mod profiles;

pub use lastbell_core as core;

#[cfg(test)]
mod tests;
