//! Per-tick stages run by the engine in a fixed order.
//!
//! Systems are free functions over the parts of the engine they touch.
//! They do not own state. It lives in the engine and the ECS world.

pub mod cleanup;
pub mod doors;
pub mod ghost_ai;
pub mod level_gen;
pub mod meters;
pub mod movement;
pub mod sanity;
pub mod snapshot;
pub mod status;
