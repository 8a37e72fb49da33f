//! Procedural corridor generation for LAST BELL.
//!
//! Pure synthesis: given an RNG, generation parameters and content tables,
//! produce a [`segment::SegmentBlueprint`] describing walls, props,
//! interactables and doors. No ECS or engine dependency.

pub mod catalog;
pub mod segment;

pub use segment::{synthesize_segment, SegmentBlueprint, SegmentParams};
