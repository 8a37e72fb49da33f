//! Core types and definitions for the LAST BELL simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, configuration, content
//! tables and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod enums;
pub mod events;
pub mod state;
pub mod stats;
pub mod types;
