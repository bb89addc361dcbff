//! Core types and definitions for the PURSUIT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, scenario parameters, commands, state snapshots, events,
//! and constants. It has no dependency on any runtime or front end.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod math;
pub mod scenario;
pub mod state;
pub mod types;
