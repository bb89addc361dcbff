//! PURSUIT command-line application.
//!
//! Drives the simulation engine from the terminal: single encounters,
//! stepped or paced on a loop thread, and seeded sweeps.

pub mod game_loop;
pub mod report;
pub mod state;

pub use pursuit_core as core;
