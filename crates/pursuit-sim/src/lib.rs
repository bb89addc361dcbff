//! Simulation engine for PURSUIT.
//!
//! Owns the projectile, the launcher and the interception solver, advances
//! them on a caller-driven fixed tick, and produces `SimSnapshot`s.

pub mod bodies;
pub mod engine;
pub mod interception;
pub mod radar;
pub mod solver;
pub mod sweep;

pub use engine::{SimConfig, SimulationEngine};
pub use pursuit_core as core;
