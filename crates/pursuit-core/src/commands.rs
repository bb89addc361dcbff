//! Commands sent from a front end to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, which is the
//! only point where an encounter can be abandoned.

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Reset, then start a new encounter with these parameters.
    Start { params: ScenarioParams },
    /// Discard the current encounter and return to idle.
    Reset,
}
