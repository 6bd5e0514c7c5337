//! Events emitted by the simulation for audio feedback.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Audio events for the front end's sound system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// The player fired. The shoot cue restarts from the beginning.
    Shoot { projectile: EntityId },
}
