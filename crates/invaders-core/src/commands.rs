//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Key;

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// A key went down. Stays held until the matching `KeyUp`.
    KeyDown { key: Key },
    /// A key was released.
    KeyUp { key: Key },
}

impl PlayerCommand {
    pub fn key(&self) -> Key {
        match *self {
            PlayerCommand::KeyDown { key } | PlayerCommand::KeyUp { key } => key,
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, PlayerCommand::KeyDown { .. })
    }
}
