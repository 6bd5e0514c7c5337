//! Keyboard input source.
//!
//! Key state is last-known-state, not edge-triggered: a held key keeps
//! reporting `true` every frame until its release event arrives.

use invaders_core::commands::PlayerCommand;
use invaders_core::enums::Key;

/// Anything the player ship can poll for key state.
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
}

/// Key state table updated by explicit press/release events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: [bool; Key::COUNT],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Apply a key event coming from the host.
    pub fn handle(&mut self, command: &PlayerCommand) {
        match *command {
            PlayerCommand::KeyDown { key } => self.press(key),
            PlayerCommand::KeyUp { key } => self.release(key),
        }
    }
}

impl InputSource for KeyboardState {
    fn is_down(&self, key: Key) -> bool {
        self.held[key.index()]
    }
}
