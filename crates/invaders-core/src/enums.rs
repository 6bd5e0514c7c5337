//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which kind of body an entity is. Used for rendering and tactical queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Logical keys the player ship responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Fire,
}

impl Key {
    /// All logical keys, in the order the player checks them.
    pub const ALL: [Key; Key::COUNT] = [Key::Left, Key::Right, Key::Fire];

    /// Number of logical keys.
    pub const COUNT: usize = 3;

    /// Map a DOM-style key code (37 = left arrow, 39 = right arrow, 32 = space).
    pub fn from_key_code(code: u32) -> Option<Key> {
        match code {
            37 => Some(Key::Left),
            39 => Some(Key::Right),
            32 => Some(Key::Fire),
            _ => None,
        }
    }

    /// Parse a key name as typed on the command line.
    pub fn from_name(name: &str) -> Option<Key> {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" | "a" => Some(Key::Left),
            "right" | "d" => Some(Key::Right),
            "fire" | "space" => Some(Key::Fire),
            other => other.parse().ok().and_then(Key::from_key_code),
        }
    }

    /// Index into a dense per-key table.
    pub fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Fire => 2,
        }
    }
}
