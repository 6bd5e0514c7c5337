//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in playfield space (pixels, y grows downward).
///
/// `size` is the full width/height; the box spans `center ± size / 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub center: DVec2,
    pub size: DVec2,
}

impl Body {
    pub fn new(center: DVec2, size: DVec2) -> Self {
        Self { center, size }
    }

    /// Square body with the given side length.
    pub fn square(center: DVec2, side: f64) -> Self {
        Self::new(center, DVec2::splat(side))
    }

    /// Corner with the smallest coordinates.
    pub fn min(&self) -> DVec2 {
        self.center - self.size / 2.0
    }

    /// Corner with the largest coordinates.
    pub fn max(&self) -> DVec2 {
        self.center + self.size / 2.0
    }
}

/// Stable identity of a live entity. Allocated by the engine, never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Take the next id from `counter` and advance it.
    ///
    /// The counter saturates instead of wrapping; at one spawn per frame a
    /// 64-bit counter never gets there.
    pub fn allocate(counter: &mut u64) -> Self {
        let id = EntityId(*counter);
        *counter = counter.saturating_add(1);
        id
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each step).
    pub tick: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Dimensions of the visible play area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: crate::constants::DEFAULT_PLAYFIELD_WIDTH,
            height: crate::constants::DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Where the player ship starts: bottom centre, one ship-height above the edge.
    pub fn player_start(&self) -> DVec2 {
        DVec2::new(
            self.width / 2.0,
            self.height - crate::constants::PLAYER_SIZE,
        )
    }
}
