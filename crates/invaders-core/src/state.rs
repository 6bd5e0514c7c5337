//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::events::AudioEvent;
use crate::types::{EntityId, SimTime};

/// Complete game state produced after each step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    /// Live entities in population order.
    pub entities: Vec<EntityView>,
    pub audio_events: Vec<AudioEvent>,
    /// Entities removed by collision culling during this step.
    pub culled: u32,
    /// Entities spawned during this step (visible from this snapshot on).
    pub spawned: u32,
    /// Whether a player ship is still part of the population.
    pub player_alive: bool,
}

/// One drawable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub center: DVec2,
    pub size: DVec2,
}

impl EntityView {
    /// Top-left corner of the rectangle to draw.
    pub fn top_left(&self) -> DVec2 {
        self.center - self.size / 2.0
    }
}

impl GameStateSnapshot {
    /// Number of live entities of the given kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
