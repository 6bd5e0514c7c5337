//! Snapshot system: builds a GameStateSnapshot from the population.
//!
//! This system is read-only; it never modifies the population.

use invaders_core::events::AudioEvent;
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::SimTime;

use crate::entity::Entity;

/// Per-step bookkeeping reported alongside the entity list.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepCounters {
    pub culled: u32,
    pub spawned: u32,
}

pub fn build_snapshot(
    entities: &[Entity],
    time: &SimTime,
    audio_events: Vec<AudioEvent>,
    counters: StepCounters,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        entities: entities.iter().map(Entity::view).collect(),
        audio_events,
        culled: counters.culled,
        spawned: counters.spawned,
        player_alive: entities.iter().any(Entity::is_player),
    }
}
