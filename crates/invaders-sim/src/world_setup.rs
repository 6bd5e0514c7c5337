//! Entity spawn factories for the initial population.

use glam::DVec2;

use invaders_core::constants::*;
use invaders_core::types::{EntityId, Playfield};

use crate::entity::Entity;

/// Centres of the startup enemy grid, in spawn order.
///
/// Enemy `i` sits in column `i % 8` and row `i % 3`; since 8 and 3 are
/// coprime the 24 indices cover every cell of the 8×3 grid exactly once.
pub fn enemy_grid_positions() -> Vec<DVec2> {
    (0..ENEMY_COUNT)
        .map(|i| {
            DVec2::new(
                ENEMY_GRID_ORIGIN + (i % ENEMY_GRID_COLUMNS) as f64 * ENEMY_GRID_SPACING,
                ENEMY_GRID_ORIGIN + (i % ENEMY_GRID_ROWS) as f64 * ENEMY_GRID_SPACING,
            )
        })
        .collect()
}

/// Build the startup population: the enemy grid followed by the player ship.
pub fn initial_population(playfield: &Playfield, next_entity_id: &mut u64) -> Vec<Entity> {
    let mut entities = Vec::with_capacity(ENEMY_COUNT + 1);
    for center in enemy_grid_positions() {
        entities.push(Entity::enemy(EntityId::allocate(next_entity_id), center));
    }
    entities.push(Entity::player(
        EntityId::allocate(next_entity_id),
        playfield.player_start(),
    ));
    entities
}
