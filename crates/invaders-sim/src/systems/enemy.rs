//! Enemy patrol and fire control.

use glam::DVec2;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::components::Behavior;
use invaders_core::constants::{
    ENEMY_FIRE_THRESHOLD, ENEMY_PATROL_RANGE, ENEMY_PROJECTILE_JITTER, ENEMY_PROJECTILE_SPEED,
};
use invaders_core::types::EntityId;

use crate::entity::Entity;

/// Whether any enemy sits below `enemy` in its firing column.
///
/// The horizontal test is one-sided: every enemy further down whose x is less
/// than `enemy.x + enemy.size.x` counts, however far to the left it is.
pub fn enemies_below(entities: &[Entity], enemy: &Entity) -> bool {
    entities.iter().any(|other| {
        other.is_enemy()
            && other.body.center.y > enemy.body.center.y
            && other.body.center.x - enemy.body.center.x < enemy.body.size.x
    })
}

/// Advance the enemy at `idx` by one frame.
///
/// The patrol bounces once its offset has left `[0, ENEMY_PATROL_RANGE]`; the
/// check runs before moving, so the enemy overshoots by at most one step.
/// Entities that are not enemies are left untouched.
pub fn update(
    entities: &mut [Entity],
    idx: usize,
    rng: &mut ChaCha8Rng,
    next_entity_id: &mut u64,
    spawn_buffer: &mut Vec<Entity>,
) {
    let enemy = &mut entities[idx];
    let Behavior::Enemy(patrol) = &mut enemy.behavior else {
        return;
    };

    if patrol.offset < 0.0 || patrol.offset > ENEMY_PATROL_RANGE {
        patrol.speed = -patrol.speed;
    }
    enemy.body.center.x += patrol.speed;
    patrol.offset += patrol.speed;

    if rng.gen::<f64>() <= ENEMY_FIRE_THRESHOLD {
        return;
    }
    let enemy = &entities[idx];
    if enemies_below(entities, enemy) {
        return;
    }

    let muzzle = DVec2::new(
        enemy.body.center.x,
        enemy.body.center.y + enemy.body.size.x * 2.0,
    );
    let jitter = rng.gen_range(-ENEMY_PROJECTILE_JITTER..ENEMY_PROJECTILE_JITTER);
    let id = EntityId::allocate(next_entity_id);

    debug!("{} fired {} from {}", enemy.id, id, muzzle);
    spawn_buffer.push(Entity::projectile(
        id,
        muzzle,
        DVec2::new(jitter, ENEMY_PROJECTILE_SPEED),
    ));
}
