//! Collision culling: every entity that overlaps any other entity is removed.
//!
//! Detection is a discrete AABB test on the current positions only. A fast
//! projectile can pass through a thin target between two frames.

use log::trace;

use invaders_core::types::Body;

use crate::entity::Entity;

/// True when the two boxes touch or overlap on both axes.
pub fn bodies_overlap(a: &Body, b: &Body) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    !(a_max.x < b_min.x || a_max.y < b_min.y || a_min.x > b_max.x || a_min.y > b_max.y)
}

/// Collision predicate between two entities. An entity never collides with
/// itself; identity is the value's address, so two distinct entities that
/// happen to share an id still collide.
pub fn colliding(b1: &Entity, b2: &Entity) -> bool {
    !std::ptr::eq(b1, b2) && bodies_overlap(&b1.body, &b2.body)
}

/// Remove every entity that collides with at least one other entity.
///
/// All decisions are taken against the same pre-cull population, so removing
/// one entity never rescues or dooms another within the same call. `doomed`
/// is a scratch buffer reused between ticks. Returns the number removed.
pub fn run(entities: &mut Vec<Entity>, doomed: &mut Vec<bool>) -> u32 {
    doomed.clear();
    doomed.extend(entities.iter().enumerate().map(|(i, b1)| {
        entities
            .iter()
            .enumerate()
            .any(|(j, b2)| i != j && bodies_overlap(&b1.body, &b2.body))
    }));

    let culled = doomed.iter().filter(|&&d| d).count() as u32;
    if culled == 0 {
        return 0;
    }

    for (entity, _) in entities.iter().zip(doomed.iter()).filter(|(_, d)| **d) {
        trace!(
            "culling {} ({:?}) at {}",
            entity.id,
            entity.kind(),
            entity.center()
        );
    }

    let mut idx = 0;
    entities.retain(|_| {
        let keep = !doomed[idx];
        idx += 1;
        keep
    });
    culled
}
