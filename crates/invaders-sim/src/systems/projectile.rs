//! Projectile motion: `center += velocity` every frame.
//!
//! Projectiles never expire by age or by leaving the playfield; only a
//! collision removes them.

use invaders_core::components::Behavior;

use crate::entity::Entity;

pub fn update(projectile: &mut Entity) {
    if let Behavior::Projectile(ballistic) = projectile.behavior {
        projectile.body.center += ballistic.velocity;
    }
}
