//! Entities owned by the population: a body plus variant-specific behavior.

use glam::DVec2;

use invaders_core::components::{Ballistic, Behavior, Patrol};
use invaders_core::constants::{ENEMY_SIZE, PLAYER_SIZE, PROJECTILE_SIZE};
use invaders_core::enums::EntityKind;
use invaders_core::state::EntityView;
use invaders_core::types::{Body, EntityId};

/// A live member of the population.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub behavior: Behavior,
}

impl Entity {
    pub fn new(id: EntityId, body: Body, behavior: Behavior) -> Self {
        Self { id, body, behavior }
    }

    pub fn player(id: EntityId, center: DVec2) -> Self {
        Self::new(id, Body::square(center, PLAYER_SIZE), Behavior::Player)
    }

    pub fn enemy(id: EntityId, center: DVec2) -> Self {
        Self::new(
            id,
            Body::square(center, ENEMY_SIZE),
            Behavior::Enemy(Patrol::default()),
        )
    }

    pub fn projectile(id: EntityId, center: DVec2, velocity: DVec2) -> Self {
        Self::new(
            id,
            Body::square(center, PROJECTILE_SIZE),
            Behavior::Projectile(Ballistic { velocity }),
        )
    }

    pub fn kind(&self) -> EntityKind {
        self.behavior.kind()
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self.behavior, Behavior::Enemy(_))
    }

    pub fn is_player(&self) -> bool {
        matches!(self.behavior, Behavior::Player)
    }

    pub fn center(&self) -> DVec2 {
        self.body.center
    }

    pub fn size(&self) -> DVec2 {
        self.body.size
    }

    pub fn view(&self) -> EntityView {
        EntityView {
            id: self.id,
            kind: self.kind(),
            center: self.body.center,
            size: self.body.size,
        }
    }
}
