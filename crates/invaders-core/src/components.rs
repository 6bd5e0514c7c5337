//! Per-variant entity data.
//!
//! Components are plain data structs. The update rules that drive them live
//! in the simulation crate's systems.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::ENEMY_PATROL_SPEED;
use crate::enums::EntityKind;

/// Horizontal patrol state of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// Horizontal distance travelled since spawn (signed sum of speeds).
    pub offset: f64,
    /// Signed horizontal speed per frame.
    pub speed: f64,
}

impl Default for Patrol {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: ENEMY_PATROL_SPEED,
        }
    }
}

/// Constant-velocity motion of a projectile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ballistic {
    pub velocity: DVec2,
}

/// Variant-specific state carried by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Player ship, steered by the injected input source.
    Player,
    /// Patrolling enemy that fires downward at random.
    Enemy(Patrol),
    /// Projectile moving at constant velocity until it hits something.
    Projectile(Ballistic),
}

impl Behavior {
    pub fn kind(&self) -> EntityKind {
        match self {
            Behavior::Player => EntityKind::Player,
            Behavior::Enemy(_) => EntityKind::Enemy,
            Behavior::Projectile(_) => EntityKind::Projectile,
        }
    }
}
