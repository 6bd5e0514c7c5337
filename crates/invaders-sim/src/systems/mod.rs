//! Systems that operate on the population each tick.
//!
//! Systems are plain functions over entities. They do not own state; all
//! persistent state lives in the entities and the engine.

pub mod collision;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod snapshot;
