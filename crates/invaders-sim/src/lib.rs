//! Simulation engine for INVADERS.
//!
//! Owns the entity population, runs collision culling and per-variant update
//! systems once per frame, and produces GameStateSnapshots for the renderer.

pub mod engine;
pub mod entity;
pub mod input;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use entity::Entity;
pub use input::{InputSource, KeyboardState};
pub use invaders_core as core;

#[cfg(test)]
mod tests;
