//! Simulation engine: owns the population and advances it one frame at a time.
//!
//! `SimulationEngine` owns the entity list, processes key commands, runs the
//! cull and update systems, and produces `GameStateSnapshot`s. It is completely
//! headless, which keeps it deterministic for a given seed and input sequence.

use std::collections::VecDeque;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use invaders_core::commands::PlayerCommand;
use invaders_core::components::Behavior;
use invaders_core::config::GameConfig;
use invaders_core::events::AudioEvent;
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::{Body, EntityId, Playfield, SimTime};

use crate::entity::Entity;
use crate::input::KeyboardState;
use crate::systems;
use crate::systems::snapshot::StepCounters;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub playfield: Playfield,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield: Playfield::default(),
        }
    }
}

impl From<&GameConfig> for SimConfig {
    fn from(config: &GameConfig) -> Self {
        Self {
            seed: config.seed,
            playfield: config.playfield(),
        }
    }
}

/// The simulation engine. Owns the population and all sim state.
pub struct SimulationEngine {
    entities: Vec<Entity>,
    time: SimTime,
    playfield: Playfield,
    rng: ChaCha8Rng,
    keyboard: KeyboardState,
    next_entity_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    spawn_buffer: Vec<Entity>,
    cull_buffer: Vec<bool>,
    audio_events: Vec<AudioEvent>,
}

impl SimulationEngine {
    /// Create an engine with an empty population.
    pub fn new(config: SimConfig) -> Self {
        Self {
            entities: Vec::new(),
            time: SimTime::default(),
            playfield: config.playfield,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            keyboard: KeyboardState::new(),
            next_entity_id: 0,
            command_queue: VecDeque::new(),
            spawn_buffer: Vec::new(),
            cull_buffer: Vec::new(),
            audio_events: Vec::new(),
        }
    }

    /// Create an engine holding the startup population: enemy grid plus player.
    pub fn with_initial_population(config: SimConfig) -> Self {
        let mut engine = Self::new(config);
        let population =
            world_setup::initial_population(&engine.playfield, &mut engine.next_entity_id);
        info!(
            "spawned initial population of {} entities on a {}x{} playfield",
            population.len(),
            engine.playfield.width,
            engine.playfield.height
        );
        for entity in population {
            engine.add_entity(entity);
        }
        engine
    }

    /// Queue a key command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    ///
    /// Culling runs first against the population as it stood when the step
    /// began; survivors are then updated in order. Entities spawned during the
    /// update pass are merged only after it, so they neither collide nor move
    /// until the next step.
    pub fn step(&mut self) -> GameStateSnapshot {
        self.process_commands();

        let culled = systems::collision::run(&mut self.entities, &mut self.cull_buffer);
        self.run_updates();

        let spawned = self.spawn_buffer.len() as u32;
        let pending = std::mem::take(&mut self.spawn_buffer);
        for entity in pending {
            self.add_entity(entity);
        }
        if culled > 0 || spawned > 0 {
            debug!(
                "tick {}: culled {culled}, spawned {spawned}, population {}",
                self.time.tick,
                self.entities.len()
            );
        }
        self.time.advance();

        let audio_events = std::mem::take(&mut self.audio_events);
        systems::snapshot::build_snapshot(
            &self.entities,
            &self.time,
            audio_events,
            StepCounters { culled, spawned },
        )
    }

    /// Append an entity to the population. No validation is performed.
    pub fn add_entity(&mut self, entity: Entity) {
        self.next_entity_id = self.next_entity_id.max(entity.id.0.saturating_add(1));
        self.entities.push(entity);
    }

    /// Build an entity with a fresh id and append it.
    pub fn spawn(&mut self, body: Body, behavior: Behavior) -> EntityId {
        let id = EntityId::allocate(&mut self.next_entity_id);
        self.add_entity(Entity::new(id, body, behavior));
        id
    }

    /// Whether another enemy sits below `enemy` in its firing column.
    pub fn enemies_below(&self, enemy: &Entity) -> bool {
        systems::enemy::enemies_below(&self.entities, enemy)
    }

    /// Live entities in population order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// The input source the player ship reads.
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.keyboard.handle(&command);
        }
    }

    /// Run each survivor's update rule, in population order.
    fn run_updates(&mut self) {
        for idx in 0..self.entities.len() {
            match self.entities[idx].behavior {
                Behavior::Player => systems::player::update(
                    &mut self.entities[idx],
                    &self.keyboard,
                    &mut self.next_entity_id,
                    &mut self.spawn_buffer,
                    &mut self.audio_events,
                ),
                Behavior::Enemy(_) => systems::enemy::update(
                    &mut self.entities,
                    idx,
                    &mut self.rng,
                    &mut self.next_entity_id,
                    &mut self.spawn_buffer,
                ),
                Behavior::Projectile(_) => systems::projectile::update(&mut self.entities[idx]),
            }
        }
    }
}
