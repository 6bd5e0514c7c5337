//! Simulation constants and tuning parameters.
//!
//! All speeds are per-frame quantities: the simulation is not time-scaled,
//! so one tick moves an entity by exactly its speed.

/// Frame rate the driver aims for (Hz).
pub const TICK_RATE: u32 = 60;

// --- Playfield ---

/// Default playfield width in pixels.
pub const DEFAULT_PLAYFIELD_WIDTH: f64 = 310.0;

/// Default playfield height in pixels.
pub const DEFAULT_PLAYFIELD_HEIGHT: f64 = 310.0;

// --- Player ---

/// Player box width/height.
pub const PLAYER_SIZE: f64 = 10.0;

/// Horizontal distance the player moves per frame while a direction key is held.
pub const PLAYER_STEP: f64 = 2.0;

/// Vertical velocity of player projectiles (negative = up the screen).
pub const PLAYER_PROJECTILE_SPEED: f64 = -0.9;

// --- Enemies ---

/// Enemy box width/height.
pub const ENEMY_SIZE: f64 = 5.0;

/// Magnitude of enemy horizontal patrol speed.
pub const ENEMY_PATROL_SPEED: f64 = 0.3;

/// Upper bound of the patrol offset. The lower bound is 0.
pub const ENEMY_PATROL_RANGE: f64 = 40.0;

/// A uniform draw above this value lets an enemy fire (~0.5% per frame).
pub const ENEMY_FIRE_THRESHOLD: f64 = 0.995;

/// Vertical velocity of enemy projectiles (positive = down the screen).
pub const ENEMY_PROJECTILE_SPEED: f64 = 2.0;

/// Half-width of the horizontal jitter applied to enemy projectiles.
pub const ENEMY_PROJECTILE_JITTER: f64 = 0.5;

// --- Enemy grid ---

/// Number of enemies spawned at startup.
pub const ENEMY_COUNT: usize = 24;

/// Number of grid columns.
pub const ENEMY_GRID_COLUMNS: usize = 8;

/// Number of grid rows.
pub const ENEMY_GRID_ROWS: usize = 3;

/// Position of the top-left grid cell.
pub const ENEMY_GRID_ORIGIN: f64 = 30.0;

/// Distance between neighbouring grid cells on both axes.
pub const ENEMY_GRID_SPACING: f64 = 20.0;

// --- Projectiles ---

/// Projectile box width/height.
pub const PROJECTILE_SIZE: f64 = 1.0;
