//! Terminal front end: frame driver, keyboard input, shoot sound and renderer.

pub mod audio;
pub mod cli;
pub mod game_loop;
pub mod input;
pub mod keyboard;
pub mod logging;
pub mod render;
pub mod state;

pub use logging::init as init_logging;
