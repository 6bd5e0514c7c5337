//! Messages exchanged between the input thread and the game loop thread.

use invaders_core::commands::PlayerCommand;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLoopCommand {
    /// A key event to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Why the game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// A `Shutdown` command arrived.
    Shutdown,
    /// Every command sender was dropped.
    Disconnected,
    /// The configured frame limit was reached.
    TickLimit,
    /// Writing a frame to the renderer failed.
    RenderFailed,
}

/// Summary returned when the game loop finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: LoopExit,
    pub ticks: u64,
    pub shots: u64,
    pub player_alive: bool,
}
