//! Game loop thread: steps the simulation at a fixed rate and draws each frame.
//!
//! The engine, audio cue and renderer are moved into the thread. Key events
//! arrive via an `mpsc` channel and are drained at the start of every tick, so
//! a key pressed mid-frame takes effect on the following step.

use std::io;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use invaders_core::config::GameConfig;
use invaders_core::constants::TICK_RATE;
use invaders_core::events::AudioEvent;
use invaders_sim::SimulationEngine;

use crate::audio::AudioCue;
use crate::render::{draw_frame, Renderer};
use crate::state::{GameLoopCommand, LoopExit, LoopReport};

/// Pacing and stop conditions for the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSettings {
    /// Frames per second.
    pub tick_rate: u32,
    /// Stop after this many frames. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            max_ticks: None,
        }
    }
}

impl From<&GameConfig> for LoopSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            tick_rate: config.tick_rate,
            max_ticks: config.max_ticks,
        }
    }
}

impl LoopSettings {
    /// Nominal duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input layer and a handle that yields the
/// loop report once the thread exits.
pub fn spawn_game_loop(
    mut engine: SimulationEngine,
    mut audio: Box<dyn AudioCue + Send>,
    mut renderer: Box<dyn Renderer + Send>,
    settings: LoopSettings,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("invaders-game-loop".into())
        .spawn(move || {
            run_game_loop(
                &mut engine,
                &cmd_rx,
                audio.as_mut(),
                renderer.as_mut(),
                &settings,
            )
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit, or
/// a failed frame write.
pub fn run_game_loop(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    audio: &mut dyn AudioCue,
    renderer: &mut dyn Renderer,
    settings: &LoopSettings,
) -> LoopReport {
    let tick_duration = settings.tick_duration();
    let mut next_tick_time = Instant::now();
    let mut report = LoopReport {
        exit: LoopExit::Shutdown,
        ticks: 0,
        shots: 0,
        player_alive: true,
    };

    info!("game loop started at {} Hz", settings.tick_rate);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    report.exit = LoopExit::Shutdown;
                    return report;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    report.exit = LoopExit::Disconnected;
                    return report;
                }
            }
        }

        // 2. Advance one frame
        let snapshot = engine.step();
        report.ticks = snapshot.time.tick;
        if report.player_alive && !snapshot.player_alive {
            debug!("player ship destroyed at tick {}", snapshot.time.tick);
        }
        report.player_alive = snapshot.player_alive;

        // 3. Play sounds for this frame's events
        for event in &snapshot.audio_events {
            match event {
                AudioEvent::Shoot { .. } => {
                    audio.restart();
                    report.shots += 1;
                }
            }
        }

        // 4. Draw
        if let Err(err) = draw_frame(renderer, &snapshot) {
            error!("failed to draw frame {}: {err}", snapshot.time.tick);
            report.exit = LoopExit::RenderFailed;
            return report;
        }

        if settings.max_ticks.is_some_and(|limit| report.ticks >= limit) {
            report.exit = LoopExit::TickLimit;
            return report;
        }

        // 5. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}
