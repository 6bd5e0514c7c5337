use std::io::BufReader;

use anyhow::{anyhow, Context};
use clap::Parser;
use log::info;

use invaders_app::audio::{AudioCue, AudioOutput, ShootSound, SilentCue, SoundClip};
use invaders_app::cli::Args;
use invaders_app::game_loop::{spawn_game_loop, LoopSettings};
use invaders_app::init_logging;
use invaders_app::input::spawn_line_reader;
use invaders_app::keyboard::{spawn_key_reader, RawTerminal};
use invaders_app::render::{HeadlessRenderer, Renderer, TerminalRenderer};
use invaders_sim::{SimConfig, SimulationEngine};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args
        .resolve_config()
        .context("failed to load configuration")?;

    // The frame loop must not start until the sound is ready. The output
    // stream stays on this thread and must outlive the game loop.
    let mut output = None;
    let audio: Box<dyn AudioCue + Send> = if args.mute {
        Box::new(SilentCue)
    } else {
        let clip = SoundClip::load(&config.sound_path).context("failed to load the shoot sound")?;
        let device = output.insert(AudioOutput::open().context("failed to open audio output")?);
        Box::new(ShootSound::new(clip, device))
    };

    let terminal = if args.headless {
        None
    } else {
        Some(RawTerminal::enter().context("failed to prepare the terminal")?)
    };
    let renderer: Box<dyn Renderer + Send> = if terminal.is_some() {
        Box::new(TerminalRenderer::new(std::io::stdout(), config.playfield()))
    } else {
        Box::new(HeadlessRenderer::default())
    };

    let engine = SimulationEngine::with_initial_population(SimConfig::from(&config));
    let (cmd_tx, handle) = spawn_game_loop(engine, audio, renderer, LoopSettings::from(&config))
        .context("failed to start the game loop")?;

    // The reader owns the only sender, so closing the input ends the loop.
    match &terminal {
        Some(session) => spawn_key_reader(cmd_tx, session.reports_release()),
        None => spawn_line_reader(BufReader::new(std::io::stdin()), cmd_tx),
    }
    .context("failed to start the input reader")?;

    let report = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    drop(terminal);
    drop(output);

    info!(
        "game over after {} frames ({:?}): {} shots fired, player {}",
        report.ticks,
        report.exit,
        report.shots,
        if report.player_alive { "alive" } else { "destroyed" }
    );
    Ok(())
}
