//! Scripted key events read line by line.
//!
//! Used for headless runs and piped input. Each line is one event: `+left` /
//! `-left` (or `down left` / `up left`) press and release a key, and `q` /
//! `quit` stops the game. Keys may be given by name or by DOM key code
//! (`+37`). Interactive play reads real key events instead (see `keyboard`).

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use log::{debug, trace, warn};

use invaders_core::commands::PlayerCommand;
use invaders_core::enums::Key;

use crate::state::GameLoopCommand;

/// One parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLine {
    Command(PlayerCommand),
    Quit,
}

/// Parse one input line. Blank and unrecognised lines yield `None`.
pub fn parse_line(line: &str) -> Option<InputLine> {
    let line = line.trim().to_ascii_lowercase();
    if line == "q" || line == "quit" {
        return Some(InputLine::Quit);
    }

    let (pressed, name) = if let Some(rest) = line.strip_prefix('+') {
        (true, rest)
    } else if let Some(rest) = line.strip_prefix('-') {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix("down ") {
        (true, rest)
    } else if let Some(rest) = line.strip_prefix("up ") {
        (false, rest)
    } else {
        return None;
    };

    let key = Key::from_name(name)?;
    let command = if pressed {
        PlayerCommand::KeyDown { key }
    } else {
        PlayerCommand::KeyUp { key }
    };
    Some(InputLine::Command(command))
}

/// Forward one key command to the game loop. Returns false once the loop has
/// hung up.
pub fn send_command(tx: &Sender<GameLoopCommand>, command: PlayerCommand) -> bool {
    trace!(
        "{:?} {}",
        command.key(),
        if command.is_press() { "down" } else { "up" }
    );
    tx.send(GameLoopCommand::PlayerCommand(command)).is_ok()
}

/// Forward parsed lines from `reader` to the game loop until quit, EOF, or the
/// loop hangs up. Returns the number of commands forwarded.
pub fn forward_lines<R: BufRead>(reader: R, tx: &Sender<GameLoopCommand>) -> io::Result<usize> {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = line?;
        match parse_line(&line) {
            Some(InputLine::Command(cmd)) => {
                if !send_command(tx, cmd) {
                    break;
                }
                forwarded += 1;
            }
            Some(InputLine::Quit) => {
                let _ = tx.send(GameLoopCommand::Shutdown);
                break;
            }
            None if line.trim().is_empty() => {}
            None => warn!("ignoring unrecognised input {line:?}"),
        }
    }
    Ok(forwarded)
}

/// Read scripted key events from `reader` on a background thread.
///
/// The thread owns `tx` and drops it when the input ends, so a game loop with
/// no other senders sees the channel disconnect and stops.
pub fn spawn_line_reader<R>(reader: R, tx: Sender<GameLoopCommand>) -> io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    std::thread::Builder::new()
        .name("invaders-input".into())
        .spawn(move || match forward_lines(reader, &tx) {
            Ok(count) => debug!("input closed after {count} key events"),
            Err(err) => warn!("stopped reading input: {err}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::mpsc;

    fn down(key: Key) -> Option<InputLine> {
        Some(InputLine::Command(PlayerCommand::KeyDown { key }))
    }

    fn up(key: Key) -> Option<InputLine> {
        Some(InputLine::Command(PlayerCommand::KeyUp { key }))
    }

    #[test]
    fn test_parse_prefixed_names() {
        assert_eq!(parse_line("+left"), down(Key::Left));
        assert_eq!(parse_line("-left"), up(Key::Left));
        assert_eq!(parse_line("+Right"), down(Key::Right));
        assert_eq!(parse_line("  -fire  "), up(Key::Fire));
        assert_eq!(parse_line("+space"), down(Key::Fire));
    }

    #[test]
    fn test_parse_word_forms_and_codes() {
        assert_eq!(parse_line("down left"), down(Key::Left));
        assert_eq!(parse_line("up right"), up(Key::Right));
        assert_eq!(parse_line("+37"), down(Key::Left));
        assert_eq!(parse_line("-39"), up(Key::Right));
        assert_eq!(parse_line("+32"), down(Key::Fire));
    }

    #[test]
    fn test_parse_quit_and_garbage() {
        assert_eq!(parse_line("q"), Some(InputLine::Quit));
        assert_eq!(parse_line("QUIT"), Some(InputLine::Quit));
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("left"), None);
        assert_eq!(parse_line("+jump"), None);
        assert_eq!(parse_line("+40"), None);
    }

    #[test]
    fn test_forward_lines_until_quit() {
        let (tx, rx) = mpsc::channel();
        let input = Cursor::new("+left\n\nbogus\n-left\nq\n+fire\n");

        let forwarded = forward_lines(input, &tx).unwrap();
        assert_eq!(forwarded, 2);

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                GameLoopCommand::PlayerCommand(PlayerCommand::KeyDown { key: Key::Left }),
                GameLoopCommand::PlayerCommand(PlayerCommand::KeyUp { key: Key::Left }),
                GameLoopCommand::Shutdown,
            ]
        );
    }

    #[test]
    fn test_end_of_input_stops_game_loop() {
        use crate::audio::SilentCue;
        use crate::game_loop::{spawn_game_loop, LoopSettings};
        use crate::render::HeadlessRenderer;
        use crate::state::LoopExit;
        use invaders_sim::{SimConfig, SimulationEngine};

        let (tx, game) = spawn_game_loop(
            SimulationEngine::with_initial_population(SimConfig::default()),
            Box::new(SilentCue),
            Box::new(HeadlessRenderer::default()),
            LoopSettings {
                tick_rate: 1000,
                max_ticks: None,
            },
        )
        .unwrap();

        let reader = spawn_line_reader(Cursor::new("+right\n-right\n"), tx).unwrap();
        reader.join().unwrap();

        let report = game.join().unwrap();
        assert_eq!(report.exit, LoopExit::Disconnected);
    }

    #[test]
    fn test_forward_lines_stops_when_loop_hangs_up() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let forwarded = forward_lines(Cursor::new("+left\n+right\n"), &tx).unwrap();
        assert_eq!(forwarded, 0);
    }
}
