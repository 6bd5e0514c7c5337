//! Live key events from the terminal.
//!
//! The terminal is put in raw mode so keys arrive unbuffered and unechoed.
//! Terminals that support the keyboard enhancement protocol report real
//! release events. Elsewhere a key counts as released once its auto-repeat
//! stops for `HOLD_TIMEOUT`.

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::{debug, warn};

use invaders_core::commands::PlayerCommand;
use invaders_core::enums::Key;

use crate::input::{send_command, InputLine};
use crate::state::GameLoopCommand;

/// Silence after which a held key is considered released when the terminal
/// cannot report releases. Longer than the usual auto-repeat delay.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(600);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Logical key for a terminal key code.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    match event.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        // Raw mode swallows SIGINT.
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Turns terminal key events into press/release commands.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    reports_release: bool,
    last_seen: [Option<Instant>; Key::COUNT],
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            last_seen: [None; Key::COUNT],
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen[key.index()].is_some()
    }

    /// Translate one key event. Auto-repeat of a held key yields nothing.
    pub fn on_key(&mut self, event: &KeyEvent, now: Instant) -> Option<InputLine> {
        if is_quit(event) {
            return Some(InputLine::Quit);
        }
        let key = map_key(event.code)?;
        let was_held = self.is_held(key);
        match event.kind {
            KeyEventKind::Release => {
                self.last_seen[key.index()] = None;
                was_held.then_some(InputLine::Command(PlayerCommand::KeyUp { key }))
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen[key.index()] = Some(now);
                (!was_held).then_some(InputLine::Command(PlayerCommand::KeyDown { key }))
            }
        }
    }

    /// Release keys whose auto-repeat has gone quiet. Does nothing when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<PlayerCommand> {
        if self.reports_release {
            return Vec::new();
        }
        let mut released = Vec::new();
        for key in Key::ALL {
            let slot = &mut self.last_seen[key.index()];
            if slot.is_some_and(|seen| now.duration_since(seen) >= HOLD_TIMEOUT) {
                *slot = None;
                released.push(PlayerCommand::KeyUp { key });
            }
        }
        released
    }
}

/// Raw-mode terminal session. Restores the terminal on drop.
pub struct RawTerminal {
    enhanced: bool,
}

impl RawTerminal {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        let mut session = Self { enhanced: false };

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.enhanced = true;
        }
        debug!("raw terminal mode, release events: {}", session.enhanced);
        Ok(session)
    }

    /// Whether the terminal sends key release events.
    pub fn reports_release(&self) -> bool {
        self.enhanced
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(out, Show, LeaveAlternateScreen);
        let _ = out.flush();
        let _ = disable_raw_mode();
    }
}

/// Read terminal key events on a background thread and forward them to the
/// game loop. Ends on quit or once the loop hangs up.
pub fn spawn_key_reader(
    tx: Sender<GameLoopCommand>,
    reports_release: bool,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("invaders-keys".into())
        .spawn(move || {
            if let Err(err) = read_keys(&tx, reports_release) {
                warn!("stopped reading keys: {err}");
            }
        })
}

fn read_keys(tx: &Sender<GameLoopCommand>, reports_release: bool) -> io::Result<()> {
    let mut tracker = KeyTracker::new(reports_release);
    loop {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key_event) = event::read()? {
                match tracker.on_key(&key_event, Instant::now()) {
                    Some(InputLine::Quit) => {
                        let _ = tx.send(GameLoopCommand::Shutdown);
                        return Ok(());
                    }
                    Some(InputLine::Command(cmd)) => {
                        if !send_command(tx, cmd) {
                            return Ok(());
                        }
                    }
                    None => {}
                }
            }
        }
        for cmd in tracker.expire(Instant::now()) {
            if !send_command(tx, cmd) {
                return Ok(());
            }
        }
    }
}
