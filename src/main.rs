//! Tilt Coins entry point
//!
//! Sets up logging, settings, the sensor link and the terminal, then runs the
//! fixed-rate game loop. Logs go to stderr, so redirect it (`2>tilt.log`) when
//! raising `RUST_LOG`.

use std::io::{self, Stdout, stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};

use tilt_coins::audio::{self, AudioManager};
use tilt_coins::consts::FPS;
use tilt_coins::renderer::{Presenter, TerminalRenderer};
use tilt_coins::sim::{Command, Game, GamePhase, TickInput, tick};
use tilt_coins::telemetry::TelemetryChannel;
use tilt_coins::{GameClock, Settings};

/// Puts the terminal back however the loop exits
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press asks of the loop
enum KeyAction {
    Command(Command),
    Quit,
    None,
}

/// Fold one key press into this tick's input
fn map_key(key: KeyEvent, phase: GamePhase, input: &mut TickInput) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') => KeyAction::Quit,
        // Esc on the menu leaves the game
        KeyCode::Esc if phase == GamePhase::Menu => KeyAction::Quit,
        KeyCode::Esc => KeyAction::Command(Command::Cancel),
        KeyCode::Enter => KeyAction::Command(Command::Confirm),
        KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Command(Command::Pause),
        KeyCode::Left => {
            input.keys.left = true;
            KeyAction::None
        }
        KeyCode::Right => {
            input.keys.right = true;
            KeyAction::None
        }
        KeyCode::Up => {
            input.keys.up = true;
            KeyAction::None
        }
        KeyCode::Down => {
            input.keys.down = true;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Apply a key press to this tick's input. `phase` tracks where the queued
/// commands will leave the game. Returns true on quit.
fn handle_key(key: KeyEvent, phase: &mut GamePhase, input: &mut TickInput) -> bool {
    match map_key(key, *phase, input) {
        KeyAction::Command(command) => {
            input.commands.push(command);
            *phase = phase.transition(command);
            false
        }
        KeyAction::Quit => true,
        KeyAction::None => false,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tilt Coins starting...");

    let config = Settings::locate(std::env::args().nth(1));
    let settings = Settings::load(config.as_deref());
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    let mut channel = TelemetryChannel::open_serial(&settings.serial);
    let mut audio = AudioManager::new(&settings.audio, audio::default_output());
    audio.start_music();

    let clock = GameClock::new();
    let mut game = Game::new(seed, clock.now());

    let mut out = stdout();
    let guard = TerminalGuard::enter(&mut out).context("failed to set up the terminal")?;
    let (cols, rows) = terminal::size().context("failed to read the terminal size")?;
    let mut renderer = TerminalRenderer::new(out, cols, rows);

    let frame = GameClock::frame_duration(FPS);
    'running: loop {
        let frame_start = Instant::now();
        let mut input = TickInput::default();

        let mut phase = game.phase;
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Input unavailable this frame: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if handle_key(key, &mut phase, &mut input) {
                        break 'running;
                    }
                }
                Ok(Event::Resize(c, r)) => renderer.resize(c, r),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Input unavailable this frame: {}", e);
                    break;
                }
            }
        }
        input.sample = channel.latest_sample();

        let now = clock.now();
        let events = tick(&mut game, &input, now);
        audio.handle_events(&events);

        if let Err(e) = renderer.present(&game, now) {
            log::warn!("Frame dropped: {}", e);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    drop(guard);
    channel.stop();
    log::info!("Tilt Coins exiting (last score {})", game.round.score);
    Ok(())
}
