mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::info;

use grid_shooter::config::GameConfig;
use grid_shooter::entities::Intents;
use grid_shooter::game::{Game, Schedule};
use grid_shooter::render::{Color, Surface};
use grid_shooter::status::RunState;

use display::TerminalSurface;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Environment variable naming an optional RON config file.
const CONFIG_ENV: &str = "GRID_SHOOTER_CONFIG";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that never report key releases: OS
/// key-repeat fires at ≥ 15 Hz, well inside 8 frames (≈130 ms).
const HOLD_WINDOW: u64 = 8;

const HINT_PLAYING: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";
const HINT_RESTART: &str = "R / ENTER : Restart Game   Q : Quit";
const HINT_START: &str = "R / ENTER : Start Game   Q : Quit";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_intents(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Intents {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame));
    Intents {
        move_left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        move_right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        fire: any(&[KeyCode::Char(' ')]),
    }
}

fn load_config() -> anyhow::Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let config = GameConfig::load(&path)
                .with_context(|| format!("loading {CONFIG_ENV}={}", path.to_string_lossy()))?;
            info!("loaded config from {}", path.to_string_lossy());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

// ── Idle screen ───────────────────────────────────────────────────────────────

fn draw_idle<W: Write>(surface: &mut TerminalSurface<W>, config: &GameConfig) -> std::io::Result<()> {
    surface.clear()?;
    surface.draw_text(
        config.arena.width / 2.0,
        config.arena.height / 2.0,
        "GRID SHOOTER",
        Color::White,
    )?;
    surface.draw_hint(HINT_START)?;
    surface.present()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, and intents are whatever is still "fresh" this
/// frame.  Terminals with keyboard enhancement report releases and drop keys
/// immediately; classic terminals let keys expire after `HOLD_WINDOW`.
///
/// The game is only driven while it asks for another frame; idle and
/// finished runs just poll input.
fn run<W: Write>(
    out: W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface =
        TerminalSurface::new(out, config.arena.width, config.arena.height, cols, rows);
    let mut game = Game::new(config);
    draw_idle(&mut surface, game.config())?;

    let started = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut schedule = Schedule::Stop;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                                restart = true;
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => {
                    let arena = &game.config().arena;
                    surface.resize(arena.width, arena.height, cols, rows);
                    if game.state() == RunState::NotRunning {
                        draw_idle(&mut surface, game.config())?;
                    }
                }
                _ => {}
            }
        }

        if restart {
            game.restart();
            schedule = Schedule::Next;
        }

        if schedule == Schedule::Next {
            let now_ms = started.elapsed().as_millis() as u64;
            schedule = game.frame(held_intents(&key_frame, frame), now_ms, &mut surface)?;
            let hint = if game.state().is_terminal() { HINT_RESTART } else { HINT_PLAYING };
            surface.draw_hint(hint)?;
            surface.present()?;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = load_config()?;

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal game loop failed")
}
