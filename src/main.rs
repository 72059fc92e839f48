mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use neon_survivor::config::GameConfig;
use neon_survivor::game::{Flow, Game, GameStatus, TickInput};
use neon_survivor::vec2::Vec2;
use neon_survivor::{Error, Result};

use display::Viewport;

// ── Held-key input ────────────────────────────────────────────────────────────

/// Frames a press or repeat keeps a key counted as down. Terminals without
/// release events rely on OS key-repeat (15 Hz or more) to refresh it.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Movement vector from whichever direction keys are currently held.
fn held_direction(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if any_held(key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame) {
        dir.x -= 1.0;
    }
    if any_held(key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame) {
        dir.x += 1.0;
    }
    if any_held(key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame) {
        dir.y -= 1.0;
    }
    if any_held(key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame) {
        dir.y += 1.0;
    }
    dir
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Tracing goes to a file: the terminal is owned by the renderer.
fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "◈  NEON  SURVIVOR  ◈";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let tagline = "Survive the swarm. Your ship fires on its own.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(tagline.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::Grey))?;
    out.queue(Print(tagline))?;

    // Enemy legend
    let legend: &[(&str, Color, &str)] = &[
        ("▲", Color::Red,      " Chaser   — homes in on you"),
        ("♦", Color::DarkYellow, " Sprinter — fast but fragile"),
        ("■", Color::Magenta,  " Drifter  — bounces around the arena"),
        ("⬢", Color::Green,    " Tank     — slow and very tough"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(18), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(18), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Collect ◇ gems to level up, then press 1/2/3 to upgrade."))?;

    let prompt = "Press ENTER or SPACE to start   Q : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(prompt.chars().count() as u16 / 2),
        cy + 5,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(prompt))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Movement uses the held-key model: every press/repeat records the frame it
/// arrived on, and a key counts as held while that frame is within
/// `HOLD_WINDOW`.  Upgrade picks and restart are one-shot presses.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    game: &mut Game,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> Result<bool> {
    let frame_time = config.frame_duration();
    let dt = config.tick_seconds();

    // Last frame each key was pressed or repeated.
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut input = TickInput::default();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char(c @ '1'..='3') => {
                            input.select_upgrade = c.to_digit(10).map(|d| d as usize - 1);
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => input.restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        if game.status() == GameStatus::Playing {
            input.direction = held_direction(&key_frame, frame);
        }

        if game.tick(&input, dt, rng) == Flow::Restarted {
            return Ok(false);
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, game, &Viewport::new(cols, rows, game.arena))?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = GameConfig::load_or_default();
    config.validate()?;
    init_logging(&config)?;
    info!(
        "Neon Survivor v{} — arena {}x{}, {} fps",
        env!("CARGO_PKG_VERSION"),
        config.arena_width,
        config.arena_height,
        config.fps
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events make steering stop the moment a key is let go; terminals
    // without the kitty protocol fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread; the frame loop only drains.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!("input thread stopped: {}", err);
                break;
            }
        }
    });

    let result = run(&mut out, &config, &rx);

    // Restore the terminal whatever `run` returned.
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("exiting with error: {}", err);
    }
    result
}

fn run<W: Write>(out: &mut W, config: &GameConfig, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                info!("run started");
                let mut game = Game::from_config(config);
                let quit = game_loop(out, config, &mut game, &mut rng, rx)?;
                if quit {
                    info!(score = game.score, "quit from game");
                    break;
                }
            }
        }
    }
    Ok(())
}
