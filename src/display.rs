//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and read-only snapshots of the
//! game. No game logic is performed; this module only translates world
//! coordinates into terminal cells and snapshots into terminal commands.

use std::f32::consts::{FRAC_PI_4, PI};
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use neon_survivor::entities::{Arena, Rgb};
use neon_survivor::game::Game;
use neon_survivor::snapshot::{EnemyVisual, HudSnapshot, RenderShape, RenderSnapshot};
use neon_survivor::vec2::Vec2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_TEXT: Color = Color::Grey;
const C_HUD_LEVEL: Color = Color::Yellow;
const C_HUD_SCORE: Color = Color::White;
const C_XP_BAR: Color = Color::Green;
const C_BAR_EMPTY: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_DIM: Color = Color::DarkCyan;
const C_BULLET: Color = Color::Yellow;
const C_PICKUP_RING: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;

const BAR_WIDTH: usize = 20;

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto the terminal. Row 0 is the HUD and the last row is
/// the XP bar; everything between is the arena.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    arena: Arena,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: Arena) -> Self {
        Self { cols, rows, arena }
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    /// Terminal cell for a world position, or `None` if it falls off-screen.
    fn cell(&self, world: Vec2) -> Option<(u16, u16)> {
        let fx = world.x / self.arena.width;
        let fy = world.y / self.arena.height;
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        let col = (fx * self.cols as f32) as u16;
        let row = 1 + (fy * self.play_rows() as f32) as u16;
        Some((col, row))
    }
}

fn put<W: Write>(out: &mut W, cell: (u16, u16), color: Color, glyph: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(cell.0, cell.1))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn bar(fraction: f32, width: usize) -> (String, String) {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

fn clock_text(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, view: &Viewport) -> std::io::Result<()> {
    let scene = game.render_snapshot();
    let hud = game.hud();

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_scene(out, &scene, view)?;
    draw_hud(out, &hud, view)?;
    draw_xp_bar(out, &hud, view)?;

    if !hud.upgrade_cards.is_empty() {
        draw_upgrade_cards(out, &hud, view)?;
    }
    if hud.game_over {
        draw_game_over(out, &hud, game.game_over_time, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Arena contents ────────────────────────────────────────────────────────────

fn draw_scene<W: Write>(
    out: &mut W,
    scene: &RenderSnapshot,
    view: &Viewport,
) -> std::io::Result<()> {
    let shake = scene.shake_offset;

    if !scene.player.dead {
        draw_pickup_ring(out, scene.player.position + shake, scene.player.pickup_radius, view)?;
    }

    for p in &scene.particles {
        if let Some(cell) = view.cell(p.position + shake) {
            let glyph = if p.alpha > 0.5 { "*" } else { "·" };
            put(out, cell, rgb(p.color), glyph)?;
        }
    }

    for gem in &scene.gems {
        if let Some(cell) = view.cell(gem.position + shake) {
            let glyph = if gem.value >= 3 { "◆" } else { "◇" };
            put(out, cell, rgb(gem.color), glyph)?;
        }
    }

    for bullet in &scene.bullets {
        if let Some(cell) = view.cell(bullet.position + shake) {
            let glyph = if bullet.scale >= 1.6 { "●" } else { "•" };
            put(out, cell, C_BULLET, glyph)?;
        }
    }

    for enemy in &scene.enemies {
        draw_enemy(out, enemy, shake, view)?;
    }

    if !scene.player.dead {
        if let Some(cell) = view.cell(scene.player.position + shake) {
            let color = if scene.player.dimmed { C_PLAYER_DIM } else { C_PLAYER };
            put(out, cell, color, "◈")?;
        }
    }

    Ok(())
}

/// Faint dots marking the magnet radius.
fn draw_pickup_ring<W: Write>(
    out: &mut W,
    center: Vec2,
    radius: f32,
    view: &Viewport,
) -> std::io::Result<()> {
    for i in 0..16 {
        let point = center + Vec2::from_angle(i as f32 * PI / 8.0) * radius;
        if let Some(cell) = view.cell(point) {
            put(out, cell, C_PICKUP_RING, "·")?;
        }
    }
    Ok(())
}

/// Arrow glyph for a chaser's facing (`rotation` is heading − π/2).
fn chaser_glyph(rotation: f32) -> &'static str {
    let heading = (rotation + PI / 2.0).rem_euclid(2.0 * PI);
    let octant = ((heading + FRAC_PI_4 / 2.0) / FRAC_PI_4) as u32 % 8;
    match octant {
        0 => "▶",
        1 => "◢",
        2 => "▼",
        3 => "◣",
        4 => "◀",
        5 => "◤",
        6 => "▲",
        _ => "◥",
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &EnemyVisual,
    shake: Vec2,
    view: &Viewport,
) -> std::io::Result<()> {
    let Some(cell) = view.cell(enemy.position + shake) else {
        return Ok(());
    };
    let glyph = match enemy.shape {
        RenderShape::Triangle => chaser_glyph(enemy.rotation),
        RenderShape::Square => "■",
        RenderShape::Diamond => "♦",
        RenderShape::Hexagon => "⬢",
    };
    put(out, cell, rgb(enemy.color), glyph)?;

    if enemy.show_health_bar && cell.1 > 1 {
        const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
        let idx = ((enemy.hp_fraction * 7.0).round() as usize).min(7);
        put(out, (cell.0, cell.1 - 1), Color::Red, LEVELS[idx])?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &HudSnapshot, view: &Viewport) -> std::io::Result<()> {
    // Health — left
    let fraction = if hud.max_health > 0.0 {
        hud.health / hud.max_health
    } else {
        0.0
    };
    let health_color = if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };
    let (filled, empty) = bar(fraction, BAR_WIDTH / 2);
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print("HP "))?;
    out.queue(style::SetForegroundColor(health_color))?;
    out.queue(Print(filled))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(empty))?;
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print(format!(" {}/{}", hud.health as u32, hud.max_health as u32)))?;

    // Level — centre
    let level_str = format!("[ LV {} ]", hud.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Score, time, kills — right
    let right = format!(
        "Score: {:>7}  {}  Kills: {}",
        hud.score,
        clock_text(hud.game_time),
        hud.enemies_killed
    );
    let rx = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── XP bar (last row) ─────────────────────────────────────────────────────────

fn draw_xp_bar<W: Write>(out: &mut W, hud: &HudSnapshot, view: &Viewport) -> std::io::Result<()> {
    let row = view.rows.saturating_sub(1);
    let fraction = if hud.xp_needed > 0 {
        hud.xp as f32 / hud.xp_needed as f32
    } else {
        0.0
    };
    let (filled, empty) = bar(fraction, BAR_WIDTH);
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print("XP "))?;
    out.queue(style::SetForegroundColor(C_XP_BAR))?;
    out.queue(Print(filled))?;
    out.queue(style::SetForegroundColor(C_BAR_EMPTY))?;
    out.queue(Print(empty))?;
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print(format!(" {}/{}", hud.xp, hud.xp_needed)))?;

    let hint = "W A S D / ← ↑ → ↓ : Move   Q : Quit";
    let hx = view.cols.saturating_sub(hint.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(hx, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Upgrade cards ─────────────────────────────────────────────────────────────

fn draw_upgrade_cards<W: Write>(
    out: &mut W,
    hud: &HudSnapshot,
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let top = (view.rows / 2).saturating_sub(4);

    let title = "LEVEL UP!";
    out.queue(cursor::MoveTo(cx.saturating_sub(title.len() as u16 / 2), top))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(title))?;

    let subtitle = "Choose an upgrade (press 1/2/3):";
    out.queue(cursor::MoveTo(cx.saturating_sub(subtitle.len() as u16 / 2), top + 1))?;
    out.queue(style::SetForegroundColor(C_HUD_TEXT))?;
    out.queue(Print(subtitle))?;

    for card in &hud.upgrade_cards {
        let row = top + 3 + card.slot as u16 * 2;
        let line = format!(
            "[{}] {:<12} Lv {}/{}  {}",
            card.slot + 1,
            card.name,
            card.current_level,
            card.max_level,
            card.description
        );
        out.queue(cursor::MoveTo(
            cx.saturating_sub(line.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(rgb(card.color)))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    hud: &HudSnapshot,
    game_over_time: f32,
    view: &Viewport,
) -> std::io::Result<()> {
    let survived = format!("Survived: {}", clock_text(hud.game_time));
    let score = format!("Score: {}", hud.score);
    let level = format!("Level: {}", hud.level);
    let kills = format!("Enemies Destroyed: {}", hud.enemies_killed);

    let mut lines: Vec<(&str, Color)> = vec![
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (survived.as_str(), Color::Grey),
        (score.as_str(), Color::Yellow),
        (level.as_str(), Color::Grey),
        (kills.as_str(), Color::Grey),
    ];
    // Blink the prompt once restarting is allowed
    if hud.can_restart && (game_over_time * 3.0).sin() > -0.5 {
        lines.push(("Press ENTER or SPACE to return to menu", Color::White));
    }

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
