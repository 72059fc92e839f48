//! Read-only views handed to the HUD and renderer once per tick.
//!
//! Nothing here holds a reference into the simulation; a renderer can keep a
//! snapshot around as long as it likes.

use std::f32::consts::FRAC_PI_2;

use crate::effects::Explosion;
use crate::entities::{Bullet, Enemy, EnemyKind, Player, Rgb, XpGem};
use crate::progression::{UpgradeKind, UpgradeLedger, UpgradeOffer};
use crate::vec2::Vec2;

/// Enemies above this max HP show a health bar once damaged.
const HEALTH_BAR_MIN_HP: f32 = 5.0;

// ── HUD ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeCard {
    /// 0-based; the player picks it with key `slot + 1`.
    pub slot: usize,
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub description: &'static str,
    pub current_level: u32,
    pub max_level: u32,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub health: f32,
    pub max_health: f32,
    pub xp: u32,
    pub xp_needed: u32,
    pub level: u32,
    pub score: u32,
    pub game_time: f32,
    pub enemies_killed: u32,
    /// Empty unless an upgrade offer is open.
    pub upgrade_cards: Vec<UpgradeCard>,
    pub game_over: bool,
    /// Game over and the restart delay has elapsed.
    pub can_restart: bool,
}

pub fn upgrade_cards(offer: Option<&UpgradeOffer>, ledger: &UpgradeLedger) -> Vec<UpgradeCard> {
    let Some(offer) = offer else {
        return Vec::new();
    };
    offer
        .choices
        .iter()
        .enumerate()
        .map(|(slot, &kind)| {
            let info = ledger.info(kind);
            UpgradeCard {
                slot,
                kind,
                name: kind.name(),
                description: kind.description(),
                current_level: info.current_level,
                max_level: info.max_level,
                color: kind.icon_color(),
            }
        })
        .collect()
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderShape {
    Triangle,
    Square,
    Diamond,
    Hexagon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyVisual {
    pub kind: EnemyKind,
    pub shape: RenderShape,
    pub position: Vec2,
    /// Radians. Chasers face the player, Drifters and Tanks spin.
    pub rotation: f32,
    pub color: Rgb,
    pub flashing: bool,
    pub radius: f32,
    pub hp_fraction: f32,
    pub show_health_bar: bool,
}

impl EnemyKind {
    pub fn shape(self) -> RenderShape {
        match self {
            EnemyKind::Chaser => RenderShape::Triangle,
            EnemyKind::Drifter => RenderShape::Square,
            EnemyKind::Sprinter => RenderShape::Diamond,
            EnemyKind::Tank => RenderShape::Hexagon,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            EnemyKind::Chaser => Rgb::new(255, 51, 51),
            EnemyKind::Drifter => Rgb::new(204, 51, 255),
            EnemyKind::Sprinter => Rgb::new(255, 140, 26),
            EnemyKind::Tank => Rgb::new(51, 255, 102),
        }
    }
}

/// How `enemy` should look this frame, given where the player stands.
pub fn visual_state(enemy: &Enemy, player_position: Vec2) -> EnemyVisual {
    let flashing = enemy.flash_timer > 0.0;
    let rotation = match enemy.kind {
        EnemyKind::Chaser => (player_position - enemy.position).angle() - FRAC_PI_2,
        EnemyKind::Sprinter => 0.0,
        EnemyKind::Drifter | EnemyKind::Tank => enemy.rotation,
    };
    EnemyVisual {
        kind: enemy.kind,
        shape: enemy.kind.shape(),
        position: enemy.position,
        rotation,
        color: if flashing { Rgb::WHITE } else { enemy.kind.color() },
        flashing,
        radius: enemy.collision_radius,
        hp_fraction: enemy.hp_fraction(),
        show_health_bar: enemy.max_hp > HEALTH_BAR_MIN_HP && enemy.hp < enemy.max_hp,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerVisual {
    pub position: Vec2,
    /// Normalised movement input, for the engine trail.
    pub thrust: Vec2,
    /// Alternates while invincible.
    pub dimmed: bool,
    pub dead: bool,
    pub pickup_radius: f32,
}

pub fn player_visual(player: &Player) -> PlayerVisual {
    let dimmed =
        player.is_invincible() && ((player.invincibility_timer * 10.0) as i32) % 2 == 0;
    PlayerVisual {
        position: player.position,
        thrust: player.input_direction,
        dimmed,
        dead: player.is_dead,
        pickup_radius: player.pickup_radius,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulletVisual {
    pub position: Vec2,
    pub direction: Vec2,
    pub scale: f32,
}

impl From<&Bullet> for BulletVisual {
    fn from(bullet: &Bullet) -> Self {
        Self {
            position: bullet.position,
            direction: bullet.direction,
            scale: bullet.scale,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GemVisual {
    pub position: Vec2,
    pub value: u32,
    pub color: Rgb,
}

impl From<&XpGem> for GemVisual {
    fn from(gem: &XpGem) -> Self {
        let color = match gem.value {
            v if v >= 5 => Rgb::new(102, 204, 255),
            v if v >= 3 => Rgb::new(77, 255, 128),
            _ => Rgb::new(102, 255, 102),
        };
        Self {
            position: gem.position,
            value: gem.value,
            color,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleVisual {
    pub position: Vec2,
    pub color: Rgb,
    pub size: f32,
    /// 1.0 fresh, fading to 0.0.
    pub alpha: f32,
}

pub fn particle_visuals(effect: &Explosion) -> impl Iterator<Item = ParticleVisual> + '_ {
    effect
        .particles
        .iter()
        .filter(|p| p.is_alive())
        .map(move |p| {
            let t = p.remaining();
            ParticleVisual {
                position: effect.origin + p.offset,
                color: p.color,
                size: p.size * (0.3 + 0.7 * t),
                alpha: t,
            }
        })
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub player: PlayerVisual,
    pub enemies: Vec<EnemyVisual>,
    pub bullets: Vec<BulletVisual>,
    pub gems: Vec<GemVisual>,
    pub particles: Vec<ParticleVisual>,
    /// Camera offset from screen shake.
    pub shake_offset: Vec2,
}
