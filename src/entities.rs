//! All simulated entity types — pure data. Behaviour lives in the
//! `player`, `enemy` and `projectile` modules.

use crate::vec2::Vec2;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// The visible play area, `[0, width] × [0, height]` in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Top-left corner of the arena shrunk (positive) or grown (negative) by `inset`.
    pub fn min_corner(&self, inset: f32) -> Vec2 {
        Vec2::new(inset, inset)
    }

    /// Bottom-right corner of the arena shrunk or grown by `inset`.
    pub fn max_corner(&self, inset: f32) -> Vec2 {
        Vec2::new(self.width - inset, self.height - inset)
    }

    /// Clamp `point` into the arena shrunk (positive) or grown (negative) by `inset`.
    pub fn clamp_inset(&self, point: Vec2, inset: f32) -> Vec2 {
        point.clamp(self.min_corner(inset), self.max_corner(inset))
    }
}

// ── Colour ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Homes straight at the player.
    Chaser,
    /// Wanders with a constant speed, bouncing off the edges.
    Drifter,
    /// Fast and fragile chaser.
    Sprinter,
    /// Slow, heavy chaser.
    Tank,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub collision_radius: f32,
    pub xp_value: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Cosmetic hit flash, counts down to zero.
    pub flash_timer: f32,
    /// Spin phase for presentation (Drifter and Tank).
    pub rotation: f32,
    /// Cleared the moment the enemy dies or is removed.
    pub alive: bool,
}

// ── Projectiles & pickups ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub position: Vec2,
    /// Unit vector.
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub scale: f32,
    /// Enemies the bullet may still pass through.
    pub pierce_left: u32,
    pub age: f32,
    pub alive: bool,
}

#[derive(Clone, Debug)]
pub struct XpGem {
    pub position: Vec2,
    /// Always at least 1.
    pub value: u32,
    /// Initial scatter, decays to nothing.
    pub drift_velocity: Vec2,
    pub collision_radius: f32,
    pub age: f32,
    pub alive: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Vec2,
    /// Last movement input, normalised or zero.
    pub input_direction: Vec2,

    // Stat block, mutated in place by upgrades.
    pub move_speed: f32,
    pub max_health: f32,
    pub health: f32,
    pub fire_interval: f32,
    pub bullet_count: u32,
    pub bullet_damage: f32,
    pub bullet_scale: f32,
    pub bullet_speed: f32,
    pub pickup_radius: f32,
    pub collision_radius: f32,
    pub pierce_count: u32,
    pub regen_per_second: f32,

    /// Zero means vulnerable.
    pub invincibility_timer: f32,
    pub fire_cooldown: f32,
    /// Fractional regen carried between ticks.
    pub regen_accumulator: f32,
    /// Seconds alive, drives presentation only.
    pub age: f32,
    pub is_dead: bool,
}
