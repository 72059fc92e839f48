//! Enemy creation, per-kind movement and damage.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::{
    DRIFTER_BOUNCE_INSET, DRIFTER_SPIN_RATE, DRIFTER_STEERING, ENEMY_FLASH_DURATION,
    ENEMY_SCREEN_MARGIN, MIN_STEER_DISTANCE_SQ, TANK_SPIN_RATE,
};
use crate::entities::{Arena, Enemy, EnemyKind};
use crate::vec2::Vec2;

/// Base numbers for one enemy kind at a given difficulty scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub max_hp: f32,
    pub speed: f32,
    pub contact_damage: f32,
    pub collision_radius: f32,
    pub xp_value: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Chaser,
        EnemyKind::Drifter,
        EnemyKind::Sprinter,
        EnemyKind::Tank,
    ];

    /// Stats with the difficulty `scale` baked into health and speed.
    pub fn stats(self, scale: f32) -> EnemyStats {
        match self {
            EnemyKind::Chaser => EnemyStats {
                max_hp: 3.0 * scale,
                speed: 90.0 + 10.0 * scale,
                contact_damage: 10.0,
                collision_radius: 12.0,
                xp_value: 1,
            },
            EnemyKind::Drifter => EnemyStats {
                max_hp: 6.0 * scale,
                speed: 50.0 + 8.0 * scale,
                contact_damage: 15.0,
                collision_radius: 16.0,
                xp_value: 3,
            },
            EnemyKind::Sprinter => EnemyStats {
                max_hp: 1.0 * scale,
                speed: 200.0 + 15.0 * scale,
                contact_damage: 5.0,
                collision_radius: 9.0,
                xp_value: 1,
            },
            EnemyKind::Tank => EnemyStats {
                max_hp: 15.0 * scale,
                speed: 40.0 + 5.0 * scale,
                contact_damage: 25.0,
                collision_radius: 22.0,
                xp_value: 5,
            },
        }
    }
}

impl Enemy {
    /// Create a full-health enemy. Drifters pick a random starting heading.
    pub fn spawn(kind: EnemyKind, position: Vec2, scale: f32, rng: &mut impl Rng) -> Self {
        let stats = kind.stats(scale);
        let velocity = match kind {
            EnemyKind::Drifter => Vec2::from_angle(rng.gen_range(0.0..TAU)) * stats.speed,
            _ => Vec2::ZERO,
        };
        Self {
            kind,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            speed: stats.speed,
            contact_damage: stats.contact_damage,
            collision_radius: stats.collision_radius,
            xp_value: stats.xp_value,
            position,
            velocity,
            flash_timer: 0.0,
            rotation: 0.0,
            alive: true,
        }
    }

    /// Steer toward `target`, move, and keep within the off-screen envelope.
    pub fn tick(&mut self, target: Vec2, dt: f32, arena: &Arena) {
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }

        let to_target = target - self.position;
        match self.kind {
            EnemyKind::Chaser | EnemyKind::Sprinter | EnemyKind::Tank => {
                if let Some(dir) = to_target.try_normalize(MIN_STEER_DISTANCE_SQ) {
                    self.velocity = dir * self.speed;
                }
                if self.kind == EnemyKind::Tank {
                    self.rotation += TANK_SPIN_RATE * dt;
                }
            }
            EnemyKind::Drifter => {
                self.bounce(arena);
                if let Some(dir) = to_target.try_normalize(MIN_STEER_DISTANCE_SQ) {
                    self.velocity += dir * (DRIFTER_STEERING * dt);
                }
                if let Some(heading) = self.velocity.try_normalize(f32::EPSILON) {
                    self.velocity = heading * self.speed;
                }
                self.rotation += DRIFTER_SPIN_RATE * dt;
            }
        }

        self.position += self.velocity * dt;
        self.position = arena.clamp_inset(self.position, -ENEMY_SCREEN_MARGIN);
    }

    /// Reflect each velocity component that is carrying the drifter further
    /// past the inset bound on its axis.
    fn bounce(&mut self, arena: &Arena) {
        let min = arena.min_corner(DRIFTER_BOUNCE_INSET);
        let max = arena.max_corner(DRIFTER_BOUNCE_INSET);
        if (self.position.x < min.x && self.velocity.x < 0.0)
            || (self.position.x > max.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y < min.y && self.velocity.y < 0.0)
            || (self.position.y > max.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Subtract `damage` and flash. Returns `true` if this crossed the kill
    /// threshold; removal and scoring are the caller's job.
    pub fn take_damage(&mut self, damage: f32) -> bool {
        self.hp = (self.hp - damage).max(0.0);
        self.flash_timer = ENEMY_FLASH_DURATION;
        self.hp <= 0.0
    }

    /// Shove the enemy `distance` units directly away from `from`.
    pub fn knock_back(&mut self, from: Vec2, distance: f32) {
        if let Some(dir) = (self.position - from).try_normalize(f32::EPSILON) {
            self.position += dir * distance;
        }
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0.0 {
            self.hp / self.max_hp
        } else {
            0.0
        }
    }
}
