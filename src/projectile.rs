//! Bullet and XP gem kinematics.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::{
    BULLET_BASE_RADIUS, BULLET_LIFETIME, BULLET_SCREEN_MARGIN, GEM_COLLISION_RADIUS,
    GEM_DRIFT_DAMPING, GEM_DRIFT_MAX_SPEED, GEM_DRIFT_MIN_SPEED, GEM_EDGE_INSET,
    MIN_STEER_DISTANCE_SQ,
};
use crate::entities::{Arena, Bullet, XpGem};
use crate::vec2::Vec2;

// ── Bullets ───────────────────────────────────────────────────────────────────

impl Bullet {
    pub fn new(
        position: Vec2,
        direction: Vec2,
        damage: f32,
        scale: f32,
        speed: f32,
        pierce: u32,
    ) -> Self {
        Self {
            position,
            direction,
            speed,
            damage,
            scale,
            pierce_left: pierce,
            age: 0.0,
            alive: true,
        }
    }

    pub fn collision_radius(&self) -> f32 {
        BULLET_BASE_RADIUS * self.scale
    }

    /// Fly straight; expire once well off-screen or past the lifetime cap.
    pub fn tick(&mut self, dt: f32, arena: &Arena) {
        self.age += dt;
        self.position += self.direction * (self.speed * dt);

        let min = arena.min_corner(-BULLET_SCREEN_MARGIN);
        let max = arena.max_corner(-BULLET_SCREEN_MARGIN);
        let off_screen = self.position.x < min.x
            || self.position.x > max.x
            || self.position.y < min.y
            || self.position.y > max.y;

        if off_screen || self.age > BULLET_LIFETIME {
            self.alive = false;
        }
    }

    /// Called once per enemy struck. Returns `true` if the bullet is spent.
    pub fn on_hit_enemy(&mut self) -> bool {
        if self.pierce_left > 0 {
            self.pierce_left -= 1;
            return false;
        }
        true
    }
}

// ── XP gems ───────────────────────────────────────────────────────────────────

impl XpGem {
    /// Drop a gem worth `value` (at least 1) with a small random scatter.
    pub fn spawn(position: Vec2, value: u32, rng: &mut impl Rng) -> Self {
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(GEM_DRIFT_MIN_SPEED..=GEM_DRIFT_MAX_SPEED);
        Self {
            position,
            value: value.max(1),
            drift_velocity: Vec2::from_angle(heading) * speed,
            collision_radius: GEM_COLLISION_RADIUS,
            age: 0.0,
            alive: true,
        }
    }

    pub fn tick(&mut self, dt: f32, arena: &Arena) {
        self.age += dt;
        self.drift_velocity *= (1.0 - GEM_DRIFT_DAMPING * dt).max(0.0);
        self.position += self.drift_velocity * dt;
        self.position = arena.clamp_inset(self.position, GEM_EDGE_INSET);
    }

    /// Magnet step: move `speed * dt` toward `target` unless already on top of it.
    pub fn move_toward(&mut self, target: Vec2, speed: f32, dt: f32) {
        if let Some(dir) = (target - self.position).try_normalize(MIN_STEER_DISTANCE_SQ) {
            self.position += dir * (speed * dt);
        }
    }
}
