//! Player movement, health, regeneration and auto-fire.
//!
//! The player never reaches back into the world. Each tick it is handed the
//! nearest enemy position (if any) and answers with the bullets it fired.

use crate::constants::{
    FAN_SPREAD_DEGREES, MIN_STEER_DISTANCE_SQ, PLAYER_BULLET_SPEED, PLAYER_COLLISION_RADIUS,
    PLAYER_EDGE_INSET, PLAYER_FIRE_INTERVAL, PLAYER_INVINCIBILITY, PLAYER_MAX_HEALTH,
    PLAYER_MOVE_SPEED, PLAYER_PICKUP_RADIUS,
};
use crate::entities::{Arena, Bullet, Player};
use crate::vec2::Vec2;

/// Intents emitted by [`Player::tick`] for the orchestrator to carry out.
#[derive(Clone, Debug)]
pub enum PlayerEvent {
    FireBullet(Bullet),
}

/// What a call to [`Player::take_damage`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead or inside the invincibility window.
    Ignored,
    Hurt,
    /// This hit was the fatal one.
    Died,
}

impl Player {
    /// Fresh player with base stats, full health, standing at `position`.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            input_direction: Vec2::ZERO,
            move_speed: PLAYER_MOVE_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            health: PLAYER_MAX_HEALTH,
            fire_interval: PLAYER_FIRE_INTERVAL,
            bullet_count: 1,
            bullet_damage: 1.0,
            bullet_scale: 1.0,
            bullet_speed: PLAYER_BULLET_SPEED,
            pickup_radius: PLAYER_PICKUP_RADIUS,
            collision_radius: PLAYER_COLLISION_RADIUS,
            pierce_count: 0,
            regen_per_second: 0.0,
            invincibility_timer: 0.0,
            fire_cooldown: 0.0,
            regen_accumulator: 0.0,
            age: 0.0,
            is_dead: false,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_timer > 0.0
    }

    /// Advance one tick: move, count down invincibility, regenerate, auto-fire.
    ///
    /// `nearest_enemy` is `None` when nothing is alive; the fire cooldown still
    /// resets in that case so the player does not fire the instant one spawns.
    pub fn tick(
        &mut self,
        input: Vec2,
        dt: f32,
        arena: &Arena,
        nearest_enemy: Option<Vec2>,
    ) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.is_dead {
            return events;
        }
        self.age += dt;

        // ── Movement ─────────────────────────────────────────────────────────
        self.input_direction = input.normalize();
        self.position += self.input_direction * (self.move_speed * dt);
        self.position = arena.clamp_inset(self.position, PLAYER_EDGE_INSET);

        // ── Invincibility ────────────────────────────────────────────────────
        if self.invincibility_timer > 0.0 {
            self.invincibility_timer = (self.invincibility_timer - dt).max(0.0);
        }

        // ── Regeneration ─────────────────────────────────────────────────────
        if self.regen_per_second > 0.0 {
            self.regen_accumulator += self.regen_per_second * dt;
            if self.regen_accumulator >= 1.0 {
                let whole = self.regen_accumulator.floor();
                self.regen_accumulator -= whole;
                self.heal(whole);
            }
        }

        // ── Auto-fire ────────────────────────────────────────────────────────
        self.fire_cooldown -= dt;
        if self.fire_cooldown <= 0.0 {
            if let Some(target) = nearest_enemy {
                events.extend(self.fire(target).into_iter().map(PlayerEvent::FireBullet));
            }
            self.fire_cooldown = self.fire_interval;
        }

        events
    }

    /// Build one volley aimed at `target`.
    ///
    /// A single bullet flies straight at the target; more than one spreads into
    /// a symmetric fan, `FAN_SPREAD_DEGREES` apart, centred on the aim line.
    pub fn fire(&self, target: Vec2) -> Vec<Bullet> {
        let aim = (target - self.position)
            .try_normalize(MIN_STEER_DISTANCE_SQ)
            .unwrap_or(Vec2::RIGHT);

        if self.bullet_count <= 1 {
            return vec![self.bullet_towards(aim)];
        }

        let spread = FAN_SPREAD_DEGREES.to_radians();
        let start = -spread * (self.bullet_count - 1) as f32 / 2.0;
        let base = aim.angle();
        (0..self.bullet_count)
            .map(|i| self.bullet_towards(Vec2::from_angle(base + start + spread * i as f32)))
            .collect()
    }

    fn bullet_towards(&self, direction: Vec2) -> Bullet {
        Bullet::new(
            self.position,
            direction,
            self.bullet_damage,
            self.bullet_scale,
            self.bullet_speed,
            self.pierce_count,
        )
    }

    /// Apply `amount` damage unless dead or invincible.
    ///
    /// A successful hit opens the invincibility window. Health never drops
    /// below zero; reaching zero is terminal.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead || self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        self.invincibility_timer = PLAYER_INVINCIBILITY;

        if self.health <= 0.0 {
            self.health = 0.0;
            self.is_dead = true;
            return DamageOutcome::Died;
        }
        DamageOutcome::Hurt
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}
