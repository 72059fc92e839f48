//! Cosmetic explosions and screen shake.
//!
//! Neither affects gameplay, but both are simulated here so they pause with
//! everything else and the renderer only has to read them.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::Rgb;
use crate::vec2::Vec2;

const PARTICLE_DRAG: f32 = 3.0;
const COLOR_JITTER: i16 = 25;

#[derive(Clone, Debug)]
pub struct Particle {
    /// Offset from the explosion origin.
    pub offset: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// 1.0 when fresh, 0.0 when expired.
    pub fn remaining(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

impl Explosion {
    /// Burst of `count` particles with speeds in `[0.4 * speed, speed]`.
    pub fn burst(
        origin: Vec2,
        color: Rgb,
        count: usize,
        speed: f32,
        size: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let particles = (0..count)
            .map(|_| {
                let heading = rng.gen_range(0.0..TAU);
                let spd = rng.gen_range(speed * 0.4..=speed);
                let life = rng.gen_range(0.3..=0.7);
                Particle {
                    offset: Vec2::ZERO,
                    velocity: Vec2::from_angle(heading) * spd,
                    life,
                    max_life: life,
                    size: rng.gen_range(size * 0.5..=size),
                    color: jitter(color, rng),
                }
            })
            .collect();
        Self { origin, particles }
    }

    pub fn tick(&mut self, dt: f32) {
        for p in self.particles.iter_mut().filter(|p| p.is_alive()) {
            p.life -= dt;
            if p.is_alive() {
                p.offset += p.velocity * dt;
                p.velocity *= (1.0 - PARTICLE_DRAG * dt).max(0.0);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.particles.iter().any(Particle::is_alive)
    }
}

fn jitter(color: Rgb, rng: &mut impl Rng) -> Rgb {
    let mut channel = |c: u8| {
        let shifted = i16::from(c) + rng.gen_range(-COLOR_JITTER..=COLOR_JITTER);
        shifted.clamp(0, 255) as u8
    };
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

// ── Screen shake ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct ScreenShake {
    amount: f32,
    remaining: f32,
    offset: Vec2,
}

impl ScreenShake {
    /// Start a shake unless a stronger one is already running.
    pub fn shake(&mut self, amount: f32, duration: f32) {
        if amount > self.amount {
            self.amount = amount;
            self.remaining = duration;
        }
    }

    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            self.offset = Vec2::new(
                rng.gen_range(-self.amount..=self.amount),
                rng.gen_range(-self.amount..=self.amount),
            );
        } else {
            self.amount = 0.0;
            self.offset = Vec2::ZERO;
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn explosion_finishes_after_max_life() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut fx = Explosion::burst(Vec2::ZERO, Rgb::WHITE, 12, 120.0, 3.0, &mut rng);
        assert_eq!(fx.particles.len(), 12);
        assert!(!fx.is_finished());
        for _ in 0..50 {
            fx.tick(1.0 / 60.0);
        }
        assert!(fx.is_finished());
    }

    #[test]
    fn weaker_shake_does_not_override() {
        let mut shake = ScreenShake::default();
        shake.shake(8.0, 0.5);
        shake.shake(2.0, 0.1);
        assert_eq!(shake.amount(), 8.0);
    }

    #[test]
    fn shake_settles_after_duration() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shake = ScreenShake::default();
        shake.shake(4.0, 0.2);
        shake.tick(0.1, &mut rng);
        assert!(shake.offset().x.abs() <= 4.0);
        shake.tick(0.15, &mut rng);
        shake.tick(0.1, &mut rng);
        assert_eq!(shake.offset(), Vec2::ZERO);
        shake.shake(2.0, 0.1);
        assert_eq!(shake.amount(), 2.0);
    }
}
