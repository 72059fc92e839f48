//! Spawn policy: when waves arrive, how big they are, what they contain and
//! where they enter.
//!
//! All randomness comes through the injected `rng` so a seeded RNG replays
//! the same waves.

use rand::Rng;
use tracing::debug;

use crate::clock::difficulty_tier;
use crate::constants::{
    DIFFICULTY_SCALE_STEP, MAX_WAVE_SIZE, SPAWN_BASE_INTERVAL, SPAWN_EDGE_MARGIN,
    SPAWN_INITIAL_DELAY, SPAWN_INTERVAL_STEP, SPAWN_MIN_INTERVAL, WAVE_GROWTH_PER_TIER,
};
use crate::entities::{Arena, EnemyKind};
use crate::vec2::Vec2;

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Seconds between waves at `tier`, never below the floor.
pub fn spawn_interval(tier: u32) -> f32 {
    (SPAWN_BASE_INTERVAL - tier as f32 * SPAWN_INTERVAL_STEP).max(SPAWN_MIN_INTERVAL)
}

/// Multiplier baked into enemy health and speed at spawn.
pub fn difficulty_scale(tier: u32) -> f32 {
    1.0 + tier as f32 * DIFFICULTY_SCALE_STEP
}

/// Enemies per wave at `tier`.
pub fn wave_size(tier: u32) -> usize {
    let growth = (tier as f32 * WAVE_GROWTH_PER_TIER).floor() as usize;
    (1 + growth).min(MAX_WAVE_SIZE)
}

/// Map a uniform `roll` in `[0, 1)` to an enemy kind using the tier's weights.
pub fn pick_enemy_kind(tier: u32, roll: f32) -> EnemyKind {
    match tier {
        0 => EnemyKind::Chaser,
        1 => {
            if roll < 0.65 {
                EnemyKind::Chaser
            } else {
                EnemyKind::Sprinter
            }
        }
        2 | 3 => {
            if roll < 0.45 {
                EnemyKind::Chaser
            } else if roll < 0.70 {
                EnemyKind::Sprinter
            } else {
                EnemyKind::Drifter
            }
        }
        _ => {
            if roll < 0.30 {
                EnemyKind::Chaser
            } else if roll < 0.50 {
                EnemyKind::Sprinter
            } else if roll < 0.75 {
                EnemyKind::Drifter
            } else {
                EnemyKind::Tank
            }
        }
    }
}

/// Uniform point on a uniformly chosen edge, just outside the visible area.
pub fn spawn_position(arena: &Arena, rng: &mut impl Rng) -> Vec2 {
    let along_x = rng.gen_range(0.0..=arena.width);
    let along_y = rng.gen_range(0.0..=arena.height);
    match rng.gen_range(0..4) {
        0 => Vec2::new(along_x, -SPAWN_EDGE_MARGIN),
        1 => Vec2::new(along_x, arena.height + SPAWN_EDGE_MARGIN),
        2 => Vec2::new(-SPAWN_EDGE_MARGIN, along_y),
        _ => Vec2::new(arena.width + SPAWN_EDGE_MARGIN, along_y),
    }
}

// ── Director ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub kind: EnemyKind,
    pub position: Vec2,
    pub difficulty_scale: f32,
}

#[derive(Clone, Debug)]
pub struct SpawnDirector {
    timer: f32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            timer: SPAWN_INITIAL_DELAY,
        }
    }
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds until the next wave.
    pub fn time_until_wave(&self) -> f32 {
        self.timer
    }

    /// Count down by `dt`; when the timer runs out, emit one wave sized and
    /// mixed for the tier at `game_time` and rearm the timer.
    pub fn tick(
        &mut self,
        dt: f32,
        game_time: f32,
        arena: &Arena,
        rng: &mut impl Rng,
    ) -> Vec<SpawnRequest> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return Vec::new();
        }

        let tier = difficulty_tier(game_time);
        let scale = difficulty_scale(tier);
        let requests: Vec<SpawnRequest> = (0..wave_size(tier))
            .map(|_| SpawnRequest {
                kind: pick_enemy_kind(tier, rng.gen::<f32>()),
                position: spawn_position(arena, rng),
                difficulty_scale: scale,
            })
            .collect();

        self.timer = spawn_interval(tier);
        debug!(
            tier,
            count = requests.len(),
            next_in = self.timer,
            "enemy wave spawned"
        );
        requests
    }
}
