//! Gameplay tuning. All distances are world units, all durations seconds.

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_MOVE_SPEED: f32 = 220.0;
pub const PLAYER_MAX_HEALTH: f32 = 100.0;
pub const PLAYER_FIRE_INTERVAL: f32 = 0.30;
pub const PLAYER_BULLET_SPEED: f32 = 500.0;
pub const PLAYER_PICKUP_RADIUS: f32 = 70.0;
pub const PLAYER_COLLISION_RADIUS: f32 = 12.0;
pub const PLAYER_INVINCIBILITY: f32 = 0.8;
/// The player is kept this far inside every screen edge.
pub const PLAYER_EDGE_INSET: f32 = 20.0;
/// Angle between neighbouring bullets of a multishot fan.
pub const FAN_SPREAD_DEGREES: f32 = 8.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Enemies may wander this far past the visible edge, no further.
pub const ENEMY_SCREEN_MARGIN: f32 = 60.0;
pub const DRIFTER_BOUNCE_INSET: f32 = 20.0;
pub const DRIFTER_STEERING: f32 = 15.0;
pub const DRIFTER_SPIN_RATE: f32 = 2.0;
pub const TANK_SPIN_RATE: f32 = 0.5;
pub const ENEMY_FLASH_DURATION: f32 = 0.1;
pub const CONTACT_KNOCKBACK: f32 = 30.0;
/// Below this squared distance a direction is not normalised.
pub const MIN_STEER_DISTANCE_SQ: f32 = 1.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

pub const BULLET_LIFETIME: f32 = 5.0;
pub const BULLET_SCREEN_MARGIN: f32 = 40.0;
pub const BULLET_BASE_RADIUS: f32 = 5.0;

// ── Gems ──────────────────────────────────────────────────────────────────────

pub const GEM_COLLISION_RADIUS: f32 = 8.0;
pub const GEM_COLLECT_RADIUS: f32 = 18.0;
pub const GEM_MAGNET_BASE_SPEED: f32 = 350.0;
pub const GEM_MAGNET_BONUS_SPEED: f32 = 300.0;
pub const GEM_DRIFT_MIN_SPEED: f32 = 20.0;
pub const GEM_DRIFT_MAX_SPEED: f32 = 50.0;
pub const GEM_DRIFT_DAMPING: f32 = 2.0;
pub const GEM_EDGE_INSET: f32 = 5.0;

// ── Spawning & difficulty ─────────────────────────────────────────────────────

pub const TIER_DURATION: f32 = 30.0;
pub const SPAWN_INITIAL_DELAY: f32 = 2.0;
pub const SPAWN_BASE_INTERVAL: f32 = 2.0;
pub const SPAWN_INTERVAL_STEP: f32 = 0.18;
pub const SPAWN_MIN_INTERVAL: f32 = 0.35;
pub const SPAWN_EDGE_MARGIN: f32 = 40.0;
pub const DIFFICULTY_SCALE_STEP: f32 = 0.25;
pub const WAVE_GROWTH_PER_TIER: f32 = 0.6;
pub const MAX_WAVE_SIZE: usize = 8;

// ── Progression & scoring ─────────────────────────────────────────────────────

pub const XP_BASE: u32 = 8;
pub const XP_PER_LEVEL: u32 = 5;
pub const UPGRADE_OFFER_SIZE: usize = 3;
pub const SCORE_PER_KILL: u32 = 50;
pub const SCORE_PER_KILL_XP: u32 = 20;
pub const SCORE_PER_GEM_VALUE: u32 = 10;

// ── Presentation-facing timers ────────────────────────────────────────────────

pub const RESTART_DELAY: f32 = 1.5;
pub const KILL_SHAKE: (f32, f32) = (2.0, 0.1);
pub const CONTACT_SHAKE: (f32, f32) = (4.0, 0.2);
pub const DEATH_SHAKE: (f32, f32) = (8.0, 0.5);
