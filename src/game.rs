//! Top-level orchestration of one run.
//!
//! `Game::tick` is the only thing that advances the simulation. The order is
//! fixed: handle upgrade input, advance the clock, spawn, move the player,
//! move everything else, resolve collisions, react to what they reported,
//! sweep the dead. All randomness comes through the injected `rng`.

use rand::Rng;
use tracing::info;

use crate::clock::SimulationClock;
use crate::collision::{self, CollisionEvent};
use crate::config::GameConfig;
use crate::constants::{
    CONTACT_SHAKE, DEATH_SHAKE, KILL_SHAKE, RESTART_DELAY, SCORE_PER_GEM_VALUE, SCORE_PER_KILL,
    SCORE_PER_KILL_XP,
};
use crate::effects::{Explosion, ScreenShake};
use crate::entities::{Arena, Enemy, EnemyKind, Player, Rgb, XpGem};
use crate::player::PlayerEvent;
use crate::pool::EntityPool;
use crate::progression::Progression;
use crate::snapshot::{
    particle_visuals, player_visual, upgrade_cards, visual_state, BulletVisual, GemVisual, HudSnapshot,
    RenderSnapshot,
};
use crate::spawn::SpawnDirector;
use crate::vec2::Vec2;

/// Already-debounced input for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Raw movement direction; normalised by the player.
    pub direction: Vec2,
    /// 0-based slot of the upgrade card to take.
    pub select_upgrade: Option<usize>,
    pub restart: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Upgrade offer open, simulation paused.
    ChoosingUpgrade,
    GameOver,
}

/// What the driver should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The run was thrown away and a fresh one started.
    Restarted,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub arena: Arena,
    pub clock: SimulationClock,
    pub player: Player,
    pub pool: EntityPool,
    pub spawner: SpawnDirector,
    pub progression: Progression,
    pub shake: ScreenShake,
    pub score: u32,
    pub enemies_killed: u32,
    pub game_over: bool,
    pub game_over_time: f32,
}

impl Game {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            clock: SimulationClock::new(),
            player: Player::new(arena.center()),
            pool: EntityPool::new(),
            spawner: SpawnDirector::new(),
            progression: Progression::new(),
            shake: ScreenShake::default(),
            score: 0,
            enemies_killed: 0,
            game_over: false,
            game_over_time: 0.0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(Arena::new(config.arena_width, config.arena_height))
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.progression.is_choosing() {
            GameStatus::ChoosingUpgrade
        } else {
            GameStatus::Playing
        }
    }

    pub fn can_restart(&self) -> bool {
        self.game_over && self.game_over_time > RESTART_DELAY
    }

    /// Advance the run by `dt` seconds of wall time.
    pub fn tick(&mut self, input: &TickInput, dt: f32, rng: &mut impl Rng) -> Flow {
        if self.game_over {
            return self.tick_game_over(input, dt, rng);
        }

        // ── 1. Upgrade choice (handled even while paused) ────────────────────
        if let Some(index) = input.select_upgrade {
            let _ = self
                .progression
                .select(index, &mut self.player, &mut self.clock);
        }

        // ── 2. Clock ─────────────────────────────────────────────────────────
        let dt = self.clock.advance(dt);
        if dt <= 0.0 {
            return Flow::Continue;
        }

        // ── 3. Spawning ──────────────────────────────────────────────────────
        let requests = self
            .spawner
            .tick(dt, self.clock.game_time(), &self.arena, rng);
        for request in requests {
            let enemy = Enemy::spawn(request.kind, request.position, request.difficulty_scale, rng);
            self.pool.spawn_enemy(enemy);
        }

        // ── 4. Player ────────────────────────────────────────────────────────
        let nearest = self.pool.nearest_enemy(self.player.position);
        for event in self
            .player
            .tick(input.direction, dt, &self.arena, nearest)
        {
            match event {
                PlayerEvent::FireBullet(bullet) => self.pool.spawn_bullet(bullet),
            }
        }

        // ── 5. Everything else moves ─────────────────────────────────────────
        self.advance_world(dt, rng);

        // ── 6. Collisions and their consequences ─────────────────────────────
        for event in collision::resolve(&mut self.player, &mut self.pool, dt) {
            self.apply_event(event, rng);
        }

        self.pool.sweep();
        Flow::Continue
    }

    /// After death the field keeps drifting and explosions play out, but
    /// nothing spawns, collides or scores.
    fn tick_game_over(&mut self, input: &TickInput, dt: f32, rng: &mut impl Rng) -> Flow {
        self.game_over_time += dt;
        self.advance_world(dt, rng);
        self.pool.sweep();

        if input.restart && self.can_restart() {
            info!("run restarted");
            *self = Game::new(self.arena);
            return Flow::Restarted;
        }
        Flow::Continue
    }

    fn advance_world(&mut self, dt: f32, rng: &mut impl Rng) {
        let target = self.player.position;
        for enemy in self.pool.enemies.iter_mut().filter(|e| e.alive) {
            enemy.tick(target, dt, &self.arena);
        }
        for bullet in self.pool.bullets.iter_mut().filter(|b| b.alive) {
            bullet.tick(dt, &self.arena);
        }
        for gem in self.pool.gems.iter_mut().filter(|g| g.alive) {
            gem.tick(dt, &self.arena);
        }
        for effect in &mut self.pool.effects {
            effect.tick(dt);
        }
        self.shake.tick(dt, rng);
    }

    fn apply_event(&mut self, event: CollisionEvent, rng: &mut impl Rng) {
        match event {
            CollisionEvent::EnemyKilled {
                kind,
                position,
                xp_value,
            } => {
                self.enemies_killed += 1;
                self.score += SCORE_PER_KILL + xp_value * SCORE_PER_KILL_XP;
                self.pool.spawn_gem(XpGem::spawn(position, xp_value, rng));

                let (count, speed) = match kind {
                    EnemyKind::Tank => (20, 160.0),
                    _ => (10, 100.0),
                };
                self.pool
                    .spawn_effect(Explosion::burst(position, kind.color(), count, speed, 3.0, rng));
                self.shake.shake(KILL_SHAKE.0, KILL_SHAKE.1);
            }
            CollisionEvent::PlayerContact { .. } => {
                self.shake.shake(CONTACT_SHAKE.0, CONTACT_SHAKE.1);
            }
            CollisionEvent::PlayerDied { position } => {
                self.game_over = true;
                self.game_over_time = 0.0;
                self.pool
                    .spawn_effect(Explosion::burst(position, Rgb::CYAN, 30, 200.0, 5.0, rng));
                self.shake.shake(DEATH_SHAKE.0, DEATH_SHAKE.1);
                info!(
                    score = self.score,
                    level = self.progression.level(),
                    survived = self.clock.game_time(),
                    kills = self.enemies_killed,
                    "player died"
                );
            }
            CollisionEvent::GemCollected { value } => {
                self.score += value * SCORE_PER_GEM_VALUE;
                let _ = self.progression.collect(value, &mut self.clock, rng);
            }
        }
    }

    // ── Snapshots ────────────────────────────────────────────────────────────

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            health: self.player.health,
            max_health: self.player.max_health,
            xp: self.progression.xp(),
            xp_needed: self.progression.xp_needed(),
            level: self.progression.level(),
            score: self.score,
            game_time: self.clock.game_time(),
            enemies_killed: self.enemies_killed,
            upgrade_cards: upgrade_cards(self.progression.offer(), self.progression.ledger()),
            game_over: self.game_over,
            can_restart: self.can_restart(),
        }
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        let player_position = self.player.position;
        RenderSnapshot {
            player: player_visual(&self.player),
            enemies: self
                .pool
                .live_enemies()
                .map(|e| visual_state(e, player_position))
                .collect(),
            bullets: self.pool.live_bullets().map(BulletVisual::from).collect(),
            gems: self.pool.live_gems().map(GemVisual::from).collect(),
            particles: self.pool.effects.iter().flat_map(particle_visuals).collect(),
            shake_offset: self.shake.offset(),
        }
    }
}
