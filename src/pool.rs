//! Owner of every short-lived entity.
//!
//! Entities are never removed while a pass is iterating. Anything that dies
//! mid-tick has its `alive` flag cleared and is skipped by later passes; the
//! orchestrator calls [`EntityPool::sweep`] once the tick is over.

use crate::effects::Explosion;
use crate::entities::{Bullet, Enemy, XpGem};
use crate::vec2::Vec2;

#[derive(Clone, Debug, Default)]
pub struct EntityPool {
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub gems: Vec<XpGem>,
    pub effects: Vec<Explosion>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn spawn_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn spawn_gem(&mut self, gem: XpGem) {
        self.gems.push(gem);
    }

    pub fn spawn_effect(&mut self, effect: Explosion) {
        self.effects.push(effect);
    }

    /// Position of the live enemy closest to `from`, or `None` if there is none.
    pub fn nearest_enemy(&self, from: Vec2) -> Option<Vec2> {
        self.live_enemies()
            .map(|e| (from.distance_sq_to(e.position), e.position))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, position)| position)
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn live_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.alive)
    }

    pub fn live_gems(&self) -> impl Iterator<Item = &XpGem> {
        self.gems.iter().filter(|g| g.alive)
    }

    /// Drop everything flagged dead and every finished effect.
    pub fn sweep(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.enemies.retain(|e| e.alive);
        self.gems.retain(|g| g.alive);
        self.effects.retain(|fx| !fx.is_finished());
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
        self.gems.clear();
        self.effects.clear();
    }
}
