//! Per-tick collision passes. Run after everything has moved.
//!
//! Every test is circle against circle: `distance < radius_a + radius_b`.
//! Passes only flip `alive` flags; nothing is removed until the pool is swept,
//! so no pass ever skips or double-visits an entity.

use tracing::debug;

use crate::constants::{
    CONTACT_KNOCKBACK, GEM_COLLECT_RADIUS, GEM_MAGNET_BASE_SPEED, GEM_MAGNET_BONUS_SPEED,
};
use crate::entities::{EnemyKind, Player};
use crate::player::DamageOutcome;
use crate::pool::EntityPool;
use crate::vec2::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum CollisionEvent {
    /// Fired exactly once per enemy, on the hit that took it to zero.
    EnemyKilled {
        kind: EnemyKind,
        position: Vec2,
        xp_value: u32,
    },
    /// An enemy touched the player; `outcome` says whether damage landed.
    PlayerContact { damage: f32, outcome: DamageOutcome },
    PlayerDied { position: Vec2 },
    GemCollected { value: u32 },
}

#[inline]
fn overlaps(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance_to(b) < radius_a + radius_b
}

/// Run all three passes in order and collect what happened.
pub fn resolve(player: &mut Player, pool: &mut EntityPool, dt: f32) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    resolve_bullet_hits(pool, &mut events);
    resolve_player_contacts(player, pool, &mut events);
    resolve_gem_pickups(player, pool, dt, &mut events);
    events
}

/// Bullets against enemies, bullet-major.
///
/// A spent bullet stops scanning; a piercing one keeps going and can damage
/// several enemies this tick. A killed enemy is flagged dead immediately so
/// nothing later in the pass touches it again.
pub fn resolve_bullet_hits(pool: &mut EntityPool, out: &mut Vec<CollisionEvent>) {
    let EntityPool {
        bullets, enemies, ..
    } = pool;

    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            if !overlaps(
                bullet.position,
                bullet.collision_radius(),
                enemy.position,
                enemy.collision_radius,
            ) {
                continue;
            }

            if enemy.take_damage(bullet.damage) {
                enemy.alive = false;
                debug!(kind = ?enemy.kind, "enemy killed");
                out.push(CollisionEvent::EnemyKilled {
                    kind: enemy.kind,
                    position: enemy.position,
                    xp_value: enemy.xp_value,
                });
            }

            if bullet.on_hit_enemy() {
                bullet.alive = false;
                break;
            }
        }
    }
}

/// Enemies against the player. Every overlapping enemy deals its contact
/// damage (the invincibility window is the only gate) and is knocked back.
pub fn resolve_player_contacts(
    player: &mut Player,
    pool: &mut EntityPool,
    out: &mut Vec<CollisionEvent>,
) {
    for enemy in pool.enemies.iter_mut().filter(|e| e.alive) {
        if player.is_dead {
            break;
        }
        if !overlaps(
            player.position,
            player.collision_radius,
            enemy.position,
            enemy.collision_radius,
        ) {
            continue;
        }

        let outcome = player.take_damage(enemy.contact_damage);
        out.push(CollisionEvent::PlayerContact {
            damage: enemy.contact_damage,
            outcome,
        });
        if outcome == DamageOutcome::Died {
            out.push(CollisionEvent::PlayerDied {
                position: player.position,
            });
        }

        enemy.knock_back(player.position, CONTACT_KNOCKBACK);
    }
}

/// Speed a gem at `distance` inside `pickup_radius` is pulled toward the player.
pub fn magnet_speed(distance: f32, pickup_radius: f32) -> f32 {
    GEM_MAGNET_BASE_SPEED + (1.0 - distance / pickup_radius) * GEM_MAGNET_BONUS_SPEED
}

/// Gems against the player: magnet pull inside the pickup radius, collection
/// inside the fixed collect radius. Both use the distance measured before
/// this tick's pull.
pub fn resolve_gem_pickups(
    player: &Player,
    pool: &mut EntityPool,
    dt: f32,
    out: &mut Vec<CollisionEvent>,
) {
    if player.is_dead {
        return;
    }

    for gem in pool.gems.iter_mut().filter(|g| g.alive) {
        let distance = player.position.distance_to(gem.position);

        if distance < player.pickup_radius {
            let speed = magnet_speed(distance, player.pickup_radius);
            gem.move_toward(player.position, speed, dt);
        }

        if distance < GEM_COLLECT_RADIUS {
            gem.alive = false;
            out.push(CollisionEvent::GemCollected { value: gem.value });
        }
    }
}
