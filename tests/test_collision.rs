use neon_survivor::collision::*;
use neon_survivor::constants::*;
use neon_survivor::entities::*;
use neon_survivor::player::DamageOutcome;
use neon_survivor::pool::EntityPool;
use neon_survivor::vec2::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_enemy(kind: EnemyKind, position: Vec2, rng: &mut StdRng) -> Enemy {
    Enemy::spawn(kind, position, 1.0, rng)
}

fn make_bullet(position: Vec2, pierce: u32) -> Bullet {
    Bullet::new(position, Vec2::RIGHT, 1.0, 1.0, 500.0, pierce)
}

fn kills(events: &[CollisionEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CollisionEvent::EnemyKilled { .. }))
        .count()
}

// ── Bullets vs enemies ────────────────────────────────────────────────────────

#[test]
fn non_piercing_bullet_hits_one_enemy() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let spot = Vec2::new(200.0, 200.0);
    pool.spawn_enemy(make_enemy(EnemyKind::Tank, spot, &mut rng));
    pool.spawn_enemy(make_enemy(EnemyKind::Tank, spot, &mut rng));
    pool.spawn_bullet(make_bullet(spot, 0));

    let mut events = Vec::new();
    resolve_bullet_hits(&mut pool, &mut events);

    assert!(!pool.bullets[0].alive);
    assert_eq!(pool.enemies[0].hp, 14.0);
    assert_eq!(pool.enemies[1].hp, 15.0);
    assert!(events.is_empty());
}

#[test]
fn piercing_bullet_hits_pierce_plus_one_enemies() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let spot = Vec2::new(200.0, 200.0);
    for _ in 0..4 {
        pool.spawn_enemy(make_enemy(EnemyKind::Tank, spot, &mut rng));
    }
    pool.spawn_bullet(make_bullet(spot, 2));

    let mut events = Vec::new();
    resolve_bullet_hits(&mut pool, &mut events);

    let damaged = pool.enemies.iter().filter(|e| e.hp < e.max_hp).count();
    assert_eq!(damaged, 3);
    assert_eq!(pool.enemies[3].hp, 15.0);
    assert!(!pool.bullets[0].alive);
}

#[test]
fn enemy_killed_exactly_once() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let spot = Vec2::new(300.0, 300.0);
    pool.spawn_enemy(make_enemy(EnemyKind::Sprinter, spot, &mut rng));
    // Two bullets overlap the same fragile enemy this tick
    pool.spawn_bullet(make_bullet(spot, 0));
    pool.spawn_bullet(make_bullet(spot, 0));

    let mut events = Vec::new();
    resolve_bullet_hits(&mut pool, &mut events);

    assert_eq!(kills(&events), 1);
    assert!(!pool.enemies[0].alive);
    // Second bullet found nothing left to hit
    assert!(pool.bullets[1].alive);
}

#[test]
fn sprinter_kill_reports_xp() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let spot = Vec2::new(300.0, 300.0);
    pool.spawn_enemy(make_enemy(EnemyKind::Sprinter, spot, &mut rng));
    pool.spawn_bullet(make_bullet(spot, 0));

    let mut events = Vec::new();
    resolve_bullet_hits(&mut pool, &mut events);

    assert_eq!(
        events,
        vec![CollisionEvent::EnemyKilled {
            kind: EnemyKind::Sprinter,
            position: spot,
            xp_value: 1,
        }]
    );
}

#[test]
fn bullet_misses_distant_enemy() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    pool.spawn_enemy(make_enemy(EnemyKind::Chaser, Vec2::new(300.0, 300.0), &mut rng));
    // 5 + 12 = 17 is the touching distance
    pool.spawn_bullet(make_bullet(Vec2::new(317.0, 300.0), 0));

    let mut events = Vec::new();
    resolve_bullet_hits(&mut pool, &mut events);

    assert!(pool.bullets[0].alive);
    assert_eq!(pool.enemies[0].hp, pool.enemies[0].max_hp);
}

// ── Enemies vs player ─────────────────────────────────────────────────────────

#[test]
fn contact_damages_and_knocks_back() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let mut player = Player::new(Vec2::new(400.0, 300.0));
    pool.spawn_enemy(make_enemy(EnemyKind::Chaser, Vec2::new(410.0, 300.0), &mut rng));

    let mut events = Vec::new();
    resolve_player_contacts(&mut player, &mut pool, &mut events);

    assert_eq!(player.health, 90.0);
    assert!(player.is_invincible());
    assert_eq!(pool.enemies[0].position, Vec2::new(410.0 + CONTACT_KNOCKBACK, 300.0));
    assert_eq!(
        events,
        vec![CollisionEvent::PlayerContact {
            damage: 10.0,
            outcome: DamageOutcome::Hurt,
        }]
    );
}

#[test]
fn second_contact_in_window_is_ignored_but_still_knocked_back() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let mut player = Player::new(Vec2::new(400.0, 300.0));
    pool.spawn_enemy(make_enemy(EnemyKind::Chaser, Vec2::new(410.0, 300.0), &mut rng));
    pool.spawn_enemy(make_enemy(EnemyKind::Chaser, Vec2::new(390.0, 300.0), &mut rng));

    let mut events = Vec::new();
    resolve_player_contacts(&mut player, &mut pool, &mut events);

    assert_eq!(player.health, 90.0);
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[1],
        CollisionEvent::PlayerContact {
            outcome: DamageOutcome::Ignored,
            ..
        }
    ));
    assert_eq!(pool.enemies[1].position, Vec2::new(360.0, 300.0));
}

#[test]
fn fatal_contact_reports_death_once() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let mut player = Player::new(Vec2::new(400.0, 300.0));
    player.health = 10.0;
    pool.spawn_enemy(make_enemy(EnemyKind::Tank, Vec2::new(405.0, 300.0), &mut rng));
    pool.spawn_enemy(make_enemy(EnemyKind::Tank, Vec2::new(395.0, 300.0), &mut rng));

    let mut events = Vec::new();
    resolve_player_contacts(&mut player, &mut pool, &mut events);

    assert!(player.is_dead);
    assert_eq!(player.health, 0.0);
    let deaths = events
        .iter()
        .filter(|e| matches!(e, CollisionEvent::PlayerDied { .. }))
        .count();
    assert_eq!(deaths, 1);
}

// ── Gems vs player ────────────────────────────────────────────────────────────

#[test]
fn magnet_speed_grows_toward_player() {
    assert!((magnet_speed(50.0, 70.0) - 435.714).abs() < 1e-2);
    assert_eq!(magnet_speed(70.0, 70.0), GEM_MAGNET_BASE_SPEED);
    assert_eq!(
        magnet_speed(0.0, 70.0),
        GEM_MAGNET_BASE_SPEED + GEM_MAGNET_BONUS_SPEED
    );
}

#[test]
fn gem_inside_collect_radius_is_picked_up() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let player = Player::new(Vec2::new(400.0, 300.0));
    pool.spawn_gem(XpGem::spawn(Vec2::new(410.0, 300.0), 3, &mut rng));

    let mut events = Vec::new();
    resolve_gem_pickups(&player, &mut pool, 0.016, &mut events);

    assert!(!pool.gems[0].alive);
    assert_eq!(events, vec![CollisionEvent::GemCollected { value: 3 }]);
}

#[test]
fn gem_in_pickup_radius_is_pulled() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let player = Player::new(Vec2::new(400.0, 300.0));
    pool.spawn_gem(XpGem::spawn(Vec2::new(450.0, 300.0), 1, &mut rng));

    let mut events = Vec::new();
    resolve_gem_pickups(&player, &mut pool, 0.01, &mut events);

    assert!(events.is_empty());
    assert!(pool.gems[0].alive);
    let expected = 50.0 - magnet_speed(50.0, PLAYER_PICKUP_RADIUS) * 0.01;
    assert!((pool.gems[0].position.x - 400.0 - expected).abs() < 1e-3);
}

#[test]
fn gem_outside_pickup_radius_stays_put() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let player = Player::new(Vec2::new(400.0, 300.0));
    pool.spawn_gem(XpGem::spawn(Vec2::new(500.0, 300.0), 1, &mut rng));

    let mut events = Vec::new();
    resolve_gem_pickups(&player, &mut pool, 0.016, &mut events);

    assert!(events.is_empty());
    assert_eq!(pool.gems[0].position, Vec2::new(500.0, 300.0));
}

#[test]
fn dead_player_collects_nothing() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let mut player = Player::new(Vec2::new(400.0, 300.0));
    player.is_dead = true;
    pool.spawn_gem(XpGem::spawn(Vec2::new(400.0, 300.0), 1, &mut rng));

    let events = resolve(&mut player, &mut pool, 0.016);
    assert!(events.is_empty());
    assert!(pool.gems[0].alive);
}

// ── Full pass & sweep ─────────────────────────────────────────────────────────

#[test]
fn resolve_then_sweep_removes_dead() {
    let mut rng = seeded_rng();
    let mut pool = EntityPool::new();
    let mut player = Player::new(Vec2::new(400.0, 300.0));
    let spot = Vec2::new(100.0, 100.0);
    pool.spawn_enemy(make_enemy(EnemyKind::Sprinter, spot, &mut rng));
    pool.spawn_bullet(make_bullet(spot, 0));

    let events = resolve(&mut player, &mut pool, 0.016);
    assert_eq!(kills(&events), 1);

    pool.sweep();
    assert!(pool.enemies.is_empty());
    assert!(pool.bullets.is_empty());

    pool.spawn_gem(XpGem::spawn(spot, 1, &mut rng));
    pool.clear();
    assert!(pool.gems.is_empty());
}
