use neon_survivor::constants::*;
use neon_survivor::entities::*;
use neon_survivor::player::{DamageOutcome, PlayerEvent};
use neon_survivor::vec2::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_arena() -> Arena {
    Arena::new(800.0, 600.0)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn player_starts_centred_with_base_stats() {
    let arena = make_arena();
    let player = Player::new(arena.center());
    assert_eq!(player.position, Vec2::new(400.0, 300.0));
    assert_eq!(player.health, PLAYER_MAX_HEALTH);
    assert_eq!(player.bullet_count, 1);
    assert_eq!(player.pierce_count, 0);
    assert!(!player.is_dead);
}

#[test]
fn player_diagonal_is_not_faster() {
    let arena = make_arena();
    let mut player = Player::new(arena.center());
    let _ = player.tick(Vec2::new(1.0, 1.0), 0.1, &arena, None);
    let moved = player.position.distance_to(arena.center());
    assert!(approx(moved, PLAYER_MOVE_SPEED * 0.1));
}

#[test]
fn player_clamped_inside_edge_inset() {
    let arena = make_arena();
    let mut player = Player::new(Vec2::new(25.0, 25.0));
    let _ = player.tick(Vec2::new(-1.0, -1.0), 1.0, &arena, None);
    assert_eq!(player.position, Vec2::new(PLAYER_EDGE_INSET, PLAYER_EDGE_INSET));

    let mut player = Player::new(Vec2::new(790.0, 590.0));
    let _ = player.tick(Vec2::new(1.0, 1.0), 1.0, &arena, None);
    assert_eq!(player.position, Vec2::new(780.0, 580.0));
}

// ── Player health ─────────────────────────────────────────────────────────────

#[test]
fn damage_opens_invincibility_window() {
    let arena = make_arena();
    let mut player = Player::new(arena.center());
    assert_eq!(player.take_damage(10.0), DamageOutcome::Hurt);
    assert_eq!(player.health, 90.0);
    assert!(player.is_invincible());

    // Second hit inside the window is ignored
    assert_eq!(player.take_damage(10.0), DamageOutcome::Ignored);
    assert_eq!(player.health, 90.0);

    let _ = player.tick(Vec2::ZERO, PLAYER_INVINCIBILITY, &arena, None);
    assert!(!player.is_invincible());
    assert_eq!(player.take_damage(10.0), DamageOutcome::Hurt);
    assert_eq!(player.health, 80.0);
}

#[test]
fn health_never_below_zero_and_death_is_terminal() {
    let mut player = Player::new(Vec2::ZERO);
    player.health = 5.0;
    assert_eq!(player.take_damage(25.0), DamageOutcome::Died);
    assert_eq!(player.health, 0.0);
    assert!(player.is_dead);

    player.invincibility_timer = 0.0;
    assert_eq!(player.take_damage(25.0), DamageOutcome::Ignored);
    assert_eq!(player.health, 0.0);
}

#[test]
fn heal_caps_at_max() {
    let mut player = Player::new(Vec2::ZERO);
    player.health = 95.0;
    player.heal(20.0);
    assert_eq!(player.health, player.max_health);
}

#[test]
fn regen_heals_whole_points_only() {
    let arena = make_arena();
    let mut player = Player::new(arena.center());
    player.health = 50.0;
    player.regen_per_second = 1.0;

    let _ = player.tick(Vec2::ZERO, 0.5, &arena, None);
    assert_eq!(player.health, 50.0);
    assert!(approx(player.regen_accumulator, 0.5));

    let _ = player.tick(Vec2::ZERO, 0.5, &arena, None);
    assert_eq!(player.health, 51.0);
    assert!(player.regen_accumulator < 1.0);
}

// ── Auto-fire ─────────────────────────────────────────────────────────────────

#[test]
fn fires_at_nearest_enemy_when_cooldown_expires() {
    let arena = make_arena();
    let mut player = Player::new(arena.center());
    let target = arena.center() + Vec2::new(0.0, -100.0);
    let events = player.tick(Vec2::ZERO, 0.016, &arena, Some(target));
    assert_eq!(events.len(), 1);
    let PlayerEvent::FireBullet(bullet) = &events[0];
    assert!(approx(bullet.direction.x, 0.0));
    assert!(approx(bullet.direction.y, -1.0));
    assert_eq!(player.fire_cooldown, PLAYER_FIRE_INTERVAL);

    // Cooldown blocks the next volley
    let events = player.tick(Vec2::ZERO, 0.016, &arena, Some(target));
    assert!(events.is_empty());
}

#[test]
fn three_bullet_fan_is_symmetric() {
    let mut player = Player::new(Vec2::new(100.0, 100.0));
    player.bullet_count = 3;
    let bullets = player.fire(Vec2::new(200.0, 100.0));
    assert_eq!(bullets.len(), 3);

    let angles: Vec<f32> = bullets.iter().map(|b| b.direction.angle().to_degrees()).collect();
    assert!(approx(angles[0], -FAN_SPREAD_DEGREES));
    assert!(approx(angles[1], 0.0));
    assert!(approx(angles[2], FAN_SPREAD_DEGREES));
}

#[test]
fn aim_falls_back_to_right_when_target_on_top() {
    let player = Player::new(Vec2::new(100.0, 100.0));
    let bullets = player.fire(Vec2::new(100.5, 100.0));
    assert_eq!(bullets[0].direction, Vec2::RIGHT);
}

#[test]
fn bullets_carry_player_stats() {
    let mut player = Player::new(Vec2::ZERO);
    player.bullet_damage = 1.5;
    player.bullet_scale = 1.3;
    player.pierce_count = 2;
    let bullet = &player.fire(Vec2::new(10.0, 0.0))[0];
    assert_eq!(bullet.damage, 1.5);
    assert_eq!(bullet.pierce_left, 2);
    assert!(approx(bullet.collision_radius(), BULLET_BASE_RADIUS * 1.3));
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_stats_scale_with_difficulty() {
    let base = EnemyKind::Tank.stats(1.0);
    let hard = EnemyKind::Tank.stats(2.0);
    assert_eq!(base.max_hp, 15.0);
    assert_eq!(hard.max_hp, 30.0);
    assert_eq!(base.speed, 45.0);
    assert_eq!(hard.speed, 50.0);
    assert_eq!(base.xp_value, hard.xp_value);
    assert_eq!(base.contact_damage, hard.contact_damage);
}

#[test]
fn chaser_moves_straight_at_target() {
    let mut rng = seeded_rng();
    let arena = make_arena();
    let mut enemy = Enemy::spawn(EnemyKind::Chaser, Vec2::new(100.0, 100.0), 1.0, &mut rng);
    enemy.tick(Vec2::new(300.0, 100.0), 0.1, &arena);
    assert!(approx(enemy.position.x, 110.0));
    assert!(approx(enemy.position.y, 100.0));
}

#[test]
fn drifter_bounces_back_into_arena() {
    let mut rng = seeded_rng();
    let arena = make_arena();
    let mut enemy = Enemy::spawn(EnemyKind::Drifter, Vec2::new(10.0, 300.0), 1.0, &mut rng);
    enemy.velocity = Vec2::new(-enemy.speed, 0.0);
    enemy.tick(arena.center(), 0.016, &arena);
    assert!(enemy.velocity.x > 0.0);
    assert!(approx(enemy.velocity.length(), enemy.speed));
}

#[test]
fn drifter_off_screen_is_not_trapped() {
    let mut rng = seeded_rng();
    let arena = make_arena();
    // Spawned off the left edge already heading in
    let mut enemy = Enemy::spawn(EnemyKind::Drifter, Vec2::new(-40.0, 300.0), 1.0, &mut rng);
    enemy.velocity = Vec2::new(enemy.speed, 0.0);
    let start = enemy.position.x;
    for _ in 0..10 {
        enemy.tick(arena.center(), 0.1, &arena);
    }
    assert!(enemy.position.x > start);
}

#[test]
fn enemies_stay_inside_off_screen_margin() {
    let mut rng = seeded_rng();
    let arena = make_arena();
    let mut enemy = Enemy::spawn(EnemyKind::Sprinter, Vec2::new(-200.0, -200.0), 1.0, &mut rng);
    enemy.tick(Vec2::new(-500.0, -500.0), 0.1, &arena);
    assert!(enemy.position.x >= -ENEMY_SCREEN_MARGIN);
    assert!(enemy.position.y >= -ENEMY_SCREEN_MARGIN);
}

#[test]
fn enemy_hp_clamped_and_flashes() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawn(EnemyKind::Chaser, Vec2::ZERO, 1.0, &mut rng);
    assert!(!enemy.take_damage(1.0));
    assert_eq!(enemy.hp, 2.0);
    assert_eq!(enemy.flash_timer, ENEMY_FLASH_DURATION);
    assert!(enemy.take_damage(10.0));
    assert_eq!(enemy.hp, 0.0);
}

#[test]
fn sprinter_dies_to_single_base_bullet() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawn(EnemyKind::Sprinter, Vec2::ZERO, 1.0, &mut rng);
    assert!(enemy.take_damage(1.0));
}

#[test]
fn knock_back_pushes_away_from_source() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::spawn(EnemyKind::Chaser, Vec2::new(110.0, 100.0), 1.0, &mut rng);
    enemy.knock_back(Vec2::new(100.0, 100.0), CONTACT_KNOCKBACK);
    assert!(approx(enemy.position.x, 140.0));
    assert!(approx(enemy.position.y, 100.0));
}

// ── Bullets & gems ────────────────────────────────────────────────────────────

#[test]
fn bullet_expires_off_screen() {
    let arena = make_arena();
    let mut bullet = Bullet::new(Vec2::new(-35.0, 300.0), Vec2::new(-1.0, 0.0), 1.0, 1.0, 500.0, 0);
    bullet.tick(0.016, &arena);
    assert!(!bullet.alive);
}

#[test]
fn bullet_expires_after_lifetime() {
    let arena = make_arena();
    let mut bullet = Bullet::new(arena.center(), Vec2::RIGHT, 1.0, 1.0, 0.0, 0);
    bullet.tick(BULLET_LIFETIME - 0.1, &arena);
    assert!(bullet.alive);
    bullet.tick(0.2, &arena);
    assert!(!bullet.alive);
}

#[test]
fn bullet_pierce_counts_down() {
    let mut bullet = Bullet::new(Vec2::ZERO, Vec2::RIGHT, 1.0, 1.0, 500.0, 1);
    assert!(!bullet.on_hit_enemy());
    assert!(bullet.on_hit_enemy());
}

#[test]
fn gem_value_at_least_one() {
    let mut rng = seeded_rng();
    let gem = XpGem::spawn(Vec2::ZERO, 0, &mut rng);
    assert_eq!(gem.value, 1);
}

#[test]
fn gem_drift_decays_and_stays_inside() {
    let mut rng = seeded_rng();
    let arena = make_arena();
    let mut gem = XpGem::spawn(Vec2::new(2.0, 2.0), 3, &mut rng);
    let initial = gem.drift_velocity.length();
    assert!((GEM_DRIFT_MIN_SPEED..=GEM_DRIFT_MAX_SPEED).contains(&initial));
    for _ in 0..30 {
        gem.tick(0.05, &arena);
    }
    assert!(gem.drift_velocity.length() < initial);
    assert!(gem.position.x >= GEM_EDGE_INSET && gem.position.y >= GEM_EDGE_INSET);
}
