use grid_shooter::config::GameConfig;
use grid_shooter::entities::*;

fn world() -> World {
    World::new(&GameConfig::default())
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_spawns_centred_above_floor() {
    let w = world();
    assert_eq!(w.player.x, 380.0); // 800/2 - 40/2
    assert_eq!(w.player.y, 540.0); // 600 - 60
    assert_eq!(w.player.width, 40.0);
    assert_eq!(w.player.height, 20.0);
    assert_eq!(w.player.dx, 0.0);
    assert_eq!(w.player.speed, 5.0);
}

// ── Bullet pool ───────────────────────────────────────────────────────────────

#[test]
fn pool_starts_full_and_inactive() {
    let w = world();
    assert_eq!(w.bullets.capacity(), 20);
    assert_eq!(w.bullets.active_count(), 0);
    assert_eq!(w.bullets.first_free(), Some(0));
    assert!(w.bullets.slots.iter().all(|b| b.width == 5.0 && b.height == 10.0 && b.speed == 7.0));
}

#[test]
fn first_free_scans_in_index_order() {
    let mut w = world();
    w.bullets.slots[0].active = true;
    w.bullets.slots[1].active = true;
    w.bullets.slots[3].active = true;
    assert_eq!(w.bullets.first_free(), Some(2));
}

#[test]
fn first_free_none_when_exhausted() {
    let mut w = world();
    for slot in w.bullets.slots.iter_mut() {
        slot.active = true;
    }
    assert_eq!(w.bullets.first_free(), None);
    assert_eq!(w.bullets.active_count(), 20);
}

// ── Enemy grid ────────────────────────────────────────────────────────────────

#[test]
fn grid_is_row_major_and_active() {
    let w = world();
    assert_eq!(w.enemies.len(), 32);
    assert!(w.enemies.iter().all(|e| e.active));

    assert_eq!((w.enemies[0].x, w.enemies[0].y), (60.0, 50.0));
    assert_eq!((w.enemies[1].x, w.enemies[1].y), (110.0, 50.0)); // + 40 + 10
    assert_eq!((w.enemies[8].x, w.enemies[8].y), (60.0, 80.0)); // next row, + 20 + 10
    let last = &w.enemies[31];
    assert_eq!((last.x, last.y), (410.0, 140.0));
}

#[test]
fn grid_respects_custom_shape() {
    let mut config = GameConfig::default();
    config.enemies.rows = 2;
    config.enemies.cols = 3;
    let enemies = enemy_grid(&config.enemies);
    assert_eq!(enemies.len(), 6);
    assert_eq!(enemies[5].x, 160.0);
    assert_eq!(enemies[5].y, 80.0);
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[test]
fn formation_starts_heading_right() {
    let w = world();
    assert_eq!(w.formation.direction, Direction::Right);
    assert_eq!(w.formation.step(), 1.0);
    assert_eq!(w.formation.descent_step, 20.0);
}

#[test]
fn direction_flip_round_trips() {
    assert_eq!(Direction::Right.flipped(), Direction::Left);
    assert_eq!(Direction::Left.flipped().flipped(), Direction::Left);
    assert_eq!(Direction::Left.sign(), -1.0);
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_is_strict() {
    let a = Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 };
    let touching_right = Rect { x: 10.0, y: 0.0, width: 5.0, height: 5.0 };
    let touching_below = Rect { x: 0.0, y: 10.0, width: 5.0, height: 5.0 };
    let inside = Rect { x: 9.0, y: 9.0, width: 5.0, height: 5.0 };
    assert!(!a.overlaps(&touching_right));
    assert!(!a.overlaps(&touching_below));
    assert!(a.overlaps(&inside));
    assert!(inside.overlaps(&a));
}

// ── World ─────────────────────────────────────────────────────────────────────

#[test]
fn fresh_world_has_no_history() {
    let w = world();
    assert_eq!(w.frame, 0);
    assert_eq!(w.last_fire_ms, None);
    assert_eq!(w.cooldown_ms, 500);
    assert_eq!((w.width, w.height), (800.0, 600.0));
}

#[test]
fn world_clone_is_independent() {
    let original = world();
    let mut cloned = original.clone();
    cloned.player.x = 0.0;
    cloned.enemies[0].active = false;
    cloned.bullets.slots[0].active = true;

    assert_eq!(original.player.x, 380.0);
    assert!(original.enemies[0].active);
    assert!(!original.bullets.slots[0].active);
}

#[test]
#[should_panic(expected = "invalid game config")]
fn world_rejects_empty_pool() {
    let mut config = GameConfig::default();
    config.bullets.pool_size = 0;
    let _ = World::new(&config);
}

#[test]
#[should_panic(expected = "invalid game config")]
fn world_rejects_negative_enemy_size() {
    let mut config = GameConfig::default();
    config.enemies.width = -40.0;
    let _ = World::new(&config);
}
