use dino_runner::compute::*;
use dino_runner::entities::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_state() -> GameState {
    init_state(Level::Easy)
}

fn with_obstacle(mut s: GameState, x: i32) -> GameState {
    s.obstacles[0] = Obstacle { x, y: GROUND_LEVEL, active: true };
    s.obstacle_count = 1;
    s
}

fn active_slots(s: &GameState) -> usize {
    s.obstacles.iter().filter(|o| o.active).count()
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_on_ground() {
    let s = make_state();
    assert_eq!(s.player.x, 50);
    assert_eq!(s.player.y, GROUND_LEVEL);
    assert!(!s.player.airborne);
    assert_eq!(s.player.velocity, 0.0);
}

#[test]
fn init_state_empty_pool_and_score() {
    let s = make_state();
    assert_eq!(active_slots(&s), 0);
    assert_eq!(s.obstacle_count, 0);
    assert_eq!(s.score, 0);
    assert_eq!(s.spawn_timer, 0.0);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn init_state_applies_difficulty() {
    let easy = init_state(Level::Easy);
    assert_eq!((easy.obstacle_speed, easy.spawn_interval), (4, 2.0));
    let medium = init_state(Level::Medium);
    assert_eq!((medium.obstacle_speed, medium.spawn_interval), (7, 1.5));
    let hard = init_state(Level::Hard);
    assert_eq!((hard.obstacle_speed, hard.spawn_interval), (10, 1.0));
    assert_eq!(hard.level, Level::Hard);
}

// ── request_jump / update_player ──────────────────────────────────────────────

#[test]
fn jump_from_ground_sets_launch_velocity() {
    let (s, jumped) = request_jump(&make_state());
    assert!(jumped);
    assert!(s.player.airborne);
    assert_eq!(s.player.velocity, JUMP_VELOCITY);
}

#[test]
fn jump_while_airborne_is_ignored() {
    let (s, _) = request_jump(&make_state());
    let s = update_player(&s);
    let (s2, jumped) = request_jump(&s);
    assert!(!jumped);
    assert_eq!(s2.player.velocity, s.player.velocity);
    assert_eq!(s2.player.y, s.player.y);
}

#[test]
fn first_airborne_step_moves_up_then_applies_gravity() {
    let (s, _) = request_jump(&make_state());
    let s = update_player(&s);
    assert_eq!(s.player.y, 285);
    assert!((s.player.velocity - (JUMP_VELOCITY + GRAVITY)).abs() < 1e-5);
}

#[test]
fn grounded_player_does_not_move() {
    let s = make_state();
    let s2 = update_player(&s);
    assert_eq!(s2.player, s.player);
}

#[test]
fn landing_clamps_to_ground() {
    let mut s = make_state();
    s.player.y = 295;
    s.player.velocity = 10.0;
    s.player.airborne = true;
    let s2 = update_player(&s);
    assert_eq!(s2.player.y, GROUND_LEVEL);
    assert!(!s2.player.airborne);
    assert_eq!(s2.player.velocity, 0.0);
}

#[test]
fn velocity_rises_every_airborne_tick_and_player_lands() {
    let (mut s, _) = request_jump(&make_state());
    let mut ticks = 0;
    while s.player.airborne {
        let before = s.player.velocity;
        s = update_player(&s);
        ticks += 1;
        if s.player.airborne {
            assert!(s.player.velocity > before);
            assert!(s.player.y < GROUND_LEVEL);
        }
        assert!(ticks < 60, "jump never landed");
    }
    assert_eq!(s.player.y, GROUND_LEVEL);
    assert_eq!(ticks, 39);
}

#[test]
fn update_player_does_not_mutate_original() {
    let (s, _) = request_jump(&make_state());
    let _ = update_player(&s);
    assert_eq!(s.player.y, GROUND_LEVEL);
}

// ── update_obstacles ──────────────────────────────────────────────────────────

#[test]
fn obstacles_move_left_by_speed() {
    let s = with_obstacle(make_state(), 100);
    let (s2, retired) = update_obstacles(&s);
    assert_eq!(s2.obstacles[0].x, 96);
    assert_eq!(retired, 0);
    assert_eq!(s2.obstacle_count, 1);
}

#[test]
fn obstacle_retired_once_fully_off_screen() {
    // x=-28 → -32 < -30 → retired
    let s = with_obstacle(make_state(), -28);
    let (s2, retired) = update_obstacles(&s);
    assert!(!s2.obstacles[0].active);
    assert_eq!(retired, 1);
    assert_eq!(s2.obstacle_count, 0);
}

#[test]
fn obstacle_at_left_edge_boundary_kept() {
    // x=-26 → -30, right edge exactly at 0: still alive
    let s = with_obstacle(make_state(), -26);
    let (s2, retired) = update_obstacles(&s);
    assert!(s2.obstacles[0].active);
    assert_eq!(s2.obstacles[0].x, -30);
    assert_eq!(retired, 0);
}

#[test]
fn inactive_slots_do_not_move() {
    let mut s = make_state();
    s.obstacles[3].x = 400;
    let (s2, _) = update_obstacles(&s);
    assert_eq!(s2.obstacles[3].x, 400);
}

// ── spawn_obstacle ────────────────────────────────────────────────────────────

#[test]
fn spawn_places_obstacle_at_right_edge_on_ground() {
    let (s, spawned) = spawn_obstacle(&make_state());
    assert!(spawned);
    assert_eq!(s.obstacles[0], Obstacle { x: PLAYFIELD_WIDTH, y: GROUND_LEVEL, active: true });
    assert_eq!(s.obstacle_count, 1);
}

#[test]
fn spawn_reuses_first_free_slot() {
    let mut s = make_state();
    s.obstacles[0] = Obstacle { x: 10, y: GROUND_LEVEL, active: true };
    s.obstacles[2] = Obstacle { x: 20, y: GROUND_LEVEL, active: true };
    s.obstacle_count = 2;
    let (s2, spawned) = spawn_obstacle(&s);
    assert!(spawned);
    assert!(s2.obstacles[1].active);
    assert_eq!(s2.obstacles[1].x, PLAYFIELD_WIDTH);
    assert_eq!(s2.obstacle_count, 3);
}

#[test]
fn spawn_into_full_pool_is_noop() {
    let mut s = make_state();
    for slot in s.obstacles.iter_mut() {
        *slot = Obstacle { x: 500, y: GROUND_LEVEL, active: true };
    }
    s.obstacle_count = OBSTACLE_CAPACITY;
    let (s2, spawned) = spawn_obstacle(&s);
    assert!(!spawned);
    assert_eq!(s2.obstacle_count, OBSTACLE_CAPACITY);
    assert!(s2.obstacles.iter().all(|o| o.x == 500));
}

// ── collision ─────────────────────────────────────────────────────────────────

#[test]
fn overlapping_rects_collide() {
    let player = Rect { x: 50, y: 300, w: 50, h: 50 };
    let obstacle = Rect { x: 60, y: 300, w: 30, h: 50 };
    assert!(rects_overlap(&player, &obstacle));
    assert!(rects_overlap(&obstacle, &player));
}

#[test]
fn separated_rects_do_not_collide() {
    let player = Rect { x: 50, y: 300, w: 50, h: 50 };
    let obstacle = Rect { x: 120, y: 300, w: 30, h: 50 };
    assert!(!rects_overlap(&player, &obstacle));
    assert!(!rects_overlap(&obstacle, &player));
}

#[test]
fn touching_edges_do_not_collide() {
    let player = Rect { x: 50, y: 300, w: 50, h: 50 };
    let right = Rect { x: 100, y: 300, w: 30, h: 50 };
    let above = Rect { x: 50, y: 250, w: 50, h: 50 };
    assert!(!rects_overlap(&player, &right));
    assert!(!rects_overlap(&player, &above));
}

#[test]
fn airborne_player_clears_ground_obstacle() {
    let mut s = with_obstacle(make_state(), 60);
    s.player.y = 240; // bottom edge at 290, above the obstacle top
    assert!(!check_collision(&s));
    s.player.y = 260;
    assert!(check_collision(&s));
}

#[test]
fn inactive_obstacle_never_collides() {
    let mut s = with_obstacle(make_state(), 60);
    s.obstacles[0].active = false;
    assert!(!check_collision(&s));
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn score_counts_survived_ticks() {
    let mut s = make_state();
    for _ in 0..50 {
        let (next, events) = advance(&s, 0.01, false);
        assert!(!events.collided);
        s = next;
    }
    assert_eq!(s.score, 50);
}

#[test]
fn spawn_waits_until_interval_exceeded() {
    // Easy interval 2.0: timer 1.0, 2.0 (not greater), then 3.0 → spawn
    let s = make_state();
    let (s, e1) = advance(&s, 1.0, false);
    let (s, e2) = advance(&s, 1.0, false);
    assert!(!e1.spawned && !e2.spawned);
    assert_eq!(s.spawn_timer, 2.0);
    let (s, e3) = advance(&s, 1.0, false);
    assert!(e3.spawned);
    assert_eq!(s.spawn_timer, 0.0);
    assert_eq!(s.obstacle_count, 1);
    assert_eq!(s.obstacles[0].x, PLAYFIELD_WIDTH);
}

#[test]
fn advance_reports_jump_once() {
    let s = make_state();
    let (s, e1) = advance(&s, 0.0, true);
    assert!(e1.jumped);
    assert_eq!(s.player.y, 285);
    let (_, e2) = advance(&s, 0.0, true);
    assert!(!e2.jumped);
}

#[test]
fn collision_ends_game_without_scoring() {
    let s = with_obstacle(make_state(), 60);
    let (s2, events) = advance(&s, 0.0, false);
    assert!(events.collided);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.score, 0);
}

#[test]
fn finished_game_does_not_advance() {
    let s = with_obstacle(make_state(), 60);
    let (over, _) = advance(&s, 0.0, false);
    let (again, events) = advance(&over, 5.0, true);
    assert_eq!(events, TickEvents::default());
    assert_eq!(again.score, over.score);
    assert_eq!(again.obstacles, over.obstacles);
    assert_eq!(again.player, over.player);
}

#[test]
fn standing_still_hits_incoming_obstacle() {
    // Hard speed 10: x=200 reaches the player on tick 11
    let s = with_obstacle(init_state(Level::Hard), 200);
    let mut s = s;
    let mut ticks = 0;
    loop {
        let (next, events) = advance(&s, 0.0, false);
        s = next;
        ticks += 1;
        if events.collided {
            break;
        }
    }
    assert_eq!(ticks, 11);
    assert_eq!(s.score, 10);
}

#[test]
fn jumping_clears_incoming_obstacle() {
    let mut s = with_obstacle(init_state(Level::Hard), 200);
    let mut retired = 0;
    for tick in 0..40 {
        let (next, events) = advance(&s, 0.0, tick == 0);
        assert!(!events.collided, "collided on tick {}", tick + 1);
        retired += events.retired;
        s = next;
    }
    assert_eq!(s.score, 40);
    assert_eq!(retired, 1);
    assert!(!s.player.airborne);
}

#[test]
fn pool_never_exceeds_capacity() {
    // dt=3.0 spawns every tick; the first obstacle reaches the player long
    // after the pool has filled up.
    let mut s = make_state();
    for tick in 1..=150 {
        let (next, events) = advance(&s, 3.0, false);
        assert!(!events.collided);
        assert_eq!(events.spawned, tick <= OBSTACLE_CAPACITY);
        s = next;
        assert!(s.obstacle_count <= OBSTACLE_CAPACITY);
    }
    assert_eq!(s.obstacle_count, OBSTACLE_CAPACITY);
    assert_eq!(active_slots(&s), OBSTACLE_CAPACITY);
}

#[test]
fn random_play_keeps_pool_consistent() {
    let mut rng = StdRng::seed_from_u64(42);
    for level in [Level::Easy, Level::Medium, Level::Hard] {
        let mut s = init_state(level);
        let mut ticks = 0u32;
        while s.status == GameStatus::Playing && ticks < 3000 {
            let dt = rng.gen_range(0.0..2.5);
            let jump = rng.gen_bool(0.1);
            let (next, _) = advance(&s, dt, jump);
            s = next;
            ticks += 1;
            assert!(s.obstacle_count <= OBSTACLE_CAPACITY);
            assert_eq!(s.obstacle_count, active_slots(&s));
            assert!(s.player.y <= GROUND_LEVEL);
        }
        let expected = if s.status == GameStatus::GameOver { ticks - 1 } else { ticks };
        assert_eq!(s.score, expected);
    }
}
