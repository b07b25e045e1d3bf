//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`.  Nothing here performs
//! I/O or can fail; callers validate inputs (difficulty, names) beforehand.

use crate::difficulty::profile;
use crate::entities::{
    GameState, GameStatus, Level, Obstacle, Player, Rect, TickEvents, OBSTACLE_CAPACITY,
};

// ── Playfield ────────────────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: i32 = 800;
pub const PLAYFIELD_HEIGHT: i32 = 400;
/// Top edge of a grounded player or obstacle.
pub const GROUND_LEVEL: i32 = 300;

pub const PLAYER_X: i32 = 50;
pub const PLAYER_WIDTH: i32 = 50;
pub const PLAYER_HEIGHT: i32 = 50;

pub const OBSTACLE_WIDTH: i32 = 30;
pub const OBSTACLE_HEIGHT: i32 = 50;

// ── Jump physics ─────────────────────────────────────────────────────────────

/// Vertical velocity applied on take-off (upward).
pub const JUMP_VELOCITY: f32 = -15.0;
/// Added to vertical velocity every airborne tick.
pub const GRAVITY: f32 = 0.8;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a given level.
pub fn init_state(level: Level) -> GameState {
    let preset = profile(level);
    GameState {
        player: Player {
            x: PLAYER_X,
            y: GROUND_LEVEL,
            velocity: 0.0,
            airborne: false,
        },
        obstacles: [Obstacle::default(); OBSTACLE_CAPACITY],
        obstacle_count: 0,
        score: 0,
        obstacle_speed: preset.speed,
        spawn_interval: preset.spawn_interval_secs,
        spawn_timer: 0.0,
        level,
        status: GameStatus::Playing,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Start a jump if the player is on the ground.  Returns the new state and
/// whether a jump actually started.
pub fn request_jump(state: &GameState) -> (GameState, bool) {
    if state.player.airborne {
        return (state.clone(), false);
    }
    let player = Player {
        airborne: true,
        velocity: JUMP_VELOCITY,
        ..state.player
    };
    (GameState { player, ..state.clone() }, true)
}

/// One Euler step of the jump arc.  Position moves by the velocity truncated
/// toward zero, then gravity is applied; landing clamps to the ground.
pub fn update_player(state: &GameState) -> GameState {
    let p = state.player;
    if !p.airborne {
        return state.clone();
    }

    let y = p.y + p.velocity as i32;
    let velocity = p.velocity + GRAVITY;

    let player = if y >= GROUND_LEVEL {
        Player {
            y: GROUND_LEVEL,
            velocity: 0.0,
            airborne: false,
            ..p
        }
    } else {
        Player { y, velocity, ..p }
    };

    GameState { player, ..state.clone() }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// Move every active obstacle left by the session speed and retire the ones
/// that have fully left the playfield.  Returns the number retired.
pub fn update_obstacles(state: &GameState) -> (GameState, u32) {
    let mut next = state.clone();
    let mut retired = 0;

    for slot in next.obstacles.iter_mut().filter(|o| o.active) {
        slot.x -= state.obstacle_speed;
        if slot.x < -OBSTACLE_WIDTH {
            slot.active = false;
            retired += 1;
        }
    }
    next.obstacle_count = next.obstacle_count.saturating_sub(retired as usize);

    (next, retired)
}

/// Activate an obstacle at the right edge in the first free slot.
/// A full pool is a silent no-op.
pub fn spawn_obstacle(state: &GameState) -> (GameState, bool) {
    if state.obstacle_count >= OBSTACLE_CAPACITY {
        return (state.clone(), false);
    }

    let mut next = state.clone();
    match next.obstacles.iter_mut().find(|o| !o.active) {
        Some(slot) => {
            *slot = Obstacle {
                x: PLAYFIELD_WIDTH,
                y: GROUND_LEVEL,
                active: true,
            };
            next.obstacle_count += 1;
            (next, true)
        }
        None => (next, false),
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

pub fn player_rect(player: &Player) -> Rect {
    Rect { x: player.x, y: player.y, w: PLAYER_WIDTH, h: PLAYER_HEIGHT }
}

pub fn obstacle_rect(obstacle: &Obstacle) -> Rect {
    Rect { x: obstacle.x, y: obstacle.y, w: OBSTACLE_WIDTH, h: OBSTACLE_HEIGHT }
}

/// Strict AABB overlap; touching edges do not collide.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

pub fn check_collision(state: &GameState) -> bool {
    let player = player_rect(&state.player);
    state
        .obstacles
        .iter()
        .filter(|o| o.active)
        .any(|o| rects_overlap(&player, &obstacle_rect(o)))
}

// ── Per-tick advance ─────────────────────────────────────────────────────────

/// Advance the simulation by one tick of `dt` seconds.
///
/// Order: jump → physics → obstacle movement → spawn → collision → score.
/// A collision sets `GameOver` and leaves the score untouched; advancing a
/// finished state returns it unchanged.
pub fn advance(state: &GameState, dt: f32, jump_requested: bool) -> (GameState, TickEvents) {
    let mut events = TickEvents::default();
    if state.status == GameStatus::GameOver {
        return (state.clone(), events);
    }

    // ── 1. Jump ──────────────────────────────────────────────────────────────
    let state = if jump_requested {
        let (next, jumped) = request_jump(state);
        events.jumped = jumped;
        next
    } else {
        state.clone()
    };

    // ── 2. Physics ───────────────────────────────────────────────────────────
    let state = update_player(&state);

    // ── 3. Obstacles ─────────────────────────────────────────────────────────
    let (state, retired) = update_obstacles(&state);
    events.retired = retired;

    // ── 4. Spawn ─────────────────────────────────────────────────────────────
    let timer = state.spawn_timer + dt;
    let state = if timer > state.spawn_interval {
        let (next, spawned) = spawn_obstacle(&state);
        events.spawned = spawned;
        GameState { spawn_timer: 0.0, ..next }
    } else {
        GameState { spawn_timer: timer, ..state }
    };

    // ── 5. Collision ─────────────────────────────────────────────────────────
    if check_collision(&state) {
        events.collided = true;
        return (
            GameState {
                status: GameStatus::GameOver,
                ..state
            },
            events,
        );
    }

    // ── 6. Score ─────────────────────────────────────────────────────────────
    (GameState { score: state.score + 1, ..state }, events)
}
