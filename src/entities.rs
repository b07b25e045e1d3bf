//! All game entity types — pure data, no logic.

/// Maximum number of obstacles alive at the same time.
pub const OBSTACLE_CAPACITY: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Discrete input produced by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Quit,
}

/// Axis-aligned rectangle in playfield coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

// ── Obstacle pool ─────────────────────────────────────────────────────────────

/// One slot of the fixed obstacle pool.  Inactive slots are free for reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    /// Top edge of the player rectangle.
    pub y: i32,
    /// Negative = moving up.
    pub velocity: f32,
    pub airborne: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub obstacles: [Obstacle; OBSTACLE_CAPACITY],
    /// Number of active slots in `obstacles`.
    pub obstacle_count: usize,
    /// Ticks survived.
    pub score: u32,
    /// Horizontal distance every obstacle travels per tick.
    pub obstacle_speed: i32,
    /// Seconds between spawns.
    pub spawn_interval: f32,
    /// Seconds accumulated since the last spawn.
    pub spawn_timer: f32,
    pub level: Level,
    pub status: GameStatus,
}

/// Side effects of a single tick, for the presentation layer to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub jumped: bool,
    pub spawned: bool,
    pub retired: u32,
    pub collided: bool,
}
